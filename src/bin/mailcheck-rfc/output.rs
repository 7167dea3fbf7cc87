#[cfg(any(feature = "with-serde", feature = "with-csv"))]
use anyhow::Context;
use anyhow::{Result, bail};

use crate::args::Cli;
use mailcheck_rfc::{ValidationOutcome, Verdict};

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
pub struct OutputRow {
    pub address: String,
    pub valid: bool,
    #[cfg_attr(feature = "with-serde", serde(flatten))]
    pub outcome: ValidationOutcome,
}

impl OutputRow {
    pub fn new(address: impl Into<String>, outcome: ValidationOutcome) -> Self {
        Self {
            address: address.into(),
            valid: outcome.is_valid(),
            outcome,
        }
    }
}

pub fn write_reports(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => write_human(rows),
        "json" => write_json(rows, cli),
        "ndjson" => write_ndjson(rows, cli),
        "csv" => write_csv(rows, cli),
        other => bail!("unknown --format '{other}', use: human|json|ndjson|csv"),
    }
}

pub fn any_invalid(rows: &[OutputRow]) -> bool {
    rows.iter().any(|row| !row.valid)
}

fn write_human(rows: &[OutputRow]) -> Result<()> {
    for row in rows {
        match row.outcome.verdict() {
            Verdict::Valid => println!("[OK]      {}", row.address),
            Verdict::Invalid(error) => {
                println!("[INVALID] {} :: [{}] {error}", row.address, error.code())
            }
            Verdict::RejectedWarnings => {
                println!("[REJECTED] {} :: warnings not allowed", row.address)
            }
        }
        for warning in row.outcome.warnings() {
            println!("          warning: {warning}");
        }
    }
    Ok(())
}

#[cfg(feature = "with-serde")]
fn write_json(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    let s = serde_json::to_string_pretty(rows)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, s.as_bytes())?;
    } else {
        println!("{s}");
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=json requires the 'with-serde' feature")
}

#[cfg(feature = "with-serde")]
fn write_ndjson(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut buf = Vec::new();
        for row in rows {
            let line = serde_json::to_string(row)?;
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        write_all_atomically(path, &buf)?;
    } else {
        for row in rows {
            println!("{}", serde_json::to_string(row)?);
        }
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=ndjson requires the 'with-serde' feature")
}

#[cfg(feature = "with-csv")]
const CSV_HEADER: [&str; 6] = ["address", "valid", "status", "error_code", "error", "warnings"];

#[cfg(feature = "with-csv")]
fn write_csv(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(CSV_HEADER)?;
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        let data = wtr.into_inner()?;
        write_all_atomically(path, &data)?;
    } else {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        wtr.write_record(CSV_HEADER)?;
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        wtr.flush()?;
    }
    Ok(())
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=csv requires the 'with-csv' feature")
}

#[cfg(feature = "with-csv")]
fn csv_record(row: &OutputRow) -> Vec<String> {
    let (status, code, error) = match row.outcome.verdict() {
        Verdict::Valid => ("valid", String::new(), String::new()),
        Verdict::Invalid(error) => ("invalid", error.code().to_string(), error.to_string()),
        Verdict::RejectedWarnings => ("rejected_warnings", String::new(), String::new()),
    };
    let warnings = row
        .outcome
        .warnings()
        .iter()
        .map(|w| w.code().to_string())
        .collect::<Vec<_>>()
        .join("|");

    vec![
        row.address.clone(),
        row.valid.to_string(),
        status.to_string(),
        code,
        error,
        warnings,
    ]
}

#[cfg(any(feature = "with-serde", feature = "with-csv"))]
fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcheck_rfc::{EmailValidation, RfcValidation};

    fn row(address: &str) -> OutputRow {
        let outcome = RfcValidation::new().validate(address).unwrap();
        OutputRow::new(address, outcome)
    }

    #[test]
    fn any_invalid_tracks_verdicts() {
        assert!(!any_invalid(&[row("user@example.com")]));
        assert!(any_invalid(&[row("user@example.com"), row("us..er@example.com")]));
    }

    #[cfg(feature = "with-serde")]
    #[test]
    fn json_row_shape() {
        let value = serde_json::to_value(row("user@localhost")).unwrap();
        assert_eq!(value["address"], "user@localhost");
        assert_eq!(value["valid"], true);
        assert_eq!(value["verdict"]["status"], "valid");
        assert_eq!(value["warnings"][0]["code"], 9);
    }

    #[cfg(feature = "with-csv")]
    #[test]
    fn csv_record_for_invalid_address() {
        let record = csv_record(&row("us..er@example.com"));
        assert_eq!(record[1], "false");
        assert_eq!(record[2], "invalid");
        assert_eq!(record[3], "132");
        assert_eq!(record[4], "consecutive dots");
    }
}
