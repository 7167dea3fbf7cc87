use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use mailcheck_rfc::{
    MultipleValidationWithAnd, NoRfcWarningsValidation, ParseOptions, RfcValidation,
    SpoofCheckValidation, Validation,
};

#[derive(Parser)]
#[command(name = "mailcheck-rfc", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// read addresses from stdin (one per line)
    #[arg(long)]
    pub stdin: bool,

    /// write report to file (json/ndjson/csv per --format)
    #[arg(long)]
    pub out: Option<String>,

    /// format: human|json|ndjson|csv
    #[arg(long, default_value = "human")]
    pub format: String,

    /// strategy: rfc|no-warnings|spoof|dns (repeatable, combined with AND)
    #[arg(long = "validation", default_value = "rfc")]
    pub validations: Vec<String>,

    /// keep running the remaining strategies after a failure
    #[arg(long)]
    pub allow_all_errors: bool,

    /// total length above which warning 66 is emitted
    #[arg(long)]
    pub max_length: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    Validate {
        /// strategies for this address (override the global option)
        #[arg(long = "validation")]
        validations: Vec<String>,
        email: String,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    pub fn parse_options(&self) -> ParseOptions {
        match self.max_length {
            Some(max) => ParseOptions::new().with_max_total_length(max),
            None => ParseOptions::new(),
        }
    }

    /// Build the configured strategy; `overrides` wins when non-empty.
    pub fn validation(&self, overrides: &[String]) -> Result<Validation> {
        let names = if overrides.is_empty() {
            &self.validations
        } else {
            overrides
        };
        let options = self.parse_options();
        let mut strategies = names
            .iter()
            .map(|name| validation_from_str(name, &options))
            .collect::<Result<Vec<_>>>()?;

        if strategies.len() == 1 && !self.allow_all_errors {
            if let Some(single) = strategies.pop() {
                return Ok(single);
            }
        }
        let mut combined = MultipleValidationWithAnd::new(strategies)?;
        if self.allow_all_errors {
            combined = combined.allow_all_errors();
        }
        Ok(combined.into())
    }
}

pub fn validation_from_str(name: &str, options: &ParseOptions) -> Result<Validation> {
    match name {
        "rfc" => Ok(RfcValidation::with_options(options.clone()).into()),
        "no-warnings" => Ok(NoRfcWarningsValidation::with_options(options.clone()).into()),
        "spoof" => Ok(SpoofCheckValidation::new()?.into()),
        "dns" => dns_validation(options),
        other => bail!("unknown --validation '{other}', use: rfc|no-warnings|spoof|dns"),
    }
}

#[cfg(feature = "with-dns")]
fn dns_validation(options: &ParseOptions) -> Result<Validation> {
    use mailcheck_rfc::DnsCheckValidation;

    let dns = DnsCheckValidation::from_system_conf()?.with_options(options.clone());
    Ok(dns.into())
}

#[cfg(not(feature = "with-dns"))]
fn dns_validation(_: &ParseOptions) -> Result<Validation> {
    bail!("--validation dns requires the 'with-dns' feature")
}
