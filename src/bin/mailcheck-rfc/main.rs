mod args;
mod output;

use anyhow::{Context, Result};
use mailcheck_rfc::lexer::decode_lossy;
use mailcheck_rfc::{EmailValidation, Validation};

use std::io::{self, BufRead};

use args::{Cli, Commands};
use output::OutputRow;

fn check(validation: &Validation, address: &str) -> Result<OutputRow> {
    let outcome = validation
        .validate(address)
        .with_context(|| format!("validate {address}"))?;
    Ok(OutputRow::new(address, outcome))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rows: Vec<OutputRow> = Vec::new();

    if cli.stdin {
        let validation = cli.validation(&[])?;
        for line in io::stdin().lock().split(b'\n') {
            let bytes = line.context("read stdin")?;
            let address = decode_lossy(&bytes);
            let address = address.trim_end_matches('\r');
            if address.is_empty() {
                continue;
            }
            rows.push(check(&validation, address)?);
        }
    } else if let Some(Commands::Validate { validations, email }) = &cli.cmd {
        let validation = cli.validation(validations)?;
        rows.push(check(&validation, email)?);
    } else {
        Cli::clap_command().print_help()?;
        println!();
        return Ok(());
    }

    output::write_reports(&rows, &cli)?;

    // exit codes: 0 all valid, 2 some invalid, 1 fatal
    if output::any_invalid(&rows) {
        std::process::exit(2);
    }
    Ok(())
}
