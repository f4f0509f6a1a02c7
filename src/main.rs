use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;

use lox_scan::driver::{Config, Driver, EX_USAGE, OutputFormat};
use lox_scan::repl;

#[derive(Parser, Debug)]
#[command(name = "lox-scan", about = "Scan Lox source into tokens")]
struct Cli {
    /// Lox script to scan (omit for an interactive prompt)
    script: Option<PathBuf>,

    /// Token output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Render diagnostics with source snippets
    #[arg(long)]
    pretty: bool,

    /// Stop printing diagnostics after this many per run
    #[arg(long, value_name = "N")]
    max_errors: Option<usize>,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            format: self.format,
            pretty: self.pretty,
            max_errors: self.max_errors,
        }
    }
}

fn main() -> Result<ExitCode> {
    lox_scan::init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            tracing::debug!(error = %e, "rejected command line");
            eprintln!("Usage: lox-scan [script]");
            return Ok(ExitCode::from(EX_USAGE));
        }
    };

    let mut driver = Driver::new(io::stdout().lock(), io::stderr(), cli.config());
    match cli.script {
        Some(ref path) => {
            let outcome = driver.run_file(path)?;
            Ok(outcome.into())
        }
        None => {
            repl::run_repl(&mut driver, io::stdin().lock())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
