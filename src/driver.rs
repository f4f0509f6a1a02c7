use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use crate::reporter::Reporter;
use crate::scanner;

/// Exit status for a malformed command line.
pub const EX_USAGE: u8 = 64;
/// Exit status when a script contained lexical errors.
pub const EX_DATAERR: u8 = 65;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `KIND lexeme literal`, one token per line
    #[default]
    Text,
    /// One JSON object per token per line
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub format: OutputFormat,
    pub pretty: bool,
    pub max_errors: Option<usize>,
}

/// Verdict of a file run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    DataError,
}

impl Outcome {
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::DataError => EX_DATAERR,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.code())
    }
}

/// Runs source through the scanner, printing tokens to `out` and
/// diagnostics through a [`Reporter`] on `err`.
pub struct Driver<O: Write, E: Write> {
    out: O,
    reporter: Reporter<E>,
    config: Config,
}

impl<O: Write, E: Write> Driver<O, E> {
    pub fn new(out: O, err: E, config: Config) -> Self {
        let reporter = Reporter::new(err)
            .pretty(config.pretty)
            .max_errors(config.max_errors);
        Self {
            out,
            reporter,
            config,
        }
    }

    /// Scan one unit of source and print what was found. `name` labels the
    /// source in pretty diagnostics.
    pub fn run(&mut self, name: &str, source: &str) -> Result<()> {
        let scanned = scanner::scan(source);
        tracing::debug!(
            name,
            tokens = scanned.tokens.len(),
            errors = scanned.errors.len(),
            "run"
        );

        for err in scanned.errors {
            let err = if self.config.pretty {
                err.with_source_code(name, source)
            } else {
                err
            };
            self.reporter
                .scan_error(err)
                .context("write diagnostic")?;
        }
        self.reporter.finish_run().context("flush diagnostics")?;

        for token in &scanned.tokens {
            let written = match self.config.format {
                OutputFormat::Text => writeln!(self.out, "{token}"),
                OutputFormat::Json => {
                    let json = serde_json::to_string(token).context("serialize token to JSON")?;
                    writeln!(self.out, "{json}")
                }
            };
            written.context("write token")?;
        }
        self.out.flush().context("flush output")
    }

    /// Scan a whole file once. Lexical errors turn into
    /// [`Outcome::DataError`]; failing to read the file is fatal.
    pub fn run_file(&mut self, path: &Path) -> Result<Outcome> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read source file '{}'", path.display()))?;
        // Invalid UTF-8 becomes U+FFFD and is reported by the scanner.
        let source = String::from_utf8_lossy(&bytes);
        self.run(&path.display().to_string(), &source)?;
        if self.had_error() {
            Ok(Outcome::DataError)
        } else {
            Ok(Outcome::Success)
        }
    }

    pub fn had_error(&self) -> bool {
        self.reporter.had_error()
    }

    pub fn reset_errors(&mut self) {
        self.reporter.reset();
    }

    pub(crate) fn prompt(&mut self) -> Result<()> {
        write!(self.out, "> ").context("write prompt")?;
        self.out.flush().context("flush stdout")
    }

    pub fn into_parts(self) -> (O, E) {
        (self.out, self.reporter.into_inner())
    }
}
