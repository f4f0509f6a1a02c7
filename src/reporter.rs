use std::fmt::Display;
use std::io::{self, Write};

use crate::error::ScanError;

/// Writes diagnostics to a stream and remembers whether any were reported.
///
/// The error status is only ever cleared by [`Reporter::reset`], which the
/// prompt loop calls between lines. A file run reads it once at the end.
pub struct Reporter<W: Write> {
    out: W,
    had_error: bool,
    pretty: bool,
    max_errors: Option<usize>,
    written: usize,
    suppressed: usize,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            had_error: false,
            pretty: false,
            max_errors: None,
            written: 0,
            suppressed: 0,
        }
    }

    /// Render scan errors as miette graphical reports.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Stop writing diagnostics after `max` per run. Errors past the cap
    /// still count towards [`Reporter::had_error`].
    pub fn max_errors(mut self, max: Option<usize>) -> Self {
        self.max_errors = max;
        self
    }

    pub fn report(&mut self, line: usize, location: &str, message: impl Display) -> io::Result<()> {
        self.had_error = true;
        if self.at_cap() {
            self.suppressed += 1;
            return Ok(());
        }
        self.written += 1;
        writeln!(self.out, "[line {line}] Error{location}: {message}")
    }

    pub fn error(&mut self, line: usize, message: impl Display) -> io::Result<()> {
        self.report(line, "", message)
    }

    pub fn scan_error(&mut self, err: ScanError) -> io::Result<()> {
        if !self.pretty {
            return self.report(err.line, &err.location, &err.kind);
        }
        self.had_error = true;
        if self.at_cap() {
            self.suppressed += 1;
            return Ok(());
        }
        self.written += 1;
        writeln!(self.out, "{:?}", miette::Report::new(err))
    }

    /// Close out one run: note how many diagnostics the cap swallowed.
    pub fn finish_run(&mut self) -> io::Result<()> {
        let suppressed = std::mem::take(&mut self.suppressed);
        self.written = 0;
        if suppressed > 0 {
            tracing::debug!(suppressed, "diagnostics suppressed by cap");
            writeln!(self.out, "... {suppressed} more error(s) not shown")?;
        }
        self.out.flush()
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn reset(&mut self) {
        self.had_error = false;
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn at_cap(&self) -> bool {
        self.max_errors.is_some_and(|max| self.written >= max)
    }
}
