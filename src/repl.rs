use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::driver::Driver;

/// Run the interactive prompt until end of input. Each line is scanned on
/// its own: the error status is cleared after every line.
pub fn run_repl<R, O, E>(driver: &mut Driver<O, E>, mut input: R) -> Result<()>
where
    R: BufRead,
    O: Write,
    E: Write,
{
    loop {
        driver.prompt()?;

        let mut buf = Vec::new();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("read line from stdin")?;
        if read == 0 {
            break; // Ctrl-D / EOF
        }

        let line = String::from_utf8_lossy(&buf);
        driver.run("<stdin>", strip_line_ending(&line))?;
        driver.reset_errors();
    }
    tracing::debug!("end of input");
    Ok(())
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}
