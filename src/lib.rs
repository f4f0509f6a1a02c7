pub mod driver;
pub mod error;
pub mod repl;
pub mod reporter;
pub mod scanner;

// Re-export the common entry points for convenience
pub use driver::{Config, Driver, OutputFormat, Outcome};
pub use error::{ScanError, ScanErrorKind};
pub use scanner::{Scanned, scan};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=lox_scan=debug`;
/// logs go to stderr so token output on stdout stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
