//! Tracing setup shared by both binaries. Everything goes to stderr; stdout is
//! reserved for results.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber. `RUST_LOG` takes precedence over `default`.
pub fn init_tracing(default: &str) {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

/// Filter for the pipe form: debug diagnostics from brandsync, warnings from
/// everything else.
pub const EXTERNAL_DEFAULT_FILTER: &str =
    "warn,brandsync_core=debug,brandsync_aws=debug,brandsync_cli=debug,brandsync_external=debug";

pub fn cli_default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,brandsync_core=debug,brandsync_aws=debug,brandsync_cli=debug,brandsync=debug"
    } else {
        "warn"
    }
}
