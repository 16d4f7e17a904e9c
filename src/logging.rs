//! Diagnostic logging to stderr via `tracing`.
//!
//! `RUST_LOG` wins when set; otherwise `--verbose` selects debug output for this
//! crate and the default shows warnings only.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "delivery_price=warn";
const VERBOSE_FILTER: &str = "delivery_price=debug";

pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }
}

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
