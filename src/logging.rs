//! Logging setup.
//!
//! Logs go to stderr so that stdout only ever carries the report. The
//! default filter keeps the crate at `warn`; `--verbose` raises it to
//! `debug`, and `RUST_LOG` overrides both.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "repo_stats=warn,reqwest=warn";
const VERBOSE_FILTER: &str = "repo_stats=debug,reqwest=warn";

pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }
}

pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    // A subscriber may already be installed (e.g. by an embedding test).
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}
