//! Log output setup
//!
//! Everything logs through `tracing`. The subscriber writes to stderr so
//! the `info` listing on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "iconforge=debug,info"
    } else {
        "info"
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the level chosen
/// by `--debug`.
pub fn init(debug: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(debug)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}
