//! bottom-buttons — a reusable positive/negative button bar with a busy state,
//! hosted on a small demo screen.
//!
//! Run with:  `RUST_LOG=debug bottom-buttons`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("bottom-buttons v{} starting", env!("CARGO_PKG_VERSION"));

    buttons_host::run().map_err(Into::into)
}
