//! pbar — a statusbar of stacked progress bars, driven over a Unix socket.
//!
//! Run with:  `RUST_LOG=info pbar`
//! Update with: `echo "widget_tell progress 42" | socat - UNIX-CONNECT:$XDG_RUNTIME_DIR/pbar/pbar.sock`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("pbar v{} starting", env!("CARGO_PKG_VERSION"));

    pbar_host::run().map_err(Into::into)
}
