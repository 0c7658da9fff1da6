//! Logging initialization for embedding hosts.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize tracing with an env-controlled filter (`RUST_LOG`), defaulting
/// to `info`. Call once per process; hosts that already installed a
/// subscriber should skip this.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;
    Ok(())
}
