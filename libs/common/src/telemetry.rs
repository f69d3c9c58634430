//! Tracing subscriber set-up shared by the service binaries

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber; `RUST_LOG` overrides the `info` default
pub fn init(service: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("setting default subscriber failed: {}", e))?;

    tracing::info!(service, "Tracing initialized");
    Ok(())
}
