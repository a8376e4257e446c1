//! OS signal handling.

use crate::lifecycle::Shutdown;

/// Trigger `shutdown` on the first Ctrl+C.
pub async fn shutdown_on_ctrl_c(shutdown: &Shutdown) -> std::io::Result<()> {
    tokio::signal::ctrl_c().await?;
    tracing::info!("Ctrl+C received");
    shutdown.trigger();
    Ok(())
}
