//! UrBackup client tray monitor entry point.

mod app;
mod config;
mod dialog;
mod lifecycle;
mod tray_backend;
mod ui;

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use urbackup_monitor_status::{Platform, PollError, Poller};

use crate::dialog::Fatal;

fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting UrBackup monitor"
    );

    let platform = Platform::detect();
    if !platform.is_supported() {
        dialog::exit_with(Fatal::UnsupportedPlatform);
    }

    let config = config::Config::load();
    tracing::info!(
        platform = platform.as_str(),
        tool = %config.control_tool,
        interval_secs = config.poll_interval_secs,
        "configuration loaded"
    );

    let rt = tokio::runtime::Runtime::new()?;

    // The window only opens once the control utility is known to exist.
    let initial = match rt.block_on(Poller::new(config.control_tool.clone()).poll()) {
        Ok(status) => status,
        Err(PollError::ToolMissing(tool)) => {
            tracing::error!(%tool, "control utility not found");
            dialog::exit_with(Fatal::ControlToolMissing);
        }
        Err(e) => {
            tracing::warn!(error = %e, "startup poll failed");
            None
        }
    };
    tracing::info!(known = initial.is_some(), "startup status fetched");

    app::run(config, &rt, initial)?;

    rt.shutdown_timeout(Duration::from_secs(1));
    tracing::info!("monitor shut down cleanly");
    Ok(())
}
