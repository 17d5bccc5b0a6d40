/// Widget entry point: resolve settings, render the target once, optionally
/// poll and request an observation
use anyhow::Context;
use asteroid_tracker::clients::TomClient;
use asteroid_tracker::config::{resolve, AppConfig};
use asteroid_tracker::domain::SubmissionOutcome;
use asteroid_tracker::services::{StatusViewModel, SubmissionController};
use asteroid_tracker::view::ConsoleView;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let app_config = AppConfig::from_env();

    // Settings are fatal: no partial widget
    let raw = std::fs::read_to_string(&app_config.settings_path)
        .with_context(|| format!("reading settings from {}", app_config.settings_path))?;
    let config = Arc::new(resolve(&raw).context("invalid widget settings")?);
    info!(base_url = %config.base_url, target_id = config.target_id, "Configuration loaded successfully");

    let client = Arc::new(TomClient::new(app_config.http_timeout)?);

    let status = StatusViewModel::new(config.clone(), client.clone(), ConsoleView::new());
    let _ = status.update().await;

    if let Some(email) = &app_config.observe_email {
        let form = SubmissionController::new(config.clone(), client.clone(), ConsoleView::new());
        match form.submit(email).await {
            SubmissionOutcome::Succeeded => info!("Observation request submitted"),
            SubmissionOutcome::Failed(reason) => error!("Observation request failed: {}", reason),
            SubmissionOutcome::Ignored => {}
        }
    }

    if app_config.poll_every_seconds > 0 {
        let interval = app_config.poll_every_seconds;
        info!("Polling target status (interval: {}s)", interval);
        loop {
            tokio::time::sleep(Duration::from_secs(interval)).await;
            let _ = status.update().await;
        }
    }

    Ok(())
}
