use std::time::Duration;

use core_lme::setup_logging;
use cron_lme::{CycleOutcome, ScheduleState, poll_once};

#[tokio::main]
async fn main() {
    setup_logging("cron_lme=debug");

    // Load environment variables from .env file, if it exists
    dotenvy::dotenv().ok();

    let poll_interval = {
        let poll_interval_s = std::env::var("CRON_POLL_INTERVAL_S")
            .unwrap_or_else(|_| "300".to_string())
            .parse::<u64>()
            .expect("CRON_POLL_INTERVAL_S must be a valid number");

        tracing::info!(
            "Scheduled-trigger service started, polling every {} seconds",
            poll_interval_s
        );
        Duration::from_secs(poll_interval_s)
    };

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to build HTTP client");

    let api_base_url = {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid number");
        format!("http://{}:{}", host, port)
    };

    tracing::info!("API server URL: {}", api_base_url);

    let mut state = ScheduleState::default();

    // Poll loop: failures are logged and retried on the next tick.
    loop {
        match poll_once(&http_client, &api_base_url, &mut state).await {
            Ok(CycleOutcome::Fired(files)) => {
                tracing::info!("Scheduled generation complete: {:?}", files);
            }
            Ok(CycleOutcome::NotDue) => {}
            Err(e) => {
                tracing::error!("Error during poll cycle: {}", e);
            }
        }

        tokio::time::sleep(poll_interval).await;
    }
}
