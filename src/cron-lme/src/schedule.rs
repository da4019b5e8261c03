//! Cadence tracking and the per-cycle poll step.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use core_lme::export::{Frequency, Settings};

use crate::errors::Error;

/// Tracks when the last scheduled generation fired within this process.
#[derive(Debug, Default)]
pub struct ScheduleState {
    last_fired: Option<Instant>,
}

impl ScheduleState {
    pub fn elapsed(&self) -> Option<Duration> {
        self.last_fired.map(|fired| fired.elapsed())
    }

    pub fn mark_fired(&mut self) {
        self.last_fired = Some(Instant::now());
    }
}

/// True when the cadence calls for a run: immediately after service start,
/// then once per period. `manual` never fires.
pub fn is_due(frequency: Frequency, elapsed: Option<Duration>) -> bool {
    match frequency.period() {
        None => false,
        Some(period) => match elapsed {
            None => true,
            Some(elapsed) => elapsed >= period,
        },
    }
}

/// What one poll cycle did.
#[derive(Debug, PartialEq)]
pub enum CycleOutcome {
    /// A generation run was fired; holds the files the API reports written.
    Fired(Vec<String>),
    NotDue,
}

#[derive(Serialize)]
struct GeneratePayload {
    files: Vec<String>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    files: Vec<String>,
}

/// Reads the configured cadence from the API server and fires a generate
/// request when a run is due.
pub async fn poll_once(
    client: &reqwest::Client,
    api_base_url: &str,
    state: &mut ScheduleState,
) -> Result<CycleOutcome, Error> {
    let settings: Settings = client
        .get(format!("{api_base_url}/api/settings"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    if !is_due(settings.update_frequency, state.elapsed()) {
        tracing::debug!(frequency = ?settings.update_frequency, "no scheduled run due");
        return Ok(CycleOutcome::NotDue);
    }

    if settings.files_to_generate.is_empty() {
        tracing::info!("scheduled run due but no files configured, skipping");
        return Ok(CycleOutcome::NotDue);
    }

    tracing::debug!("API request: POST /api/generate");
    let payload = GeneratePayload {
        files: settings.files_to_generate.clone(),
    };
    let response: GenerateResponse = client
        .post(format!("{api_base_url}/api/generate"))
        .json(&payload)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    state.mark_fired();
    tracing::info!("scheduled generation wrote {:?}", response.files);
    Ok(CycleOutcome::Fired(response.files))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_never_fires() {
        assert!(!is_due(Frequency::Manual, None));
        assert!(!is_due(Frequency::Manual, Some(Duration::from_secs(u32::MAX as u64))));
    }

    #[test]
    fn test_first_cycle_fires_immediately() {
        assert!(is_due(Frequency::Daily, None));
        assert!(is_due(Frequency::Weekly, None));
    }

    #[test]
    fn test_daily_cadence() {
        assert!(!is_due(Frequency::Daily, Some(Duration::from_secs(86_399))));
        assert!(is_due(Frequency::Daily, Some(Duration::from_secs(86_400))));
    }

    #[test]
    fn test_weekly_cadence() {
        assert!(!is_due(Frequency::Weekly, Some(Duration::from_secs(86_400))));
        assert!(is_due(Frequency::Weekly, Some(Duration::from_secs(604_800))));
    }

    #[test]
    fn test_schedule_state_tracks_firing() {
        let mut state = ScheduleState::default();
        assert!(state.elapsed().is_none());
        state.mark_fired();
        let elapsed = state.elapsed().unwrap();
        assert!(elapsed < Duration::from_secs(60));
    }
}
