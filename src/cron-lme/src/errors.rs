use thiserror::Error;

/// Errors a poll cycle can surface. All of them are logged and retried on
/// the next scheduled tick, never fatal to the service.
#[derive(Debug, Error)]
pub enum Error {
    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),
}
