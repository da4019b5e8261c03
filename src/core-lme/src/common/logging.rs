use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Initializes tracing for a service binary: RUST_LOG when set, otherwise
/// the caller's default filter (e.g. `"lme=info"`).
pub fn setup_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    tracing_subscriber::registry().with(filter).with(fmt::layer()).init()
}
