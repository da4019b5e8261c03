pub mod common;
pub mod export;

pub use common::logging::setup_logging;
