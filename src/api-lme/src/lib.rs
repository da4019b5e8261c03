use std::path::PathBuf;

pub mod errors;
pub mod routes;

/// Paths the trigger service operates on. All three have env overrides so the
/// service can run against any site checkout.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Settings JSON file (created on first save if missing).
    pub settings_path: PathBuf,
    /// Site-export JSON the content is read from.
    pub content_path: PathBuf,
    /// Site document root the manifests are written into.
    pub out_dir: PathBuf,
}

impl AppState {
    pub fn from_env() -> AppState {
        AppState {
            settings_path: std::env::var("SETTINGS_PATH").unwrap_or_else(|_| "settings.json".to_string()).into(),
            content_path: std::env::var("CONTENT_PATH")
                .unwrap_or_else(|_| "site-export.json".to_string())
                .into(),
            out_dir: std::env::var("OUT_DIR").unwrap_or_else(|_| ".".to_string()).into(),
        }
    }
}
