use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod generate;
pub mod settings;

//
// Router
//

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/settings", get(settings::get_settings))
        .route("/api/settings", post(settings::post_settings))
        .route("/api/generate", post(generate::post_generate))
        .route("/api/delete/{file}", post(generate::post_delete))
        // Tracing middleware
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}
