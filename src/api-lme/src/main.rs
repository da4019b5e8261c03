use api_lme::{AppState, routes};
use core_lme::setup_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    setup_logging("api_lme=debug,tower_http=debug");

    let state = AppState::from_env();
    tracing::info!(
        "settings: {:?}, content: {:?}, out dir: {:?}",
        state.settings_path,
        state.content_path,
        state.out_dir
    );

    let app = routes::router().with_state(state);

    let addr = {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid number");
        format!("{host}:{port}")
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|_| panic!("Failed to bind to address: {addr}"));
    tracing::info!("listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}
