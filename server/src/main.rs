#![recursion_limit = "256"]

mod config;
mod routes;
mod state;

#[tokio::main]
async fn main() {
    // .env is optional.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid server configuration");
    let port = config.port;
    tracing::info!(upstream = %config.crm_api_url, upload = %config.crm_upload_url, "CRM API configured");

    let state = state::AppState::new(config).expect("http client init failed");
    let app = routes::leptos_app(state).expect("leptos app init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "salesdesk listening");
    axum::serve(listener, app).await.expect("server failed");
}
