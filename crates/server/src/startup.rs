use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &configs::ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.host, cfg.port).parse()?)
}

/// Router for an already-loaded configuration. The write switch is taken
/// from `cfg` and never re-read from the environment.
pub fn build_app(cfg: &configs::AppConfig) -> Router {
    routes::build_router(AppState::from_config(cfg), build_cors())
}

/// Public entry: build the app from the configuration loaded by the caller and run the HTTP server
pub async fn run(cfg: configs::AppConfig) -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    info!(
        event = "config_loaded",
        writes_enabled = cfg.whop.allow_writes,
        dev_tools = cfg.server.dev_tools,
        api_base = %cfg.whop.api_base,
        "configuration loaded"
    );

    let app = build_app(&cfg);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting whop tools server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
