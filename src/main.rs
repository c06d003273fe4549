// src/main.rs

use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};

use linksprobe::{app::AppState, config::Config, keepalive, logging, routes};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // A missing .env file is fine; the environment may already be populated.
    dotenv::dotenv().ok();
    logging::initialize_logging()?;

    let config = Config::from_env().wrap_err("invalid configuration")?;
    let port = config.port;
    let origin = config.frontend_origin.clone();
    let keepalive_target = config.backend_url.clone();
    let keepalive_interval = config.keepalive_interval;
    let keepalive_client = reqwest::Client::builder()
        .timeout(config.upstream_timeout)
        .build()
        .wrap_err("failed to build keep-alive HTTP client")?;

    let state = AppState::new(config).wrap_err("failed to build application state")?;
    let app = routes::router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("failed to bind {}", addr))?;

    info!("🚀 LinksProbe running on port {}", port);
    info!("🌍 Ready to receive requests from {:?}", origin);

    match keepalive_target {
        Some(target) => {
            info!(%target, every = ?keepalive_interval, "Keep-alive pings enabled.");
            keepalive::spawn(keepalive_client, target, keepalive_interval);
        }
        None => warn!("BACKEND_URL not set, keep-alive pings disabled."),
    }

    axum::serve(listener, app).await.wrap_err("server error")?;
    Ok(())
}
