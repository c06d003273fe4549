//! HTTP surface of the relay.

pub mod scan;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::app::AppState;

pub const ALIVE_MESSAGE: &str = "✅ LinksProbe backend is alive!";

/// Builds the router with CORS restricted to the configured frontend origin.
///
/// The origin is matched against the request, so other origins get no
/// `Access-Control-Allow-Origin` header at all.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([state.config.frontend_origin.clone()]))
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Uptime checks
        .route("/", get(alive))
        .route("/scan", post(scan::scan))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn alive() -> &'static str {
    ALIVE_MESSAGE
}
