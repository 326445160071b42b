use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use state::AppState;

/// Builds the HTTP surface over an already wired set of services.
pub fn create_app(app_state: AppState) -> Router {
    // TODO: restrict origins once a front end is deployed under a known host.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::players::routes())
        .merge(routes::games::routes())
        .merge(routes::lobby::routes())
        .merge(routes::ratings::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
