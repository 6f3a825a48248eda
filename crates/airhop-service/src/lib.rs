//! HTTP front end for the airhop route planner.
//!
//! # Endpoints
//!
//! - `GET /health` - service status and dataset counts
//! - `GET /airports/{code}` - airport lookup by three- or four-letter code
//! - `GET /routes/{source}/{destination}[?max_hops=N]` - shortest route
//!
//! Errors are returned as RFC 9457 problem documents.

pub mod config;
pub mod handlers;
pub mod health;
pub mod logging;
pub mod problem;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use config::ServiceConfig;
pub use handlers::{AirportResponse, RouteQuery};
pub use health::HealthStatus;
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use problem::{from_lib_error, ProblemDetails};
pub use state::AppState;

/// Build the service router over a loaded network.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/airports/{code}", get(handlers::airport_handler))
        .route(
            "/routes/{source}/{destination}",
            get(handlers::route_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
