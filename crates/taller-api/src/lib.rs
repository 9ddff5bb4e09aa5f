//! # taller-api — HTTP Service for Repair-Shop Job Tracking
//!
//! Thin Axum surface over `taller-core`: the core crate owns
//! normalization, state transitions, and the financial math; this crate
//! owns HTTP, shared state, and persistence.
//!
//! ## API Surface
//!
//! | Route                        | Module                  | Domain            |
//! |------------------------------|-------------------------|-------------------|
//! | `POST /api/registro-total`   | [`routes::intake`]      | Registration      |
//! | `PUT/DELETE /api/reparaciones/:id` | [`routes::repairs`] | Repair lifecycle |
//! | `GET /api/dashboard`         | [`routes::dashboard`]   | Admin console     |
//! | `GET /api/finanzas/*`        | [`routes::finance`]     | Financial reports |
//!
//! ## OpenAPI
//!
//! Auto-generated spec via utoipa derive macros at `/openapi.json`.

pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod registration;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use crate::error::AppError;
pub use crate::state::{AppConfig, AppState};

/// Assemble the full application router.
///
/// Health probes (`/health/*`) are mounted outside the trace layer so
/// orchestrator polling stays out of the request logs.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::intake::router())
        .merge(routes::repairs::router())
        .merge(routes::dashboard::router())
        .merge(routes::finance::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
