//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Taller API",
        version = "0.3.2",
        description = "Repair-shop job tracking: single-call registration cascade, repair lifecycle updates, admin dashboard, and daily/weekly financial reports.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::intake::register_total,
        crate::routes::repairs::update_repair,
        crate::routes::repairs::delete_repair,
        crate::routes::dashboard::dashboard,
        crate::routes::finance::daily_totals,
        crate::routes::finance::weekly_totals,
    ),
    components(schemas(
        // Core record types
        taller_core::CustomerRecord,
        taller_core::DeviceRecord,
        taller_core::DeviceKind,
        taller_core::RepairRecord,
        taller_core::RepairState,
        taller_core::RepairPatch,
        taller_core::IntakeRequest,
        taller_core::intake::MoneyInput,
        taller_core::DayTotals,
        // Route DTOs
        crate::routes::dashboard::DashboardRow,
        crate::routes::dashboard::DashboardDevice,
        crate::routes::dashboard::DashboardCustomer,
    ))
)]
pub struct ApiDoc;

/// Router exposing the generated spec.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_spec))
}

/// GET /openapi.json — The assembled OpenAPI document.
async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
