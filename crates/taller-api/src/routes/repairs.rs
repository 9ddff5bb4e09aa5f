//! # Repair Lifecycle API
//!
//! HTTP surface for repair updates after registration:
//!
//! - **PUT `/api/reparaciones/:id`** — Apply a partial update to a repair
//! - **DELETE `/api/reparaciones/:id`** — Remove a repair permanently
//!
//! Updates are typed: the body deserializes into a [`RepairPatch`] with a
//! closed field set, so an unknown key is rejected at the boundary instead
//! of being silently written through to storage.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{delete, put};
use axum::{Json, Router};
use chrono::Local;
use serde_json::{json, Value};
use taller_core::{RepairPatch, RepairRecord, ValidationError};
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Construct the repairs router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/reparaciones/:id", put(update_repair))
        .route("/api/reparaciones/:id", delete(delete_repair))
}

/// Parse the path segment as a repair id.
///
/// Surrounding whitespace is tolerated; anything that is not a UUID maps
/// to not-found rather than a malformed-request error, because from the
/// caller's point of view no such repair exists.
fn parse_repair_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound)
}

/// PUT /api/reparaciones/:id — Apply a partial update.
///
/// An empty patch is a validation error, not a no-op: the old behavior of
/// accepting `{}` and writing nothing hid client bugs. The completion date
/// is derived from the patched state — stamped with the local calendar day
/// when the repair moves to `Entregado` without one, cleared when it moves
/// back out.
///
/// Responds with a single-element array for compatibility with the admin
/// frontend, which indexes `data[0]`.
#[utoipa::path(
    put,
    path = "/api/reparaciones/{id}",
    params(("id" = Uuid, Path, description = "Repair ID")),
    request_body = RepairPatch,
    responses(
        (status = 200, description = "Updated repair", body = Vec<RepairRecord>),
        (status = 400, description = "Empty patch or unknown field"),
        (status = 404, description = "No repair with this id"),
    ),
    tag = "repairs"
)]
pub(crate) async fn update_repair(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<RepairPatch>, JsonRejection>,
) -> Result<Json<Vec<RepairRecord>>, AppError> {
    let id = parse_repair_id(&id)?;
    let patch = extract_json(body)?;

    if patch.is_empty() {
        return Err(ValidationError::EmptyPatch.into());
    }

    let today = Local::now().date_naive();
    let updated = state
        .repairs
        .update(&id, |repair| patch.apply(repair, today))
        .ok_or(AppError::NotFound)?;

    if let Some(pool) = &state.db_pool {
        let found = crate::db::repairs::update(pool, &updated)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        if !found {
            tracing::warn!(repair_id = %id, "repair present in memory but missing from database");
        }
    }

    tracing::info!(repair_id = %id, estado = updated.state.label(), "repair updated");
    Ok(Json(vec![updated]))
}

/// DELETE /api/reparaciones/:id — Remove a repair.
///
/// A missing id is 404 — deleting nothing is not a success.
#[utoipa::path(
    delete,
    path = "/api/reparaciones/{id}",
    params(("id" = Uuid, Path, description = "Repair ID")),
    responses(
        (status = 200, description = "Deleted repair"),
        (status = 404, description = "No repair with this id"),
    ),
    tag = "repairs"
)]
pub(crate) async fn delete_repair(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_repair_id(&id)?;

    let removed = state.repairs.remove(&id).ok_or(AppError::NotFound)?;

    if let Some(pool) = &state.db_pool {
        crate::db::repairs::delete(pool, id)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
    }

    tracing::info!(repair_id = %id, "repair deleted");
    Ok(Json(json!({ "success": true, "data": removed })))
}
