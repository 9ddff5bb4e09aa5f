//! # Registration Intake API
//!
//! HTTP surface for the single-call registration cascade:
//!
//! - **POST `/api/registro-total`** — Register customer, device, and repair in one call
//!
//! The handler does no normalization of its own: the raw submission is
//! deserialized as an [`IntakeRequest`], normalized into a typed
//! [`Intake`](taller_core::Intake), and handed to the cascade. Anything
//! the normalizer rejects never reaches storage.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use taller_core::IntakeRequest;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::registration;
use crate::state::AppState;

/// Construct the intake router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/registro-total", post(register_total))
}

/// POST /api/registro-total — Run the full registration cascade.
///
/// Accepts the historical alias fields (`correo`, `tipo`, `falla`,
/// `costo`) alongside their canonical names and resolves them during
/// normalization. Responds with the created repair wrapped in the
/// `{"success": true, "data": ...}` envelope the admin frontend expects.
#[utoipa::path(
    post,
    path = "/api/registro-total",
    request_body = IntakeRequest,
    responses(
        (status = 200, description = "Job registered"),
        (status = 400, description = "Missing cédula or malformed body"),
    ),
    tag = "intake"
)]
pub(crate) async fn register_total(
    State(state): State<AppState>,
    body: Result<Json<IntakeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = extract_json(body)?;
    let intake = request.normalize()?;
    let repair = registration::register_job(&state, intake).await?;

    Ok(Json(json!({ "success": true, "data": repair })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app() -> Router {
        super::router().with_state(AppState::new())
    }

    #[tokio::test]
    async fn register_total_rejects_missing_cedula() {
        let app = test_app();

        let body = serde_json::json!({
            "nombre": "Ana",
            "tipo_dispositivo": "Celular",
            "descripcion_falla": "No enciende"
        });

        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/registro-total")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let err: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(err["error"].as_str().unwrap().contains("cédula"));
    }

    #[tokio::test]
    async fn register_total_returns_success_envelope() {
        let app = test_app();

        let body = serde_json::json!({
            "cedula": "123",
            "nombre": "Ana",
            "costo_estimado": 150.0
        });

        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/registro-total")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let payload: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(payload["success"], true);
        assert_eq!(payload["data"]["estado"], "Pendiente");
        assert_eq!(payload["data"]["costo_estimado"], 150.0);
    }
}
