//! # Financial Reports API
//!
//! HTTP surface for the aggregation engine:
//!
//! - **GET `/api/finanzas/diarias`** — Per-day totals over delivered repairs
//! - **GET `/api/finanzas/semana`** — Fixed seven-day window ending today
//!
//! Both endpoints aggregate over the in-memory repair store; the math
//! itself lives in `taller_core::report` and is covered there.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use taller_core::{last_seven_days, report_window, DayTotals, SortOrder};
use utoipa::IntoParams;

use crate::error::AppError;
use crate::state::AppState;

/// Construct the finance router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/finanzas/diarias", get(daily_totals))
        .route("/api/finanzas/semana", get(weekly_totals))
}

/// Query parameters for the daily report.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DailyQueryParams {
    /// Sort direction: "asc" for oldest first, anything else newest first.
    pub orden: Option<String>,
    /// Inclusive lower bound (YYYY-MM-DD).
    pub desde: Option<NaiveDate>,
    /// Inclusive upper bound (YYYY-MM-DD).
    pub hasta: Option<NaiveDate>,
}

/// GET /api/finanzas/diarias — Per-day financial totals.
///
/// Only delivered repairs count. Defaults to newest day first; pass
/// `orden=asc` for oldest first, `desde`/`hasta` for an inclusive window.
#[utoipa::path(
    get,
    path = "/api/finanzas/diarias",
    params(DailyQueryParams),
    responses(
        (status = 200, description = "Per-day totals", body = Vec<DayTotals>),
    ),
    tag = "finance"
)]
pub(crate) async fn daily_totals(
    State(state): State<AppState>,
    Query(params): Query<DailyQueryParams>,
) -> Result<Json<Vec<DayTotals>>, AppError> {
    let order = match params.orden.as_deref() {
        Some("asc") => SortOrder::Ascending,
        _ => SortOrder::Descending,
    };

    let repairs = state.repairs.list();
    Ok(Json(report_window(
        &repairs,
        params.desde,
        params.hasta,
        order,
    )))
}

/// GET /api/finanzas/semana — Totals for the last seven days.
///
/// Always returns exactly seven rows, oldest first, zero-filled for days
/// with no delivered repairs. "Today" is the local calendar day.
#[utoipa::path(
    get,
    path = "/api/finanzas/semana",
    responses(
        (status = 200, description = "Seven rows, one per day", body = Vec<DayTotals>),
    ),
    tag = "finance"
)]
pub(crate) async fn weekly_totals(
    State(state): State<AppState>,
) -> Result<Json<Vec<DayTotals>>, AppError> {
    let repairs = state.repairs.list();
    let today = Local::now().date_naive();
    Ok(Json(last_seven_days(&repairs, today)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use taller_core::{RepairRecord, RepairState};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn delivered(date: &str, gross: f64, parts: f64) -> RepairRecord {
        RepairRecord {
            id: Uuid::new_v4(),
            device_id: Uuid::new_v4(),
            fault_description: "x".to_string(),
            diagnosis: None,
            estimated_cost: gross,
            parts_price: parts,
            state: RepairState::Delivered,
            started_on: None,
            completed_on: Some(date.parse().unwrap()),
            created_at: None,
        }
    }

    fn app_with(repairs: Vec<RepairRecord>) -> Router {
        let state = AppState::new();
        for r in repairs {
            state.repairs.insert(r.id, r);
        }
        super::router().with_state(state)
    }

    async fn get_json(app: Router, uri: &str) -> Vec<serde_json::Value> {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn daily_groups_by_day_newest_first() {
        let app = app_with(vec![
            delivered("2024-03-10", 100.0, 40.0),
            delivered("2024-03-10", 50.0, 10.0),
            delivered("2024-03-12", 200.0, 80.0),
        ]);

        let rows = get_json(app, "/api/finanzas/diarias").await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["date"], "2024-03-12");
        assert_eq!(rows[1]["date"], "2024-03-10");
        assert_eq!(rows[1]["count"], 2);
        assert_eq!(rows[1]["grossTotal"], 150.0);
        assert_eq!(rows[1]["partsTotal"], 50.0);
        assert_eq!(rows[1]["netProfit"], 100.0);
    }

    #[tokio::test]
    async fn daily_orden_asc_reverses() {
        let app = app_with(vec![
            delivered("2024-03-10", 100.0, 40.0),
            delivered("2024-03-12", 200.0, 80.0),
        ]);

        let rows = get_json(app, "/api/finanzas/diarias?orden=asc").await;
        assert_eq!(rows[0]["date"], "2024-03-10");
        assert_eq!(rows[1]["date"], "2024-03-12");
    }

    #[tokio::test]
    async fn daily_window_is_inclusive() {
        let app = app_with(vec![
            delivered("2024-03-09", 10.0, 0.0),
            delivered("2024-03-10", 20.0, 0.0),
            delivered("2024-03-11", 30.0, 0.0),
        ]);

        let rows = get_json(
            app,
            "/api/finanzas/diarias?desde=2024-03-10&hasta=2024-03-10",
        )
        .await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["date"], "2024-03-10");
    }

    #[tokio::test]
    async fn daily_ignores_undelivered_repairs() {
        let mut pending = delivered("2024-03-10", 100.0, 40.0);
        pending.state = RepairState::Pending;
        let app = app_with(vec![pending]);

        let rows = get_json(app, "/api/finanzas/diarias").await;
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn weekly_returns_seven_zero_filled_rows() {
        let app = app_with(vec![]);

        let rows = get_json(app, "/api/finanzas/semana").await;
        assert_eq!(rows.len(), 7);
        assert!(rows.iter().all(|r| r["count"] == 0));
        // Oldest first, today last.
        let today = Local::now().date_naive().to_string();
        assert_eq!(rows[6]["date"], today);
    }

    #[tokio::test]
    async fn weekly_counts_todays_deliveries() {
        let today = Local::now().date_naive();
        let app = app_with(vec![delivered(&today.to_string(), 100.0, 40.0)]);

        let rows = get_json(app, "/api/finanzas/semana").await;
        assert_eq!(rows[6]["count"], 1);
        assert_eq!(rows[6]["netProfit"], 60.0);
    }
}
