//! # Admin Dashboard API
//!
//! HTTP surface for the admin console:
//!
//! - **GET `/api/dashboard`** — All repairs joined with their device and customer
//!
//! The join is assembled in memory from the three stores; a repair whose
//! device or customer is missing is skipped with a warning rather than
//! failing the whole listing.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use taller_core::RepairRecord;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::state::AppState;

/// Construct the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard", get(dashboard))
}

/// A repair row with its device and customer embedded, as the admin
/// console renders it.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardRow {
    pub id: Uuid,
    pub equipo_id: Uuid,
    pub descripcion_falla: String,
    pub diagnostico_tecnico: Option<String>,
    pub costo_estimado: f64,
    pub precio_repuesto: f64,
    pub estado: String,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub equipo: DashboardDevice,
}

/// Device summary embedded in a dashboard row.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardDevice {
    pub tipo: String,
    pub marca: String,
    pub modelo: String,
    pub cliente: DashboardCustomer,
}

/// Customer summary embedded in a dashboard row.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardCustomer {
    pub nombre: String,
    pub cedula: String,
    pub telefono: String,
}

/// GET /api/dashboard — List all repairs with device and customer embedded.
///
/// Rows are ordered by start date, newest first; repairs without a start
/// date sort last.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "All repairs with device and customer", body = Vec<DashboardRow>),
    ),
    tag = "dashboard"
)]
pub(crate) async fn dashboard(State(state): State<AppState>) -> Json<Vec<DashboardRow>> {
    let mut rows: Vec<DashboardRow> = state
        .repairs
        .list()
        .into_iter()
        .filter_map(|repair| assemble_row(&state, repair))
        .collect();

    rows.sort_by(|a, b| b.fecha_inicio.cmp(&a.fecha_inicio));
    Json(rows)
}

fn assemble_row(state: &AppState, repair: RepairRecord) -> Option<DashboardRow> {
    let Some(device) = state.devices.get(&repair.device_id) else {
        tracing::warn!(repair_id = %repair.id, "repair references a missing device");
        return None;
    };
    let Some(customer) = state.customers.get(&device.customer_id) else {
        tracing::warn!(device_id = %device.id, "device references a missing customer");
        return None;
    };

    Some(DashboardRow {
        id: repair.id,
        equipo_id: repair.device_id,
        descripcion_falla: repair.fault_description,
        diagnostico_tecnico: repair.diagnosis,
        costo_estimado: repair.estimated_cost,
        precio_repuesto: repair.parts_price,
        estado: repair.state.label().to_string(),
        fecha_inicio: repair.started_on,
        fecha_fin: repair.completed_on,
        created_at: repair.created_at,
        equipo: DashboardDevice {
            tipo: device.kind.label().to_string(),
            marca: device.brand,
            modelo: device.model,
            cliente: DashboardCustomer {
                nombre: customer.name,
                cedula: customer.identity_number,
                telefono: customer.phone,
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::register_job;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use taller_core::intake::{ContactDetails, DeviceDetails, Intake, RepairDetails};
    use taller_core::DeviceKind;
    use tower::ServiceExt;

    fn intake() -> Intake {
        Intake {
            contact: ContactDetails {
                identity_number: "123".to_string(),
                name: "Ana".to_string(),
                phone: "300".to_string(),
                email: "ana@example.com".to_string(),
            },
            device: DeviceDetails {
                kind: DeviceKind::Laptop,
                brand: "Lenovo".to_string(),
                model: "T14".to_string(),
            },
            repair: RepairDetails {
                fault_description: "Teclado dañado".to_string(),
                estimated_cost: 80.0,
                parts_price: 25.0,
            },
        }
    }

    async fn get_dashboard(app: Router) -> Vec<serde_json::Value> {
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn dashboard_embeds_device_and_customer() {
        let state = AppState::new();
        register_job(&state, intake()).await.unwrap();
        let rows = get_dashboard(super::router().with_state(state)).await;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["estado"], "Pendiente");
        assert_eq!(rows[0]["equipo"]["tipo"], "Laptop");
        assert_eq!(rows[0]["equipo"]["marca"], "Lenovo");
        assert_eq!(rows[0]["equipo"]["cliente"]["nombre"], "Ana");
        assert_eq!(rows[0]["equipo"]["cliente"]["cedula"], "123");
    }

    #[tokio::test]
    async fn dashboard_skips_orphan_repairs() {
        let state = AppState::new();
        register_job(&state, intake()).await.unwrap();

        // A repair pointing at a device that no longer exists.
        let orphan_id = Uuid::new_v4();
        state.repairs.insert(
            orphan_id,
            RepairRecord {
                id: orphan_id,
                device_id: Uuid::new_v4(),
                fault_description: "—".to_string(),
                diagnosis: None,
                estimated_cost: 0.0,
                parts_price: 0.0,
                state: taller_core::RepairState::Pending,
                started_on: None,
                completed_on: None,
                created_at: None,
            },
        );

        let rows = get_dashboard(super::router().with_state(state)).await;
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn dashboard_orders_newest_start_date_first() {
        let state = AppState::new();
        register_job(&state, intake()).await.unwrap();
        register_job(&state, intake()).await.unwrap();

        // Backdate one repair.
        let ids: Vec<Uuid> = state.repairs.list().iter().map(|r| r.id).collect();
        state.repairs.update(&ids[0], |r| {
            r.started_on = Some(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        });

        let rows = get_dashboard(super::router().with_state(state)).await;
        assert_eq!(rows.len(), 2);
        assert!(rows[0]["fecha_inicio"].as_str().unwrap() > "2000-01-01");
        assert_eq!(rows[1]["fecha_inicio"], "2000-01-01");
    }
}
