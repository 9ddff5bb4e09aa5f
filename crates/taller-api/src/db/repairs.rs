//! Repair persistence — the `reparaciones` table.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgExecutor, PgPool};
use taller_core::{DeviceRecord, RepairRecord, RepairState};
use uuid::Uuid;

/// Insert a new repair row.
pub async fn insert(
    executor: impl PgExecutor<'_>,
    record: &RepairRecord,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO reparaciones (id, equipo_id, descripcion_falla, diagnostico_tecnico,
         costo_estimado, precio_repuesto, estado, fecha_inicio, fecha_fin, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(record.id)
    .bind(record.device_id)
    .bind(&record.fault_description)
    .bind(&record.diagnosis)
    .bind(record.estimated_cost)
    .bind(record.parts_price)
    .bind(record.state.label())
    .bind(record.started_on)
    .bind(record.completed_on)
    .bind(record.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

/// Insert a device and its repair as one unit of work.
///
/// A failure on the repair insert rolls the device back — the old
/// sequential-writes design could strand an orphan device here.
pub async fn insert_with_device(
    pool: &PgPool,
    device: &DeviceRecord,
    repair: &RepairRecord,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    crate::db::devices::insert(&mut *tx, device).await?;
    insert(&mut *tx, repair).await?;
    tx.commit().await?;
    Ok(())
}

/// Write the current state of a repair row.
///
/// Returns `false` when no row matched the id — the caller treats that
/// as not-found, never as success.
pub async fn update(pool: &PgPool, record: &RepairRecord) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE reparaciones
         SET descripcion_falla = $2, diagnostico_tecnico = $3, costo_estimado = $4,
             precio_repuesto = $5, estado = $6, fecha_inicio = $7, fecha_fin = $8
         WHERE id = $1",
    )
    .bind(record.id)
    .bind(&record.fault_description)
    .bind(&record.diagnosis)
    .bind(record.estimated_cost)
    .bind(record.parts_price)
    .bind(record.state.label())
    .bind(record.started_on)
    .bind(record.completed_on)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a repair row. Returns `false` when no row matched.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reparaciones WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Load all repairs for startup hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<RepairRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, RepairRow>(
        "SELECT id, equipo_id, descripcion_falla, diagnostico_tecnico, costo_estimado,
         precio_repuesto, estado, fecha_inicio, fecha_fin, created_at
         FROM reparaciones ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(RepairRow::into_record).collect())
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct RepairRow {
    id: Uuid,
    equipo_id: Uuid,
    descripcion_falla: String,
    diagnostico_tecnico: Option<String>,
    costo_estimado: f64,
    precio_repuesto: f64,
    estado: String,
    fecha_inicio: Option<NaiveDate>,
    fecha_fin: Option<NaiveDate>,
    created_at: Option<DateTime<Utc>>,
}

impl RepairRow {
    fn into_record(self) -> RepairRecord {
        let state = RepairState::parse(&self.estado).unwrap_or_else(|| {
            tracing::warn!(
                repair_id = %self.id,
                estado = %self.estado,
                "unrecognized estado label in database — treating as Pendiente"
            );
            RepairState::Pending
        });

        RepairRecord {
            id: self.id,
            device_id: self.equipo_id,
            fault_description: self.descripcion_falla,
            diagnosis: self.diagnostico_tecnico,
            estimated_cost: self.costo_estimado,
            parts_price: self.precio_repuesto,
            state,
            started_on: self.fecha_inicio,
            completed_on: self.fecha_fin,
            created_at: self.created_at,
        }
    }
}
