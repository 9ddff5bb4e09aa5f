//! Device persistence — the `equipos` table.

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use taller_core::{DeviceKind, DeviceRecord};
use uuid::Uuid;

/// Insert a new device row.
///
/// Takes an executor rather than a pool so the cascade can run it inside
/// the same transaction as the repair insert.
pub async fn insert(
    executor: impl PgExecutor<'_>,
    record: &DeviceRecord,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO equipos (id, cliente_id, tipo, marca, modelo, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(record.id)
    .bind(record.customer_id)
    .bind(record.kind.label())
    .bind(&record.brand)
    .bind(&record.model)
    .bind(record.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

/// Load all devices for startup hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<DeviceRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, DeviceRow>(
        "SELECT id, cliente_id, tipo, marca, modelo, created_at
         FROM equipos ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(DeviceRow::into_record).collect())
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct DeviceRow {
    id: Uuid,
    cliente_id: Uuid,
    tipo: String,
    marca: String,
    modelo: String,
    created_at: DateTime<Utc>,
}

impl DeviceRow {
    fn into_record(self) -> DeviceRecord {
        DeviceRecord {
            id: self.id,
            customer_id: self.cliente_id,
            kind: DeviceKind::parse(&self.tipo),
            brand: self.marca,
            model: self.modelo,
            created_at: self.created_at,
        }
    }
}
