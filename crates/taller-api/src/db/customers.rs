//! Customer persistence — the `clientes` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use taller_core::CustomerRecord;
use uuid::Uuid;

/// Insert or refresh a customer keyed by cédula.
///
/// The unique constraint on `cedula` plus `ON CONFLICT DO UPDATE` turns
/// the find-or-create race between concurrent submissions into a plain
/// update: both writers converge on the same row, and contact fields are
/// last-write-wins.
pub async fn upsert(pool: &PgPool, record: &CustomerRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO clientes (id, cedula, nombre, telefono, email, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         ON CONFLICT (cedula) DO UPDATE
         SET nombre = EXCLUDED.nombre,
             telefono = EXCLUDED.telefono,
             email = EXCLUDED.email,
             updated_at = EXCLUDED.updated_at",
    )
    .bind(record.id)
    .bind(&record.identity_number)
    .bind(&record.name)
    .bind(&record.phone)
    .bind(&record.email)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load all customers for startup hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<CustomerRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CustomerRow>(
        "SELECT id, cedula, nombre, telefono, email, created_at, updated_at
         FROM clientes ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(CustomerRow::into_record).collect())
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    cedula: String,
    nombre: String,
    telefono: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CustomerRow {
    fn into_record(self) -> CustomerRecord {
        CustomerRecord {
            id: self.id,
            identity_number: self.cedula,
            name: self.nombre,
            phone: self.telefono,
            email: self.email,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
