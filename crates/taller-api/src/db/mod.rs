//! Postgres persistence.
//!
//! Persistence is optional: without `DATABASE_URL` the service runs
//! purely in-memory. All functions take a pool or executor and surface
//! `sqlx::Error` unmodified; mapping to HTTP errors happens at the call
//! site.
//!
//! Table and column names are the historical Spanish store names
//! (`clientes`, `equipos`, `reparaciones`) — the store is a given
//! external contract, not something this service renames.

pub mod customers;
pub mod devices;
pub mod repairs;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Build the connection pool from `DATABASE_URL`, if set, and make sure
/// the three tables exist.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            tracing::warn!("DATABASE_URL not set — running in-memory only");
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await?;

    ensure_schema(&pool).await?;
    tracing::info!("database pool initialized");
    Ok(Some(pool))
}

/// Create the three tables when they are missing.
///
/// The unique constraint on `cedula` is load-bearing: it is what turns
/// the concurrent find-or-create race into a plain update (see
/// `db::customers::upsert`).
async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS clientes (
            id UUID PRIMARY KEY,
            cedula TEXT NOT NULL UNIQUE,
            nombre TEXT NOT NULL DEFAULT '',
            telefono TEXT NOT NULL DEFAULT '',
            email TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS equipos (
            id UUID PRIMARY KEY,
            cliente_id UUID NOT NULL REFERENCES clientes(id),
            tipo TEXT NOT NULL,
            marca TEXT NOT NULL DEFAULT '',
            modelo TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS reparaciones (
            id UUID PRIMARY KEY,
            equipo_id UUID NOT NULL REFERENCES equipos(id),
            descripcion_falla TEXT NOT NULL,
            diagnostico_tecnico TEXT,
            costo_estimado DOUBLE PRECISION NOT NULL DEFAULT 0,
            precio_repuesto DOUBLE PRECISION NOT NULL DEFAULT 0,
            estado TEXT NOT NULL,
            fecha_inicio DATE,
            fecha_fin DATE,
            created_at TIMESTAMPTZ
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
