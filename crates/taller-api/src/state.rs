//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! Reads serve from the in-memory stores; writes mutate the stores and
//! write through to Postgres when a pool is configured. On startup,
//! [`AppState::hydrate_from_db`] loads the three tables into memory so
//! reads stay synchronous and fast. Without `DATABASE_URL` the service
//! runs purely in-memory, which is what the tests use.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use sqlx::PgPool;
use taller_core::{CustomerRecord, DeviceRecord, RepairRecord};
use uuid::Uuid;

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not
/// `tokio::sync`) because the lock is never held across `.await` points.
/// `parking_lot::RwLock` is non-poisonable — a panicking writer does not
/// permanently corrupt the store.
#[derive(Debug)]
pub struct Store<T: Clone + Send + Sync> {
    data: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Clone + Send + Sync> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, id: Uuid, value: T) -> Option<T> {
        self.data.write().insert(id, value)
    }

    /// Retrieve a record by ID.
    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    /// List all records.
    pub fn list(&self) -> Vec<T> {
        self.data.read().values().cloned().collect()
    }

    /// Find the first record matching a predicate.
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.data.read().values().find(|v| pred(v)).cloned()
    }

    /// Update a record in place. Returns the updated record, or `None` if
    /// not found.
    pub fn update(&self, id: &Uuid, f: impl FnOnce(&mut T)) -> Option<T> {
        let mut guard = self.data.write();
        if let Some(entry) = guard.get_mut(id) {
            f(entry);
            Some(entry.clone())
        } else {
            None
        }
    }

    /// Atomically find-and-update or insert under one write lock.
    ///
    /// Looks for a record matching `pred`; on a hit, applies `update` and
    /// returns `(record, true)`. On a miss, inserts the record produced
    /// by `make` and returns `(record, false)`. The write lock spans the
    /// lookup and the insert, so two concurrent calls for the same
    /// natural key cannot both observe "not found" and both insert.
    pub fn upsert_by(
        &self,
        pred: impl Fn(&T) -> bool,
        update: impl FnOnce(&mut T),
        make: impl FnOnce() -> (Uuid, T),
    ) -> (T, bool) {
        let mut guard = self.data.write();
        if let Some(existing) = guard.values_mut().find(|v| pred(v)) {
            update(existing);
            return (existing.clone(), true);
        }
        let (id, value) = make();
        guard.insert(id, value.clone());
        (value, false)
    }

    /// Remove a record by ID.
    pub fn remove(&self, id: &Uuid) -> Option<T> {
        self.data.write().remove(id)
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + Sync> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Configuration ------------------------------------------------------------

/// Runtime configuration, read from the environment in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        // The original deployment served on 10000.
        Self { port: 10000 }
    }
}

// -- Application State --------------------------------------------------------

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub customers: Store<CustomerRecord>,
    pub devices: Store<DeviceRecord>,
    pub repairs: Store<RepairRecord>,

    /// PostgreSQL connection pool for durable persistence. When `None`,
    /// the API operates in in-memory-only mode.
    pub db_pool: Option<PgPool>,

    pub config: AppConfig,
}

impl AppState {
    /// Create a new application state with default configuration and no
    /// database pool.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    /// Create a new application state with the given configuration and
    /// optional database pool.
    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        Self {
            customers: Store::new(),
            devices: Store::new(),
            repairs: Store::new(),
            db_pool,
            config,
        }
    }

    /// Hydrate the in-memory stores from the database.
    ///
    /// Called once on startup when a pool is available. Loads all
    /// customers, devices, and repairs so read operations remain fast
    /// and synchronous.
    pub async fn hydrate_from_db(&self) -> Result<(), String> {
        let pool = match &self.db_pool {
            Some(pool) => pool,
            None => return Ok(()),
        };

        let customers = crate::db::customers::load_all(pool)
            .await
            .map_err(|e| format!("failed to load customers: {e}"))?;
        let customer_count = customers.len();
        for record in customers {
            self.customers.insert(record.id, record);
        }

        let devices = crate::db::devices::load_all(pool)
            .await
            .map_err(|e| format!("failed to load devices: {e}"))?;
        let device_count = devices.len();
        for record in devices {
            self.devices.insert(record.id, record);
        }

        let repairs = crate::db::repairs::load_all(pool)
            .await
            .map_err(|e| format!("failed to load repairs: {e}"))?;
        let repair_count = repairs.len();
        for record in repairs {
            self.repairs.insert(record.id, record);
        }

        tracing::info!(
            customers = customer_count,
            devices = device_count,
            repairs = repair_count,
            "Hydrated in-memory stores from database"
        );

        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
