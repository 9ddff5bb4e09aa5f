//! Customer records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A customer, identified uniquely by a government identity number.
///
/// At most one record exists per identity number. Contact fields are
/// overwritten on every new submission carrying the same number — the
/// latest submission is treated as the truth, blanks included. Customers
/// are never deleted by this service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerRecord {
    pub id: Uuid,
    /// The natural key. Trimmed, non-empty.
    #[serde(rename = "cedula")]
    pub identity_number: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    /// Lower-cased and trimmed on intake.
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
