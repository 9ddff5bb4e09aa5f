//! Device records and categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Category of a device submitted for repair.
///
/// Wire labels are the historical store values the front end's dropdown
/// sends. Anything unrecognized collapses to `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DeviceKind {
    #[serde(rename = "Celular")]
    Phone,
    #[serde(rename = "Laptop")]
    Laptop,
    #[serde(rename = "Tablet")]
    Tablet,
    #[default]
    #[serde(rename = "Otro")]
    Other,
}

impl DeviceKind {
    /// Parse a free-text category label, case-insensitively.
    ///
    /// Unknown or blank input maps to [`DeviceKind::Other`]; there is no
    /// error case because the category was never validated upstream.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "celular" | "telefono" | "teléfono" => Self::Phone,
            "laptop" | "portatil" | "portátil" => Self::Laptop,
            "tablet" => Self::Tablet,
            _ => Self::Other,
        }
    }

    /// The canonical wire label, as stored in the `tipo` column.
    pub fn label(self) -> &'static str {
        match self {
            Self::Phone => "Celular",
            Self::Laptop => "Laptop",
            Self::Tablet => "Tablet",
            Self::Other => "Otro",
        }
    }
}

/// A physical device owned by a customer.
///
/// One row is created per intake submission, repeat customer or not —
/// only customers are deduplicated, never devices.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeviceRecord {
    pub id: Uuid,
    #[serde(rename = "cliente_id")]
    pub customer_id: Uuid,
    #[serde(rename = "tipo")]
    pub kind: DeviceKind,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "modelo")]
    pub model: String,
    pub created_at: DateTime<Utc>,
}
