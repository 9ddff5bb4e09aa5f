//! Intake payload normalization.
//!
//! The front end has gone through several generations that send the same
//! logical field under different names (`costo` vs `costo_estimado`,
//! `falla` vs `descripcion_falla`, `correo` vs `email`). All of that
//! tolerance lives here, isolated from the registration cascade: each
//! alias pair is an explicit field with a documented precedence, and
//! [`IntakeRequest::normalize`] produces canonical, trimmed values.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::device::DeviceKind;
use crate::error::ValidationError;
use crate::repair::DEFAULT_FAULT_DESCRIPTION;

/// A money field as it arrives off the wire: a JSON number or a numeric
/// string. Historical front ends sent both.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum MoneyInput {
    Number(f64),
    Text(String),
}

impl MoneyInput {
    /// Resolve to a non-negative amount. Unparsable, non-finite, or
    /// negative input counts as zero.
    fn amount(&self) -> f64 {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        };
        if value.is_finite() && value > 0.0 {
            value
        } else {
            0.0
        }
    }
}

/// Raw intake submission body for `POST /api/registro-total`.
///
/// Every field is optional at the wire level; validation happens in
/// [`normalize`](Self::normalize). Alias precedence is canonical name
/// first, falling back when the canonical field is absent or blank:
/// `email` over `correo`, `tipo_dispositivo` over `tipo`,
/// `descripcion_falla` over `falla`, `costo_estimado` over `costo`,
/// `precio_repuesto` over `repuesto`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct IntakeRequest {
    #[serde(default)]
    pub cedula: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub tipo_dispositivo: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub modelo: Option<String>,
    #[serde(default)]
    pub descripcion_falla: Option<String>,
    #[serde(default)]
    pub falla: Option<String>,
    #[serde(default)]
    pub costo_estimado: Option<MoneyInput>,
    #[serde(default)]
    pub costo: Option<MoneyInput>,
    #[serde(default)]
    pub precio_repuesto: Option<MoneyInput>,
    #[serde(default)]
    pub repuesto: Option<MoneyInput>,
}

/// Canonical contact fields after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub identity_number: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Canonical device fields after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDetails {
    pub kind: DeviceKind,
    pub brand: String,
    pub model: String,
}

/// Canonical repair fields after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairDetails {
    pub fault_description: String,
    pub estimated_cost: f64,
    pub parts_price: f64,
}

/// A fully normalized intake submission. The only shape the cascade sees.
#[derive(Debug, Clone, PartialEq)]
pub struct Intake {
    pub contact: ContactDetails,
    pub device: DeviceDetails,
    pub repair: RepairDetails,
}

/// First non-blank value of an alias pair, trimmed.
fn pick(primary: Option<String>, fallback: Option<String>) -> String {
    primary
        .filter(|v| !v.trim().is_empty())
        .or(fallback)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// First present value of a money alias pair, resolved to an amount.
fn pick_amount(primary: Option<MoneyInput>, fallback: Option<MoneyInput>) -> f64 {
    primary
        .or(fallback)
        .map(|v| v.amount())
        .unwrap_or(0.0)
}

impl IntakeRequest {
    /// Normalize into canonical fields.
    ///
    /// Fails only when the identity number is missing or blank; every
    /// other field has a defined default.
    pub fn normalize(self) -> Result<Intake, ValidationError> {
        let identity_number = self.cedula.as_deref().unwrap_or("").trim().to_string();
        if identity_number.is_empty() {
            return Err(ValidationError::MissingIdentityNumber);
        }

        let contact = ContactDetails {
            identity_number,
            name: pick(self.nombre, None),
            phone: pick(self.telefono, None),
            email: pick(self.email, self.correo).to_lowercase(),
        };

        let device = DeviceDetails {
            kind: DeviceKind::parse(&pick(self.tipo_dispositivo, self.tipo)),
            brand: pick(self.marca, None),
            model: pick(self.modelo, None),
        };

        let fault = pick(self.descripcion_falla, self.falla);
        let repair = RepairDetails {
            fault_description: if fault.is_empty() {
                DEFAULT_FAULT_DESCRIPTION.to_string()
            } else {
                fault
            },
            estimated_cost: pick_amount(self.costo_estimado, self.costo),
            parts_price: pick_amount(self.precio_repuesto, self.repuesto),
        };

        Ok(Intake {
            contact,
            device,
            repair,
        })
    }
}
