//! Repair records, lifecycle states, and the typed update patch.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Placeholder used when a submission carries no fault description.
pub const DEFAULT_FAULT_DESCRIPTION: &str = "Sin descripción";

/// Lifecycle state of a repair order.
///
/// Wire labels are the canonical store values. Older rows and older
/// front-end versions used `Reparado` for the ready-for-pickup state and
/// `En Reparación` for work in progress; both are accepted on input and
/// normalized, never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RepairState {
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "En Proceso", alias = "En Reparación")]
    InProgress,
    #[serde(rename = "Listo", alias = "Reparado")]
    Ready,
    #[serde(rename = "Entregado")]
    Delivered,
}

impl RepairState {
    /// Parse a stored label, accepting the legacy aliases.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Pendiente" => Some(Self::Pending),
            "En Proceso" | "En Reparación" => Some(Self::InProgress),
            "Listo" | "Reparado" => Some(Self::Ready),
            "Entregado" => Some(Self::Delivered),
            _ => None,
        }
    }

    /// The canonical wire label, as stored in the `estado` column.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::InProgress => "En Proceso",
            Self::Ready => "Listo",
            Self::Delivered => "Entregado",
        }
    }
}

/// A single work order against a device.
///
/// `started_on` and `created_at` are optional because rows migrated from
/// early store versions may lack them; rows created by the cascade always
/// carry both. The completion date is present exactly when the repair is
/// `Delivered`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RepairRecord {
    pub id: Uuid,
    #[serde(rename = "equipo_id")]
    pub device_id: Uuid,
    #[serde(rename = "descripcion_falla")]
    pub fault_description: String,
    #[serde(rename = "diagnostico_tecnico")]
    pub diagnosis: Option<String>,
    #[serde(rename = "costo_estimado")]
    pub estimated_cost: f64,
    #[serde(rename = "precio_repuesto")]
    pub parts_price: f64,
    #[serde(rename = "estado")]
    pub state: RepairState,
    #[serde(rename = "fecha_inicio")]
    pub started_on: Option<NaiveDate>,
    #[serde(rename = "fecha_fin")]
    pub completed_on: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
}

impl RepairRecord {
    /// Net profit for this repair. May be negative; never clamped.
    pub fn net_profit(&self) -> f64 {
        self.estimated_cost - self.parts_price
    }
}

/// Typed partial update for a repair.
///
/// Only the six externally mutable fields exist on this type, and
/// `deny_unknown_fields` rejects anything else at the deserialization
/// boundary — a misspelled field is a 400, not a silently lost write.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RepairPatch {
    #[serde(rename = "diagnostico_tecnico")]
    pub diagnosis: Option<String>,
    #[serde(rename = "costo_estimado")]
    pub estimated_cost: Option<f64>,
    #[serde(rename = "estado")]
    pub state: Option<RepairState>,
    #[serde(rename = "fecha_fin")]
    pub completed_on: Option<NaiveDate>,
    #[serde(rename = "descripcion_falla")]
    pub fault_description: Option<String>,
    #[serde(rename = "precio_repuesto")]
    pub parts_price: Option<f64>,
}

impl RepairPatch {
    /// Whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.diagnosis.is_none()
            && self.estimated_cost.is_none()
            && self.state.is_none()
            && self.completed_on.is_none()
            && self.fault_description.is_none()
            && self.parts_price.is_none()
    }

    /// Apply the patch to a record.
    ///
    /// `today` is the local calendar day supplied by the caller: a
    /// transition to `Delivered` without an explicit completion date is
    /// stamped with it, and a transition away from `Delivered` clears the
    /// completion date, keeping the completed-iff-delivered invariant.
    pub fn apply(&self, record: &mut RepairRecord, today: NaiveDate) {
        if let Some(diagnosis) = &self.diagnosis {
            record.diagnosis = Some(diagnosis.trim().to_string());
        }
        if let Some(cost) = self.estimated_cost {
            record.estimated_cost = cost.max(0.0);
        }
        if let Some(price) = self.parts_price {
            record.parts_price = price.max(0.0);
        }
        if let Some(fault) = &self.fault_description {
            let fault = fault.trim();
            record.fault_description = if fault.is_empty() {
                DEFAULT_FAULT_DESCRIPTION.to_string()
            } else {
                fault.to_string()
            };
        }
        if let Some(date) = self.completed_on {
            record.completed_on = Some(date);
        }
        if let Some(state) = self.state {
            record.state = state;
        }
        match record.state {
            RepairState::Delivered => {
                if record.completed_on.is_none() {
                    record.completed_on = Some(today);
                }
            }
            _ => record.completed_on = None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_repair() -> RepairRecord {
        RepairRecord {
            id: Uuid::new_v4(),
            device_id: Uuid::new_v4(),
            fault_description: "No enciende".to_string(),
            diagnosis: None,
            estimated_cost: 100.0,
            parts_price: 40.0,
            state: RepairState::Pending,
            started_on: NaiveDate::from_ymd_opt(2024, 3, 1),
            completed_on: None,
            created_at: Some(Utc::now()),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn net_profit_may_be_negative() {
        let mut repair = sample_repair();
        repair.estimated_cost = 30.0;
        repair.parts_price = 50.0;
        assert_eq!(repair.net_profit(), -20.0);
    }

    #[test]
    fn state_parse_accepts_legacy_aliases() {
        assert_eq!(RepairState::parse("Reparado"), Some(RepairState::Ready));
        assert_eq!(RepairState::parse("Listo"), Some(RepairState::Ready));
        assert_eq!(
            RepairState::parse("En Reparación"),
            Some(RepairState::InProgress)
        );
        assert_eq!(RepairState::parse("Archivado"), None);
    }

    #[test]
    fn state_serializes_canonical_label_only() {
        assert_eq!(
            serde_json::to_string(&RepairState::Ready).unwrap(),
            "\"Listo\""
        );
        let from_alias: RepairState = serde_json::from_str("\"Reparado\"").unwrap();
        assert_eq!(from_alias, RepairState::Ready);
    }

    #[test]
    fn empty_patch_detected() {
        assert!(RepairPatch::default().is_empty());
        let patch = RepairPatch {
            estimated_cost: Some(10.0),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn unknown_field_rejected_at_boundary() {
        let result: Result<RepairPatch, _> =
            serde_json::from_str(r#"{"color": "rojo"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn delivery_without_date_stamps_today() {
        let mut repair = sample_repair();
        let patch = RepairPatch {
            state: Some(RepairState::Delivered),
            ..Default::default()
        };
        patch.apply(&mut repair, today());
        assert_eq!(repair.state, RepairState::Delivered);
        assert_eq!(repair.completed_on, Some(today()));
    }

    #[test]
    fn explicit_completion_date_wins_over_stamp() {
        let mut repair = sample_repair();
        let explicit = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let patch = RepairPatch {
            state: Some(RepairState::Delivered),
            completed_on: Some(explicit),
            ..Default::default()
        };
        patch.apply(&mut repair, today());
        assert_eq!(repair.completed_on, Some(explicit));
    }

    #[test]
    fn leaving_delivered_clears_completion_date() {
        let mut repair = sample_repair();
        repair.state = RepairState::Delivered;
        repair.completed_on = today().into();
        let patch = RepairPatch {
            state: Some(RepairState::InProgress),
            ..Default::default()
        };
        patch.apply(&mut repair, today());
        assert_eq!(repair.completed_on, None);
    }

    #[test]
    fn completion_date_alone_on_pending_repair_is_discarded() {
        let mut repair = sample_repair();
        let patch = RepairPatch {
            completed_on: Some(today()),
            ..Default::default()
        };
        patch.apply(&mut repair, today());
        // Still pending, so the invariant clears the date.
        assert_eq!(repair.state, RepairState::Pending);
        assert_eq!(repair.completed_on, None);
    }

    #[test]
    fn negative_costs_clamp_to_zero() {
        let mut repair = sample_repair();
        let patch = RepairPatch {
            estimated_cost: Some(-5.0),
            parts_price: Some(-1.0),
            ..Default::default()
        };
        patch.apply(&mut repair, today());
        assert_eq!(repair.estimated_cost, 0.0);
        assert_eq!(repair.parts_price, 0.0);
    }

    #[test]
    fn blank_fault_description_falls_back_to_placeholder() {
        let mut repair = sample_repair();
        let patch = RepairPatch {
            fault_description: Some("   ".to_string()),
            ..Default::default()
        };
        patch.apply(&mut repair, today());
        assert_eq!(repair.fault_description, DEFAULT_FAULT_DESCRIPTION);
    }

    #[test]
    fn diagnosis_is_trimmed() {
        let mut repair = sample_repair();
        let patch = RepairPatch {
            diagnosis: Some("  pantalla rota  ".to_string()),
            ..Default::default()
        };
        patch.apply(&mut repair, today());
        assert_eq!(repair.diagnosis.as_deref(), Some("pantalla rota"));
    }

    #[test]
    fn delivered_record_keeps_date_on_unrelated_patch() {
        let mut repair = sample_repair();
        repair.state = RepairState::Delivered;
        repair.completed_on = today().into();
        let patch = RepairPatch {
            diagnosis: Some("ok".to_string()),
            ..Default::default()
        };
        patch.apply(&mut repair, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(repair.completed_on, Some(today()));
    }
}
