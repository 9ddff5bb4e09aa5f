//! # taller-core — Domain Logic
//!
//! Pure domain logic for the repair-shop job tracker. This crate owns the
//! record types shared by the API layer and the persistence mappers, plus
//! the three pieces of logic that carry the business:
//!
//! - **Intake normalization** (`intake.rs`): the front end has shipped
//!   several generations that name the same logical field differently
//!   (`costo` vs `costo_estimado`, `falla` vs `descripcion_falla`). All
//!   alias tolerance and defaulting lives here, so the registration
//!   cascade only ever sees canonical, trimmed values.
//!
//! - **Lifecycle patches** (`repair.rs`): a typed partial update for
//!   repairs. Only the six externally mutable fields exist on the type;
//!   unknown keys are rejected at the deserialization boundary instead of
//!   being silently dropped.
//!
//! - **Financial aggregation** (`report.rs`): reconstructs day-by-day
//!   revenue and profit from the repair collection, keyed by plain
//!   calendar date to avoid the UTC/local day-skew the previous system
//!   suffered from.
//!
//! ## Crate Policy
//!
//! - No async, no I/O, no web types. Everything here is synchronous and
//!   deterministic; functions that need "today" take it as a parameter.
//! - Wire names are the historical Spanish store column names, applied
//!   via serde attributes; Rust identifiers are English.

pub mod customer;
pub mod device;
pub mod error;
pub mod intake;
pub mod repair;
pub mod report;

pub use customer::CustomerRecord;
pub use device::{DeviceKind, DeviceRecord};
pub use error::ValidationError;
pub use intake::{ContactDetails, DeviceDetails, Intake, IntakeRequest, RepairDetails};
pub use repair::{RepairPatch, RepairRecord, RepairState, DEFAULT_FAULT_DESCRIPTION};
pub use report::{daily_report, last_seven_days, report_window, DayTotals, SortOrder};
