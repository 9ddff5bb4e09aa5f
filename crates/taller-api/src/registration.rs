//! Registration orchestration: the entity resolver and the job cascade.
//!
//! One intake submission produces at most one customer write (insert or
//! refresh), exactly one new device, and exactly one new repair. Each step
//! aborts the whole operation on failure; nothing is retried.

use chrono::{Local, Utc};
use taller_core::intake::{ContactDetails, Intake};
use taller_core::{CustomerRecord, DeviceRecord, RepairRecord, RepairState};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

fn storage_error(err: sqlx::Error) -> AppError {
    AppError::Storage(err.to_string())
}

/// Find or create the customer for an intake submission.
///
/// Contact fields are overwritten with the submitted values on every hit,
/// blanks included — the latest submission is the truth, not a merge.
/// The in-memory lookup and insert happen under a single write lock, and
/// the database write is an upsert keyed on the cédula's unique
/// constraint, so concurrent submissions for a brand-new identity number
/// converge on one row.
pub async fn resolve_customer(
    state: &AppState,
    contact: &ContactDetails,
) -> Result<CustomerRecord, AppError> {
    let now = Utc::now();
    let (customer, existed) = state.customers.upsert_by(
        |c| c.identity_number == contact.identity_number,
        |c| {
            c.name = contact.name.clone();
            c.phone = contact.phone.clone();
            c.email = contact.email.clone();
            c.updated_at = now;
        },
        || {
            let id = Uuid::new_v4();
            (
                id,
                CustomerRecord {
                    id,
                    identity_number: contact.identity_number.clone(),
                    name: contact.name.clone(),
                    phone: contact.phone.clone(),
                    email: contact.email.clone(),
                    created_at: now,
                    updated_at: now,
                },
            )
        },
    );

    if existed {
        tracing::debug!(customer_id = %customer.id, "existing customer refreshed");
    } else {
        tracing::debug!(customer_id = %customer.id, "new customer created");
    }

    if let Some(pool) = &state.db_pool {
        crate::db::customers::upsert(pool, &customer)
            .await
            .map_err(storage_error)?;
    }

    Ok(customer)
}

/// Run the full intake cascade: resolve the customer, create the device,
/// create the repair.
///
/// The repair starts `Pending` with the **local** calendar day as its
/// start date — deriving the day from a UTC timestamp put late-evening
/// intakes on the wrong day.
///
/// Device and repair are one unit of work: the database path inserts both
/// in a single transaction, so a failed repair insert cannot leave an
/// orphan device behind.
pub async fn register_job(state: &AppState, intake: Intake) -> Result<RepairRecord, AppError> {
    let customer = resolve_customer(state, &intake.contact).await?;

    let now = Utc::now();
    let today = Local::now().date_naive();

    let device = DeviceRecord {
        id: Uuid::new_v4(),
        customer_id: customer.id,
        kind: intake.device.kind,
        brand: intake.device.brand,
        model: intake.device.model,
        created_at: now,
    };

    let repair = RepairRecord {
        id: Uuid::new_v4(),
        device_id: device.id,
        fault_description: intake.repair.fault_description,
        diagnosis: None,
        estimated_cost: intake.repair.estimated_cost,
        parts_price: intake.repair.parts_price,
        state: RepairState::Pending,
        started_on: Some(today),
        completed_on: None,
        created_at: Some(now),
    };

    if let Some(pool) = &state.db_pool {
        crate::db::repairs::insert_with_device(pool, &device, &repair)
            .await
            .map_err(storage_error)?;
    }

    state.devices.insert(device.id, device.clone());
    state.repairs.insert(repair.id, repair.clone());

    tracing::info!(
        customer_id = %customer.id,
        device_id = %device.id,
        repair_id = %repair.id,
        "job registered"
    );

    Ok(repair)
}
