//! Day-level financial reporting.
//!
//! Reconstructs revenue and profit figures from the repair collection.
//! Only delivered repairs count. The day key is a plain calendar date
//! taken from the completion date, falling back to the start date,
//! falling back to the date component of the record-creation timestamp —
//! time of day and timezone are deliberately ignored, so a delivery
//! logged at 23:50 local never drifts into the next UTC day.
//!
//! Nothing here is cached: every report is recomputed from the full
//! collection it is handed.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::repair::{RepairRecord, RepairState};

/// Sort order for the report list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most recent day first. The dashboard default.
    #[default]
    Descending,
    /// Oldest day first, for trend charts.
    Ascending,
}

/// Aggregated figures for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayTotals {
    pub date: NaiveDate,
    pub count: u64,
    pub gross_total: f64,
    pub parts_total: f64,
    pub net_profit: f64,
}

impl DayTotals {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            count: 0,
            gross_total: 0.0,
            parts_total: 0.0,
            net_profit: 0.0,
        }
    }
}

/// The calendar day a repair is reported under, if any.
///
/// Priority: completion date, start date, creation timestamp. A record
/// carrying none of the three cannot be bucketed and is excluded from
/// reports entirely rather than piled onto a sentinel date.
pub fn report_date(repair: &RepairRecord) -> Option<NaiveDate> {
    repair
        .completed_on
        .or(repair.started_on)
        .or_else(|| repair.created_at.map(|ts| ts.date_naive()))
}

fn accumulate(repairs: &[RepairRecord]) -> BTreeMap<NaiveDate, DayTotals> {
    let mut days: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
    for repair in repairs {
        if repair.state != RepairState::Delivered {
            continue;
        }
        let Some(date) = report_date(repair) else {
            continue;
        };
        let entry = days.entry(date).or_insert_with(|| DayTotals::empty(date));
        entry.count += 1;
        entry.gross_total += repair.estimated_cost;
        entry.parts_total += repair.parts_price;
    }
    // Profit is computed on the group sums, not summed per record.
    for totals in days.values_mut() {
        totals.net_profit = totals.gross_total - totals.parts_total;
    }
    days
}

/// Build the day-by-day report over all delivered repairs.
pub fn daily_report(repairs: &[RepairRecord], order: SortOrder) -> Vec<DayTotals> {
    let days = accumulate(repairs);
    match order {
        SortOrder::Ascending => days.into_values().collect(),
        SortOrder::Descending => days.into_values().rev().collect(),
    }
}

/// Day totals restricted to an inclusive date range.
pub fn report_window(
    repairs: &[RepairRecord],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    order: SortOrder,
) -> Vec<DayTotals> {
    daily_report(repairs, order)
        .into_iter()
        .filter(|day| {
            from.map_or(true, |f| day.date >= f) && to.map_or(true, |t| day.date <= t)
        })
        .collect()
}

/// Fixed seven-day window ending at `today`, oldest first, with empty
/// days zero-filled. The trend chart needs a point for every day.
pub fn last_seven_days(repairs: &[RepairRecord], today: NaiveDate) -> Vec<DayTotals> {
    let days = accumulate(repairs);
    (0..7u64)
        .rev()
        .map(|offset| {
            let date = today - Days::new(offset);
            days.get(&date)
                .cloned()
                .unwrap_or_else(|| DayTotals::empty(date))
        })
        .collect()
}
