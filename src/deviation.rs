//! Deviation Classifier.

use crate::models::{DeviationFlags, OrderRecord};
use crate::stats::TableStats;

/// Delivery statuses counted as damage.
pub const DAMAGE_STATUSES: &[&str] = &["Damaged", "Wrong Item"];

pub fn classify(record: &OrderRecord, stats: &TableStats) -> DeviationFlags {
    let delay = record.actual_delivery_days > record.promised_delivery_days;
    let damage = record.status.is_any_of(DAMAGE_STATUSES);
    // Strictly greater: a single-row table never overruns its own median.
    let cost_overrun = record.delivery_cost > stats.median_delivery_cost;

    DeviationFlags {
        delay,
        damage,
        cost_overrun,
        deviation: delay || damage || cost_overrun,
    }
}
