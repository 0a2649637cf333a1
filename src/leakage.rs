//! Value Leakage Estimator.

use crate::models::{DeviationFlags, OrderRecord};
use crate::stats::TableStats;

/// Share of order value lost to a late delivery.
pub const DELAY_PENALTY: f64 = 0.1;
/// Share of order value lost to damage or a wrong item.
pub const DAMAGE_PENALTY: f64 = 0.2;

/// Sum of independent contributions; a row can collect all three.
///
/// The overrun contribution is the excess over the same median the classifier
/// used, so it is positive whenever `cost_overrun` is set.
pub fn estimate(record: &OrderRecord, flags: &DeviationFlags, stats: &TableStats) -> f64 {
    let mut leakage = 0.0;
    if flags.delay {
        leakage += DELAY_PENALTY * record.order_value;
    }
    if flags.damage {
        leakage += DAMAGE_PENALTY * record.order_value;
    }
    if flags.cost_overrun {
        leakage += record.delivery_cost - stats.median_delivery_cost;
    }
    leakage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{order, stats};

    fn flags(delay: bool, damage: bool, cost_overrun: bool) -> DeviationFlags {
        DeviationFlags {
            delay,
            damage,
            cost_overrun,
            deviation: delay || damage || cost_overrun,
        }
    }

    #[test]
    fn test_no_deviation_no_leakage() {
        assert_eq!(estimate(&order("A"), &flags(false, false, false), &stats(100.0, 100.0, 1.0)), 0.0);
    }

    #[test]
    fn test_delay_costs_ten_percent() {
        assert_eq!(estimate(&order("A"), &flags(true, false, false), &stats(100.0, 100.0, 1.0)), 100.0);
    }

    #[test]
    fn test_contributions_accumulate() {
        let record = OrderRecord { delivery_cost: 150.0, ..order("A") };
        let leakage = estimate(&record, &flags(true, true, true), &stats(100.0, 100.0, 1.0));
        assert!((leakage - (100.0 + 200.0 + 50.0)).abs() < 1e-9);
    }
}
