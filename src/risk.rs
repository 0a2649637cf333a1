//! Risk Scorer: weighted sum of three ratios normalized by table statistics.

use serde::Serialize;

use crate::models::OrderRecord;
use crate::stats::TableStats;

/// Weights of the delivery-time, cost and traffic ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskWeights {
    pub delivery_time: f64,
    pub cost: f64,
    pub traffic: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        RiskWeights {
            delivery_time: 0.4,
            cost: 0.3,
            traffic: 0.3,
        }
    }
}

/// Unbounded above; the `+ 1` terms keep every denominator non-zero for
/// non-negative inputs.
pub fn score(record: &OrderRecord, stats: &TableStats, weights: &RiskWeights) -> f64 {
    let time_ratio = record.actual_delivery_days / (record.promised_delivery_days + 1.0);
    let cost_ratio = record.delivery_cost / (stats.mean_delivery_cost + 1.0);
    let traffic_ratio = record.traffic_delay / (stats.max_traffic_delay + 1.0);

    weights.delivery_time * time_ratio + weights.cost * cost_ratio + weights.traffic * traffic_ratio
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{order, stats};

    #[test]
    fn test_single_order_scenario() {
        let record = OrderRecord {
            promised_delivery_days: 2.0,
            actual_delivery_days: 5.0,
            delivery_cost: 100.0,
            traffic_delay: 1.0,
            ..order("A")
        };
        let s = score(&record, &stats(100.0, 100.0, 1.0), &RiskWeights::default());
        let expected = 0.4 * (5.0 / 3.0) + 0.3 * (100.0 / 101.0) + 0.3 * (1.0 / 2.0);
        assert!((s - expected).abs() < 1e-12);
        assert!((s - 1.114).abs() < 1e-3);
    }

    #[test]
    fn test_zero_filled_order_scores_zero() {
        let record = OrderRecord {
            promised_delivery_days: 0.0,
            actual_delivery_days: 0.0,
            delivery_cost: 0.0,
            traffic_delay: 0.0,
            ..order("A")
        };
        assert_eq!(score(&record, &stats(0.0, 0.0, 0.0), &RiskWeights::default()), 0.0);
    }
}
