//! Whole-table statistics shared by every per-row derivation.

use serde::Serialize;

use crate::error::{PipelineError, Result};
use crate::models::OrderRecord;

/// Computed once per load and passed by reference into each derivation step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableStats {
    pub rows: usize,
    pub median_delivery_cost: f64,
    pub mean_delivery_cost: f64,
    pub max_traffic_delay: f64,
}

impl TableStats {
    pub fn compute(records: &[OrderRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(PipelineError::EmptyTable);
        }

        let costs: Vec<f64> = records.iter().map(|r| r.delivery_cost).collect();
        let max_traffic_delay = records
            .iter()
            .map(|r| r.traffic_delay)
            .fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            rows: records.len(),
            median_delivery_cost: median(&costs),
            mean_delivery_cost: costs.iter().sum::<f64>() / costs.len() as f64,
            max_traffic_delay,
        })
    }
}

/// Median with the two middle values averaged for even counts.
/// Callers guarantee a non-empty slice.
pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[150.0, 50.0]), 100.0);
        assert_eq!(median(&[100.0]), 100.0);
    }

    #[test]
    fn test_empty_table_fails_fast() {
        assert!(matches!(TableStats::compute(&[]), Err(PipelineError::EmptyTable)));
    }
}
