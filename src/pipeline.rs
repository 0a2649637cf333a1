//! The process table: load once, join, derive, then serve read-only.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::deviation;
use crate::error::Result;
use crate::join;
use crate::leakage;
use crate::loader::{SourceTables, TableSource};
use crate::models::{OrderRecord, ProcessRow};
use crate::risk::{self, RiskWeights};
use crate::root_cause;
use crate::stats::TableStats;

/// Immutable snapshot of the unified table with every derived column.
///
/// Built once per session; views borrow it and never mutate it. Share it
/// across requests behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ProcessTable {
    rows: Vec<ProcessRow>,
    stats: TableStats,
    loaded_at: DateTime<Utc>,
}

impl ProcessTable {
    /// Load the sources and run the whole pipeline. Any load failure aborts
    /// before a single row is derived.
    pub fn load<S: TableSource + ?Sized>(source: &S) -> Result<Self> {
        let tables = source.load()?;
        Self::build(&tables)
    }

    pub fn build(tables: &SourceTables) -> Result<Self> {
        Self::build_with(tables, &RiskWeights::default())
    }

    pub fn build_with(tables: &SourceTables, weights: &RiskWeights) -> Result<Self> {
        let unified = join::unify(tables)?;
        let records = OrderRecord::from_frame(&unified)?;
        let stats = TableStats::compute(&records)?;
        info!(
            "Table statistics: median cost {:.2}, mean cost {:.2}, max traffic delay {:.2}",
            stats.median_delivery_cost, stats.mean_delivery_cost, stats.max_traffic_delay
        );

        let rows = derive(records, &stats, weights);
        let deviations = rows.iter().filter(|r| r.flags.deviation).count();
        info!("Derived {} rows, {} with deviations", rows.len(), deviations);

        Ok(Self {
            rows,
            stats,
            loaded_at: Utc::now(),
        })
    }

    pub fn rows(&self) -> &[ProcessRow] {
        &self.rows
    }

    pub fn stats(&self) -> &TableStats {
        &self.stats
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of `value_leakage`; the simulator's base leakage.
    pub fn total_leakage(&self) -> f64 {
        self.rows.iter().map(|r| r.value_leakage).sum()
    }
}

/// Attach flags, leakage, root cause and risk to every record.
pub fn derive(records: Vec<OrderRecord>, stats: &TableStats, weights: &RiskWeights) -> Vec<ProcessRow> {
    records
        .into_iter()
        .map(|record| {
            let flags = deviation::classify(&record, stats);
            let value_leakage = leakage::estimate(&record, &flags, stats);
            let root_cause = root_cause::tag(&record);
            let risk_score = risk::score(&record, stats, weights);
            ProcessRow {
                record,
                flags,
                value_leakage,
                root_cause,
                risk_score,
            }
        })
        .collect()
}
