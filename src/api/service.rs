//! Shared view layer used by the REST handlers and the terminal views.

use std::sync::Arc;

use crate::aggregates::{
    self, Action, CarrierEfficiency, ExecutiveSummary, ProcessFlow, RiskEntry, RootCauseShare,
    StatusLeakage,
};
use crate::error::Result;
use crate::models::ProcessRow;
use crate::pipeline::ProcessTable;
use crate::simulator::{self, Scenario, SimulationResult};

/// Read-only access to one loaded process table.
///
/// Cloning is cheap; every clone shares the same snapshot.
#[derive(Debug, Clone)]
pub struct DashboardService {
    table: Arc<ProcessTable>,
}

impl DashboardService {
    pub fn new(table: ProcessTable) -> Self {
        Self { table: Arc::new(table) }
    }

    pub fn table(&self) -> &ProcessTable {
        &self.table
    }

    pub fn summary(&self) -> ExecutiveSummary {
        aggregates::executive_summary(&self.table)
    }

    pub fn leakage_by_status(&self) -> Vec<StatusLeakage> {
        aggregates::leakage_by_status(&self.table)
    }

    pub fn carriers(&self) -> Vec<CarrierEfficiency> {
        aggregates::carrier_efficiency(&self.table)
    }

    pub fn actions(&self) -> Vec<Action> {
        aggregates::top_actions(&self.table, aggregates::TOP_ACTIONS)
    }

    pub fn flow(&self) -> ProcessFlow {
        aggregates::process_flow(&self.table)
    }

    pub fn root_causes(&self) -> Vec<RootCauseShare> {
        aggregates::root_cause_breakdown(&self.table)
    }

    pub fn highest_risk(&self, limit: usize) -> Vec<RiskEntry> {
        aggregates::highest_risk(&self.table, limit)
    }

    /// Uses the table's total leakage as the base; the table is untouched.
    pub fn simulate(&self, scenario: &Scenario) -> Result<SimulationResult> {
        simulator::simulate(scenario, self.table.total_leakage())
    }

    pub fn orders(&self, limit: usize) -> &[ProcessRow] {
        let rows = self.table.rows();
        &rows[..limit.min(rows.len())]
    }
}
