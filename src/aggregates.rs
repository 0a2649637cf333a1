//! Aggregation Views over the process table.
//!
//! Every view is a fresh reduction; nothing is cached beyond the table itself.
//! Group keys come out in sorted order.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::models::{Label, ProcessRow, RootCause};
use crate::pipeline::ProcessTable;

/// Share of an action's leakage assumed recoverable by shifting volume.
pub const ACTION_SAVING_RATE: f64 = 0.3;
pub const TOP_ACTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutiveSummary {
    pub orders: usize,
    pub total_value_leakage: f64,
    /// Percentage of orders with no deviation, one decimal.
    pub perfect_order_rate: f64,
    /// Mean delivery rating, two decimals.
    pub avg_customer_rating: f64,
    pub active_deviations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusLeakage {
    pub status: Label,
    pub value_leakage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarrierEfficiency {
    pub carrier: Label,
    pub orders: usize,
    pub avg_delivery_cost: f64,
    pub avg_value_leakage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    pub carrier: Label,
    pub value_leakage: f64,
    pub potential_saving: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowGroup {
    pub priority: Label,
    pub carrier: Label,
    pub status: Label,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowLink {
    pub source: usize,
    pub target: usize,
    pub value: usize,
}

/// Sankey-style flow: priority -> carrier -> status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessFlow {
    pub nodes: Vec<Label>,
    pub links: Vec<FlowLink>,
    pub groups: Vec<FlowGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootCauseShare {
    pub root_cause: RootCause,
    pub orders: usize,
    pub value_leakage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskEntry {
    pub order_id: String,
    pub carrier: Label,
    pub root_cause: RootCause,
    pub risk_score: f64,
}

pub fn executive_summary(table: &ProcessTable) -> ExecutiveSummary {
    let rows = table.rows();
    let n = rows.len().max(1) as f64;
    let active_deviations = rows.iter().filter(|r| r.flags.deviation).count();
    let perfect = (rows.len() - active_deviations) as f64 / n;
    let avg_rating = rows.iter().map(|r| r.record.rating).sum::<f64>() / n;

    ExecutiveSummary {
        orders: rows.len(),
        total_value_leakage: table.total_leakage(),
        perfect_order_rate: (perfect * 1000.0).round() / 10.0,
        avg_customer_rating: (avg_rating * 100.0).round() / 100.0,
        active_deviations,
    }
}

pub fn leakage_by_status(table: &ProcessTable) -> Vec<StatusLeakage> {
    let mut groups: BTreeMap<&Label, f64> = BTreeMap::new();
    for row in table.rows() {
        *groups.entry(&row.record.status).or_default() += row.value_leakage;
    }
    groups
        .into_iter()
        .map(|(status, value_leakage)| StatusLeakage {
            status: status.clone(),
            value_leakage,
        })
        .collect()
}

fn by_carrier(table: &ProcessTable) -> BTreeMap<&Label, Vec<&ProcessRow>> {
    let mut groups: BTreeMap<&Label, Vec<&ProcessRow>> = BTreeMap::new();
    for row in table.rows() {
        groups.entry(&row.record.carrier).or_default().push(row);
    }
    groups
}

pub fn carrier_efficiency(table: &ProcessTable) -> Vec<CarrierEfficiency> {
    by_carrier(table)
        .into_iter()
        .map(|(carrier, rows)| {
            let n = rows.len() as f64;
            CarrierEfficiency {
                carrier: carrier.clone(),
                orders: rows.len(),
                avg_delivery_cost: rows.iter().map(|r| r.record.delivery_cost).sum::<f64>() / n,
                avg_value_leakage: rows.iter().map(|r| r.value_leakage).sum::<f64>() / n,
            }
        })
        .collect()
}

/// Carriers ranked by total leakage, highest first, at most `limit` of them.
pub fn top_actions(table: &ProcessTable, limit: usize) -> Vec<Action> {
    let mut totals: Vec<(&Label, f64)> = by_carrier(table)
        .into_iter()
        .map(|(carrier, rows)| (carrier, rows.iter().map(|r| r.value_leakage).sum()))
        .collect();
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    totals.truncate(limit);

    totals
        .into_iter()
        .map(|(carrier, value_leakage)| {
            let potential_saving = value_leakage * ACTION_SAVING_RATE;
            Action {
                carrier: carrier.clone(),
                value_leakage,
                potential_saving,
                message: format!(
                    "Shift volume away from {} → Potential saving ₹{}",
                    carrier, potential_saving as i64
                ),
            }
        })
        .collect()
}

/// Group by (priority, carrier, status) and lay the groups out as two link
/// layers, priority -> carrier then carrier -> status.
///
/// Both layers reuse the per-group counts in group order, so the second layer
/// repeats the first layer's values rather than re-counting carrier -> status.
pub fn process_flow(table: &ProcessTable) -> ProcessFlow {
    let mut counts: BTreeMap<(&Label, &Label, &Label), usize> = BTreeMap::new();
    for row in table.rows() {
        let r = &row.record;
        *counts.entry((&r.priority, &r.carrier, &r.status)).or_default() += 1;
    }

    let groups: Vec<FlowGroup> = counts
        .into_iter()
        .map(|((priority, carrier, status), count)| FlowGroup {
            priority: priority.clone(),
            carrier: carrier.clone(),
            status: status.clone(),
            count,
        })
        .collect();

    let mut nodes: Vec<Label> = Vec::new();
    let mut index: HashMap<Label, usize> = HashMap::new();
    for g in &groups {
        for label in [&g.priority, &g.carrier, &g.status] {
            if !index.contains_key(label) {
                index.insert(label.clone(), nodes.len());
                nodes.push(label.clone());
            }
        }
    }

    let first_layer = groups.iter().map(|g| FlowLink {
        source: index[&g.priority],
        target: index[&g.carrier],
        value: g.count,
    });
    let second_layer = groups.iter().map(|g| FlowLink {
        source: index[&g.carrier],
        target: index[&g.status],
        value: g.count,
    });
    let links = first_layer.chain(second_layer).collect();

    ProcessFlow { nodes, links, groups }
}

/// Order count and leakage per tag, every tag listed even when unused.
pub fn root_cause_breakdown(table: &ProcessTable) -> Vec<RootCauseShare> {
    RootCause::ALL
        .iter()
        .map(|&cause| {
            let rows: Vec<&ProcessRow> = table.rows().iter().filter(|r| r.root_cause == cause).collect();
            RootCauseShare {
                root_cause: cause,
                orders: rows.len(),
                value_leakage: rows.iter().map(|r| r.value_leakage).sum(),
            }
        })
        .collect()
}

pub fn highest_risk(table: &ProcessTable, limit: usize) -> Vec<RiskEntry> {
    let mut ranked: Vec<&ProcessRow> = table.rows().iter().collect();
    ranked.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    ranked
        .into_iter()
        .take(limit)
        .map(|r| RiskEntry {
            order_id: r.record.order_id.clone(),
            carrier: r.record.carrier.clone(),
            root_cause: r.root_cause,
            risk_score: r.risk_score,
        })
        .collect()
}
