//! Fixtures shared by unit tests.

use std::collections::BTreeMap;

use polars::prelude::*;

use crate::loader::SourceTables;
use crate::models::{Label, OrderRecord};
use crate::stats::TableStats;

/// A delivered, on-time order with no special handling.
pub fn order(order_id: &str) -> OrderRecord {
    OrderRecord {
        order_id: order_id.to_string(),
        order_value: 1000.0,
        priority: Label::from("Express"),
        promised_delivery_days: 3.0,
        actual_delivery_days: 3.0,
        status: Label::from("Delivered"),
        delivery_cost: 100.0,
        rating: 4.0,
        carrier: Label::from("FastShip"),
        traffic_delay: 1.0,
        special_handling: Label::from("None"),
        feedback_rating: 4.0,
        attributes: BTreeMap::new(),
    }
}

pub fn stats(median: f64, mean: f64, max_traffic: f64) -> TableStats {
    TableStats {
        rows: 1,
        median_delivery_cost: median,
        mean_delivery_cost: mean,
        max_traffic_delay: max_traffic,
    }
}

/// A delivery fixture: order_id, promised, actual, status, carrier, cost.
pub type DeliveryRow = (&'static str, i64, i64, &'static str, &'static str, f64);

pub fn delivery_row(
    id: &'static str,
    promised: i64,
    actual: i64,
    status: &'static str,
    carrier: &'static str,
    cost: f64,
) -> DeliveryRow {
    (id, promised, actual, status, carrier, cost)
}

/// Source tables in canonical column names, one entry per order id.
///
/// Each order tuple is (id, value, priority, special_handling, traffic_delay).
pub fn source_tables(orders: &[(&str, f64, &str, &str, f64)], deliveries: Vec<DeliveryRow>) -> SourceTables {
    let ids: Vec<&str> = orders.iter().map(|o| o.0).collect();
    SourceTables {
        orders: df!(
            "order_id" => &ids,
            "order_value" => orders.iter().map(|o| o.1).collect::<Vec<_>>(),
            "priority" => orders.iter().map(|o| o.2).collect::<Vec<_>>(),
            "special_handling" => orders.iter().map(|o| o.3).collect::<Vec<_>>()
        )
        .unwrap(),
        delivery: df!(
            "order_id" => deliveries.iter().map(|d| d.0).collect::<Vec<_>>(),
            "promised_delivery_days" => deliveries.iter().map(|d| d.1).collect::<Vec<_>>(),
            "actual_delivery_days" => deliveries.iter().map(|d| d.2).collect::<Vec<_>>(),
            "status" => deliveries.iter().map(|d| d.3).collect::<Vec<_>>(),
            "carrier" => deliveries.iter().map(|d| d.4).collect::<Vec<_>>(),
            "delivery_cost" => deliveries.iter().map(|d| d.5).collect::<Vec<_>>(),
            "rating" => vec![4i64; deliveries.len()]
        )
        .unwrap(),
        routes: df!(
            "order_id" => &ids,
            "traffic_delay" => orders.iter().map(|o| o.4).collect::<Vec<_>>(),
            "distance_km" => vec![120i64; ids.len()]
        )
        .unwrap(),
        cost: df!("order_id" => &ids, "fuel_cost" => vec![55.5; ids.len()]).unwrap(),
        feedback: df!("order_id" => &ids, "feedback_rating" => vec![4i64; ids.len()]).unwrap(),
    }
}
