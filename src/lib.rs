//! Order-fulfillment process mining: join five source tables into one process
//! table, derive deviation, leakage, root cause and risk per order, and serve
//! the aggregate views and what-if simulator built on it.

pub mod aggregates;
pub mod api;
pub mod config;
pub mod deviation;
pub mod error;
pub mod join;
pub mod leakage;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod risk;
pub mod root_cause;
pub mod simulator;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{PipelineError, Result};
pub use pipeline::ProcessTable;
