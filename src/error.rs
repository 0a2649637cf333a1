use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to read {table} table from {path}: {source}")]
    Load {
        table: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {table} table: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("dataframe operation failed: {0}")]
    DataFrame(#[from] PolarsError),

    #[error("column '{column}' missing from {table} table")]
    MissingColumn { table: String, column: String },

    #[error("column '{column}' holds non-numeric value '{value}' for order {order_id}")]
    InvalidValue {
        column: String,
        order_id: String,
        value: String,
    },

    #[error("unified table is empty; median, mean and max are undefined")]
    EmptyTable,

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
