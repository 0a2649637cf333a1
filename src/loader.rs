//! Table Normalizer: loads the five source tables and canonicalizes headers.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{PipelineError, Result};

pub const ORDERS_FILE: &str = "orders.csv";
pub const DELIVERY_FILE: &str = "delivery_performance.csv";
pub const ROUTES_FILE: &str = "routes_distance.csv";
pub const COST_FILE: &str = "cost_breakdown.csv";
pub const FEEDBACK_FILE: &str = "customer_feedback.csv";

pub const ORDERS_RENAMES: &[(&str, &str)] = &[("order_value_inr", "order_value")];
pub const DELIVERY_RENAMES: &[(&str, &str)] = &[
    ("delivery_status", "status"),
    ("delivery_cost_inr", "delivery_cost"),
    ("customer_rating", "rating"),
];
pub const ROUTES_RENAMES: &[(&str, &str)] = &[("traffic_delay_minutes", "traffic_delay")];
pub const COST_RENAMES: &[(&str, &str)] = &[];
pub const FEEDBACK_RENAMES: &[(&str, &str)] = &[("rating", "feedback_rating")];

/// Field values read as null. `None` is absent on purpose: in these exports
/// it means "no special handling".
pub const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "n/a", "nan", "null",
];

/// Lower-case, trim, and replace spaces with underscores: `Order Value` -> `order_value`.
pub fn normalize_column_name(raw: &str) -> String {
    raw.to_lowercase().trim().replace(' ', "_")
}

/// Normalize every header of `df`, then apply the table's rename map.
pub fn normalize_columns(df: &mut DataFrame, renames: &[(&str, &str)]) -> Result<()> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|raw| {
            let normalized = normalize_column_name(raw);
            renames
                .iter()
                .find(|(from, _)| *from == normalized)
                .map(|(_, to)| to.to_string())
                .unwrap_or(normalized)
        })
        .collect();
    df.set_column_names(&names)?;
    Ok(())
}

/// The five normalized source tables, in join order.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub orders: DataFrame,
    pub delivery: DataFrame,
    pub routes: DataFrame,
    pub cost: DataFrame,
    pub feedback: DataFrame,
}

impl SourceTables {
    /// Normalize headers of freshly read tables. Tables built in memory with
    /// canonical names pass through unchanged.
    pub fn normalized(
        mut orders: DataFrame,
        mut delivery: DataFrame,
        mut routes: DataFrame,
        mut cost: DataFrame,
        mut feedback: DataFrame,
    ) -> Result<Self> {
        normalize_columns(&mut orders, ORDERS_RENAMES)?;
        normalize_columns(&mut delivery, DELIVERY_RENAMES)?;
        normalize_columns(&mut routes, ROUTES_RENAMES)?;
        normalize_columns(&mut cost, COST_RENAMES)?;
        normalize_columns(&mut feedback, FEEDBACK_RENAMES)?;
        Ok(Self { orders, delivery, routes, cost, feedback })
    }
}

/// Anything that can supply the five source tables.
pub trait TableSource {
    fn load(&self) -> Result<SourceTables>;
}

/// Reads the five CSV exports from one directory.
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    dir: PathBuf,
}

impl CsvDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read(&self, table: &'static str, file: &str) -> Result<DataFrame> {
        let path = self.dir.join(file);
        let df = read_csv(table, &path)?;
        debug!("Read {} rows from {:?}", df.height(), path);
        Ok(df)
    }
}

impl TableSource for CsvDirectory {
    fn load(&self) -> Result<SourceTables> {
        info!("Loading source tables from {:?}", self.dir);
        let tables = SourceTables::normalized(
            self.read("orders", ORDERS_FILE)?,
            self.read("delivery", DELIVERY_FILE)?,
            self.read("routes", ROUTES_FILE)?,
            self.read("cost", COST_FILE)?,
            self.read("feedback", FEEDBACK_FILE)?,
        )?;
        info!(
            "Loaded {} orders, {} deliveries, {} routes, {} cost rows, {} feedback rows",
            tables.orders.height(),
            tables.delivery.height(),
            tables.routes.height(),
            tables.cost.height(),
            tables.feedback.height()
        );
        Ok(tables)
    }
}

/// Read one CSV export with a header row, inferring column types over the
/// whole file.
pub fn read_csv(table: &'static str, path: &Path) -> Result<DataFrame> {
    std::fs::metadata(path).map_err(|source| PipelineError::Load {
        table,
        path: path.to_path_buf(),
        source,
    })?;

    let null_values = NullValues::AllColumns(NULL_TOKENS.iter().map(|t| t.to_string()).collect());
    LazyCsvReader::new(path)
        .with_infer_schema_length(None)
        .with_null_values(Some(null_values))
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|source| PipelineError::Csv { table, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("Order_ID"), "order_id");
        assert_eq!(normalize_column_name(" Delivery Cost INR "), "delivery_cost_inr");
    }

    #[test]
    fn test_read_csv_infers_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "orders.csv",
            "Order_ID,Order_Value_INR,Priority\nORD1,1200.5,Express\nORD2,,Standard\n",
        );

        let df = read_csv("orders", &path).unwrap();
        assert_eq!(df.get_column_names(), ["Order_ID", "Order_Value_INR", "Priority"]);
        assert_eq!(df.column("Order_Value_INR").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("Order_Value_INR").unwrap().null_count(), 1);
    }

    #[test]
    fn test_read_csv_treats_na_tokens_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "delivery.csv",
            "Order_ID,Customer_Rating,Delivery_Cost_INR\nO1,4,100\nO2,NA,N/A\nO3,null,#N/A\nO4,<NA>,NULL\n",
        );

        let df = read_csv("delivery", &path).unwrap();
        let rating = df.column("Customer_Rating").unwrap();
        assert!(rating.dtype().is_numeric());
        assert_eq!(rating.null_count(), 3);
        assert_eq!(df.column("Delivery_Cost_INR").unwrap().null_count(), 3);
    }

    #[test]
    fn test_read_csv_keeps_none_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "cost.csv", "Order_ID,Special_Handling\nO1,None\nO2,Fragile\n");

        let df = read_csv("cost", &path).unwrap();
        let handling = df.column("Special_Handling").unwrap();
        assert_eq!(handling.null_count(), 0);
        assert_eq!(handling.str().unwrap().get(0), Some("None"));
    }

    #[test]
    fn test_normalized_applies_rename_maps() {
        let frame = |cols: &[&str]| {
            DataFrame::new(cols.iter().map(|c| Series::new_empty(c, &DataType::String)).collect()).unwrap()
        };
        let tables = SourceTables::normalized(
            frame(&["Order_ID", "Order_Value_INR", "Customer Segment"]),
            frame(&["Order_ID", "Delivery_Status", "Delivery_Cost_INR", "Customer_Rating"]),
            frame(&["Order_ID", "Traffic_Delay_Minutes"]),
            frame(&["Order_ID", "Fuel_Cost"]),
            frame(&["Order_ID", "Rating"]),
        )
        .unwrap();
        assert_eq!(tables.orders.get_column_names(), ["order_id", "order_value", "customer_segment"]);
        assert_eq!(tables.delivery.get_column_names(), ["order_id", "status", "delivery_cost", "rating"]);
        assert_eq!(tables.routes.get_column_names(), ["order_id", "traffic_delay"]);
        assert_eq!(tables.cost.get_column_names(), ["order_id", "fuel_cost"]);
        assert_eq!(tables.feedback.get_column_names(), ["order_id", "feedback_rating"]);
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let err = CsvDirectory::new("/nonexistent/nexgen").load().unwrap_err();
        assert!(matches!(err, PipelineError::Load { table: "orders", .. }));
    }
}
