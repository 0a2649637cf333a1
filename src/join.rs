//! Join Engine: one row per order, zero-filled where a source has no match.
//!
//! Precondition: `order_id` is unique in the delivery, routes, cost and
//! feedback tables. Duplicates multiply rows; they are logged, not removed.

use polars::prelude::*;
use tracing::{info, warn};

use crate::error::{PipelineError, Result};
use crate::loader::SourceTables;

pub const JOIN_KEY: &str = "order_id";

/// Key column as text, so `7` and `"7"` match across tables.
fn keyed(df: &DataFrame, table: &str) -> Result<LazyFrame> {
    let key = df.column(JOIN_KEY).map_err(|_| PipelineError::MissingColumn {
        table: table.to_string(),
        column: JOIN_KEY.to_string(),
    })?;

    let duplicated = key.len() - key.n_unique()?;
    if table != "orders" && duplicated > 0 {
        warn!(
            "{} table has {} duplicated {} values; joined rows will multiply",
            table, duplicated, JOIN_KEY
        );
    }

    Ok(df.clone().lazy().with_column(col(JOIN_KEY).cast(DataType::String)))
}

/// Left join the four secondary tables onto orders, then zero-fill the
/// numeric nulls. Text columns keep their nulls; record extraction reads a
/// null label as the zero-fill sentinel.
pub fn unify(tables: &SourceTables) -> Result<DataFrame> {
    let on = [col(JOIN_KEY)];
    let joined = keyed(&tables.orders, "orders")?
        .join(keyed(&tables.delivery, "delivery")?, on.clone(), on.clone(), JoinArgs::new(JoinType::Left))
        .join(keyed(&tables.routes, "routes")?, on.clone(), on.clone(), JoinArgs::new(JoinType::Left))
        .join(keyed(&tables.cost, "cost")?, on.clone(), on.clone(), JoinArgs::new(JoinType::Left))
        .join(keyed(&tables.feedback, "feedback")?, on.clone(), on, JoinArgs::new(JoinType::Left))
        .collect()?;

    let zero_fill: Vec<Expr> = joined
        .get_columns()
        .iter()
        .filter(|s| s.dtype().is_numeric())
        .map(|s| col(s.name()).fill_null(lit(0)))
        .collect();
    let unified = joined.lazy().with_columns(zero_fill).collect()?;

    info!(
        "Unified {} orders into {} rows x {} columns",
        tables.orders.height(),
        unified.height(),
        unified.width()
    );
    Ok(unified)
}
