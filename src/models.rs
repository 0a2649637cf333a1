use polars::prelude::*;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{PipelineError, Result};

/// Categorical value from the unified table.
///
/// Unmatched joins zero-fill every column, categorical ones included, so a
/// label is either real text or the numeric `0` sentinel. A text column
/// holding the string `"0"` stays text; a numeric column cannot tell a real
/// `0` from a filled one, so both become the sentinel.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    ZeroFill,
    Text(String),
}

impl Label {
    pub fn from_value(value: &AnyValue) -> Self {
        match value {
            AnyValue::Null => Label::ZeroFill,
            AnyValue::String(s) => Label::Text(s.to_string()),
            AnyValue::StringOwned(s) => Label::Text(s.to_string()),
            other => match other.extract::<f64>() {
                Some(n) if n == 0.0 => Label::ZeroFill,
                _ => Label::Text(other.to_string()),
            },
        }
    }

    /// String equality; the zero-fill sentinel equals no string.
    pub fn is(&self, value: &str) -> bool {
        matches!(self, Label::Text(s) if s == value)
    }

    pub fn is_any_of(&self, values: &[&str]) -> bool {
        values.iter().any(|v| self.is(v))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::ZeroFill => f.write_str("0"),
            Label::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Label::ZeroFill => serializer.serialize_i64(0),
            Label::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}

/// JSON rendering of a pass-through cell. Nulls left by the join become `0`.
pub fn attribute_value(value: &AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::from(0),
        AnyValue::Boolean(b) => Value::Bool(*b),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        AnyValue::Int8(i) => Value::from(*i),
        AnyValue::Int16(i) => Value::from(*i),
        AnyValue::Int32(i) => Value::from(*i),
        AnyValue::Int64(i) => Value::from(*i),
        AnyValue::UInt8(u) => Value::from(*u),
        AnyValue::UInt16(u) => Value::from(*u),
        AnyValue::UInt32(u) => Value::from(*u),
        AnyValue::UInt64(u) => Value::from(*u),
        AnyValue::Float32(f) => serde_json::Number::from_f64(*f as f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        AnyValue::Float64(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        other => Value::String(other.to_string()),
    }
}

/// One row of the unified table before derivation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub order_value: f64,
    pub priority: Label,
    pub promised_delivery_days: f64,
    pub actual_delivery_days: f64,
    pub status: Label,
    pub delivery_cost: f64,
    pub rating: f64,
    pub carrier: Label,
    pub traffic_delay: f64,
    pub special_handling: Label,
    pub feedback_rating: f64,
    /// Pass-through columns (order date, distance, fuel cost, ...).
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

const REQUIRED_COLUMNS: [&str; 12] = [
    "order_id",
    "order_value",
    "priority",
    "promised_delivery_days",
    "actual_delivery_days",
    "status",
    "delivery_cost",
    "rating",
    "carrier",
    "traffic_delay",
    "special_handling",
    "feedback_rating",
];

fn number(value: &AnyValue, column: &str, order_id: &str) -> Result<f64> {
    let invalid = |raw: String| PipelineError::InvalidValue {
        column: column.to_string(),
        order_id: order_id.to_string(),
        value: raw,
    };
    match value {
        AnyValue::Null => Ok(0.0),
        AnyValue::String(s) => s.trim().parse().map_err(|_| invalid(s.to_string())),
        AnyValue::StringOwned(s) => s.trim().parse().map_err(|_| invalid(s.to_string())),
        other => other.extract::<f64>().ok_or_else(|| invalid(other.to_string())),
    }
}

fn text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

impl OrderRecord {
    /// Extract typed records from the zero-filled unified frame.
    pub fn from_frame(df: &DataFrame) -> Result<Vec<OrderRecord>> {
        let mut required = Vec::with_capacity(REQUIRED_COLUMNS.len());
        for column in REQUIRED_COLUMNS {
            required.push(df.column(column).map_err(|_| PipelineError::MissingColumn {
                table: "unified".to_string(),
                column: column.to_string(),
            })?);
        }
        let extra: Vec<&Series> = df
            .get_columns()
            .iter()
            .filter(|s| !REQUIRED_COLUMNS.contains(&s.name()))
            .collect();

        (0..df.height())
            .map(|i| {
                let cell = |slot: usize| required[slot].get(i);
                let order_id = text(&cell(0)?);
                let num = |slot: usize| -> Result<f64> { number(&cell(slot)?, REQUIRED_COLUMNS[slot], &order_id) };
                let label = |slot: usize| -> Result<Label> { Ok(Label::from_value(&cell(slot)?)) };

                let mut attributes = BTreeMap::new();
                for series in &extra {
                    attributes.insert(series.name().to_string(), attribute_value(&series.get(i)?));
                }

                Ok(OrderRecord {
                    order_value: num(1)?,
                    priority: label(2)?,
                    promised_delivery_days: num(3)?,
                    actual_delivery_days: num(4)?,
                    status: label(5)?,
                    delivery_cost: num(6)?,
                    rating: num(7)?,
                    carrier: label(8)?,
                    traffic_delay: num(9)?,
                    special_handling: label(10)?,
                    feedback_rating: num(11)?,
                    attributes,
                    order_id,
                })
            })
            .collect()
    }
}

/// Per-row deviation predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DeviationFlags {
    pub delay: bool,
    pub damage: bool,
    pub cost_overrun: bool,
    pub deviation: bool,
}

/// Causal label from the prioritized tagging rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RootCause {
    Normal,
    Traffic,
    #[serde(rename = "Carrier Reliability")]
    CarrierReliability,
    #[serde(rename = "Handling Complexity")]
    HandlingComplexity,
}

impl RootCause {
    pub const ALL: [RootCause; 4] = [
        RootCause::Normal,
        RootCause::Traffic,
        RootCause::CarrierReliability,
        RootCause::HandlingComplexity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RootCause::Normal => "Normal",
            RootCause::Traffic => "Traffic",
            RootCause::CarrierReliability => "Carrier Reliability",
            RootCause::HandlingComplexity => "Handling Complexity",
        }
    }
}

impl fmt::Display for RootCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unified-table row with every derived column attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessRow {
    #[serde(flatten)]
    pub record: OrderRecord,
    #[serde(flatten)]
    pub flags: DeviationFlags,
    pub value_leakage: f64,
    pub root_cause: RootCause,
    pub risk_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_zero_fill_never_equals_text() {
        assert!(!Label::ZeroFill.is("None"));
        assert!(!Label::ZeroFill.is("0"));
        assert_eq!(Label::ZeroFill.to_string(), "0");
        assert_eq!(serde_json::to_string(&Label::ZeroFill).unwrap(), "0");
    }

    #[test]
    fn test_label_from_value() {
        assert_eq!(Label::from_value(&AnyValue::Null), Label::ZeroFill);
        assert_eq!(Label::from_value(&AnyValue::String("Express")), Label::from("Express"));
        assert_eq!(Label::from_value(&AnyValue::Int64(3)), Label::from("3"));
        assert_eq!(Label::from_value(&AnyValue::Int64(0)), Label::ZeroFill);
    }

    #[test]
    fn test_text_zero_is_not_the_fill_sentinel() {
        let label = Label::from_value(&AnyValue::String("0"));
        assert_eq!(label, Label::from("0"));
        assert_ne!(label, Label::ZeroFill);
        assert!(label.is("0"));
        assert_eq!(serde_json::to_string(&label).unwrap(), "\"0\"");
    }

    #[test]
    fn test_root_cause_serializes_display_name() {
        assert_eq!(
            serde_json::to_string(&RootCause::CarrierReliability).unwrap(),
            "\"Carrier Reliability\""
        );
        assert_eq!(RootCause::HandlingComplexity.to_string(), "Handling Complexity");
    }

    /// One row holding every required column: zeros, text "None" labels,
    /// and `order_id` = ORD1.
    fn unified() -> DataFrame {
        let columns = REQUIRED_COLUMNS
            .iter()
            .map(|&c| match c {
                "order_id" => Series::new(c, ["ORD1"]),
                "priority" | "status" | "carrier" | "special_handling" => Series::new(c, ["None"]),
                _ => Series::new(c, [0i64]),
            })
            .collect();
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn test_from_frame_keeps_pass_through_columns() {
        let mut df = unified();
        df.with_column(Series::new("distance_km", [12.5])).unwrap();
        df.with_column(Series::new("would_recommend", [None::<&str>])).unwrap();

        let records = OrderRecord::from_frame(&df).unwrap();
        assert_eq!(records[0].order_id, "ORD1");
        assert_eq!(records[0].attributes["distance_km"], serde_json::json!(12.5));
        assert_eq!(records[0].attributes["would_recommend"], serde_json::json!(0));
        assert_eq!(records[0].special_handling, Label::from("None"));
    }

    #[test]
    fn test_from_frame_null_label_is_zero_fill() {
        let mut df = unified();
        df.replace("special_handling", Series::new("special_handling", [None::<&str>])).unwrap();
        df.replace("rating", Series::new("rating", [None::<f64>])).unwrap();

        let record = &OrderRecord::from_frame(&df).unwrap()[0];
        assert_eq!(record.special_handling, Label::ZeroFill);
        assert_eq!(record.rating, 0.0);
    }

    #[test]
    fn test_from_frame_rejects_text_in_numeric_column() {
        let mut df = unified();
        df.replace("delivery_cost", Series::new("delivery_cost", ["cheap"])).unwrap();

        let err = OrderRecord::from_frame(&df).unwrap_err();
        match err {
            PipelineError::InvalidValue { column, order_id, .. } => {
                assert_eq!(column, "delivery_cost");
                assert_eq!(order_id, "ORD1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_frame_requires_columns() {
        let df = df!("order_id" => ["ORD1"]).unwrap();
        let err = OrderRecord::from_frame(&df).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn { .. }));
    }
}
