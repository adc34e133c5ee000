use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JsonValue};

use crate::engine::errors::{CoercionError, PlanError};

mod descriptor;


pub use descriptor::{PrimitiveCategory, TypeCategory, TypeDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalType {
    Null,
    Boolean,
    Integer,
    Float,
    Timestamp,
    String,
    Binary,
}

impl LogicalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::Null => "Null",
            LogicalType::Boolean => "Boolean",
            LogicalType::Integer => "Integer",
            LogicalType::Float => "Float",
            LogicalType::Timestamp => "Timestamp",
            LogicalType::String => "String",
            LogicalType::Binary => "Binary",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single value exchanged with the host engine: an aggregate argument,
/// a partial-state field, or a final result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    Null,
    Boolean(bool),
    Int64(i64),
    Float64(f64),
    /// Milliseconds since the Unix epoch
    Timestamp(i64),
    Utf8(String),
    Binary(Vec<u8>),
}

impl ScalarValue {
    pub fn logical_type(&self) -> LogicalType {
        match self {
            ScalarValue::Null => LogicalType::Null,
            ScalarValue::Boolean(_) => LogicalType::Boolean,
            ScalarValue::Int64(_) => LogicalType::Integer,
            ScalarValue::Float64(_) => LogicalType::Float,
            ScalarValue::Timestamp(_) => LogicalType::Timestamp,
            ScalarValue::Utf8(_) => LogicalType::String,
            ScalarValue::Binary(_) => LogicalType::Binary,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            ScalarValue::Null => JsonValue::Null,
            ScalarValue::Boolean(b) => JsonValue::Bool(*b),
            ScalarValue::Int64(i) => JsonValue::Number(Number::from(*i)),
            // JSON has no NaN or infinity; spell them out rather than emit null
            ScalarValue::Float64(f) if f.is_nan() => JsonValue::String("NaN".into()),
            ScalarValue::Float64(f) if f.is_infinite() => JsonValue::String(
                if f.is_sign_positive() { "Infinity" } else { "-Infinity" }.into(),
            ),
            ScalarValue::Float64(f) => Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            ScalarValue::Timestamp(ts) => JsonValue::Number(Number::from(*ts)),
            ScalarValue::Utf8(s) => JsonValue::String(s.clone()),
            ScalarValue::Binary(bytes) => {
                JsonValue::Array(bytes.iter().map(|b| JsonValue::from(*b)).collect())
            }
        }
    }

    /// Coerces the value to a double the way the host's primitive converter
    /// does: numbers convert directly, strings are parsed, timestamps become
    /// fractional seconds since the epoch.
    pub fn coerce_f64(&self) -> Result<f64, CoercionError> {
        match self {
            ScalarValue::Float64(f) => Ok(*f),
            ScalarValue::Int64(i) => Ok(*i as f64),
            ScalarValue::Timestamp(ms) => Ok(*ms as f64 / 1000.0),
            ScalarValue::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            ScalarValue::Utf8(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| CoercionError::NotNumeric(s.clone())),
            other => Err(CoercionError::Unsupported(other.logical_type())),
        }
    }

    /// Integer counterpart of [`coerce_f64`](Self::coerce_f64). Floats are
    /// truncated toward zero, timestamps become whole seconds.
    pub fn coerce_i64(&self) -> Result<i64, CoercionError> {
        match self {
            ScalarValue::Int64(i) => Ok(*i),
            ScalarValue::Float64(f) if f.is_finite() => Ok(f.trunc() as i64),
            ScalarValue::Timestamp(ms) => Ok(ms.div_euclid(1000)),
            ScalarValue::Boolean(b) => Ok(i64::from(*b)),
            ScalarValue::Utf8(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| CoercionError::NotNumeric(s.clone())),
            ScalarValue::Float64(f) => Err(CoercionError::NotNumeric(f.to_string())),
            other => Err(CoercionError::Unsupported(other.logical_type())),
        }
    }

    /// Parses a literal as typed by `category`. `null` (any case) is SQL NULL.
    pub fn parse_literal(raw: &str, category: PrimitiveCategory) -> Result<Self, PlanError> {
        if raw.eq_ignore_ascii_case("null") {
            return Ok(ScalarValue::Null);
        }
        let invalid = || PlanError::InvalidLiteral {
            literal: raw.to_string(),
            type_name: category.type_name().to_string(),
        };
        let value = match category {
            PrimitiveCategory::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" => ScalarValue::Boolean(true),
                "false" => ScalarValue::Boolean(false),
                _ => return Err(invalid()),
            },
            PrimitiveCategory::Byte => {
                ScalarValue::Int64(raw.trim().parse::<i8>().map_err(|_| invalid())?.into())
            }
            PrimitiveCategory::Short => {
                ScalarValue::Int64(raw.trim().parse::<i16>().map_err(|_| invalid())?.into())
            }
            PrimitiveCategory::Int => {
                ScalarValue::Int64(raw.trim().parse::<i32>().map_err(|_| invalid())?.into())
            }
            PrimitiveCategory::Long => {
                ScalarValue::Int64(raw.trim().parse::<i64>().map_err(|_| invalid())?)
            }
            PrimitiveCategory::Float | PrimitiveCategory::Double | PrimitiveCategory::Decimal => {
                ScalarValue::Float64(raw.trim().parse().map_err(|_| invalid())?)
            }
            PrimitiveCategory::Timestamp | PrimitiveCategory::Date => {
                ScalarValue::Timestamp(raw.trim().parse().map_err(|_| invalid())?)
            }
            // Strings are kept verbatim; numeric parsing happens at ingestion
            PrimitiveCategory::String => ScalarValue::Utf8(raw.to_string()),
            PrimitiveCategory::Binary => ScalarValue::Binary(raw.as_bytes().to_vec()),
        };
        Ok(value)
    }
}

impl From<JsonValue> for ScalarValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => ScalarValue::Null,
            JsonValue::Bool(b) => ScalarValue::Boolean(b),
            JsonValue::Number(num) => {
                if let Some(i) = num.as_i64() {
                    ScalarValue::Int64(i)
                } else if let Some(f) = num.as_f64() {
                    ScalarValue::Float64(f)
                } else {
                    ScalarValue::Utf8(num.to_string())
                }
            }
            JsonValue::String(s) => ScalarValue::Utf8(s),
            JsonValue::Array(_) | JsonValue::Object(_) => ScalarValue::Utf8(value.to_string()),
        }
    }
}

impl From<&ScalarValue> for JsonValue {
    fn from(value: &ScalarValue) -> Self {
        value.to_json()
    }
}

impl FromStr for TypeDescriptor {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        descriptor::parse(s)
    }
}
