use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::aggregate::partial::{AggState, AggregateState, IntegerSumState};
use crate::engine::aggregate::plan::{FieldSpec, ReducerKind};
use crate::engine::errors::StateError;
use crate::engine::types::{LogicalType, ScalarValue};

pub const COUNT_FIELD: &str = "count";
pub const SUM_FIELD: &str = "sum";

/// Schema of the partial record emitted by partial modes: `{count, sum}`.
pub fn partial_schema(reducer: ReducerKind) -> Vec<FieldSpec> {
    vec![
        FieldSpec {
            name: COUNT_FIELD.to_string(),
            logical_type: LogicalType::Integer,
        },
        FieldSpec {
            name: SUM_FIELD.to_string(),
            logical_type: reducer.result_type(),
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialField {
    pub name: String,
    pub value: ScalarValue,
}

/// Ordered named record carrying one group's partial state between stages
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialRecord {
    pub fields: Vec<PartialField>,
}

impl PartialRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: &str, value: ScalarValue) -> Self {
        self.fields.push(PartialField {
            name: name.to_string(),
            value,
        });
        self
    }

    pub fn get(&self, name: &str) -> Option<&ScalarValue> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }
}

pub struct PartialStateCodec;

impl PartialStateCodec {
    /// Encodes `state` as `{count, sum}`. The count travels as Int64, so a
    /// count above `i64::MAX` is rejected rather than wrapped.
    pub fn encode(state: &AggState) -> Result<PartialRecord, StateError> {
        let (count, sum) = match state {
            AggState::Average(s) | AggState::DoubleSum(s) => {
                (s.count, ScalarValue::Float64(s.sum))
            }
            AggState::LongSum(s) => (s.count, ScalarValue::Int64(s.sum)),
        };
        let count = i64::try_from(count).map_err(|_| StateError::CountTooLarge(count))?;
        Ok(PartialRecord::new()
            .with_field(COUNT_FIELD, ScalarValue::Int64(count))
            .with_field(SUM_FIELD, sum))
    }

    /// Decodes a record for `reducer`. Both fields must be present and
    /// carry the declared types.
    pub fn decode(reducer: ReducerKind, record: &PartialRecord) -> Result<AggState, StateError> {
        let count = match Self::field(record, COUNT_FIELD)? {
            ScalarValue::Int64(c) if *c < 0 => return Err(StateError::NegativeCount(*c)),
            ScalarValue::Int64(c) => *c as u64,
            other => return Err(Self::type_error(COUNT_FIELD, LogicalType::Integer, other)),
        };
        let sum = Self::field(record, SUM_FIELD)?;

        match (reducer, sum) {
            (ReducerKind::Average, ScalarValue::Float64(s)) => {
                Ok(AggState::Average(AggregateState::new(count, *s)))
            }
            (ReducerKind::DoubleSum, ScalarValue::Float64(s)) => {
                Ok(AggState::DoubleSum(AggregateState::new(count, *s)))
            }
            (ReducerKind::LongSum, ScalarValue::Int64(s)) => {
                Ok(AggState::LongSum(IntegerSumState::new(count, *s)))
            }
            (reducer, other) => Err(Self::type_error(SUM_FIELD, reducer.result_type(), other)),
        }
    }

    fn field<'a>(record: &'a PartialRecord, name: &str) -> Result<&'a ScalarValue, StateError> {
        record
            .get(name)
            .ok_or_else(|| StateError::MissingField(name.to_string()))
    }

    fn type_error(field: &str, expected: LogicalType, found: &ScalarValue) -> StateError {
        StateError::FieldType {
            field: field.to_string(),
            expected,
            found: found.logical_type(),
        }
    }
}

/// Byte encoding used to ship partial records between stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartialFormat {
    #[default]
    Bincode,
    Json,
}

impl PartialFormat {
    pub fn to_bytes(&self, record: &PartialRecord) -> Result<Vec<u8>, StateError> {
        match self {
            PartialFormat::Bincode => Ok(bincode::serialize(record)?),
            PartialFormat::Json => Ok(serde_json::to_vec(record)?),
        }
    }

    pub fn from_bytes(&self, bytes: &[u8]) -> Result<PartialRecord, StateError> {
        match self {
            PartialFormat::Bincode => Ok(bincode::deserialize(bytes)?),
            PartialFormat::Json => Ok(serde_json::from_slice(bytes)?),
        }
    }
}

impl FromStr for PartialFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bincode" => Ok(PartialFormat::Bincode),
            "json" => Ok(PartialFormat::Json),
            other => Err(format!("unknown partial format: {}", other)),
        }
    }
}
