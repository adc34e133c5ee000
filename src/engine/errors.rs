use thiserror::Error;
use tracing::{debug, error};

use crate::engine::aggregate::mode::AggregationMode;
use crate::engine::types::LogicalType;

/// Errors raised while validating an aggregate call site. These abort the
/// query before any row is processed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("Exactly one argument is expected, got {0}")]
    Arity(usize),

    #[error("Only primitive type arguments are accepted but {type_name} is passed")]
    TypeCategory { position: usize, type_name: String },

    #[error("{function} does not accept {type_name} arguments")]
    UnsupportedType {
        function: String,
        position: usize,
        type_name: String,
    },

    #[error("Unknown aggregate function: {0}")]
    UnknownFunction(String),

    #[error("Aggregate function already registered: {0}")]
    DuplicateFunction(String),

    #[error("Invalid type name: {0}")]
    InvalidType(String),

    #[error("Invalid {type_name} literal: {literal}")]
    InvalidLiteral { literal: String, type_name: String },
}

impl PlanError {
    pub fn log_error(&self) {
        match self {
            PlanError::Arity(n) => {
                error!("Aggregate arity check failed: {}", self);
                debug!("Argument count received: {}", n);
            }
            PlanError::TypeCategory { position, .. }
            | PlanError::UnsupportedType { position, .. } => {
                error!("Aggregate argument rejected: {}", self);
                debug!("Rejected argument position: {}", position);
            }
            PlanError::UnknownFunction(_) | PlanError::DuplicateFunction(_) => {
                error!("Function registry error: {}", self);
            }
            PlanError::InvalidType(_) | PlanError::InvalidLiteral { .. } => {
                error!("Type parse error: {}", self);
            }
        }
    }
}

/// A raw value that could not be turned into a number. Never fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    #[error("not a number: {0:?}")]
    NotNumeric(String),

    #[error("{0} values cannot be coerced to a number")]
    Unsupported(LogicalType),
}

/// Errors decoding or transmitting partial aggregation state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Partial state is missing field '{0}'")]
    MissingField(String),

    #[error("Partial state field '{field}' expected {expected}, found {found}")]
    FieldType {
        field: String,
        expected: LogicalType,
        found: LogicalType,
    },

    #[error("Partial state has a negative count: {0}")]
    NegativeCount(i64),

    #[error("Partial state count overflows when merging {left} and {right}")]
    CountOverflow { left: u64, right: u64 },

    #[error("Partial state count {0} does not fit the count field")]
    CountTooLarge(u64),

    #[error("Partial state serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Partial state JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("{operation} is not available in {mode} mode")]
    ModeMismatch {
        mode: AggregationMode,
        operation: &'static str,
    },

    #[error("State error: {0}")]
    State(#[from] StateError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HookError {
    #[error("Hook {hook} failed: {reason}")]
    Failed { hook: String, reason: String },

    #[error("Unknown hook: {0}")]
    Unknown(String),

    #[error("Invalid redaction pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Errors surfaced by the local aggregation runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Planning failed: {0}")]
    Plan(#[from] PlanError),

    #[error("Evaluation failed: {0}")]
    Evaluator(#[from] EvaluatorError),

    #[error("State transfer failed: {0}")]
    State(#[from] StateError),
}

impl RunError {
    pub fn log_error(&self) {
        match self {
            RunError::Plan(e) => e.log_error(),
            RunError::Evaluator(e) => {
                error!("Aggregate evaluation failed: {}", e);
                debug!("Evaluation error details: {:?}", e);
            }
            RunError::State(e) => {
                error!("Partial state transfer failed: {}", e);
                debug!("State error details: {:?}", e);
            }
        }
    }
}
