use crate::engine::aggregate::codec::partial_schema;
use crate::engine::aggregate::mode::AggregationMode;
use crate::engine::types::{LogicalType, PrimitiveCategory};

/// User-visible aggregate functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    /// SUM over a numeric argument
    Sum,
    /// AVG over a numeric, string or timestamp argument
    Average,
}

impl FunctionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionKind::Sum => "sum",
            FunctionKind::Average => "average",
        }
    }

    /// Primitive argument categories the function accepts.
    pub fn accepted(&self) -> &'static [PrimitiveCategory] {
        use PrimitiveCategory::*;
        match self {
            FunctionKind::Sum => &[Byte, Short, Int, Long, Float, Double],
            FunctionKind::Average => &[Byte, Short, Int, Long, Float, Double, String, Timestamp],
        }
    }

    pub fn accepts(&self, category: PrimitiveCategory) -> bool {
        self.accepted().contains(&category)
    }
}

/// Concrete accumulator chosen for a call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReducerKind {
    /// (count, f64 sum) reduced to sum / count
    Average,
    /// (count, f64 sum) reduced to sum
    DoubleSum,
    /// (count, i64 sum) reduced to sum
    LongSum,
}

impl ReducerKind {
    pub fn for_call(function: FunctionKind, argument: PrimitiveCategory) -> Self {
        match function {
            FunctionKind::Average => ReducerKind::Average,
            FunctionKind::Sum if argument.is_integral() => ReducerKind::LongSum,
            FunctionKind::Sum => ReducerKind::DoubleSum,
        }
    }

    pub fn result_type(&self) -> LogicalType {
        match self {
            ReducerKind::Average | ReducerKind::DoubleSum => LogicalType::Float,
            ReducerKind::LongSum => LogicalType::Integer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub logical_type: LogicalType,
}

/// Declared output of an evaluator in a given mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputType {
    Scalar(LogicalType),
    Partial(Vec<FieldSpec>),
}

/// Validated aggregate call site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatePlan {
    pub function: String,
    pub kind: FunctionKind,
    pub reducer: ReducerKind,
    pub argument: PrimitiveCategory,
}

impl AggregatePlan {
    pub fn output_type(&self, mode: AggregationMode) -> OutputType {
        if mode.emits_partial() {
            OutputType::Partial(partial_schema(self.reducer))
        } else {
            OutputType::Scalar(self.reducer.result_type())
        }
    }
}
