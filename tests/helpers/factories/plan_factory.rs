use crate::engine::aggregate::evaluator::Evaluator;
use crate::engine::aggregate::mode::AggregationMode;
use crate::engine::aggregate::plan::{AggregatePlan, FunctionKind, ReducerKind};
use crate::engine::types::PrimitiveCategory;

pub struct PlanFactory {
    function: String,
    kind: FunctionKind,
    argument: PrimitiveCategory,
}

impl PlanFactory {
    pub fn new() -> Self {
        Self {
            function: "my_avg".into(),
            kind: FunctionKind::Average,
            argument: PrimitiveCategory::Double,
        }
    }

    pub fn average(self) -> Self {
        self.with_function("my_avg", FunctionKind::Average)
    }

    pub fn sum(self) -> Self {
        self.with_function("my_sum", FunctionKind::Sum)
    }

    pub fn with_function(mut self, name: &str, kind: FunctionKind) -> Self {
        self.function = name.to_string();
        self.kind = kind;
        self
    }

    pub fn with_argument(mut self, argument: PrimitiveCategory) -> Self {
        self.argument = argument;
        self
    }

    pub fn create(self) -> AggregatePlan {
        AggregatePlan {
            reducer: ReducerKind::for_call(self.kind, self.argument),
            function: self.function,
            kind: self.kind,
            argument: self.argument,
        }
    }

    pub fn evaluator(self, mode: AggregationMode) -> Evaluator {
        Evaluator::new(self.create(), mode)
    }
}
