use std::collections::BTreeMap;

use tracing::debug;

use crate::engine::aggregate::evaluator::Evaluator;
use crate::engine::aggregate::mode::AggregationMode;
use crate::engine::aggregate::plan::{AggregatePlan, FunctionKind};
use crate::engine::aggregate::validator;
use crate::engine::errors::PlanError;
use crate::engine::types::TypeDescriptor;

/// Names registered by [`FunctionRegistry::with_builtins`]
pub const BUILTIN_FUNCTIONS: [(&str, FunctionKind); 4] = [
    ("my_sum", FunctionKind::Sum),
    ("my_sum2", FunctionKind::Sum),
    ("my_avg", FunctionKind::Average),
    ("my_avg2", FunctionKind::Average),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateFunction {
    name: String,
    kind: FunctionKind,
}

impl AggregateFunction {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    pub fn validate(&self, args: &[TypeDescriptor]) -> Result<AggregatePlan, PlanError> {
        validator::validate(&self.name, self.kind, args)
    }

    pub fn evaluator(
        &self,
        args: &[TypeDescriptor],
        mode: AggregationMode,
    ) -> Result<Evaluator, PlanError> {
        Ok(Evaluator::new(self.validate(args)?, mode))
    }
}

/// Function name -> validator -> evaluator factory. Names are
/// case-insensitive.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<String, AggregateFunction>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, kind) in BUILTIN_FUNCTIONS {
            registry.functions.insert(
                name.to_string(),
                AggregateFunction {
                    name: name.to_string(),
                    kind,
                },
            );
        }
        registry
    }

    pub fn register(&mut self, name: &str, kind: FunctionKind) -> Result<(), PlanError> {
        let key = name.trim().to_ascii_lowercase();
        if key.is_empty() {
            return Err(PlanError::UnknownFunction(name.to_string()));
        }
        if self.functions.contains_key(&key) {
            return Err(PlanError::DuplicateFunction(key));
        }
        debug!(target: "udafkit::aggregate", name = %key, kind = kind.as_str(), "registering aggregate");
        self.functions.insert(key.clone(), AggregateFunction { name: key, kind });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&AggregateFunction, PlanError> {
        self.functions
            .get(&name.trim().to_ascii_lowercase())
            .ok_or_else(|| PlanError::UnknownFunction(name.to_string()))
    }

    pub fn resolve(&self, name: &str, args: &[TypeDescriptor]) -> Result<AggregatePlan, PlanError> {
        self.get(name)?.validate(args)
    }

    pub fn evaluator(
        &self,
        name: &str,
        args: &[TypeDescriptor],
        mode: AggregationMode,
    ) -> Result<Evaluator, PlanError> {
        self.get(name)?.evaluator(args, mode)
    }

    pub fn functions(&self) -> impl Iterator<Item = &AggregateFunction> {
        self.functions.values()
    }
}
