pub mod codec;
pub mod evaluator;
pub mod mode;
pub mod ops;
pub mod partial;
pub mod plan;
pub mod registry;
pub mod runner;
pub mod validator;

pub use evaluator::{Evaluator, StageInput, StageOutput};
pub use mode::AggregationMode;
pub use registry::FunctionRegistry;

#[cfg(test)]
mod validator_test;
