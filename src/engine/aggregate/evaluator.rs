use tracing::{trace, warn};

use crate::engine::aggregate::codec::{PartialRecord, PartialStateCodec};
use crate::engine::aggregate::mode::AggregationMode;
use crate::engine::aggregate::ops::AggregatorImpl;
use crate::engine::aggregate::plan::{AggregatePlan, OutputType};
use crate::engine::errors::{CoercionError, EvaluatorError};
use crate::engine::types::ScalarValue;

/// What the host hands to the per-row call
#[derive(Debug, Clone, Copy)]
pub enum StageInput<'a> {
    Row(&'a ScalarValue),
    Partial(Option<&'a PartialRecord>),
}

/// What the output call produces
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutput {
    Partial(PartialRecord),
    Final(ScalarValue),
}

/// Four-mode aggregation state machine for one call site.
///
/// The evaluator holds no group state: buffers come from [`new_buffer`]
/// and are passed back in by reference, one per group.
///
/// [`new_buffer`]: Evaluator::new_buffer
#[derive(Debug)]
pub struct Evaluator {
    plan: AggregatePlan,
    mode: AggregationMode,
    warned: bool,
    suppressed: u64,
}

impl Evaluator {
    pub fn new(plan: AggregatePlan, mode: AggregationMode) -> Self {
        Self {
            plan,
            mode,
            warned: false,
            suppressed: 0,
        }
    }

    pub fn plan(&self) -> &AggregatePlan {
        &self.plan
    }

    pub fn mode(&self) -> AggregationMode {
        self.mode
    }

    pub fn output_type(&self) -> OutputType {
        self.plan.output_type(self.mode)
    }

    /// Coercion failures swallowed after the first one was logged.
    pub fn suppressed_warnings(&self) -> u64 {
        self.suppressed
    }

    pub fn new_buffer(&self) -> AggregatorImpl {
        AggregatorImpl::from_reducer(self.plan.reducer)
    }

    pub fn reset(&self, buffer: &mut AggregatorImpl) {
        buffer.reset();
    }

    /// Per-row call, routed by mode.
    pub fn update(
        &mut self,
        buffer: &mut AggregatorImpl,
        input: StageInput<'_>,
    ) -> Result<(), EvaluatorError> {
        match input {
            StageInput::Row(value) => self.iterate(buffer, value),
            StageInput::Partial(record) => self.merge(buffer, record),
        }
    }

    /// Output call, routed by mode.
    pub fn emit(&self, buffer: &AggregatorImpl) -> Result<StageOutput, EvaluatorError> {
        if self.mode.emits_partial() {
            self.terminate_partial(buffer).map(StageOutput::Partial)
        } else {
            self.terminate(buffer).map(StageOutput::Final)
        }
    }

    /// Ingest one raw argument value.
    pub fn iterate(
        &mut self,
        buffer: &mut AggregatorImpl,
        value: &ScalarValue,
    ) -> Result<(), EvaluatorError> {
        self.require(self.mode.consumes_rows(), "iterate")?;
        if let Err(e) = buffer.ingest(value) {
            self.on_coercion_failure(&e);
        }
        Ok(())
    }

    /// Fold a partial record from an upstream stage. A missing partial is a
    /// no-op.
    pub fn merge(
        &self,
        buffer: &mut AggregatorImpl,
        partial: Option<&PartialRecord>,
    ) -> Result<(), EvaluatorError> {
        self.require(!self.mode.consumes_rows(), "merge")?;
        let Some(record) = partial else {
            trace!(target: "udafkit::aggregate", "skipping null partial");
            return Ok(());
        };
        let state = PartialStateCodec::decode(self.plan.reducer, record)?;
        buffer.merge_state(&state)?;
        Ok(())
    }

    pub fn terminate_partial(
        &self,
        buffer: &AggregatorImpl,
    ) -> Result<PartialRecord, EvaluatorError> {
        self.require(self.mode.emits_partial(), "terminate_partial")?;
        Ok(PartialStateCodec::encode(&buffer.snapshot())?)
    }

    pub fn terminate(&self, buffer: &AggregatorImpl) -> Result<ScalarValue, EvaluatorError> {
        self.require(!self.mode.emits_partial(), "terminate")?;
        Ok(buffer.finalize())
    }

    fn require(&self, allowed: bool, operation: &'static str) -> Result<(), EvaluatorError> {
        if allowed {
            Ok(())
        } else {
            Err(EvaluatorError::ModeMismatch {
                mode: self.mode,
                operation,
            })
        }
    }

    fn on_coercion_failure(&mut self, error: &CoercionError) {
        if self.warned {
            self.suppressed += 1;
            return;
        }
        self.warned = true;
        warn!(
            target: "udafkit::aggregate",
            function = %self.plan.function,
            mode = %self.mode,
            "{}; ignoring similar coercion failures",
            error
        );
    }
}
