use tracing::warn;

use crate::engine::aggregate::partial::{AggState, AggregateState, IntegerSumState};
use crate::engine::aggregate::plan::ReducerKind;
use crate::engine::errors::{CoercionError, StateError};
use crate::engine::types::ScalarValue;

/// Outcome of feeding one raw value to an accumulator
#[derive(Debug, Clone, PartialEq)]
pub enum Ingested {
    Accepted,
    /// The value was SQL NULL and was skipped.
    Null,
}

/// Aggregation buffer with one concrete implementation per reducer
#[derive(Debug, Clone, PartialEq)]
pub enum AggregatorImpl {
    Average(Average),
    DoubleSum(DoubleSum),
    LongSum(LongSum),
}

impl AggregatorImpl {
    pub fn from_reducer(reducer: ReducerKind) -> Self {
        match reducer {
            ReducerKind::Average => Self::Average(Average::new()),
            ReducerKind::DoubleSum => Self::DoubleSum(DoubleSum::new()),
            ReducerKind::LongSum => Self::LongSum(LongSum::new()),
        }
    }

    pub fn reducer(&self) -> ReducerKind {
        match self {
            AggregatorImpl::Average(_) => ReducerKind::Average,
            AggregatorImpl::DoubleSum(_) => ReducerKind::DoubleSum,
            AggregatorImpl::LongSum(_) => ReducerKind::LongSum,
        }
    }

    pub fn reset(&mut self) {
        match self {
            AggregatorImpl::Average(a) => a.state.reset(),
            AggregatorImpl::DoubleSum(a) => a.state.reset(),
            AggregatorImpl::LongSum(a) => a.state.reset(),
        }
    }

    /// Feed one raw argument value. Nulls are skipped; values that cannot be
    /// coerced leave the buffer untouched and report the error to the caller.
    pub fn ingest(&mut self, value: &ScalarValue) -> Result<Ingested, CoercionError> {
        if value.is_null() {
            return Ok(Ingested::Null);
        }
        match self {
            AggregatorImpl::Average(a) => a.update_value_f64(value.coerce_f64()?),
            AggregatorImpl::DoubleSum(a) => a.update_value_f64(value.coerce_f64()?),
            AggregatorImpl::LongSum(a) => a.update_value_i64(value.coerce_i64()?),
        }
        Ok(Ingested::Accepted)
    }

    /// Merge another buffer of the same variant
    pub fn merge(&mut self, other: &AggregatorImpl) -> Result<(), StateError> {
        self.merge_state(&other.snapshot())
    }

    pub fn merge_state(&mut self, state: &AggState) -> Result<(), StateError> {
        match (self, state) {
            (AggregatorImpl::Average(a), AggState::Average(b)) => a.state.merge(b),
            (AggregatorImpl::DoubleSum(a), AggState::DoubleSum(b)) => a.state.merge(b),
            (AggregatorImpl::LongSum(a), AggState::LongSum(b)) => a.state.merge(b),
            (a, b) => {
                warn!(
                    target: "udafkit::aggregate",
                    "ignoring merge of {:?} state into {:?} buffer",
                    b.reducer(),
                    a.reducer()
                );
                Ok(())
            }
        }
    }

    pub fn snapshot(&self) -> AggState {
        match self {
            AggregatorImpl::Average(a) => AggState::Average(a.state),
            AggregatorImpl::DoubleSum(a) => AggState::DoubleSum(a.state),
            AggregatorImpl::LongSum(a) => AggState::LongSum(a.state),
        }
    }

    pub fn finalize(&self) -> ScalarValue {
        self.snapshot().finalize()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Average {
    state: AggregateState,
}

impl Average {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn update_value_f64(&mut self, v: f64) {
        self.state.add(v);
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DoubleSum {
    state: AggregateState,
}

impl DoubleSum {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn update_value_f64(&mut self, v: f64) {
        self.state.add(v);
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LongSum {
    state: IntegerSumState,
}

impl LongSum {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn update_value_i64(&mut self, v: i64) {
        self.state.add(v);
    }
}
