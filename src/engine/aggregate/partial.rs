use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::aggregate::plan::ReducerKind;
use crate::engine::errors::StateError;
use crate::engine::types::ScalarValue;

/// Running (count, sum) pair for one group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateState {
    pub count: u64,
    pub sum: f64,
}

impl AggregateState {
    pub fn new(count: u64, sum: f64) -> Self {
        Self { count, sum }
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.sum = 0.0;
    }

    #[inline]
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
    }

    #[inline]
    pub fn merge(&mut self, other: &AggregateState) -> Result<(), StateError> {
        self.count = merged_count(self.count, other.count)?;
        self.sum += other.sum;
        Ok(())
    }

    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    pub fn total(&self) -> Option<f64> {
        (self.count > 0).then_some(self.sum)
    }
}

/// Integer counterpart of [`AggregateState`]. Addition wraps like the host's
/// 64-bit integer arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerSumState {
    pub count: u64,
    pub sum: i64,
}

impl IntegerSumState {
    pub fn new(count: u64, sum: i64) -> Self {
        Self { count, sum }
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.sum = 0;
    }

    #[inline]
    pub fn add(&mut self, value: i64) {
        self.count += 1;
        self.sum = self.sum.wrapping_add(value);
    }

    #[inline]
    pub fn merge(&mut self, other: &IntegerSumState) -> Result<(), StateError> {
        self.count = merged_count(self.count, other.count)?;
        self.sum = self.sum.wrapping_add(other.sum);
        Ok(())
    }

    pub fn total(&self) -> Option<i64> {
        (self.count > 0).then_some(self.sum)
    }
}

fn merged_count(a: u64, b: u64) -> Result<u64, StateError> {
    a.checked_add(b).ok_or(StateError::CountOverflow { left: a, right: b })
}

/// Mergeable snapshot of an accumulator, exchanged between stages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AggState {
    Average(AggregateState),
    DoubleSum(AggregateState),
    LongSum(IntegerSumState),
}

impl AggState {
    pub fn empty(reducer: ReducerKind) -> Self {
        match reducer {
            ReducerKind::Average => AggState::Average(AggregateState::default()),
            ReducerKind::DoubleSum => AggState::DoubleSum(AggregateState::default()),
            ReducerKind::LongSum => AggState::LongSum(IntegerSumState::default()),
        }
    }

    pub fn reducer(&self) -> ReducerKind {
        match self {
            AggState::Average(_) => ReducerKind::Average,
            AggState::DoubleSum(_) => ReducerKind::DoubleSum,
            AggState::LongSum(_) => ReducerKind::LongSum,
        }
    }

    pub fn count(&self) -> u64 {
        match self {
            AggState::Average(s) | AggState::DoubleSum(s) => s.count,
            AggState::LongSum(s) => s.count,
        }
    }

    pub fn reset(&mut self) {
        match self {
            AggState::Average(s) | AggState::DoubleSum(s) => s.reset(),
            AggState::LongSum(s) => s.reset(),
        }
    }

    /// Folds `other` into `self`. States of different reducers are never
    /// produced by one plan; such a merge is ignored. Fails only when the
    /// combined count no longer fits.
    pub fn merge(&mut self, other: &AggState) -> Result<(), StateError> {
        match (self, other) {
            (AggState::Average(a), AggState::Average(b)) => a.merge(b),
            (AggState::DoubleSum(a), AggState::DoubleSum(b)) => a.merge(b),
            (AggState::LongSum(a), AggState::LongSum(b)) => a.merge(b),
            (a, b) => {
                warn!(
                    target: "udafkit::aggregate",
                    "ignoring merge of {:?} state into {:?} state",
                    b.reducer(),
                    a.reducer()
                );
                Ok(())
            }
        }
    }

    /// Final scalar for the group; `Null` when no value was accumulated.
    pub fn finalize(&self) -> ScalarValue {
        let value = match self {
            AggState::Average(s) => s.average().map(ScalarValue::Float64),
            AggState::DoubleSum(s) => s.total().map(ScalarValue::Float64),
            AggState::LongSum(s) => s.total().map(ScalarValue::Int64),
        };
        value.unwrap_or(ScalarValue::Null)
    }
}
