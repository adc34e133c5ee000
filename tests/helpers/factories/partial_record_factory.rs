use crate::engine::aggregate::codec::{COUNT_FIELD, PartialRecord, SUM_FIELD};
use crate::engine::types::ScalarValue;

pub struct PartialRecordFactory {
    count: Option<ScalarValue>,
    sum: Option<ScalarValue>,
}

impl PartialRecordFactory {
    pub fn new() -> Self {
        Self {
            count: Some(ScalarValue::Int64(0)),
            sum: Some(ScalarValue::Float64(0.0)),
        }
    }

    pub fn with_count(mut self, count: i64) -> Self {
        self.count = Some(ScalarValue::Int64(count));
        self
    }

    pub fn with_sum(mut self, sum: f64) -> Self {
        self.sum = Some(ScalarValue::Float64(sum));
        self
    }

    pub fn with_long_sum(mut self, sum: i64) -> Self {
        self.sum = Some(ScalarValue::Int64(sum));
        self
    }

    pub fn with_raw_count(mut self, value: ScalarValue) -> Self {
        self.count = Some(value);
        self
    }

    pub fn without_count(mut self) -> Self {
        self.count = None;
        self
    }

    pub fn without_sum(mut self) -> Self {
        self.sum = None;
        self
    }

    pub fn create(self) -> PartialRecord {
        let mut record = PartialRecord::new();
        if let Some(count) = self.count {
            record = record.with_field(COUNT_FIELD, count);
        }
        if let Some(sum) = self.sum {
            record = record.with_field(SUM_FIELD, sum);
        }
        record
    }
}
