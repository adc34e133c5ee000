use crate::engine::aggregate::runner::Row;
use crate::engine::types::ScalarValue;

pub struct RowFactory {
    group: String,
    values: Vec<ScalarValue>,
}

impl RowFactory {
    pub fn new() -> Self {
        Self {
            group: String::new(),
            values: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.group = group.to_string();
        self
    }

    pub fn with_ints(mut self, values: &[i64]) -> Self {
        self.values
            .extend(values.iter().map(|v| ScalarValue::Int64(*v)));
        self
    }

    pub fn with_floats(mut self, values: &[f64]) -> Self {
        self.values
            .extend(values.iter().map(|v| ScalarValue::Float64(*v)));
        self
    }

    pub fn with_strings(mut self, values: &[&str]) -> Self {
        self.values
            .extend(values.iter().map(|v| ScalarValue::Utf8(v.to_string())));
        self
    }

    pub fn with_null(mut self) -> Self {
        self.values.push(ScalarValue::Null);
        self
    }

    pub fn values(self) -> Vec<ScalarValue> {
        self.values
    }

    pub fn create(self) -> Vec<Row> {
        let group = self.group;
        self.values
            .into_iter()
            .map(|v| Row::new(group.clone(), v))
            .collect()
    }
}
