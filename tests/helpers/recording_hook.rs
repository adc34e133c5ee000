use std::sync::{Arc, Mutex};

use crate::engine::errors::HookError;
use crate::engine::hooks::HookContext;
use crate::engine::hooks::traits::{DriverRunHook, ExecuteHook, Redactor, SemanticAnalyzerHook};

/// Records every callback it receives as `"<label>:<callback>"`.
#[derive(Clone)]
pub struct RecordingHook {
    label: String,
    events: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingHook {
    pub fn new(label: &str, events: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            label: label.to_string(),
            events,
            fail: false,
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    fn record(&self, callback: &str, ctx: &HookContext) -> Result<(), HookError> {
        let mut entry = format!("{}:{}", self.label, callback);
        if ctx.error.is_some() {
            entry.push_str(":error");
        }
        self.events.lock().unwrap().push(entry);
        if self.fail {
            return Err(HookError::Failed {
                hook: self.label.clone(),
                reason: "configured to fail".into(),
            });
        }
        Ok(())
    }
}

impl SemanticAnalyzerHook for RecordingHook {
    fn name(&self) -> &str {
        &self.label
    }

    fn pre_analyze(&self, ctx: &HookContext) -> Result<(), HookError> {
        self.record("pre_analyze", ctx)
    }

    fn post_analyze(&self, ctx: &HookContext) -> Result<(), HookError> {
        self.record("post_analyze", ctx)
    }
}

impl DriverRunHook for RecordingHook {
    fn name(&self) -> &str {
        &self.label
    }

    fn pre_driver_run(&self, ctx: &HookContext) -> Result<(), HookError> {
        self.record("pre_driver_run", ctx)
    }

    fn post_driver_run(&self, ctx: &HookContext) -> Result<(), HookError> {
        self.record("post_driver_run", ctx)
    }
}

impl ExecuteHook for RecordingHook {
    fn name(&self) -> &str {
        &self.label
    }

    fn run(&self, ctx: &HookContext) -> Result<(), HookError> {
        self.record("run", ctx)
    }
}

/// Uppercases the query so tests can see that redaction ran first.
pub struct UppercaseRedactor;

impl Redactor for UppercaseRedactor {
    fn name(&self) -> &str {
        "UppercaseRedactor"
    }

    fn redact_query(&self, query: &str) -> String {
        query.to_uppercase()
    }
}
