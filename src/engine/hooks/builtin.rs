use regex::Regex;
use tracing::info;

use crate::engine::errors::HookError;
use crate::engine::hooks::context::{HookContext, HookPoint};
use crate::engine::hooks::traits::{DriverRunHook, ExecuteHook, Redactor, SemanticAnalyzerHook};

const TARGET: &str = "udafkit::hooks";

#[derive(Debug, Default)]
pub struct LoggingAnalyzeHook;

impl SemanticAnalyzerHook for LoggingAnalyzeHook {
    fn name(&self) -> &str {
        "LoggingAnalyzeHook"
    }

    fn pre_analyze(&self, ctx: &HookContext) -> Result<(), HookError> {
        info!(target: TARGET, query_id = %ctx.query_id, "LoggingAnalyzeHook.pre_analyze");
        Ok(())
    }

    fn post_analyze(&self, ctx: &HookContext) -> Result<(), HookError> {
        info!(target: TARGET, query_id = %ctx.query_id, "LoggingAnalyzeHook.post_analyze");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct LoggingDriverRunHook;

impl DriverRunHook for LoggingDriverRunHook {
    fn name(&self) -> &str {
        "LoggingDriverRunHook"
    }

    fn pre_driver_run(&self, ctx: &HookContext) -> Result<(), HookError> {
        info!(target: TARGET, query_id = %ctx.query_id, "LoggingDriverRunHook.pre_driver_run");
        Ok(())
    }

    fn post_driver_run(&self, ctx: &HookContext) -> Result<(), HookError> {
        info!(target: TARGET, query_id = %ctx.query_id, "LoggingDriverRunHook.post_driver_run");
        Ok(())
    }
}

/// Logs one line for whichever execute point it is registered at.
#[derive(Debug)]
pub struct LoggingExecuteHook {
    point: HookPoint,
}

impl LoggingExecuteHook {
    pub fn new(point: HookPoint) -> Self {
        Self { point }
    }

    pub fn point(&self) -> HookPoint {
        self.point
    }
}

impl ExecuteHook for LoggingExecuteHook {
    fn name(&self) -> &str {
        "LoggingExecuteHook"
    }

    fn run(&self, ctx: &HookContext) -> Result<(), HookError> {
        match &ctx.error {
            Some(err) => info!(
                target: TARGET,
                query_id = %ctx.query_id,
                point = %self.point,
                error = %err,
                "LoggingExecuteHook.run"
            ),
            None => info!(
                target: TARGET,
                query_id = %ctx.query_id,
                point = %self.point,
                inputs = ctx.inputs.len(),
                "LoggingExecuteHook.run"
            ),
        }
        Ok(())
    }
}

/// Masks every match of the configured patterns with `***`. With no
/// patterns the query passes through unchanged.
#[derive(Debug, Default)]
pub struct PatternRedactor {
    patterns: Vec<Regex>,
}

impl PatternRedactor {
    pub const MASK: &'static str = "***";

    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, HookError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|e| HookError::InvalidPattern {
                    pattern: p.as_ref().to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }
}

impl Redactor for PatternRedactor {
    fn name(&self) -> &str {
        "PatternRedactor"
    }

    fn redact_query(&self, query: &str) -> String {
        info!(target: TARGET, patterns = self.patterns.len(), "PatternRedactor.redact_query");
        self.patterns
            .iter()
            .fold(query.to_string(), |acc, re| {
                re.replace_all(&acc, Self::MASK).into_owned()
            })
    }
}
