use tracing::warn;

use crate::engine::errors::HookError;
use crate::engine::hooks::builtin::{
    LoggingAnalyzeHook, LoggingDriverRunHook, LoggingExecuteHook, PatternRedactor,
};
use crate::engine::hooks::context::{HookContext, HookKind, HookPoint};
use crate::engine::hooks::traits::{DriverRunHook, ExecuteHook, Redactor, SemanticAnalyzerHook};
use crate::shared::config::HooksConfig;

/// Registered hooks, fired in registration order at each lifecycle point.
/// A failing hook is logged and never changes the query outcome.
#[derive(Default)]
pub struct HookChain {
    analyzers: Vec<Box<dyn SemanticAnalyzerHook>>,
    driver_run: Vec<Box<dyn DriverRunHook>>,
    pre_execute: Vec<Box<dyn ExecuteHook>>,
    post_execute: Vec<Box<dyn ExecuteHook>>,
    on_failure: Vec<Box<dyn ExecuteHook>>,
    redactors: Vec<Box<dyn Redactor>>,
}

impl HookChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the bundled hooks named in `hooks.enabled`.
    pub fn from_config(cfg: &HooksConfig) -> Result<Self, HookError> {
        let mut chain = Self::new();
        for name in &cfg.enabled {
            match name.parse::<HookKind>()? {
                HookKind::Analyze => chain.add_analyzer(Box::new(LoggingAnalyzeHook)),
                HookKind::DriverRun => chain.add_driver_run(Box::new(LoggingDriverRunHook)),
                HookKind::PreExecute => chain.add_execute(
                    HookPoint::PreExecute,
                    Box::new(LoggingExecuteHook::new(HookPoint::PreExecute)),
                ),
                HookKind::PostExecute => chain.add_execute(
                    HookPoint::PostExecute,
                    Box::new(LoggingExecuteHook::new(HookPoint::PostExecute)),
                ),
                HookKind::OnFailure => chain.add_execute(
                    HookPoint::OnFailure,
                    Box::new(LoggingExecuteHook::new(HookPoint::OnFailure)),
                ),
                HookKind::Redactor => {
                    chain.add_redactor(Box::new(PatternRedactor::new(&cfg.redact_patterns)?))
                }
            }
        }
        Ok(chain)
    }

    pub fn add_analyzer(&mut self, hook: Box<dyn SemanticAnalyzerHook>) {
        self.analyzers.push(hook);
    }

    pub fn add_driver_run(&mut self, hook: Box<dyn DriverRunHook>) {
        self.driver_run.push(hook);
    }

    /// Registers an execute hook at `point`. Only the three execute points
    /// accept one; other points are ignored with a warning.
    pub fn add_execute(&mut self, point: HookPoint, hook: Box<dyn ExecuteHook>) {
        match point {
            HookPoint::PreExecute => self.pre_execute.push(hook),
            HookPoint::PostExecute => self.post_execute.push(hook),
            HookPoint::OnFailure => self.on_failure.push(hook),
            other => warn!(
                target: "udafkit::hooks",
                hook = hook.name(),
                point = %other,
                "execute hook cannot be registered at this point"
            ),
        }
    }

    pub fn add_redactor(&mut self, redactor: Box<dyn Redactor>) {
        self.redactors.push(redactor);
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
            + self.driver_run.len()
            + self.pre_execute.len()
            + self.post_execute.len()
            + self.on_failure.len()
            + self.redactors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn redact(&self, query: &str) -> String {
        self.redactors
            .iter()
            .fold(query.to_string(), |acc, r| r.redact_query(&acc))
    }

    pub fn fire(&self, point: HookPoint, ctx: &HookContext) {
        match point {
            HookPoint::PreDriverRun => {
                for h in &self.driver_run {
                    report(h.name(), point, h.pre_driver_run(ctx));
                }
            }
            HookPoint::PostDriverRun => {
                for h in &self.driver_run {
                    report(h.name(), point, h.post_driver_run(ctx));
                }
            }
            HookPoint::PreAnalyze => {
                for h in &self.analyzers {
                    report(h.name(), point, h.pre_analyze(ctx));
                }
            }
            HookPoint::PostAnalyze => {
                for h in &self.analyzers {
                    report(h.name(), point, h.post_analyze(ctx));
                }
            }
            HookPoint::PreExecute => Self::run_all(&self.pre_execute, point, ctx),
            HookPoint::PostExecute => Self::run_all(&self.post_execute, point, ctx),
            HookPoint::OnFailure => Self::run_all(&self.on_failure, point, ctx),
        }
    }

    fn run_all(hooks: &[Box<dyn ExecuteHook>], point: HookPoint, ctx: &HookContext) {
        for h in hooks {
            report(h.name(), point, h.run(ctx));
        }
    }
}

fn report(name: &str, point: HookPoint, result: Result<(), HookError>) {
    if let Err(e) = result {
        warn!(target: "udafkit::hooks", hook = name, point = %point, "{}", e);
    }
}
