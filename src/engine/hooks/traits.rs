use crate::engine::errors::HookError;
use crate::engine::hooks::context::HookContext;

/// Fired around semantic analysis of a query.
pub trait SemanticAnalyzerHook: Send + Sync {
    fn name(&self) -> &str;

    fn pre_analyze(&self, ctx: &HookContext) -> Result<(), HookError>;

    fn post_analyze(&self, ctx: &HookContext) -> Result<(), HookError>;
}

/// Fired when the driver starts and finishes running a query.
pub trait DriverRunHook: Send + Sync {
    fn name(&self) -> &str;

    fn pre_driver_run(&self, ctx: &HookContext) -> Result<(), HookError>;

    fn post_driver_run(&self, ctx: &HookContext) -> Result<(), HookError>;
}

/// Single-callback hook used for pre-execute, post-execute and on-failure.
pub trait ExecuteHook: Send + Sync {
    fn name(&self) -> &str;

    fn run(&self, ctx: &HookContext) -> Result<(), HookError>;
}

/// Rewrites query text before it is logged or handed to other hooks.
pub trait Redactor: Send + Sync {
    fn name(&self) -> &str;

    fn redact_query(&self, query: &str) -> String;
}
