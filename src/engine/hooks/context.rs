use std::fmt;
use std::str::FromStr;

use crate::engine::errors::HookError;

/// Fixed points in a query's lifecycle where hooks are fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    PreDriverRun,
    PreAnalyze,
    PostAnalyze,
    PreExecute,
    PostExecute,
    OnFailure,
    PostDriverRun,
}

impl HookPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookPoint::PreDriverRun => "pre_driver_run",
            HookPoint::PreAnalyze => "pre_analyze",
            HookPoint::PostAnalyze => "post_analyze",
            HookPoint::PreExecute => "pre_execute",
            HookPoint::PostExecute => "post_execute",
            HookPoint::OnFailure => "on_failure",
            HookPoint::PostDriverRun => "post_driver_run",
        }
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hook families that can be switched on in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    Analyze,
    DriverRun,
    PreExecute,
    PostExecute,
    OnFailure,
    Redactor,
}

impl FromStr for HookKind {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analyze" => Ok(HookKind::Analyze),
            "driver_run" => Ok(HookKind::DriverRun),
            "pre_execute" => Ok(HookKind::PreExecute),
            "post_execute" => Ok(HookKind::PostExecute),
            "on_failure" => Ok(HookKind::OnFailure),
            "redactor" => Ok(HookKind::Redactor),
            other => Err(HookError::Unknown(other.to_string())),
        }
    }
}

/// What a hook gets to see about the running query
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HookContext {
    pub query_id: String,
    /// Query text after redaction
    pub query: String,
    pub user: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub error: Option<String>,
}

impl HookContext {
    pub fn new(query_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            query_id: query_id.into(),
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }
}
