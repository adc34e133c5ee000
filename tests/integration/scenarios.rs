use crate::integration::matcher::Matcher;
use serde::Deserialize;
use serde_json::Value;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct TestScenario {
    pub name: String,
    /// Arguments passed to the `udafkit` binary
    pub args: Vec<String>,
    /// Per-section overrides merged into the generated config file
    pub config: Option<Value>,
    /// The command is expected to exit non-zero; matchers then apply to stderr
    #[serde(default)]
    pub expect_failure: bool,
    /// Match against stderr even when the command succeeds
    #[serde(default)]
    pub match_stderr: bool,
    pub matchers: Vec<Matcher>,
}

pub fn load_scenarios_from_json(path: &str) -> Vec<TestScenario> {
    let content = fs::read_to_string(path).expect("Failed to read scenario file");
    serde_json::from_str(&content).expect("Invalid JSON format")
}
