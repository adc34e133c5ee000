use crate::integration::config::write_config_with_overrides;
use crate::integration::scenarios::TestScenario;
use std::process::Command;
use tracing::{debug, error, info};

pub fn run_scenario(scenario: &TestScenario) {
    info!("▶ Running scenario: {}", scenario.name);
    let tmp = tempfile::tempdir().expect("create scenario dir");
    let config_path = write_config_with_overrides(tmp.path(), scenario.config.as_ref());
    debug!("Using config path: {}", config_path.display());

    let output = Command::new(env!("CARGO_BIN_EXE_udafkit"))
        .args(&scenario.args)
        .env("UDAFKIT_CONFIG", &config_path)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run udafkit");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    debug!("stdout:\n{}", stdout);
    debug!("stderr:\n{}", stderr);

    if output.status.success() == scenario.expect_failure {
        error!(
            "Exit status {:?}, expect_failure = {}\nstderr:\n{}",
            output.status.code(),
            scenario.expect_failure,
            stderr
        );
        panic!("Scenario '{}' failed", scenario.name);
    }

    let actual = if scenario.expect_failure || scenario.match_stderr {
        stderr
    } else {
        stdout
    };

    for matcher in &scenario.matchers {
        if !matcher.matches(&actual) {
            error!("Expected {:?}\nActual:\n{}", matcher, actual);
            panic!("Scenario '{}' failed", scenario.name);
        }
    }
    info!("✅ Scenario '{}' passed", scenario.name);
}
