mod integration;

use crate::integration::runner::run_scenario;
use crate::integration::scenarios::load_scenarios_from_json;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing_subscriber::EnvFilter;

/// Runs every scenario in `tests/integration/scenarios.json` against the
/// built binary. Set `UDAFKIT_SCENARIO=<name>` to run a single one.
#[test]
fn cli_scenarios() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("test_runner=debug".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();

    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/integration/scenarios.json");
    let mut all_scenarios = load_scenarios_from_json(path);
    assert!(!all_scenarios.is_empty(), "no scenarios loaded");

    // Order must not matter; a fixed seed keeps failures reproducible
    all_scenarios.shuffle(&mut StdRng::seed_from_u64(7));

    match std::env::var("UDAFKIT_SCENARIO") {
        Ok(name) => {
            let scenario = all_scenarios
                .iter()
                .find(|s| s.name == name)
                .unwrap_or_else(|| panic!("Scenario '{}' not found", name));
            run_scenario(scenario);
        }
        Err(_) => {
            for scenario in &all_scenarios {
                run_scenario(scenario);
            }
        }
    }
}
