use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
pub struct TestConfig {
    pub logging: LoggingConfig,
    pub aggregate: AggregateConfig,
    pub hooks: HooksConfig,
}

#[derive(Serialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub console_level: String,
    pub file_level: String,
}

#[derive(Serialize)]
pub struct AggregateConfig {
    pub default_partitions: usize,
    pub combine: bool,
    pub partial_format: String,
}

#[derive(Serialize)]
pub struct HooksConfig {
    pub enabled: Vec<String>,
    pub redact_patterns: Vec<String>,
}

/// Writes `udafkit.toml` under `base_dir`, with `overrides` merged in
/// section by section, and returns its path.
pub fn write_config_with_overrides(base_dir: &Path, overrides: Option<&Value>) -> PathBuf {
    let config = TestConfig {
        logging: LoggingConfig {
            log_dir: base_dir.join("logs").to_string_lossy().into_owned(),
            console_level: "warn".into(),
            file_level: "debug".into(),
        },
        aggregate: AggregateConfig {
            default_partitions: 3,
            combine: false,
            partial_format: "bincode".into(),
        },
        hooks: HooksConfig {
            enabled: Vec::new(),
            redact_patterns: Vec::new(),
        },
    };

    let mut merged = serde_json::to_value(&config).unwrap();
    if let Some(Value::Object(sections)) = overrides {
        for (section, values) in sections {
            let (Some(Value::Object(target)), Value::Object(values)) =
                (merged.get_mut(section), values)
            else {
                panic!("Unknown config override section '{}'", section);
            };
            for (key, value) in values {
                target.insert(key.clone(), value.clone());
            }
        }
    }

    let config_path = base_dir.join("udafkit.toml");
    fs::write(&config_path, toml::to_string_pretty(&merged).unwrap()).unwrap();
    config_path
}
