use std::env;

use serde::Deserialize;

use crate::engine::aggregate::codec::PartialFormat;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub aggregate: AggregateConfig,
    pub hooks: HooksConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub console_level: String,
    pub file_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggregateConfig {
    /// Number of map-side partitions the local runner splits rows into
    pub default_partitions: usize,
    /// Insert a combiner stage between map and reduce
    pub combine: bool,
    #[serde(default)]
    pub partial_format: PartialFormat,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HooksConfig {
    /// Bundled hooks to register, by name (`analyze`, `driver_run`,
    /// `pre_execute`, `post_execute`, `on_failure`, `redactor`)
    #[serde(default)]
    pub enabled: Vec<String>,
    #[serde(default)]
    pub redact_patterns: Vec<String>,
}

pub const DEFAULT_CONFIG_PATH: &str = "config/udafkit";
pub const ENV_PREFIX: &str = "UDAFKIT";

/// Layers defaults, the optional config file (`UDAFKIT_CONFIG`, default
/// `config/udafkit.toml`) and `UDAFKIT__SECTION__KEY` environment variables.
/// `UDAFKIT__HOOKS__ENABLED` takes a comma-separated list.
pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("UDAFKIT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_settings_from(&config_path)
}

pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    load_settings_with(config_path, ENV_PREFIX)
}

pub fn load_settings_with(
    config_path: &str,
    env_prefix: &str,
) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .set_default("logging.log_dir", "logs")?
        .set_default("logging.console_level", "info")?
        .set_default("logging.file_level", "debug")?
        .set_default("aggregate.default_partitions", 2)?
        .set_default("aggregate.combine", false)?
        .set_default("aggregate.partial_format", "bincode")?
        .set_default("hooks.enabled", Vec::<String>::new())?
        .set_default("hooks.redact_patterns", Vec::<String>::new())?
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(
            config::Environment::with_prefix(env_prefix)
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("hooks.enabled")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
