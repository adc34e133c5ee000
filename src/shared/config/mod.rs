pub mod global;
pub mod model;

pub use global::CONFIG;
pub use model::{AggregateConfig, HooksConfig, LoggingConfig, Settings, load_settings};
