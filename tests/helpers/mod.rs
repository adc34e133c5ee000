pub mod factories;
pub mod factory;
pub mod recording_hook;
