pub mod aggregate;
pub mod errors;
pub mod hooks;
pub mod types;

pub use errors::*;
