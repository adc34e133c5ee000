pub mod builtin;
pub mod chain;
pub mod context;
pub mod traits;

pub use chain::HookChain;
pub use context::{HookContext, HookKind, HookPoint};
