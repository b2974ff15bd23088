pub mod context;
pub mod lifecycle;
pub mod model;

pub use context::ModContext;
pub use lifecycle::effective_hook;
pub use model::{Mod, ModDependency};
