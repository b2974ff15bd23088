pub mod model;

pub use model::{DependencySpec, LifecycleStage, Manifest, ModId};
