mod core;

use tracing_subscriber::EnvFilter;

pub use crate::core::assets::{AssetEnumerator, FsAssetEnumerator};
pub use crate::core::error::{LoaderError, LoaderResult};
pub use crate::core::manifest::{DependencySpec, LifecycleStage, Manifest, ModId};
pub use crate::core::mods::{effective_hook, Mod, ModContext, ModDependency};
pub use crate::core::paths;
pub use crate::core::platform::PlatformType;
pub use crate::core::runtime::{
    ModClass, ModClassFactory, ModuleHandle, ModuleLoader, ModuleResolver, StaticModule,
    StaticModuleLoader,
};

/// Initialize structured logging for hosts that don't bring their own
/// subscriber. Call once, early.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,modloader=debug")),
        )
        .init();
}
