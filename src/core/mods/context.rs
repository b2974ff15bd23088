use std::sync::Arc;

use crate::core::assets::AssetEnumerator;
use crate::core::platform::PlatformType;
use crate::core::runtime::ModuleLoader;

/// Injected capabilities the per-mod operations run against.
/// Built once by the orchestrator and shared across all mods of a load run.
pub struct ModContext {
    pub platform: PlatformType,
    pub modules: Arc<dyn ModuleLoader>,
    pub assets: Arc<dyn AssetEnumerator>,
}
