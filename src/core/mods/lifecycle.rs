// ─── Lifecycle Execution ───
// How a mod's code module is instantiated and how stage hooks are invoked.

use tracing::debug;

use super::context::ModContext;
use super::model::Mod;
use crate::core::error::{LoaderError, LoaderResult};
use crate::core::manifest::LifecycleStage;

/// The hook a stage routes to. Old-style mods expose a single `main` hook in
/// place of the modern `poststart` one; the loader redirects transparently so
/// neither the mod nor the orchestrator has to know which convention is in
/// play. This is the sole legacy-compatibility rule.
pub fn effective_hook(stage: LifecycleStage, legacy_mode: bool) -> LifecycleStage {
    if legacy_mode && stage == LifecycleStage::Poststart {
        LifecycleStage::Main
    } else {
        stage
    }
}

impl Mod {
    /// Load the mod's code module and instantiate its default export with
    /// this mod as the sole constructor argument.
    ///
    /// No-op when the manifest declares no `main` module. A repeat call
    /// re-runs the load and overwrites the previous instance; not calling it
    /// twice is the orchestrator's responsibility.
    pub async fn init_class(&mut self, ctx: &ModContext) -> LoaderResult<()> {
        let Some(script) = self.manifest.main.clone() else {
            return Ok(());
        };
        let path = self.resolve_path(&script);
        debug!("Loading mod class from '{}'", path);

        let module =
            ctx.modules
                .load(&path)
                .await
                .map_err(|err| LoaderError::ModuleImport {
                    path: path.clone(),
                    message: err.to_string(),
                })?;

        let factory = module
            .default_export
            .ok_or(LoaderError::MissingDefaultExport { path })?;

        self.class_instance = Some(factory.construct(self));
        Ok(())
    }

    /// Run one lifecycle stage: the class hook first, then the manifest's
    /// script slot for the stage, sequentially.
    ///
    /// Both sub-steps are optional; a stage with neither is a successful
    /// no-op. Errors raised by mod code propagate to the caller untouched.
    pub async fn execute_stage(
        &self,
        stage: LifecycleStage,
        ctx: &ModContext,
    ) -> LoaderResult<()> {
        if let Some(instance) = &self.class_instance {
            match effective_hook(stage, self.legacy_mode) {
                LifecycleStage::Preload => instance.preload(self).await?,
                LifecycleStage::Postload => instance.postload(self).await?,
                LifecycleStage::Prestart => instance.prestart(self).await?,
                LifecycleStage::Start => instance.start(self).await?,
                LifecycleStage::Poststart => instance.poststart(self).await?,
                LifecycleStage::Main => instance.main(self).await?,
            }
        }

        // Script slots key off the original stage name, never the remap.
        if let Some(script) = self.manifest.stage_script(stage) {
            let path = self.resolve_path(script);
            debug!("Running '{}' script '{}'", stage, path);
            ctx.modules.run_script(&path).await?;
        }

        Ok(())
    }
}
