use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::{LoaderError, LoaderResult};
use crate::core::mods::Mod;

/// A mod's code instance, constructed from its module's default export.
///
/// One optional hook per lifecycle stage; the default bodies are no-ops, so a
/// mod only overrides the stages it cares about. Hooks receive the owning
/// [`Mod`] and their errors propagate to the orchestrator unmodified.
#[async_trait]
pub trait ModClass: Send + Sync {
    async fn preload(&self, owner: &Mod) -> LoaderResult<()> {
        let _ = owner;
        Ok(())
    }

    async fn postload(&self, owner: &Mod) -> LoaderResult<()> {
        let _ = owner;
        Ok(())
    }

    async fn prestart(&self, owner: &Mod) -> LoaderResult<()> {
        let _ = owner;
        Ok(())
    }

    async fn start(&self, owner: &Mod) -> LoaderResult<()> {
        let _ = owner;
        Ok(())
    }

    async fn poststart(&self, owner: &Mod) -> LoaderResult<()> {
        let _ = owner;
        Ok(())
    }

    /// Single entry point of the old mod convention.
    async fn main(&self, owner: &Mod) -> LoaderResult<()> {
        let _ = owner;
        Ok(())
    }
}

/// The default export of a code module: a constructor taking the owning mod.
pub trait ModClassFactory: Send + Sync {
    fn construct(&self, owner: &Mod) -> Box<dyn ModClass>;
}

/// Exports of one loaded code module.
pub struct ModuleHandle {
    /// `None` when the module has no default export.
    pub default_export: Option<Arc<dyn ModClassFactory>>,
}

impl std::fmt::Debug for ModuleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleHandle")
            .field("has_default_export", &self.default_export.is_some())
            .finish()
    }
}

/// Capability for loading mod code. Injected rather than called as a
/// language built-in so hosts can swap implementations and tests can fake it.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    /// Load the module at `path` (game-root-relative) and return its exports.
    async fn load(&self, path: &str) -> LoaderResult<ModuleHandle>;

    /// Load the script at `path` purely for its side effects.
    async fn run_script(&self, path: &str) -> LoaderResult<()>;
}

type ScriptFn = Arc<dyn Fn() -> LoaderResult<()> + Send + Sync>;

/// One registered module of a [`StaticModuleLoader`].
#[derive(Default, Clone)]
pub struct StaticModule {
    pub default_export: Option<Arc<dyn ModClassFactory>>,
    /// Runs every time the module is loaded, before exports are handed out.
    pub side_effect: Option<ScriptFn>,
}

/// In-memory [`ModuleLoader`] backed by a registration map. Used for
/// built-in mods compiled into the host, and as the canonical test double.
#[derive(Default)]
pub struct StaticModuleLoader {
    modules: HashMap<String, StaticModule>,
}

impl StaticModuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, path: impl Into<String>, module: StaticModule) {
        self.modules.insert(path.into(), module);
    }

    /// Register a module whose default export is `factory`.
    pub fn register_class(&mut self, path: impl Into<String>, factory: Arc<dyn ModClassFactory>) {
        self.register(
            path,
            StaticModule {
                default_export: Some(factory),
                side_effect: None,
            },
        );
    }

    /// Register a side-effect-only script.
    pub fn register_script<F>(&mut self, path: impl Into<String>, script: F)
    where
        F: Fn() -> LoaderResult<()> + Send + Sync + 'static,
    {
        self.register(
            path,
            StaticModule {
                default_export: None,
                side_effect: Some(Arc::new(script)),
            },
        );
    }
}

#[async_trait]
impl ModuleLoader for StaticModuleLoader {
    async fn load(&self, path: &str) -> LoaderResult<ModuleHandle> {
        let module = self
            .modules
            .get(path)
            .ok_or_else(|| LoaderError::ModuleImport {
                path: path.to_string(),
                message: "module not registered".to_string(),
            })?;

        if let Some(side_effect) = &module.side_effect {
            side_effect()?;
        }

        Ok(ModuleHandle {
            default_export: module.default_export.clone(),
        })
    }

    async fn run_script(&self, path: &str) -> LoaderResult<()> {
        self.load(path).await.map(|_| ())
    }
}
