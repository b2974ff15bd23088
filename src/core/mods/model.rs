use std::collections::{HashMap, HashSet};

use semver::{Version, VersionReq};
use tracing::debug;

use super::context::ModContext;
use crate::core::error::{LoaderError, LoaderResult};
use crate::core::manifest::{Manifest, ModId};
use crate::core::paths;
use crate::core::platform::PlatformType;
use crate::core::runtime::ModClass;

/// One resolved dependency requirement. The external resolver queries these
/// to build the global load order; this crate never checks satisfaction
/// across mods itself.
#[derive(Debug, Clone)]
pub struct ModDependency {
    pub version: VersionReq,
    pub optional: bool,
}

/// One discovered mod: manifest-derived contract plus lifecycle state.
///
/// Owned by the orchestrator for the whole process lifetime. Construction
/// validates the version contract; a `Mod` value never holds an invalid
/// version or constraint.
pub struct Mod {
    /// All other paths resolve relative to this game-root-relative directory.
    pub base_directory: String,
    pub manifest: Manifest,
    /// Routes the modern `poststart` hook to the old `main` entry point.
    pub legacy_mode: bool,
    pub version: Version,
    pub dependencies: HashMap<ModId, ModDependency>,
    pub assets_dir: String,
    /// Empty until [`Mod::find_all_assets`] runs; replaced wholesale each call.
    pub assets: HashSet<String>,
    /// Cleared by the orchestrator to exclude this mod from stage execution.
    pub should_be_loaded: bool,
    /// Set by [`Mod::init_class`](crate::core::mods::Mod::init_class) when the
    /// manifest declares a code module.
    pub class_instance: Option<Box<dyn ModClass>>,
}

impl std::fmt::Debug for Mod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `class_instance` is an opaque trait object; elide it.
        f.debug_struct("Mod")
            .field("base_directory", &self.base_directory)
            .field("legacy_mode", &self.legacy_mode)
            .field("version", &self.version)
            .field("dependencies", &self.dependencies)
            .field("assets_dir", &self.assets_dir)
            .field("assets", &self.assets)
            .field("should_be_loaded", &self.should_be_loaded)
            .field("has_class_instance", &self.class_instance.is_some())
            .finish_non_exhaustive()
    }
}

impl Mod {
    /// Validate `manifest`'s version and dependency constraints and build the
    /// mod. All-or-nothing: any malformed version or constraint fails the
    /// whole construction, leaving other mods unaffected.
    pub fn new(
        base_directory: impl Into<String>,
        manifest: Manifest,
        legacy_mode: bool,
    ) -> LoaderResult<Self> {
        let base_directory = base_directory.into();

        let version =
            Version::parse(&manifest.version).map_err(|source| LoaderError::InvalidVersion {
                version: manifest.version.clone(),
                source,
            })?;

        let mut dependencies = HashMap::new();
        if let Some(declared) = &manifest.dependencies {
            for (id, spec) in declared {
                let requirement = VersionReq::parse(spec.constraint()).map_err(|source| {
                    LoaderError::InvalidDependencyConstraint {
                        dependency: id.clone(),
                        constraint: spec.constraint().to_string(),
                        source,
                    }
                })?;
                dependencies.insert(
                    id.clone(),
                    ModDependency {
                        version: requirement,
                        optional: spec.optional(),
                    },
                );
            }
        }

        let assets_dir = paths::join(
            &base_directory,
            &paths::join("/", manifest.assets_dir.as_deref().unwrap_or("assets")),
        );

        debug!(
            "Constructed mod at '{}' (v{}, {} dependencies)",
            base_directory,
            version,
            dependencies.len()
        );

        Ok(Self {
            base_directory,
            manifest,
            legacy_mode,
            version,
            dependencies,
            assets_dir,
            assets: HashSet::new(),
            should_be_loaded: true,
            class_instance: None,
        })
    }

    /// Resolve a manifest-relative path against the mod's base directory.
    /// The path is clamped root-relative first, so it cannot escape the mod.
    pub fn resolve_path(&self, path: &str) -> String {
        paths::join(&self.base_directory, &paths::join("/", path))
    }

    /// Recompute the set of assets this mod contributes. Idempotent; the set
    /// is replaced wholesale, never merged.
    ///
    /// Declared manifest assets win; otherwise desktop builds enumerate
    /// `assets_dir` recursively and browser builds end up with an empty set.
    /// Enumeration failures propagate with their original I/O diagnostic.
    pub async fn find_all_assets(&mut self, ctx: &ModContext) -> LoaderResult<()> {
        let assets: Vec<String> = if let Some(declared) = &self.manifest.assets {
            declared
                .iter()
                .map(|path| paths::strip_root(&paths::join("/", path)))
                .collect()
        } else if ctx.platform == PlatformType::Desktop {
            ctx.assets.find_recursively(&self.assets_dir).await?
        } else {
            Vec::new()
        };

        self.assets = assets.into_iter().collect();
        debug!(
            "Mod at '{}' contributes {} assets",
            self.base_directory,
            self.assets.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::AssetEnumerator;
    use crate::core::runtime::StaticModuleLoader;
    use async_trait::async_trait;
    use std::sync::Arc;

    fn manifest_json(json: &str) -> Manifest {
        Manifest::from_json(json).unwrap()
    }

    struct FixedAssets(Vec<String>);

    #[async_trait]
    impl AssetEnumerator for FixedAssets {
        async fn find_recursively(&self, _dir: &str) -> LoaderResult<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct FailingAssets;

    #[async_trait]
    impl AssetEnumerator for FailingAssets {
        async fn find_recursively(&self, dir: &str) -> LoaderResult<Vec<String>> {
            Err(LoaderError::Io {
                path: dir.into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }
    }

    fn context(platform: PlatformType, assets: Vec<String>) -> ModContext {
        ModContext {
            platform,
            modules: Arc::new(StaticModuleLoader::new()),
            assets: Arc::new(FixedAssets(assets)),
        }
    }

    #[test]
    fn construction_parses_the_declared_version() {
        let manifest = manifest_json(r#"{ "version": "1.2.0" }"#);
        let module = Mod::new("mods/example", manifest, false).unwrap();
        assert_eq!(module.version, Version::new(1, 2, 0));
        assert!(module.should_be_loaded);
        assert!(module.dependencies.is_empty());
        assert!(module.class_instance.is_none());
    }

    #[test]
    fn invalid_version_fails_construction_naming_the_value() {
        let manifest = manifest_json(r#"{ "version": "bad" }"#);
        let err = Mod::new("mods/example", manifest, false).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidVersion { .. }));
        assert!(err.to_string().contains("'bad'"));
    }

    #[test]
    fn dependency_map_mirrors_the_manifest_keys() {
        let manifest = manifest_json(
            r#"{
                "version": "1.2.0",
                "dependencies": {
                    "foo": "^1.0.0",
                    "bar": { "version": ">=2.0.0", "optional": true }
                }
            }"#,
        );
        let module = Mod::new("mods/example", manifest, false).unwrap();

        assert_eq!(module.dependencies.len(), 2);
        let foo = &module.dependencies["foo"];
        assert!(!foo.optional);
        assert!(foo.version.matches(&Version::new(1, 3, 5)));
        assert!(!foo.version.matches(&Version::new(2, 0, 0)));
        assert!(module.dependencies["bar"].optional);
    }

    #[test]
    fn invalid_constraint_fails_naming_the_dependency() {
        let manifest = manifest_json(
            r#"{ "version": "1.0.0", "dependencies": { "foo": "not a range" } }"#,
        );
        let err = Mod::new("mods/example", manifest, false).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'foo'"));
        assert!(message.contains("'not a range'"));
    }

    #[test]
    fn assets_dir_defaults_under_the_base_directory() {
        let manifest = manifest_json(r#"{ "version": "1.0.0" }"#);
        let module = Mod::new("mods/example", manifest, false).unwrap();
        assert_eq!(module.assets_dir, "mods/example/assets");

        let manifest = manifest_json(r#"{ "version": "1.0.0", "assetsDir": "data" }"#);
        let module = Mod::new("mods/example", manifest, false).unwrap();
        assert_eq!(module.assets_dir, "mods/example/data");
    }

    #[test]
    fn resolve_path_clamps_escapes_to_the_base_directory() {
        let manifest = manifest_json(r#"{ "version": "1.0.0" }"#);
        let module = Mod::new("mods/example", manifest, false).unwrap();

        assert_eq!(module.resolve_path("main.js"), "mods/example/main.js");
        assert_eq!(
            module.resolve_path("../../etc/passwd"),
            "mods/example/etc/passwd"
        );
    }

    #[tokio::test]
    async fn declared_assets_are_normalized_and_deduplicated() {
        let manifest = manifest_json(
            r#"{
                "version": "1.0.0",
                "assets": ["/img/a.png", "img/a.png", "../img/b.png"]
            }"#,
        );
        let mut module = Mod::new("mods/example", manifest, false).unwrap();
        let ctx = context(PlatformType::Desktop, vec![]);

        module.find_all_assets(&ctx).await.unwrap();

        let expected: HashSet<String> = ["img/a.png", "img/b.png"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(module.assets, expected);
    }

    #[tokio::test]
    async fn desktop_enumerates_when_no_assets_are_declared() {
        let manifest = manifest_json(r#"{ "version": "1.0.0" }"#);
        let mut module = Mod::new("mods/example", manifest, false).unwrap();
        let listed = vec![
            "mods/example/assets/a.png".to_string(),
            "mods/example/assets/b.png".to_string(),
        ];
        let ctx = context(PlatformType::Desktop, listed.clone());

        module.find_all_assets(&ctx).await.unwrap();
        assert_eq!(module.assets, listed.into_iter().collect());
    }

    #[tokio::test]
    async fn browser_without_declared_assets_ends_up_empty() {
        let manifest = manifest_json(r#"{ "version": "1.0.0" }"#);
        let mut module = Mod::new("mods/example", manifest, false).unwrap();
        let ctx = context(
            PlatformType::Browser,
            vec!["mods/example/assets/a.png".to_string()],
        );

        module.find_all_assets(&ctx).await.unwrap();
        assert!(module.assets.is_empty());
    }

    #[tokio::test]
    async fn enumeration_failures_propagate_with_their_io_diagnostic() {
        let manifest = manifest_json(r#"{ "version": "1.0.0" }"#);
        let mut module = Mod::new("mods/example", manifest, false).unwrap();
        let ctx = ModContext {
            platform: PlatformType::Desktop,
            modules: Arc::new(StaticModuleLoader::new()),
            assets: Arc::new(FailingAssets),
        };

        let err = module.find_all_assets(&ctx).await.unwrap_err();
        match err {
            LoaderError::Io { path, source } => {
                assert_eq!(path, std::path::PathBuf::from("mods/example/assets"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(module.assets.is_empty());
    }

    #[test]
    fn debug_output_elides_the_class_instance() {
        let manifest = manifest_json(r#"{ "version": "1.2.0" }"#);
        let module = Mod::new("mods/example", manifest, false).unwrap();

        let rendered = format!("{module:?}");
        assert!(rendered.contains("base_directory: \"mods/example\""));
        assert!(rendered.contains("has_class_instance: false"));
    }

    #[tokio::test]
    async fn find_all_assets_is_idempotent() {
        let manifest = manifest_json(r#"{ "version": "1.0.0", "assets": ["img/a.png"] }"#);
        let mut module = Mod::new("mods/example", manifest, false).unwrap();
        let ctx = context(PlatformType::Desktop, vec![]);

        module.find_all_assets(&ctx).await.unwrap();
        let first = module.assets.clone();
        module.find_all_assets(&ctx).await.unwrap();
        assert_eq!(module.assets, first);
    }
}
