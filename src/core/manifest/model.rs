use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::error::LoaderResult;

/// Identifier another mod is referred to by in a dependency map.
pub type ModId = String;

/// Named phases of the host's startup sequence at which mods may run code.
/// Ordering across stages is owned by the orchestrator, not this crate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStage {
    Preload,
    Postload,
    Prestart,
    Start,
    Poststart,
    /// Terminal stage of the old single-entry-point convention.
    Main,
}

impl std::fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LifecycleStage::Preload => "preload",
            LifecycleStage::Postload => "postload",
            LifecycleStage::Prestart => "prestart",
            LifecycleStage::Start => "start",
            LifecycleStage::Poststart => "poststart",
            LifecycleStage::Main => "main",
        };
        write!(f, "{name}")
    }
}

/// One dependency entry as written in a manifest: either a bare constraint
/// string or the detailed form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DependencySpec {
    Constraint(String),
    Detailed {
        version: String,
        #[serde(default)]
        optional: bool,
    },
}

impl DependencySpec {
    /// The raw semver range string, whichever form was written.
    pub fn constraint(&self) -> &str {
        match self {
            DependencySpec::Constraint(version) => version,
            DependencySpec::Detailed { version, .. } => version,
        }
    }

    /// Whether the dependency is optional. Bare strings are never optional.
    pub fn optional(&self) -> bool {
        match self {
            DependencySpec::Constraint(_) => false,
            DependencySpec::Detailed { optional, .. } => *optional,
        }
    }
}

/// Declarative mod metadata, parsed from the mod's manifest JSON.
///
/// The shape is trusted (the manifest source already parsed it); semantic
/// validation of versions and constraints happens in [`crate::core::mods`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<HashMap<ModId, DependencySpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<Vec<String>>,
    /// Path of the mod's code module. Doubles as the `main` stage script slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,

    // ── Per-stage script slots ──
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prestart: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poststart: Option<String>,
}

impl Manifest {
    /// Parse a manifest from raw JSON.
    pub fn from_json(raw: &str) -> LoaderResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The script slot declared for `stage`, if any. Slots are independent;
    /// legacy hook remapping never redirects between them.
    pub fn stage_script(&self, stage: LifecycleStage) -> Option<&str> {
        let slot = match stage {
            LifecycleStage::Preload => &self.preload,
            LifecycleStage::Postload => &self.postload,
            LifecycleStage::Prestart => &self.prestart,
            LifecycleStage::Start => &self.start,
            LifecycleStage::Poststart => &self.poststart,
            LifecycleStage::Main => &self.main,
        };
        slot.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_manifest_with_both_dependency_forms() {
        let json = r#"{
            "version": "1.2.0",
            "dependencies": {
                "foo": "^1.0.0",
                "bar": { "version": ">=2.0.0", "optional": true }
            },
            "assetsDir": "data",
            "main": "main.js",
            "poststart": "poststart.js"
        }"#;
        let manifest = Manifest::from_json(json).unwrap();

        assert_eq!(manifest.version, "1.2.0");
        assert_eq!(manifest.assets_dir.as_deref(), Some("data"));

        let deps = manifest.dependencies.as_ref().unwrap();
        assert_eq!(deps["foo"], DependencySpec::Constraint("^1.0.0".into()));
        assert_eq!(deps["foo"].constraint(), "^1.0.0");
        assert!(!deps["foo"].optional());
        assert_eq!(deps["bar"].constraint(), ">=2.0.0");
        assert!(deps["bar"].optional());
    }

    #[test]
    fn detailed_dependency_optional_defaults_to_false() {
        let json = r#"{
            "version": "0.1.0",
            "dependencies": { "foo": { "version": "1.x" } }
        }"#;
        let manifest = Manifest::from_json(json).unwrap();
        assert!(!manifest.dependencies.unwrap()["foo"].optional());
    }

    #[test]
    fn stage_script_maps_each_slot() {
        let manifest = Manifest {
            version: "1.0.0".into(),
            main: Some("main.js".into()),
            preload: Some("preload.js".into()),
            poststart: Some("poststart.js".into()),
            ..Manifest::default()
        };

        assert_eq!(
            manifest.stage_script(LifecycleStage::Preload),
            Some("preload.js")
        );
        assert_eq!(
            manifest.stage_script(LifecycleStage::Poststart),
            Some("poststart.js")
        );
        assert_eq!(manifest.stage_script(LifecycleStage::Main), Some("main.js"));
        assert_eq!(manifest.stage_script(LifecycleStage::Start), None);
    }

    #[test]
    fn minimal_manifest_only_needs_a_version() {
        let manifest = Manifest::from_json(r#"{ "version": "1.0.0" }"#).unwrap();
        assert!(manifest.dependencies.is_none());
        assert!(manifest.assets.is_none());
        assert!(manifest.main.is_none());
    }
}
