use serde::{Deserialize, Serialize};

/// Where the loader is running. Recursive filesystem discovery is only
/// meaningful on desktop; browser-hosted builds must declare assets
/// explicitly in the manifest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlatformType {
    Desktop,
    Browser,
}

impl PlatformType {
    /// The platform of the current build target.
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            PlatformType::Browser
        } else {
            PlatformType::Desktop
        }
    }
}

impl std::fmt::Display for PlatformType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformType::Desktop => write!(f, "desktop"),
            PlatformType::Browser => write!(f, "browser"),
        }
    }
}
