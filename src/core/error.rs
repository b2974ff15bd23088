use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the entire loader backend.
/// Every module returns `Result<T, LoaderError>`.
#[derive(Debug, Error)]
pub enum LoaderError {
    // ── Manifest ────────────────────────────────────────
    #[error("mod version '{version}' is not a valid semver version: {source}")]
    InvalidVersion {
        version: String,
        source: semver::Error,
    },

    #[error("dependency version constraint '{constraint}' for mod '{dependency}' is not a valid semver range: {source}")]
    InvalidDependencyConstraint {
        dependency: String,
        constraint: String,
        source: semver::Error,
    },

    // ── Module loading ──────────────────────────────────
    #[error("error when importing '{path}': {message}")]
    ModuleImport { path: String, message: String },

    #[error("module '{path}' has no default export")]
    MissingDefaultExport { path: String },

    #[error("module '{request}' not found (searched {candidates:?})")]
    ModuleNotFound {
        request: String,
        candidates: Vec<String>,
    },

    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Generic ─────────────────────────────────────────
    // Mod-authored hook and script failures travel through this variant
    // unmodified; the core never catches them.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type LoaderResult<T> = Result<T, LoaderError>;

impl From<std::io::Error> for LoaderError {
    fn from(source: std::io::Error) -> Self {
        LoaderError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}
