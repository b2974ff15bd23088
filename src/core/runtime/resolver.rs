use std::path::Path;

use tokio::fs;

use crate::core::error::{LoaderError, LoaderResult};
use crate::core::paths;

/// Best-effort module resolution over an explicit list of search roots.
///
/// The caller's directory is passed in explicitly and tried first, then each
/// root in registration order. No call-stack introspection, no hidden state.
pub struct ModuleResolver {
    search_roots: Vec<String>,
}

impl ModuleResolver {
    pub fn new(search_roots: Vec<String>) -> Self {
        let search_roots = search_roots.iter().map(|r| paths::normalize(r)).collect();
        Self { search_roots }
    }

    /// Candidate paths for `request` issued from a module in `caller_dir`,
    /// in probe order, each path probed once. Pure; no filesystem access.
    pub fn candidates(&self, caller_dir: &str, request: &str) -> Vec<String> {
        let mut candidates = Vec::with_capacity(self.search_roots.len() + 1);
        let mut push_unique = |candidate: String| {
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        };
        push_unique(paths::join(caller_dir, request));
        for root in &self.search_roots {
            push_unique(paths::join(root, request));
        }
        candidates
    }

    /// First candidate that exists on disk, probed as given (the host decides
    /// what the working directory is).
    pub async fn locate(&self, caller_dir: &str, request: &str) -> LoaderResult<String> {
        let candidates = self.candidates(caller_dir, request);
        for candidate in &candidates {
            if fs::try_exists(Path::new(candidate)).await.unwrap_or(false) {
                return Ok(candidate.clone());
            }
        }
        Err(LoaderError::ModuleNotFound {
            request: request.to_string(),
            candidates,
        })
    }
}
