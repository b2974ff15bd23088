use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::core::error::{LoaderError, LoaderResult};

/// Capability for listing every file beneath a directory. Injected into the
/// mod lifecycle so browser builds and tests can substitute their own.
#[async_trait]
pub trait AssetEnumerator: Send + Sync {
    /// All files beneath `dir` (a game-root-relative slash path), recursively.
    /// Returned paths are game-root-relative slash paths as well.
    async fn find_recursively(&self, dir: &str) -> LoaderResult<Vec<String>>;
}

/// Filesystem-backed enumerator rooted at the game directory on disk.
pub struct FsAssetEnumerator {
    /// On-disk directory that game-root-relative paths resolve under.
    game_root: PathBuf,
}

impl FsAssetEnumerator {
    pub fn new(game_root: impl Into<PathBuf>) -> Self {
        Self {
            game_root: game_root.into(),
        }
    }

    fn relative_slash_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.game_root).unwrap_or(path);
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        segments.join("/")
    }
}

#[async_trait]
impl AssetEnumerator for FsAssetEnumerator {
    async fn find_recursively(&self, dir: &str) -> LoaderResult<Vec<String>> {
        let mut pending = vec![self.game_root.join(dir)];
        let mut found = Vec::new();

        while let Some(current) = pending.pop() {
            let mut entries =
                fs::read_dir(&current)
                    .await
                    .map_err(|source| LoaderError::Io {
                        path: current.clone(),
                        source,
                    })?;

            while let Some(entry) =
                entries
                    .next_entry()
                    .await
                    .map_err(|source| LoaderError::Io {
                        path: current.clone(),
                        source,
                    })?
            {
                let path = entry.path();
                let file_type =
                    entry
                        .file_type()
                        .await
                        .map_err(|source| LoaderError::Io {
                            path: path.clone(),
                            source,
                        })?;

                if file_type.is_dir() {
                    pending.push(path);
                } else {
                    found.push(self.relative_slash_path(&path));
                }
            }
        }

        debug!("Found {} files under '{}'", found.len(), dir);
        Ok(found)
    }
}
