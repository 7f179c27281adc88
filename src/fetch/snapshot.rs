//! On-disk snapshot store for recorded page content
//!
//! Snapshots make replay mode deterministic: once a page's HTML has been
//! recorded, replay runs read it from disk and never consult the network.
//! Files are named by the SHA-256 of the URL, so any URL maps to a stable
//! path without escaping concerns.

use crate::fetch::{FetchError, FetchResult};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Directory of recorded HTML snapshots, keyed by URL hash
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Creates a store rooted at `dir`
    ///
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the path a URL's snapshot lives at
    fn path_for(&self, url: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let digest = hex::encode(hasher.finalize());
        self.dir.join(format!("{}.html", digest))
    }

    /// Returns whether a snapshot exists for `url`
    pub fn contains(&self, url: &str) -> bool {
        self.path_for(url).exists()
    }

    /// Reads the recorded HTML for `url`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The snapshot content
    /// * `Err(FetchError::MissingSnapshot)` - Nothing recorded for this URL
    /// * `Err(FetchError::Io)` - The snapshot exists but could not be read
    pub fn load(&self, url: &str) -> FetchResult<String> {
        let path = self.path_for(url);
        if !path.exists() {
            return Err(FetchError::MissingSnapshot {
                url: url.to_string(),
            });
        }

        std::fs::read_to_string(&path).map_err(|source| FetchError::Io {
            url: url.to_string(),
            source,
        })
    }

    /// Records HTML for `url`, replacing any previous snapshot
    pub fn store(&self, url: &str, html: &str) -> FetchResult<()> {
        let io_err = |source| FetchError::Io {
            url: url.to_string(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        std::fs::write(self.path_for(url), html).map_err(io_err)
    }

    /// Returns the store's root directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
