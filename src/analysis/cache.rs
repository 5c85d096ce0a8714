use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

use crate::config::RepositoryConfig;
use crate::error::{ActivityError, Result};
use crate::types::{CommitSeries, RepoId};

/// Result of reading the persisted cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No cache file exists yet
    NoPriorCache,
    /// A cache file was read; `matched` configured entries took their history from it
    Loaded { matched: usize },
}

/// Commit history per repository, persisted as one JSON document.
///
/// Keys are kept sorted so that saving the same content always produces the
/// same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitCache {
    entries: BTreeMap<RepoId, CommitSeries>,
}

impl CommitCache {
    /// Create one empty series per configured repository
    pub fn from_repositories(repositories: &[RepositoryConfig]) -> Self {
        let entries = repositories
            .iter()
            .map(|repo| (repo.url.clone(), CommitSeries::new(repo.name.clone())))
            .collect();
        Self { entries }
    }

    /// Merge the snapshot stored at `path` into this cache.
    ///
    /// Only identifiers already present take the stored history; stored
    /// identifiers that are not configured are ignored. A missing file is
    /// reported as [`LoadOutcome::NoPriorCache`], any other failure is an error.
    pub fn load(&mut self, path: &Path) -> Result<LoadOutcome> {
        match Self::read_snapshot(path)? {
            Some(snapshot) => Ok(LoadOutcome::Loaded {
                matched: self.merge(snapshot),
            }),
            None => Ok(LoadOutcome::NoPriorCache),
        }
    }

    /// Read the persisted document without merging it, `None` when absent
    pub fn read_snapshot(path: &Path) -> Result<Option<CommitCache>> {
        let raw = match std::fs::read(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ActivityError::CacheRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let snapshot = serde_json::from_slice(&raw).map_err(|source| ActivityError::CacheDecode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(snapshot))
    }

    /// Copy stored history into matching entries, returning how many matched
    pub fn merge(&mut self, snapshot: CommitCache) -> usize {
        let mut matched = 0;
        for (id, stored) in snapshot.entries {
            if let Some(series) = self.entries.get_mut(&id) {
                series.commits = stored.commits;
                matched += 1;
            }
        }
        matched
    }

    /// Write the whole cache to `path`, replacing any previous content.
    ///
    /// The document is written to a sibling temporary file first and renamed
    /// into place, so an interrupted save never leaves a truncated cache.
    pub fn save(&self, path: &Path) -> Result<()> {
        let write_err = |source| ActivityError::CacheWrite {
            path: path.to_path_buf(),
            source,
        };

        let mut encoded =
            serde_json::to_vec_pretty(self).map_err(|source| ActivityError::CacheEncode {
                path: path.to_path_buf(),
                source,
            })?;
        encoded.push(b'\n');

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(write_err)?;

        let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
        file.write_all(&encoded).map_err(write_err)?;
        file.as_file().sync_all().map_err(write_err)?;
        file.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    /// Store freshly fetched history for a configured identifier.
    ///
    /// Returns `false` if the identifier is not part of this cache.
    pub fn set_commits(&mut self, id: &str, commits: Vec<DateTime<Utc>>) -> bool {
        match self.entries.get_mut(id) {
            Some(series) => {
                series.commits = commits;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&CommitSeries> {
        self.entries.get(id)
    }
}
