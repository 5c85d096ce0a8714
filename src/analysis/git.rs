use chrono::{DateTime, Utc};
use git2::{build::RepoBuilder, ErrorCode, Repository};
use std::time::Instant;
use tempfile::TempDir;

use crate::error::{ActivityError, Result};

/// Source of commit history for a repository identifier.
pub trait HistoryProvider {
    /// Return the timestamps of every commit reachable from the default branch head.
    ///
    /// Order is not significant; callers sort as needed.
    fn fetch(&self, url: &str) -> Result<Vec<DateTime<Utc>>>;
}

/// Fetches history by cloning into a scratch directory with libgit2.
#[derive(Debug, Clone, Default)]
pub struct GitHistoryProvider;

impl GitHistoryProvider {
    pub fn new() -> Self {
        Self
    }
}

impl HistoryProvider for GitHistoryProvider {
    fn fetch(&self, url: &str) -> Result<Vec<DateTime<Utc>>> {
        let start_time = Instant::now();
        let scratch = TempDir::new().map_err(|e| ActivityError::fetch(url, e))?;

        let repo = RepoBuilder::new()
            .bare(true)
            .clone(url, scratch.path())
            .map_err(|e| ActivityError::fetch(url, e))?;

        let commits = collect_commit_times(&repo).map_err(|e| ActivityError::fetch(url, e))?;

        tracing::debug!(
            url,
            commits = commits.len(),
            elapsed_secs = start_time.elapsed().as_secs_f64(),
            "walked history"
        );
        Ok(commits)
    }
}

/// Committer times of all commits reachable from `HEAD`.
///
/// A repository whose `HEAD` points at an unborn branch has no history.
pub fn collect_commit_times(repo: &Repository) -> std::result::Result<Vec<DateTime<Utc>>, git2::Error> {
    let head = match repo.head() {
        Ok(head) => head,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(Vec::new())
        }
        Err(e) => return Err(e),
    };
    let head_commit = head.peel_to_commit()?;

    let mut revwalk = repo.revwalk()?;
    revwalk.push(head_commit.id())?;

    let mut times = Vec::new();
    for oid in revwalk {
        let commit = repo.find_commit(oid?)?;
        let seconds = commit.committer().when().seconds();
        let when = DateTime::<Utc>::from_timestamp(seconds, 0).ok_or_else(|| {
            git2::Error::from_str(&format!(
                "commit {} has an out-of-range timestamp {}",
                commit.id(),
                seconds
            ))
        })?;
        times.push(when);
    }
    Ok(times)
}
