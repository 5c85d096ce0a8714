//! # Common Types
//!
//! This module contains the types shared across the pipeline for representing
//! cached commit history and the weekly activity derived from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Width of one aggregation bucket in seconds (seven days).
pub const BUCKET_WIDTH_SECS: i64 = 7 * 24 * 60 * 60;

/// A stable key naming a tracked repository, usually its clone URL.
pub type RepoId = String;

/// Cached commit history for one repository.
///
/// This is the unit stored in the persisted cache file, keyed by [`RepoId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSeries {
    /// Human-readable name used for the chart title and output file name
    #[serde(alias = "Name")]
    pub name: String,
    /// Committer timestamps of every commit reachable from the default branch
    /// head at fetch time. Empty until the first successful fetch.
    #[serde(default, alias = "Commits")]
    pub commits: Vec<DateTime<Utc>>,
}

impl CommitSeries {
    /// Create a series with no history yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commits: Vec::new(),
        }
    }

    /// Whether this series still needs a history fetch
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// Number of commits falling into one epoch-aligned week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Start of the bucket in Unix seconds, always a multiple of [`BUCKET_WIDTH_SECS`]
    pub start: i64,
    /// Commits whose timestamp falls in `[start, start + BUCKET_WIDTH_SECS)`
    pub count: u64,
}

/// The aggregated time series for one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySeries {
    /// Non-empty buckets, ascending by start
    pub buckets: Vec<Bucket>,
    /// Largest count across all buckets, zero when there are none
    pub max_count: u64,
}

impl WeeklySeries {
    /// First and last bucket start, if any bucket exists
    pub fn span(&self) -> Option<(i64, i64)> {
        match (self.buckets.first(), self.buckets.last()) {
            (Some(first), Some(last)) => Some((first.start, last.start)),
            _ => None,
        }
    }
}

/// A mark on the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Position on the axis in Unix seconds
    pub value: f64,
    /// Visible label, present on every 13th tick only
    pub label: Option<String>,
}

/// Summary of what a single run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Repositories whose history was fetched during this run
    pub fetched: Vec<RepoId>,
    /// Whether the cache file was rewritten
    pub cache_saved: bool,
    /// Chart files written, in repository order
    pub charts: Vec<PathBuf>,
}
