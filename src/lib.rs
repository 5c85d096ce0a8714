//! # Repository Activity Charts
//!
//! `repoactivity` tracks the commit history of a fixed set of Git repositories
//! and renders one weekly commit-count chart per repository. It is meant for
//! unattended, periodic runs: a repository's history is fetched once, stored in
//! a JSON cache file, and reused by every later run.
//!
//! ## Pipeline
//!
//! - Load the commit cache, keeping only configured repositories
//! - Fetch full history for repositories with nothing cached
//! - Save the cache if anything was fetched
//! - Count commits per epoch-aligned week, ignoring future timestamps
//! - Draw each series with quarterly date labels and write `<name>.png`
//!
//! ## Example
//!
//! ```no_run
//! use repoactivity::analysis::GitHistoryProvider;
//! use repoactivity::app::Pipeline;
//! use repoactivity::config::Config;
//! use repoactivity::plotting::PlottersRenderer;
//!
//! let config = Config::from_env()?;
//! let pipeline = Pipeline::new(config, GitHistoryProvider::new(), PlottersRenderer::default());
//! let report = pipeline.run()?;
//! println!("wrote {} charts", report.charts.len());
//! # Ok::<(), repoactivity::ActivityError>(())
//! ```

pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use app::{run_with_deadline, Pipeline};
pub use config::{Config, RepositoryConfig};
pub use error::{ActivityError, Result};
pub use types::{Bucket, CommitSeries, RepoId, RunReport, Tick, WeeklySeries, BUCKET_WIDTH_SECS};
