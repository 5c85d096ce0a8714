use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::analysis::{CommitCache, HistoryProvider, LoadOutcome};
use crate::config::Config;
use crate::error::{ActivityError, Result};
use crate::plotting::{ChartRenderer, TimeAxis};
use crate::types::{RepoId, RunReport};
use crate::utils::{aggregate_weekly, sanitize_filename};

/// One complete run: load the cache, fetch what is missing, render every chart.
///
/// Any error aborts the run; nothing is skipped.
pub struct Pipeline<P, R> {
    config: Config,
    provider: P,
    renderer: R,
    deadline: Option<Deadline>,
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    timeout: Duration,
}

impl<P, R> Pipeline<P, R>
where
    P: HistoryProvider,
    R: ChartRenderer,
{
    pub fn new(config: Config, provider: P, renderer: R) -> Self {
        Self {
            config,
            provider,
            renderer,
            deadline: None,
        }
    }

    /// Stop before the next fetch, save or render once `timeout` has elapsed from now
    pub fn with_deadline(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Deadline {
            at: Instant::now() + timeout,
            timeout,
        });
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run with the current time as the cut-off for future commits
    pub fn run(&self) -> Result<RunReport> {
        self.run_at(Utc::now())
    }

    /// Run treating `now` as the current time
    pub fn run_at(&self, now: DateTime<Utc>) -> Result<RunReport> {
        let mut cache = CommitCache::from_repositories(&self.config.repositories);
        match cache.load(&self.config.cache_path)? {
            LoadOutcome::NoPriorCache => tracing::info!(
                path = %self.config.cache_path.display(),
                "no commit cache yet"
            ),
            LoadOutcome::Loaded { matched } => tracing::info!(
                path = %self.config.cache_path.display(),
                matched,
                "loaded commit cache"
            ),
        }

        let fetched = self.fetch_missing(&mut cache)?;

        let cache_saved = if fetched.is_empty() {
            tracing::debug!("all histories cached, leaving cache file untouched");
            false
        } else {
            self.check_deadline()?;
            cache.save(&self.config.cache_path)?;
            tracing::info!(
                path = %self.config.cache_path.display(),
                fetched = fetched.len(),
                "saved commit cache"
            );
            true
        };

        let charts = self.render_all(&cache, now)?;

        Ok(RunReport {
            fetched,
            cache_saved,
            charts,
        })
    }

    /// Fetch history for every configured repository that has none, in configuration order
    fn fetch_missing(&self, cache: &mut CommitCache) -> Result<Vec<RepoId>> {
        let mut fetched = Vec::new();

        for repo in &self.config.repositories {
            let needs_fetch = cache.get(&repo.url).is_some_and(|s| s.is_empty());
            if !needs_fetch {
                continue;
            }

            self.check_deadline()?;
            tracing::info!(url = %repo.url, "fetching history");
            let start_time = Instant::now();
            let mut commits = self.provider.fetch(&repo.url)?;
            commits.sort();
            tracing::info!(
                url = %repo.url,
                commits = commits.len(),
                elapsed_secs = start_time.elapsed().as_secs_f64(),
                "fetched history"
            );

            cache.set_commits(&repo.url, commits);
            fetched.push(repo.url.clone());
        }

        Ok(fetched)
    }

    fn render_all(&self, cache: &CommitCache, now: DateTime<Utc>) -> Result<Vec<PathBuf>> {
        self.check_deadline()?;
        let output_dir = &self.config.output_dir;
        std::fs::create_dir_all(output_dir)
            .map_err(|e| ActivityError::render(output_dir.display().to_string(), e))?;

        let mut charts = Vec::with_capacity(self.config.repositories.len());
        for repo in &self.config.repositories {
            self.check_deadline()?;
            let series = cache.get(&repo.url).ok_or_else(|| {
                ActivityError::Config(format!("repository {} missing from cache", repo.url))
            })?;

            let weekly = aggregate_weekly(&series.commits, now);
            let axis = TimeAxis::for_series(&weekly, now);
            let path = self
                .config
                .output_dir
                .join(format!("{}.png", sanitize_filename(&series.name)));

            self.renderer.render(&series.name, &weekly, &axis, &path)?;
            tracing::info!(
                name = %series.name,
                weeks = weekly.buckets.len(),
                peak = weekly.max_count,
                path = %path.display(),
                "wrote chart"
            );
            charts.push(path);
        }

        Ok(charts)
    }

    fn check_deadline(&self) -> Result<()> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline.at => {
                tracing::warn!(timeout = ?deadline.timeout, "deadline passed, stopping run");
                Err(ActivityError::Timeout(deadline.timeout))
            }
            _ => Ok(()),
        }
    }
}

/// Run the pipeline on the blocking pool, failing with [`ActivityError::Timeout`]
/// if it does not finish within the configured deadline.
///
/// A fetch already in progress when the deadline passes runs to completion in
/// the background, but no cache save or chart is started after that point.
pub async fn run_with_deadline<P, R>(pipeline: Pipeline<P, R>) -> Result<RunReport>
where
    P: HistoryProvider + Send + 'static,
    R: ChartRenderer + Send + 'static,
{
    let timeout = pipeline.config().timeout;
    let pipeline = pipeline.with_deadline(timeout);
    let task = tokio::task::spawn_blocking(move || pipeline.run());

    match tokio::time::timeout(timeout, task).await {
        Ok(joined) => joined?,
        Err(_) => {
            tracing::error!(?timeout, "run exceeded its deadline");
            Err(ActivityError::Timeout(timeout))
        }
    }
}
