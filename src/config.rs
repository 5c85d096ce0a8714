//! # Configuration
//!
//! The set of tracked repositories plus the paths and deadline a run uses.
//! Everything is carried in a [`Config`] value handed to the pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ActivityError, Result};

pub const ENV_CACHE: &str = "REPOACTIVITY_CACHE";
pub const ENV_OUTPUT_DIR: &str = "REPOACTIVITY_OUTPUT_DIR";
pub const ENV_TIMEOUT_SECS: &str = "REPOACTIVITY_TIMEOUT_SECS";
pub const ENV_REPOS: &str = "REPOACTIVITY_REPOS";

const DEFAULT_CACHE_PATH: &str = "cache/data.js";
const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// One tracked repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub url: String,
    pub name: String,
}

impl RepositoryConfig {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub repositories: Vec<RepositoryConfig>,
    pub cache_path: PathBuf,
    pub output_dir: PathBuf,
    pub timeout: Duration,
}

impl Config {
    /// Build a configuration for the given repositories with default paths
    pub fn new(repositories: Vec<RepositoryConfig>) -> Result<Self> {
        validate_repositories(&repositories)?;
        Ok(Self {
            repositories,
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = path.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read settings from the environment, after loading a `.env` file if present
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to the defaults; set keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let repositories = match lookup(ENV_REPOS) {
            Some(path) => load_repositories(Path::new(&path))?,
            None => default_repositories(),
        };

        let mut config = Self::new(repositories)?;

        if let Some(path) = lookup(ENV_CACHE) {
            config.cache_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout = parse_timeout(&raw)?;
        }

        Ok(config)
    }
}

/// The repositories tracked when no list is supplied.
pub fn default_repositories() -> Vec<RepositoryConfig> {
    vec![
        RepositoryConfig::new("https://github.com/linuxdeepin/dde-daemon", "DDE Daemon"),
        RepositoryConfig::new("https://github.com/linuxdeepin/dde-dock", "DDE Dock"),
        RepositoryConfig::new(
            "https://github.com/linuxdeepin/dde-session-shell",
            "DDE Session Shell",
        ),
    ]
}

fn load_repositories(path: &Path) -> Result<Vec<RepositoryConfig>> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ActivityError::Config(format!(
            "cannot read repository list {}: {}",
            path.display(),
            e
        ))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        ActivityError::Config(format!(
            "cannot decode repository list {}: {}",
            path.display(),
            e
        ))
    })
}

fn validate_repositories(repositories: &[RepositoryConfig]) -> Result<()> {
    if repositories.is_empty() {
        return Err(ActivityError::Config(
            "no repositories configured".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    for repo in repositories {
        if repo.url.trim().is_empty() {
            return Err(ActivityError::Config(format!(
                "repository '{}' has an empty url",
                repo.name
            )));
        }
        if !seen.insert(repo.url.as_str()) {
            return Err(ActivityError::Config(format!(
                "repository url listed twice: {}",
                repo.url
            )));
        }
    }
    Ok(())
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ActivityError::Config(format!(
            "{ENV_TIMEOUT_SECS} must be greater than zero"
        ))),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ActivityError::Config(format!(
            "{ENV_TIMEOUT_SECS}='{raw}' is not a number of seconds: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.repositories, default_repositories());
        assert_eq!(config.cache_path, PathBuf::from("cache/data.js"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.timeout, Duration::from_secs(600));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_CACHE, "/tmp/c.json"),
            (ENV_OUTPUT_DIR, "/tmp/out"),
            (ENV_TIMEOUT_SECS, " 30 "),
        ]))
        .unwrap();
        assert_eq!(config.cache_path, PathBuf::from("/tmp/c.json"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_bad_timeout() {
        assert!(Config::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "soon")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "0")])).is_err());
    }

    #[test]
    fn test_repository_list_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repos.json");
        std::fs::write(
            &path,
            r#"[{"url": "https://example.com/a.git", "name": "A"}]"#,
        )
        .unwrap();

        let config =
            Config::from_lookup(lookup_from(&[(ENV_REPOS, path.to_str().unwrap())])).unwrap();
        assert_eq!(
            config.repositories,
            vec![RepositoryConfig::new("https://example.com/a.git", "A")]
        );
    }

    #[test]
    fn test_invalid_repository_lists() {
        assert!(Config::new(Vec::new()).is_err());
        assert!(Config::new(vec![
            RepositoryConfig::new("u", "A"),
            RepositoryConfig::new("u", "B"),
        ])
        .is_err());
        assert!(Config::from_lookup(lookup_from(&[(ENV_REPOS, "/nonexistent/repos.json")])).is_err());
    }
}
