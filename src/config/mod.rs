//! Configuration for report runs
//!
//! Values are layered: built-in defaults, then a TOML file, then
//! `PIZZA_ANALYTICS_*` environment variables, then command-line flags
//! (applied by the binary).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{AnalyticsError, Result};
use crate::join::JoinPolicy;
use crate::report::{OutputFormat, ReportOptions};

/// File picked up from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "pizza-analytics.toml";

pub const ENV_DATA_DIR: &str = "PIZZA_ANALYTICS_DATA_DIR";
pub const ENV_TOP_N: &str = "PIZZA_ANALYTICS_TOP_N";
pub const ENV_FORMAT: &str = "PIZZA_ANALYTICS_FORMAT";
pub const ENV_LOG_LEVEL: &str = "PIZZA_ANALYTICS_LOG_LEVEL";
pub const ENV_JOIN_POLICY: &str = "PIZZA_ANALYTICS_JOIN_POLICY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyticsConfig {
    /// Directory holding the four CSV tables
    pub data_dir: PathBuf,
    /// Row limit for the top-N reports
    pub top_n: usize,
    /// Row limit per category for the ranked-by-category report
    pub per_category_limit: usize,
    pub output_format: OutputFormat,
    pub join_policy: JoinPolicy,
    pub log_level: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            top_n: 5,
            per_category_limit: 3,
            output_format: OutputFormat::Table,
            join_policy: JoinPolicy::Strict,
            log_level: "info".to_string(),
        }
    }
}

impl AnalyticsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load defaults, an optional file, and the process environment
    ///
    /// With `path == None`, [`DEFAULT_CONFIG_FILE`] is read only if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.merge_env_with(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading configuration from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| AnalyticsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay values from environment variables, read through `lookup`
    pub fn merge_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(data_dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(data_dir);
        }

        if let Some(top_n) = lookup(ENV_TOP_N) {
            self.top_n = top_n.trim().parse().map_err(|e| {
                AnalyticsError::invalid_config_value(format!(
                    "{ENV_TOP_N} must be a positive integer"
                ))
                .with_source(e)
            })?;
        }

        if let Some(format) = lookup(ENV_FORMAT) {
            self.output_format = format
                .parse()
                .map_err(AnalyticsError::invalid_config_value)?;
        }

        if let Some(log_level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = log_level;
        }

        if let Some(policy) = lookup(ENV_JOIN_POLICY) {
            self.join_policy = policy
                .parse()
                .map_err(AnalyticsError::invalid_config_value)?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(AnalyticsError::invalid_config_value("top_n must be at least 1"));
        }
        if self.per_category_limit == 0 {
            return Err(AnalyticsError::invalid_config_value(
                "per_category_limit must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            top_n: self.top_n,
            per_category_limit: self.per_category_limit,
        }
    }
}
