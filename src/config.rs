// src/config.rs

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Duckdb,
    Parquet,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// DuckDB file, or directory for parquet files.
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Duckdb,
            path: PathBuf::from("f1.duckdb"),
        }
    }
}

/// Run configuration. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub first_year: i32,
    /// Inclusive.
    pub last_year: i32,
    /// Archive id of the first race scraped.
    pub race_number_seed: u32,
    /// CSS class marking the results table.
    pub table_class: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Log and skip race pages that fail instead of aborting the run.
    pub skip_failed_pages: bool,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://www.formula1.com/en/results.html".into(),
            first_year: 1950,
            last_year: 1959,
            race_number_seed: 94,
            table_class: "resultsarchive-table".into(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into(),
            request_timeout_secs: 30,
            skip_failed_pages: false,
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load from a YAML file, or use the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let cfg = match path {
            Some(p) => {
                let text =
                    fs::read_to_string(p).with_context(|| format!("reading config {:?}", p))?;
                Self::from_yaml(&text).with_context(|| format!("parsing config {:?}", p))?
            }
            None => Self::default(),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.first_year > self.last_year {
            bail!(
                "first_year {} is after last_year {}",
                self.first_year,
                self.last_year
            );
        }
        if self.base_url.trim().is_empty() {
            bail!("base_url is empty");
        }
        if self.table_class.trim().is_empty() {
            bail!("table_class is empty");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.first_year..=self.last_year
    }
}
