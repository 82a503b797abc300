//! Settings management
//!
//! Loads optional JSON settings and applies environment overrides
//! (`STRATEGY_BUILDER_CATALOGUE`, `STRATEGY_BUILDER_LOG_DIR`).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::indicators::CatalogueMode;

pub const CATALOGUE_ENV: &str = "STRATEGY_BUILDER_CATALOGUE";
pub const LOG_DIR_ENV: &str = "STRATEGY_BUILDER_LOG_DIR";

/// Builder settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// How unknown indicator names are handled when added
    #[serde(default)]
    pub catalogue: CatalogueMode,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            catalogue: CatalogueMode::default(),
            log_dir: default_log_dir(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, then apply environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings: Settings =
            serde_json::from_str(&contents).context("Failed to parse settings JSON")?;
        settings.with_env()
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Result<Self> {
        Settings::default().with_env()
    }

    /// Settings file when given, otherwise defaults; environment wins either way
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_env(),
        }
    }

    fn with_env(self) -> Result<Self> {
        self.with_overrides(
            std::env::var(CATALOGUE_ENV).ok(),
            std::env::var(LOG_DIR_ENV).ok(),
        )
    }

    fn with_overrides(mut self, catalogue: Option<String>, log_dir: Option<String>) -> Result<Self> {
        if let Some(mode) = catalogue {
            self.catalogue = mode
                .parse::<CatalogueMode>()
                .with_context(|| format!("Invalid {}", CATALOGUE_ENV))?;
        }
        if let Some(dir) = log_dir.filter(|d| !d.trim().is_empty()) {
            self.log_dir = PathBuf::from(dir);
        }
        Ok(self)
    }
}
