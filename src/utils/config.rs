//! Resolver configuration

use crate::collector::CollectOptions;
use crate::utils::error::ResolveError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Resolver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Scroll harness tuning
    pub collect: CollectOptions,

    /// Upper bound for a single page navigation (milliseconds)
    pub navigation_timeout_ms: u64,

    /// User agent for static page fetches
    pub user_agent: String,

    /// Maximum links resolved at once (one rendering context each)
    pub max_concurrent: usize,

    /// Run Chromium without a window
    pub headless: bool,

    /// Default tracing filter when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            collect: CollectOptions::default(),
            navigation_timeout_ms: 30_000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_concurrent: 3,
            headless: true,
            log_filter: "tubelink=info".to_string(),
        }
    }
}

impl ResolverSettings {
    /// Default settings file location (`<config dir>/tubelink/settings.json`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tubelink").join("settings.json"))
    }

    /// Parse settings from JSON; missing keys fall back to defaults
    pub fn from_json_str(json: &str) -> Result<Self, ResolveError> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.validated())
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ResolveError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Load from the default location, or defaults when no file exists
    pub fn load_or_default() -> Result<Self, ResolveError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Clamp zero values to sane minimums
    pub fn validated(mut self) -> Self {
        if self.max_concurrent == 0 {
            self.max_concurrent = 1;
        }
        if self.collect.max_scrolls == 0 {
            self.collect.max_scrolls = 1;
        }
        if self.collect.poll_interval_ms == 0 {
            self.collect.poll_interval_ms = 1;
        }
        self
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }
}
