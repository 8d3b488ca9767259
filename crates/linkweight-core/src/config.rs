//! Sizing configuration for linkweight
//!
//! Configuration lives in `<vault>/.linkweight/config.toml`. It is merged over
//! the hard-coded defaults on load and sanitized before any sizing pass sees it.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{LinkweightError, Result};
use crate::sizing::exclusion::parse_title_pattern;

pub use types::{
    SizingConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_SIZE, DEFAULT_MULTIPLIER_SCALE,
    DEFAULT_REFRESH_INTERVAL_MS, DEFAULT_SIZE_MULTIPLIER,
};

/// Directory holding linkweight state inside a vault
pub const CONFIG_DIR: &str = ".linkweight";
/// Configuration file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.toml";

/// Default configuration path for a vault
pub fn config_path(vault_root: &Path) -> PathBuf {
    vault_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

impl SizingConfig {
    /// Clamp numeric fields into sane positive ranges and normalize lists
    pub fn sanitize(mut self) -> Self {
        self.size_multiplier = types::clamp_f64(
            self.size_multiplier,
            0.1,
            10.0,
            DEFAULT_SIZE_MULTIPLIER,
        );
        self.multiplier_scale = types::clamp_f64(
            self.multiplier_scale,
            0.1,
            5.0,
            DEFAULT_MULTIPLIER_SCALE,
        );
        self.max_size = types::clamp_f64(self.max_size, 1.0, 1000.0, DEFAULT_MAX_SIZE);
        self.max_depth = self.max_depth.clamp(1, 20);
        self.refresh_interval_ms = self.refresh_interval_ms.clamp(100, 60_000);

        self.exclude_folders = normalize_list(self.exclude_folders, |s| {
            s.trim_start_matches('/').to_string()
        });
        self.exclude_titles = normalize_list(self.exclude_titles, str::to_string);
        self.exclude_tags = normalize_list(self.exclude_tags, |s| {
            s.trim_start_matches('#').to_string()
        });
        self
    }

    /// Check every `/regex/` title pattern, returning all that fail to compile
    pub fn pattern_errors(&self) -> Vec<LinkweightError> {
        self.exclude_titles
            .iter()
            .filter_map(|raw| parse_title_pattern(raw).err())
            .collect()
    }

    /// Validate the configuration, failing on the first malformed pattern
    pub fn validate(&self) -> Result<()> {
        match self.pattern_errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Load configuration from a file, merged over defaults and sanitized
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: SizingConfig =
            toml::from_str(&content).map_err(|e| LinkweightError::InvalidConfig {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        for key in config.extra.keys() {
            debug!(key = %key, "preserving unknown config key");
        }

        Ok(config.sanitize())
    }

    /// Load configuration, returning defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save configuration to a file, creating the parent directory
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| LinkweightError::failed("serialize config", e))?;
        fs::write(path, content)?;
        Ok(())
    }
}

fn normalize_list(values: Vec<String>, normalize: impl Fn(&str) -> String) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = normalize(value.trim());
        if value.is_empty() {
            warn!("ignoring empty exclusion entry");
            continue;
        }
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
