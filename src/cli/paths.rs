//! Path resolution utilities for CLI commands

use std::env;
use std::path::{Path, PathBuf};

use linkweight_core::config::config_path;

/// Resolve the vault root: explicit flag, else the current directory
pub fn resolve_vault_path(vault: Option<PathBuf>) -> PathBuf {
    vault.unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Resolve the config file: explicit flag (relative to the current
/// directory), else the vault's default location
pub fn resolve_config_path(config: Option<&Path>, vault_root: &Path) -> PathBuf {
    match config {
        Some(path) => path.to_path_buf(),
        None => config_path(vault_root),
    }
}
