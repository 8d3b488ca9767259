//! Command dispatch logic for linkweight

use std::path::PathBuf;
use std::time::Instant;

use linkweight_core::config::SizingConfig;
use linkweight_core::error::{LinkweightError, Result};
use linkweight_core::graph::GraphProvider;
use linkweight_core::vault::Vault;
use tracing::debug;

use crate::cli::paths::{resolve_config_path, resolve_vault_path};
use crate::cli::{Cli, Commands};

use super::{config, excluded, sizes, tags, watch, weight};

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub vault_root: PathBuf,
    pub config_path: PathBuf,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        let vault_root = resolve_vault_path(cli.vault.clone());
        let config_path = resolve_config_path(cli.config.as_deref(), &vault_root);
        Self {
            cli,
            vault_root,
            config_path,
        }
    }

    pub fn load_vault(&self) -> Result<Vault> {
        let vault = Vault::load(&self.vault_root)?;
        if !self.cli.quiet {
            for warning in vault.warnings() {
                eprintln!("warning: {}", warning);
            }
        }
        Ok(vault)
    }

    pub fn load_config(&self) -> Result<SizingConfig> {
        SizingConfig::load_or_default(&self.config_path)
    }
}

/// Resolve a user-supplied key against the vault, accepting a missing `.md`
pub fn resolve_key(vault: &Vault, key: &str) -> String {
    let key = key.trim_start_matches("./");
    if vault.exists(key) {
        return key.to_string();
    }
    let with_ext = format!("{}.md", key);
    if vault.exists(&with_ext) {
        with_ext
    } else {
        key.to_string()
    }
}

/// Like [`resolve_key`], but a missing node is an error
pub fn require_key(vault: &Vault, key: &str) -> Result<String> {
    let resolved = resolve_key(vault, key);
    if vault.exists(&resolved) {
        Ok(resolved)
    } else {
        Err(LinkweightError::NodeNotFound {
            key: key.to_string(),
        })
    }
}

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let ctx = CommandContext::new(cli);
    debug!(
        elapsed = ?start.elapsed(),
        vault = %ctx.vault_root.display(),
        config = %ctx.config_path.display(),
        "resolve_paths"
    );

    match &cli.command {
        None => {
            println!("linkweight {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Commands::Sizes {
            keys,
            assigned_only,
        }) => sizes::execute(&ctx, keys, *assigned_only),
        Some(Commands::Weight { key }) => weight::execute(&ctx, key),
        Some(Commands::Excluded { key }) => excluded::execute(&ctx, key),
        Some(Commands::Tags) => tags::execute(&ctx),
        Some(Commands::Config { command }) => config::execute(&ctx, command),
        Some(Commands::Watch {
            passes,
            interval_ms,
        }) => watch::execute(&ctx, *passes, *interval_ms),
    }
}
