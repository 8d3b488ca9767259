//! `config` subcommands

use tracing::{info, warn};

use linkweight_core::bail_usage;
use linkweight_core::config::SizingConfig;
use linkweight_core::error::{LinkweightError, Result};
use linkweight_core::format::{records_value, OutputFormat};

use super::dispatch::CommandContext;
use crate::cli::ConfigCommands;

pub fn execute(ctx: &CommandContext, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(ctx),
        ConfigCommands::Check => check(ctx),
        ConfigCommands::Init { force } => init(ctx, *force),
    }
}

fn show(ctx: &CommandContext) -> Result<()> {
    let config = ctx.load_config()?;

    match ctx.cli.format {
        OutputFormat::Human => {
            let text = toml::to_string_pretty(&config)
                .map_err(|e| LinkweightError::failed("serialize config", e))?;
            print!("{}", text);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Records => {
            println!(
                "H linkweight=1 records=1 mode=config path={}",
                records_value(&ctx.config_path.display().to_string())
            );
            println!("C sizeMultiplier={}", config.size_multiplier);
            println!("C multiplierScale={}", config.multiplier_scale);
            println!("C maxSize={}", config.max_size);
            println!("C maxDepth={}", config.max_depth);
            println!("C countUnresolvedLinks={}", config.count_unresolved_links);
            println!("C refreshIntervalMs={}", config.refresh_interval_ms);
            for folder in &config.exclude_folders {
                println!("C excludeFolder={}", records_value(folder));
            }
            for title in &config.exclude_titles {
                println!("C excludeTitle={}", records_value(title));
            }
            for tag in &config.exclude_tags {
                println!("C excludeTag={}", records_value(tag));
            }
        }
    }

    Ok(())
}

fn check(ctx: &CommandContext) -> Result<()> {
    let config = ctx.load_config()?;
    let errors = config.pattern_errors();

    match ctx.cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": ctx.config_path.display().to_string(),
                "valid": errors.is_empty(),
                "errors": errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Records => {
            println!(
                "H linkweight=1 records=1 mode=check valid={} errors={}",
                errors.is_empty(),
                errors.len()
            );
            for err in &errors {
                println!("X {}", records_value(&err.to_string()));
            }
        }
        OutputFormat::Human => {
            for err in &errors {
                eprintln!("error: {}", err);
            }
            if errors.is_empty() && !ctx.cli.quiet {
                println!("Configuration OK: {}", ctx.config_path.display());
            }
        }
    }

    match errors.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn init(ctx: &CommandContext, force: bool) -> Result<()> {
    let path = &ctx.config_path;
    let mut config = SizingConfig::default();

    if path.exists() {
        if !force {
            bail_usage!(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            ));
        }
        match SizingConfig::load(path) {
            Ok(existing) => config.extra = existing.extra,
            Err(e) => warn!(error = %e, "existing config unreadable, discarding it"),
        }
    }

    config.save(path)?;
    info!(path = %path.display(), "wrote config");

    if !ctx.cli.quiet {
        match ctx.cli.format {
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(
                    &serde_json::json!({ "path": path.display().to_string() })
                )?
            ),
            OutputFormat::Records => println!(
                "H linkweight=1 records=1 mode=init path={}",
                records_value(&path.display().to_string())
            ),
            OutputFormat::Human => println!("Wrote {}", path.display()),
        }
    }

    Ok(())
}
