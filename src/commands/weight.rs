//! `weight` command: raw reachability of one node

use serde_json::json;

use linkweight_core::error::Result;
use linkweight_core::format::{records_value, OutputFormat};
use linkweight_core::sizing::{reach, scale_weight, SizingPolicy};

use super::dispatch::{require_key, CommandContext};
use super::sizes::format_size;

pub fn execute(ctx: &CommandContext, key: &str) -> Result<()> {
    let vault = ctx.load_vault()?;
    let config = ctx.load_config()?;
    let key = require_key(&vault, key)?;

    let policy = SizingPolicy::new(&config);
    let stats = reach(&vault, &key, &policy);
    let size = scale_weight(stats.weight, &config);

    match ctx.cli.format {
        OutputFormat::Human => {
            println!("{}", key);
            println!("  weight:       {}", stats.weight);
            println!("  scaled size:  {}", format_size(size));
            println!("  visited:      {}", stats.visited);
            println!("  excluded:     {}", stats.excluded);
            println!("  unresolved:   {}", stats.unresolved);
            println!("  depth capped: {}", stats.depth_capped);
        }
        OutputFormat::Json => {
            let output = json!({
                "key": key,
                "reach": stats,
                "size": size,
                "max_depth": config.max_depth,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Records => {
            println!(
                "H linkweight=1 records=1 mode=weight max_depth={}",
                config.max_depth
            );
            println!(
                "W {} weight={} size={} visited={} excluded={} unresolved={} depth_capped={}",
                records_value(&key),
                stats.weight,
                format_size(size),
                stats.visited,
                stats.excluded,
                stats.unresolved,
                stats.depth_capped
            );
        }
    }

    Ok(())
}
