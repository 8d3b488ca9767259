//! `tags` command: every tag used in the vault

use linkweight_core::error::Result;
use linkweight_core::format::{records_value, OutputFormat};
use linkweight_core::graph::GraphProvider;

use super::dispatch::CommandContext;

pub fn execute(ctx: &CommandContext) -> Result<()> {
    let vault = ctx.load_vault()?;
    let tags = vault.all_tags();

    match ctx.cli.format {
        OutputFormat::Human => {
            if tags.is_empty() && !ctx.cli.quiet {
                println!("No tags found");
            }
            for tag in &tags {
                println!("#{}", tag);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tags)?);
        }
        OutputFormat::Records => {
            println!("H linkweight=1 records=1 mode=tags tags={}", tags.len());
            for tag in &tags {
                println!("T {}", records_value(tag));
            }
        }
    }

    Ok(())
}
