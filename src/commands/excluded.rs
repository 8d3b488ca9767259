//! `excluded` command: explain the exclusion decision for one node

use serde_json::json;

use linkweight_core::error::Result;
use linkweight_core::format::{records_value, OutputFormat};
use linkweight_core::sizing::ExclusionRules;

use super::dispatch::{resolve_key, CommandContext};

pub fn execute(ctx: &CommandContext, key: &str) -> Result<()> {
    let vault = ctx.load_vault()?;
    let config = ctx.load_config()?;
    let key = resolve_key(&vault, key);

    let rules = ExclusionRules::from_config(&config);
    let reason = rules.check(&vault, &key);

    match ctx.cli.format {
        OutputFormat::Human => match &reason {
            Some(reason) => println!("{}: excluded ({})", key, reason),
            None => println!("{}: sized", key),
        },
        OutputFormat::Json => {
            let output = json!({
                "key": key,
                "excluded": reason.is_some(),
                "reason": reason,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Records => {
            println!("H linkweight=1 records=1 mode=excluded");
            match &reason {
                Some(reason) => println!(
                    "E {} excluded=true reason={}",
                    records_value(&key),
                    records_value(&reason.to_string())
                ),
                None => println!("E {} excluded=false", records_value(&key)),
            }
        }
    }

    Ok(())
}
