//! `sizes` command: one sizing pass over the requested nodes

use serde::Serialize;

use linkweight_core::error::Result;
use linkweight_core::format::{records_value, OutputFormat};
use linkweight_core::graph::GraphProvider;
use linkweight_core::sizing::{size_keys, Resolution};

use super::dispatch::{resolve_key, CommandContext};

#[derive(Serialize)]
struct SizeRow<'a> {
    key: &'a str,
    #[serde(flatten)]
    resolution: &'a Resolution,
}

pub fn execute(ctx: &CommandContext, keys: &[String], assigned_only: bool) -> Result<()> {
    let vault = ctx.load_vault()?;
    let config = ctx.load_config()?;

    let keys: Vec<String> = if keys.is_empty() {
        vault.keys().into_iter().map(str::to_string).collect()
    } else {
        keys.iter().map(|k| resolve_key(&vault, k)).collect()
    };

    let results: Vec<(String, Resolution)> = size_keys(&vault, &keys, &config)
        .into_iter()
        .filter(|(_, r)| !assigned_only || r.size().is_some())
        .collect();

    match ctx.cli.format {
        OutputFormat::Human => {
            for (key, resolution) in &results {
                println!("{}", human_line(key, resolution));
            }
        }
        OutputFormat::Json => {
            let rows: Vec<SizeRow> = results
                .iter()
                .map(|(key, resolution)| SizeRow { key, resolution })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Records => {
            println!(
                "H linkweight=1 records=1 vault={} mode=sizes nodes={}",
                records_value(&vault.root().display().to_string()),
                results.len()
            );
            for (key, resolution) in &results {
                println!("{}", record_line(key, resolution));
            }
        }
    }

    Ok(())
}

fn human_line(key: &str, resolution: &Resolution) -> String {
    match resolution {
        Resolution::Computed { weight, size } => {
            format!("{}  {}  (weight {})", key, format_size(*size), weight)
        }
        Resolution::Manual { size } => format!("{}  {}  (manual)", key, format_size(*size)),
        Resolution::Excluded { reason } => format!("{}  -  (excluded: {})", key, reason),
        Resolution::Missing => format!("{}  -  (missing)", key),
    }
}

fn record_line(key: &str, resolution: &Resolution) -> String {
    let mut line = format!("S {} outcome={}", records_value(key), resolution.label());
    match resolution {
        Resolution::Computed { weight, size } => {
            line.push_str(&format!(" weight={} size={}", weight, format_size(*size)));
        }
        Resolution::Manual { size } => line.push_str(&format!(" size={}", format_size(*size))),
        Resolution::Excluded { reason } => {
            line.push_str(&format!(" reason={}", records_value(&reason.to_string())))
        }
        Resolution::Missing => {}
    }
    line
}

/// Sizes print without a trailing `.0` when integral
pub fn format_size(size: f64) -> String {
    if size.fract() == 0.0 && size.abs() < 1e15 {
        format!("{}", size as i64)
    } else {
        format!("{:.2}", size)
    }
}
