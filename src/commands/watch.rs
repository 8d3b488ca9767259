//! `watch` command: periodic sizing of the whole vault
//!
//! The vault is presented as a single view. After every pass the vault and
//! configuration are reloaded from disk so edits show up on the next tick.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use serde_json::json;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use linkweight_core::bail_invalid;
use linkweight_core::config::SizingConfig;
use linkweight_core::error::{LinkweightError, Result};
use linkweight_core::format::{records_value, OutputFormat};
use linkweight_core::graph::GraphProvider;
use linkweight_core::sizing::{MemoryView, PassReport, SizingScheduler, ViewId};
use linkweight_core::vault::Vault;

use super::dispatch::CommandContext;
use super::sizes::format_size;

const VIEW_ID: &str = "vault";

pub fn execute(ctx: &CommandContext, passes: Option<u64>, interval_ms: Option<u64>) -> Result<()> {
    if passes == Some(0) {
        bail_invalid!("--passes", 0);
    }

    let vault = ctx.load_vault()?;
    let config = ctx.load_config()?;
    let period = Duration::from_millis(interval_ms.unwrap_or(config.refresh_interval_ms));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| LinkweightError::failed("start runtime", e))?;

    runtime.block_on(watch_loop(ctx, vault, config, period, passes));
    Ok(())
}

async fn watch_loop(
    ctx: &CommandContext<'_>,
    vault: Vault,
    config: SizingConfig,
    period: Duration,
    passes: Option<u64>,
) {
    let keys: Vec<String> = vault.keys().into_iter().map(str::to_string).collect();
    let graph = Arc::new(RwLock::new(vault));
    let (config_tx, config_rx) = watch::channel(config);
    let view = Arc::new(Mutex::new(MemoryView::new(VIEW_ID, keys)));
    let (report_tx, mut report_rx) = mpsc::unbounded_channel();

    let mut scheduler =
        SizingScheduler::new(Arc::clone(&graph), config_rx, period).with_reports(report_tx);
    scheduler.sync_views(std::slice::from_ref(&view));
    info!(period = ?period, "watching vault");

    let mut completed = 0u64;
    let mut shown: BTreeMap<String, f64> = BTreeMap::new();

    loop {
        tokio::select! {
            received = report_rx.recv() => {
                let Some((id, report)) = received else {
                    debug!("report channel closed");
                    break;
                };
                completed += 1;
                let changes = collect_changes(&view.lock(), &mut shown);
                print_pass(ctx, completed, &id, &report, &changes);

                if passes.is_some_and(|limit| completed >= limit) {
                    break;
                }
                refresh(ctx, &graph, &config_tx, &view);
                scheduler.sync_views(std::slice::from_ref(&view));
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    view.lock().close();
    scheduler.shutdown();
    debug!(passes = completed, "watch finished");
}

/// Reload vault and config; on failure the previous state stays in place
fn refresh(
    ctx: &CommandContext,
    graph: &RwLock<Vault>,
    config_tx: &watch::Sender<SizingConfig>,
    view: &Mutex<MemoryView>,
) {
    match Vault::load(&ctx.vault_root) {
        Ok(vault) => {
            let keys: Vec<String> = vault.keys().into_iter().map(str::to_string).collect();
            *graph.write() = vault;
            view.lock().set_keys(keys);
        }
        Err(e) => warn!(error = %e, "failed to reload vault"),
    }

    match ctx.load_config() {
        Ok(config) => {
            config_tx.send_if_modified(|current| {
                if *current == config {
                    false
                } else {
                    info!("configuration changed");
                    *current = config;
                    true
                }
            });
        }
        Err(e) => warn!(error = %e, "failed to reload config"),
    }
}

/// Weights that differ from what was last printed
fn collect_changes(view: &MemoryView, shown: &mut BTreeMap<String, f64>) -> Vec<(String, f64)> {
    let mut changes = Vec::new();
    for node in view.nodes() {
        let Some(weight) = node.weight else {
            continue;
        };
        if shown.get(&node.key) != Some(&weight) {
            shown.insert(node.key.clone(), weight);
            changes.push((node.key.clone(), weight));
        }
    }
    shown.retain(|key, _| view.nodes().iter().any(|n| &n.key == key));
    changes
}

fn print_pass(
    ctx: &CommandContext,
    pass: u64,
    id: &ViewId,
    report: &PassReport,
    changes: &[(String, f64)],
) {
    match ctx.cli.format {
        OutputFormat::Human => {
            if !ctx.cli.quiet {
                println!(
                    "pass {}: {} computed, {} manual, {} excluded, {} missing",
                    pass, report.computed, report.manual, report.excluded, report.missing
                );
            }
            for (key, weight) in changes {
                println!("  {}  {}", key, format_size(*weight));
            }
        }
        OutputFormat::Json => {
            let sizes: BTreeMap<&str, f64> =
                changes.iter().map(|(k, w)| (k.as_str(), *w)).collect();
            let line = json!({
                "pass": pass,
                "view": id.as_str(),
                "report": report,
                "sizes": sizes,
            });
            println!("{}", line);
        }
        OutputFormat::Records => {
            println!(
                "P pass={} view={} computed={} manual={} excluded={} missing={} changed={}",
                pass,
                records_value(id.as_str()),
                report.computed,
                report.manual,
                report.excluded,
                report.missing,
                changes.len()
            );
            for (key, weight) in changes {
                println!("S {} size={}", records_value(key), format_size(*weight));
            }
        }
    }
}
