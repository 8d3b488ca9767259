//! Batch sizing driver: one pass over every node of a view

use serde::Serialize;
use tracing::{debug, warn};

use super::resolve::{resolve_size, Resolution};
use super::view::SizedView;
use super::SizingPolicy;
use crate::config::SizingConfig;
use crate::graph::GraphProvider;

/// Counters for one pass over a view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    /// Nodes assigned a computed size
    pub computed: usize,
    /// Nodes assigned a manual size
    pub manual: usize,
    /// Nodes left untouched by exclusion rules
    pub excluded: usize,
    /// Displayed keys with no node
    pub missing: usize,
    /// Nodes whose weight differs from before the pass
    pub changed: usize,
    /// The view had no renderer; nothing was sized
    pub skipped: bool,
}

/// Resolve and assign the size of every node in `view`
///
/// Idempotent: with an unchanged graph and configuration a second pass
/// assigns the same values and reports `changed == 0`.
#[tracing::instrument(skip_all, fields(view = %view.id()))]
pub fn run_pass<G, V>(graph: &G, view: &mut V, config: &SizingConfig) -> PassReport
where
    G: GraphProvider + ?Sized,
    V: SizedView + ?Sized,
{
    let mut report = PassReport::default();

    if !view.has_renderer() {
        debug!("view has no renderer, skipping pass");
        report.skipped = true;
        return report;
    }

    let policy = SizingPolicy::new(config);
    if !policy.rules().invalid_patterns().is_empty() {
        warn!(
            patterns = ?policy.rules().invalid_patterns(),
            "title exclusion patterns failed to compile"
        );
    }

    for node in view.nodes_mut() {
        let resolution = resolve_size(graph, &node.key, &policy);
        match &resolution {
            Resolution::Missing => report.missing += 1,
            Resolution::Excluded { .. } => report.excluded += 1,
            Resolution::Manual { .. } => report.manual += 1,
            Resolution::Computed { .. } => report.computed += 1,
        }

        if let Some(size) = resolution.size() {
            if node.weight != Some(size) {
                report.changed += 1;
                node.weight = Some(size);
            }
        }
    }

    debug!(
        computed = report.computed,
        manual = report.manual,
        excluded = report.excluded,
        missing = report.missing,
        changed = report.changed,
        "sizing pass"
    );
    report
}

/// Resolve a list of keys without a view
pub fn size_keys<G, S>(graph: &G, keys: &[S], config: &SizingConfig) -> Vec<(String, Resolution)>
where
    G: GraphProvider + ?Sized,
    S: AsRef<str>,
{
    let policy = SizingPolicy::new(config);
    keys.iter()
        .map(|key| {
            let key = key.as_ref();
            (key.to_string(), resolve_size(graph, key, &policy))
        })
        .collect()
}
