//! Size resolution for a single node
//!
//! Precedence: missing node (no result), manual override (verbatim),
//! exclusion (leave the current size alone), computed size (scaled and
//! clamped into `[1, max_size]`).

use serde::Serialize;

use super::exclusion::ExclusionReason;
use super::reach::reach_weight;
use super::SizingPolicy;
use crate::config::SizingConfig;
use crate::graph::GraphProvider;

/// Outcome of resolving one node's size
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// No node for the key; nothing to size
    Missing,
    /// Authored `node_size`, bypassing every computed-size policy
    Manual { size: f64 },
    /// Not managed; the current size stays as it is
    Excluded { reason: ExclusionReason },
    /// Scaled and clamped reachability weight
    Computed { weight: u64, size: f64 },
}

impl Resolution {
    /// Size to assign, if any
    pub fn size(&self) -> Option<f64> {
        match self {
            Resolution::Manual { size } | Resolution::Computed { size, .. } => Some(*size),
            Resolution::Missing | Resolution::Excluded { .. } => None,
        }
    }

    /// Short outcome label used by text output
    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Missing => "missing",
            Resolution::Manual { .. } => "manual",
            Resolution::Excluded { .. } => "excluded",
            Resolution::Computed { .. } => "computed",
        }
    }
}

/// Scale a raw weight: `min(weight * sizeMultiplier * multiplierScale, maxSize)`,
/// floored at 1
pub fn scale_weight(weight: u64, config: &SizingConfig) -> f64 {
    let scaled = weight as f64 * config.size_multiplier * config.multiplier_scale;
    scaled.min(config.max_size).max(1.0)
}

/// Resolve the size of the node at `key`
pub fn resolve_size<G>(graph: &G, key: &str, policy: &SizingPolicy<'_>) -> Resolution
where
    G: GraphProvider + ?Sized,
{
    let Some(node) = graph.node(key) else {
        return Resolution::Missing;
    };

    if let Some(size) = node.metadata().manual_size() {
        return Resolution::Manual { size };
    }

    if let Some(reason) = policy.rules().reason_for(node) {
        return Resolution::Excluded { reason };
    }

    let weight = reach_weight(graph, key, policy);
    Resolution::Computed {
        weight,
        size: scale_weight(weight, policy.config()),
    }
}
