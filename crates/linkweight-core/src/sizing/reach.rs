//! Reachability aggregation
//!
//! The weight of a root is the number of distinct nodes reachable from it
//! within `max_depth` hops, counting the root itself. Excluded nodes count 0
//! and are not expanded; nodes at the depth cap count 1 and are not expanded;
//! link targets without a node count 0 (or 1 with `count_unresolved_links`).
//!
//! Traversal is breadth-first over an explicit worklist with one visited set
//! shared by the whole traversal, so each node is reached at its minimal depth
//! and counted once regardless of link order, cycles, or diamonds.

use serde::Serialize;
use std::collections::{HashSet, VecDeque};

use super::SizingPolicy;
use crate::graph::GraphProvider;

/// Breakdown of one traversal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reach {
    /// Aggregated weight
    pub weight: u64,
    /// Distinct keys visited, including ones that counted 0
    pub visited: usize,
    /// Existing nodes skipped by exclusion rules
    pub excluded: usize,
    /// Keys with no node
    pub unresolved: usize,
    /// Nodes counted at the depth cap without being expanded
    pub depth_capped: usize,
}

/// Aggregate the reachable neighborhood of `root`
///
/// A missing root always has weight 0.
#[tracing::instrument(level = "trace", skip(graph, policy), fields(max_depth = policy.config().max_depth))]
pub fn reach<'g, G>(graph: &'g G, root: &'g str, policy: &SizingPolicy<'_>) -> Reach
where
    G: GraphProvider + ?Sized,
{
    let max_depth = policy.config().max_depth;
    let count_unresolved = policy.config().count_unresolved_links;

    let mut result = Reach::default();
    let mut visited: HashSet<&'g str> = HashSet::new();
    let mut queue: VecDeque<(&'g str, u32)> = VecDeque::new();

    visited.insert(root);
    queue.push_back((root, 0));

    while let Some((key, depth)) = queue.pop_front() {
        let Some(node) = graph.node(key) else {
            result.unresolved += 1;
            if depth > 0 && count_unresolved {
                result.weight += 1;
            }
            continue;
        };

        if policy.rules().reason_for(node).is_some() {
            result.excluded += 1;
            continue;
        }

        result.weight += 1;

        if depth >= max_depth {
            result.depth_capped += 1;
            continue;
        }

        for target in graph.outgoing_links(key) {
            if visited.insert(target.as_str()) {
                queue.push_back((target.as_str(), depth + 1));
            }
        }
    }

    result.visited = visited.len();
    tracing::trace!(
        root,
        weight = result.weight,
        visited = result.visited,
        "reach"
    );
    result
}

/// Weight of `root`: size of its depth-capped reachable node set
pub fn reach_weight<G>(graph: &G, root: &str, policy: &SizingPolicy<'_>) -> u64
where
    G: GraphProvider + ?Sized,
{
    reach(graph, root, policy).weight
}

#[cfg(test)]
mod tests;
