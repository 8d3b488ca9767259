//! Link graph data provider
//!
//! - `GraphProvider`: lookup seam used by sizing (node existence, outgoing
//!   links, metadata, corpus tag enumeration)
//! - `LinkGraph`: in-memory provider used by the vault loader and by embedders

pub mod link_graph;

pub use link_graph::LinkGraph;

use crate::note::Node;
use std::collections::BTreeSet;

/// Trait for providing graph adjacency and node metadata
///
/// A lookup miss is a valid answer: link targets may point at nodes that were
/// deleted or never existed.
pub trait GraphProvider {
    /// Look up a node by key
    fn node(&self, key: &str) -> Option<&Node>;

    /// Outgoing link targets of `key` (empty for unknown keys)
    fn outgoing_links(&self, key: &str) -> &[String];

    /// Keys of every existing node
    fn keys(&self) -> Vec<&str>;

    fn exists(&self, key: &str) -> bool {
        self.node(key).is_some()
    }

    /// All tags used across the corpus, sorted and deduplicated
    fn all_tags(&self) -> Vec<String> {
        let tags: BTreeSet<String> = self
            .keys()
            .into_iter()
            .filter_map(|key| self.node(key))
            .flat_map(|node| node.metadata().effective_tags())
            .collect();
        tags.into_iter().collect()
    }
}
