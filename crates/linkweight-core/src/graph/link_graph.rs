use super::GraphProvider;
use crate::note::{Node, NodeMetadata};
use std::collections::HashMap;

/// In-memory directed link graph
///
/// Nodes and edges are stored separately: an edge may target a key that has
/// no node.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    nodes: HashMap<String, Node>,
    links: HashMap<String, Vec<String>>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a node
    pub fn insert_node(&mut self, node: Node) {
        self.nodes.insert(node.key().to_string(), node);
    }

    /// Add a directed edge; duplicate edges are ignored
    pub fn add_link(&mut self, from: &str, to: &str) {
        let targets = self.links.entry(from.to_string()).or_default();
        if !targets.iter().any(|t| t == to) {
            targets.push(to.to_string());
        }
    }

    /// Builder form of [`LinkGraph::insert_node`] for a node with empty metadata
    pub fn with_node(mut self, key: &str) -> Self {
        self.insert_node(Node::new(key));
        self
    }

    /// Builder form of [`LinkGraph::insert_node`] with metadata
    pub fn with_metadata(mut self, key: &str, metadata: NodeMetadata) -> Self {
        self.insert_node(Node::new(key).with_metadata(metadata));
        self
    }

    /// Builder form of [`LinkGraph::add_link`]
    pub fn with_link(mut self, from: &str, to: &str) -> Self {
        self.add_link(from, to);
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of directed edges
    pub fn edge_count(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }
}

impl GraphProvider for LinkGraph {
    fn node(&self, key: &str) -> Option<&Node> {
        self.nodes.get(key)
    }

    fn outgoing_links(&self, key: &str) -> &[String] {
        self.links.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_node_is_not_an_error() {
        let graph = LinkGraph::new().with_node("a.md").with_link("a.md", "ghost.md");
        assert!(graph.exists("a.md"));
        assert!(!graph.exists("ghost.md"));
        assert_eq!(graph.outgoing_links("a.md"), ["ghost.md".to_string()]);
        assert!(graph.outgoing_links("ghost.md").is_empty());
    }

    #[test]
    fn test_duplicate_links_ignored() {
        let graph = LinkGraph::new()
            .with_node("a.md")
            .with_link("a.md", "b.md")
            .with_link("a.md", "b.md")
            .with_link("a.md", "c.md");
        assert_eq!(graph.outgoing_links("a.md").len(), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_keys_sorted() {
        let graph = LinkGraph::new()
            .with_node("b.md")
            .with_node("a.md")
            .with_node("c.md");
        assert_eq!(graph.keys(), vec!["a.md", "b.md", "c.md"]);
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_all_tags_across_corpus() {
        let a: NodeMetadata = serde_yaml::from_str("tags: [idea, draft]").unwrap();
        let b: NodeMetadata = serde_yaml::from_str("tags: \"#idea project\"").unwrap();
        let graph = LinkGraph::new()
            .with_metadata("a.md", a)
            .with_metadata("b.md", b)
            .with_node("c.md");
        assert_eq!(graph.all_tags(), vec!["draft", "idea", "project"]);
    }
}
