//! Live view abstraction consumed by the batch driver

use serde::Serialize;
use std::fmt;

/// Identity of a live graph view
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ViewId(String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        ViewId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewId {
    fn from(id: &str) -> Self {
        ViewId(id.to_string())
    }
}

/// A displayed node and its current weight (`None` until first sized)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewNode {
    pub key: String,
    pub weight: Option<f64>,
}

impl ViewNode {
    pub fn new(key: impl Into<String>) -> Self {
        ViewNode {
            key: key.into(),
            weight: None,
        }
    }
}

/// A live graph view whose node weights the driver manages
pub trait SizedView {
    fn id(&self) -> ViewId;

    /// Closed views are never sized again and get their timer cancelled
    fn is_closed(&self) -> bool;

    /// Whether the view has a renderer yet; views without one are skipped
    fn has_renderer(&self) -> bool {
        true
    }

    /// Nodes currently displayed
    fn nodes_mut(&mut self) -> &mut [ViewNode];
}

/// In-memory view used by the CLI and tests
#[derive(Debug, Clone)]
pub struct MemoryView {
    id: ViewId,
    nodes: Vec<ViewNode>,
    closed: bool,
    renderer: bool,
}

impl MemoryView {
    pub fn new<I, S>(id: impl Into<ViewId>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemoryView {
            id: id.into(),
            nodes: keys.into_iter().map(ViewNode::new).collect(),
            closed: false,
            renderer: true,
        }
    }

    pub fn nodes(&self) -> &[ViewNode] {
        &self.nodes
    }

    /// Current weight of `key`, if displayed and sized
    pub fn weight_of(&self, key: &str) -> Option<f64> {
        self.nodes
            .iter()
            .find(|n| n.key == key)
            .and_then(|n| n.weight)
    }

    /// Replace the displayed node set, keeping weights of nodes still shown
    pub fn set_keys<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let previous = std::mem::take(&mut self.nodes);
        self.nodes = keys
            .into_iter()
            .map(|key| {
                let key = key.into();
                let weight = previous.iter().find(|n| n.key == key).and_then(|n| n.weight);
                ViewNode { key, weight }
            })
            .collect();
    }

    pub fn set_weight(&mut self, key: &str, weight: f64) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.key == key) {
            node.weight = Some(weight);
        }
    }

    pub fn set_renderer(&mut self, ready: bool) {
        self.renderer = ready;
    }

    pub fn close(&mut self) {
        self.closed = true;
    }
}

impl From<String> for ViewId {
    fn from(id: String) -> Self {
        ViewId(id)
    }
}

impl SizedView for MemoryView {
    fn id(&self) -> ViewId {
        self.id.clone()
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn has_renderer(&self) -> bool {
        self.renderer
    }

    fn nodes_mut(&mut self) -> &mut [ViewNode] {
        &mut self.nodes
    }
}
