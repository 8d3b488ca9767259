//! Node model: a keyed document with optional frontmatter metadata

pub mod frontmatter;
pub mod parse;

pub use frontmatter::{ManualSize, NodeMetadata, TagList, NODE_SIZE_KEY};

/// A graph vertex representing one document, identified by a stable key
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    key: String,
    metadata: NodeMetadata,
}

impl Node {
    /// Create a node with empty metadata
    pub fn new(key: impl Into<String>) -> Self {
        Node {
            key: key.into(),
            metadata: NodeMetadata::default(),
        }
    }

    /// Attach metadata
    pub fn with_metadata(mut self, metadata: NodeMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn metadata(&self) -> &NodeMetadata {
        &self.metadata
    }

    /// Title used by title exclusion rules
    pub fn title(&self) -> &str {
        bare_title(&self.key)
    }
}

/// Key without its directory and without its extension
///
/// `"Notes/Draft Ideas.md"` becomes `"Draft Ideas"`. A leading dot is part of
/// the name, not an extension.
pub fn bare_title(key: &str) -> &str {
    let name = key.rsplit('/').next().unwrap_or(key);
    match name.rfind('.') {
        Some(pos) if pos > 0 => &name[..pos],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_title() {
        assert_eq!(bare_title("Notes/Draft Ideas.md"), "Draft Ideas");
        assert_eq!(bare_title("Top.md"), "Top");
        assert_eq!(bare_title("a/b/c"), "c");
        assert_eq!(bare_title("dir/.hidden"), ".hidden");
        assert_eq!(bare_title("v1.2 notes.md"), "v1.2 notes");
    }

    #[test]
    fn test_node_title_uses_key() {
        let node = Node::new("Projects/Alpha.md");
        assert_eq!(node.key(), "Projects/Alpha.md");
        assert_eq!(node.title(), "Alpha");
        assert!(node.metadata().manual_size().is_none());
    }
}
