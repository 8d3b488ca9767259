//! Markdown vault graph provider
//!
//! Every `*.md` file under the vault root is a node keyed by its relative
//! path. Frontmatter becomes node metadata; wiki and markdown links in the
//! body become outgoing edges. The vault is read from scratch on every load.

mod links;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{LinkweightError, Result};
use crate::graph::{GraphProvider, LinkGraph};
use crate::note::parse::{parse_metadata, split_frontmatter};
use crate::note::{Node, NodeMetadata};
use crate::trace_time;
use links::{LinkExtractor, LinkResolver};

/// A vault loaded into memory
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    graph: LinkGraph,
    warnings: Vec<String>,
}

impl Vault {
    /// Load every markdown file under `root`
    ///
    /// Unreadable files and malformed frontmatter are recorded as warnings;
    /// the rest of the vault still loads.
    #[tracing::instrument(skip(root), fields(root = %root.display()))]
    pub fn load(root: &Path) -> Result<Self> {
        let start = Instant::now();
        if !root.is_dir() {
            return Err(LinkweightError::VaultNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut warnings = Vec::new();
        let mut documents: Vec<(String, String)> = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable vault entry");
                    warnings.push(e.to_string());
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_markdown(entry.path()) {
                continue;
            }

            let Some(key) = vault_key(root, entry.path()) else {
                continue;
            };
            match fs::read_to_string(entry.path()) {
                Ok(content) => documents.push((key, content)),
                Err(e) => {
                    warn!(key = %key, error = %e, "skipping unreadable note");
                    warnings.push(format!("{}: {}", key, e));
                }
            }
        }

        let extractor = LinkExtractor::new()?;
        let resolver = LinkResolver::new(documents.iter().map(|(key, _)| key.as_str()));
        let mut graph = LinkGraph::new();

        for (key, content) in &documents {
            let (yaml, body) = split_frontmatter(content);
            let metadata = match yaml.map(|y| parse_metadata(y, key)).transpose() {
                Ok(metadata) => metadata.unwrap_or_default(),
                Err(e) => {
                    warn!(key = %key, error = %e, "ignoring malformed frontmatter");
                    warnings.push(e.to_string());
                    NodeMetadata::default()
                }
            };

            for raw in extractor.extract(body) {
                let target = resolver.resolve(key, &raw);
                graph.add_link(key, &target);
            }
            graph.insert_node(Node::new(key.as_str()).with_metadata(metadata));
        }

        debug!(
            nodes = graph.len(),
            edges = graph.edge_count(),
            warnings = warnings.len(),
            "vault loaded"
        );
        trace_time!(start, "vault_load", nodes = graph.len());

        Ok(Vault {
            root: root.to_path_buf(),
            graph,
            warnings,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn graph(&self) -> &LinkGraph {
        &self.graph
    }

    /// Problems encountered while loading
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }
}

impl GraphProvider for Vault {
    fn node(&self, key: &str) -> Option<&Node> {
        self.graph.node(key)
    }

    fn outgoing_links(&self, key: &str) -> &[String] {
        self.graph.outgoing_links(key)
    }

    fn keys(&self) -> Vec<&str> {
        self.graph.keys()
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Relative path with `/` separators; `None` for non UTF-8 paths
fn vault_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect();
    Some(parts?.join("/"))
}
