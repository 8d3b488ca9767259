//! Exclusion evaluation
//!
//! A node is excluded from dynamic sizing when any of three independent rules
//! matches: folder prefix, title (literal or `/regex/`), or tag. Rules are
//! checked folder, title, tag so the metadata lookup happens last.

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

use crate::config::SizingConfig;
use crate::error::{LinkweightError, Result};
use crate::graph::GraphProvider;
use crate::note::Node;

/// A compiled title rule
#[derive(Debug, Clone)]
pub enum TitlePattern {
    Exact(String),
    Regex { source: String, regex: Regex },
}

impl TitlePattern {
    pub fn matches(&self, title: &str) -> bool {
        match self {
            TitlePattern::Exact(expected) => expected == title,
            TitlePattern::Regex { regex, .. } => regex.is_match(title),
        }
    }

    /// The pattern as configured
    pub fn source(&self) -> &str {
        match self {
            TitlePattern::Exact(s) => s,
            TitlePattern::Regex { source, .. } => source,
        }
    }
}

/// Parse a configured title pattern; `/.../` delimits a regular expression
pub fn parse_title_pattern(raw: &str) -> Result<TitlePattern> {
    if raw.len() >= 2 && raw.starts_with('/') && raw.ends_with('/') {
        let interior = &raw[1..raw.len() - 1];
        let regex = Regex::new(interior).map_err(|e| LinkweightError::InvalidPattern {
            pattern: raw.to_string(),
            reason: e.to_string(),
        })?;
        Ok(TitlePattern::Regex {
            source: raw.to_string(),
            regex,
        })
    } else {
        Ok(TitlePattern::Exact(raw.to_string()))
    }
}

/// Why a node does not take part in dynamic sizing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", content = "value", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// No node exists for the key
    Missing,
    /// Matched a folder prefix
    Folder(String),
    /// Matched a title pattern
    Title(String),
    /// Carries an excluded tag
    Tag(String),
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExclusionReason::Missing => write!(f, "missing"),
            ExclusionReason::Folder(p) => write!(f, "folder {}", p),
            ExclusionReason::Title(p) => write!(f, "title {}", p),
            ExclusionReason::Tag(t) => write!(f, "tag #{}", t),
        }
    }
}

/// Exclusion rules compiled from one configuration snapshot
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    folders: Vec<String>,
    titles: Vec<TitlePattern>,
    tags: HashSet<String>,
    invalid: Vec<String>,
}

impl ExclusionRules {
    /// Compile rules from configuration
    ///
    /// A malformed regex is logged and skipped; the remaining rules still apply.
    pub fn from_config(config: &SizingConfig) -> Self {
        let folders = config
            .exclude_folders
            .iter()
            .filter(|f| !f.is_empty())
            .map(|f| {
                if f.ends_with('/') {
                    f.clone()
                } else {
                    format!("{}/", f)
                }
            })
            .collect();

        let mut titles = Vec::with_capacity(config.exclude_titles.len());
        let mut invalid = Vec::new();
        for raw in &config.exclude_titles {
            match parse_title_pattern(raw) {
                Ok(pattern) => titles.push(pattern),
                Err(e) => {
                    warn!(pattern = %raw, error = %e, "skipping malformed title exclusion");
                    invalid.push(raw.clone());
                }
            }
        }

        let tags = config
            .exclude_tags
            .iter()
            .map(|t| t.trim_start_matches('#').to_string())
            .filter(|t| !t.is_empty())
            .collect();

        ExclusionRules {
            folders,
            titles,
            tags,
            invalid,
        }
    }

    /// Patterns that failed to compile
    pub fn invalid_patterns(&self) -> &[String] {
        &self.invalid
    }

    /// First matching rule for `node`, or `None` when it participates
    pub fn reason_for(&self, node: &Node) -> Option<ExclusionReason> {
        if let Some(prefix) = self.folders.iter().find(|p| node.key().starts_with(p.as_str())) {
            return Some(ExclusionReason::Folder(prefix.trim_end_matches('/').to_string()));
        }

        let title = node.title();
        if let Some(pattern) = self.titles.iter().find(|p| p.matches(title)) {
            return Some(ExclusionReason::Title(pattern.source().to_string()));
        }

        if !self.tags.is_empty() {
            if let Some(tag) = node
                .metadata()
                .effective_tags()
                .into_iter()
                .find(|t| self.tags.contains(t))
            {
                return Some(ExclusionReason::Tag(tag));
            }
        }

        None
    }

    /// Rule excluding the node at `key`; a missing node is reported as excluded
    pub fn check<G: GraphProvider + ?Sized>(&self, graph: &G, key: &str) -> Option<ExclusionReason> {
        match graph.node(key) {
            Some(node) => self.reason_for(node),
            None => Some(ExclusionReason::Missing),
        }
    }

    pub fn is_excluded<G: GraphProvider + ?Sized>(&self, graph: &G, key: &str) -> bool {
        self.check(graph, key).is_some()
    }
}
