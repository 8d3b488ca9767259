use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Reserved metadata key carrying a manual size override
pub const NODE_SIZE_KEY: &str = "node_size";

/// Node frontmatter (YAML header)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// Manual size override; presence is explicit, `0` is a real value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_size: Option<ManualSize>,
    /// Declared tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagList>,
    /// Singular alias for `tags`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<TagList>,
    /// Any other frontmatter field
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Raw manual size as authored in frontmatter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ManualSize {
    Number(f64),
    Text(String),
    Other(serde_yaml::Value),
}

impl ManualSize {
    /// Numeric value, if the authored value is a finite number or numeric text
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            ManualSize::Number(n) => Some(*n),
            ManualSize::Text(s) => s.trim().parse::<f64>().ok(),
            ManualSize::Other(_) => None,
        };
        value.filter(|v| v.is_finite())
    }
}

/// Declared tag list: a YAML sequence or a comma/whitespace separated string
///
/// Any other scalar (`tags: 2024`) is kept as a single entry so an odd tag
/// field never discards the rest of the frontmatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagList {
    List(Vec<serde_yaml::Value>),
    Text(String),
    Other(serde_yaml::Value),
}

impl TagList {
    /// Tag entries with any leading `#` removed
    pub fn entries(&self) -> Vec<String> {
        match self {
            TagList::List(items) => items
                .iter()
                .filter_map(scalar_text)
                .filter_map(|s| normalize_tag(&s))
                .collect(),
            TagList::Text(text) => text
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter_map(normalize_tag)
                .collect(),
            TagList::Other(value) => scalar_text(value)
                .and_then(|s| normalize_tag(&s))
                .into_iter()
                .collect(),
        }
    }
}

impl NodeMetadata {
    /// Resolved manual size override, if one is present and numeric
    pub fn manual_size(&self) -> Option<f64> {
        let raw = self.node_size.as_ref()?;
        let value = raw.value();
        if value.is_none() {
            warn!(value = ?raw, "ignoring non-numeric {}", NODE_SIZE_KEY);
        }
        value
    }

    /// Declared tags plus implicit `#tag` string values from other fields
    pub fn effective_tags(&self) -> BTreeSet<String> {
        let mut tags: BTreeSet<String> = self
            .tags
            .iter()
            .chain(self.tag.iter())
            .flat_map(TagList::entries)
            .collect();

        for value in self.extra.values() {
            if let serde_yaml::Value::String(s) = value {
                if s.starts_with('#') {
                    if let Some(tag) = normalize_tag(s) {
                        tags.insert(tag);
                    }
                }
            }
        }

        tags
    }
}

fn scalar_text(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn normalize_tag(raw: &str) -> Option<String> {
    let tag = raw.trim().trim_start_matches('#').trim();
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_string())
    }
}
