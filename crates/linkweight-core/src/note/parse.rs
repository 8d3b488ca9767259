use super::frontmatter::NodeMetadata;
use crate::error::{LinkweightError, Result};

/// Split markdown content into its YAML frontmatter block and body
///
/// Returns `(None, content)` when the document has no frontmatter. An opening
/// `---` without a closing delimiter is treated as plain body text.
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(after_open) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    // Empty frontmatter: closing delimiter directly after the opening one
    if let Some(body) = after_open
        .strip_prefix("---\n")
        .or_else(|| after_open.strip_prefix("---\r\n"))
    {
        return (Some(""), body);
    }

    let Some(end) = after_open.find("\n---") else {
        return (None, content);
    };

    let yaml = &after_open[..end];
    let rest = &after_open[end + 4..];
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => "",
    };
    (Some(yaml.trim_end_matches('\r')), body)
}

/// Parse a frontmatter block into node metadata
#[tracing::instrument(level = "trace", skip(yaml))]
pub fn parse_metadata(yaml: &str, key: &str) -> Result<NodeMetadata> {
    if yaml.trim().is_empty() {
        return Ok(NodeMetadata::default());
    }
    serde_yaml::from_str(yaml).map_err(|e| LinkweightError::InvalidFrontmatter {
        path: key.to_string(),
        reason: e.to_string(),
    })
}
