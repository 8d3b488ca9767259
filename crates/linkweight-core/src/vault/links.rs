use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::error::{LinkweightError, Result};
use crate::note::bare_title;

/// Compiled link patterns, built once per vault load
pub(crate) struct LinkExtractor {
    wiki: Regex,
    markdown: Regex,
}

/// A link target as written in a note body
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RawLink {
    /// `[[target]]`, resolved by key or basename
    Wiki(String),
    /// `[text](path)`, resolved relative to the source note
    Markdown(String),
}

impl LinkExtractor {
    pub(crate) fn new() -> Result<Self> {
        let wiki = Regex::new(r"\[\[([^\]|#^]*)(?:[#^][^\]|]*)?(?:\|[^\]]*)?\]\]")
            .map_err(|e| LinkweightError::failed("compile wiki link pattern", e))?;
        let markdown = Regex::new(r"\[[^\]]*\]\(([^)\s]+)(?:\s+[^)]*)?\)")
            .map_err(|e| LinkweightError::failed("compile markdown link pattern", e))?;
        Ok(LinkExtractor { wiki, markdown })
    }

    /// Extract link targets in order of appearance
    pub(crate) fn extract(&self, body: &str) -> Vec<RawLink> {
        let mut links = Vec::new();

        for cap in self.wiki.captures_iter(body) {
            let target = cap[1].trim();
            if !target.is_empty() {
                links.push(RawLink::Wiki(target.to_string()));
            }
        }

        for cap in self.markdown.captures_iter(body) {
            let target = cap[1].trim();
            if target.contains("://") || target.starts_with('#') || target.starts_with("mailto:") {
                continue;
            }
            let target = target.split('#').next().unwrap_or(target);
            if !target.is_empty() {
                links.push(RawLink::Markdown(target.replace("%20", " ")));
            }
        }

        links
    }
}

/// Maps raw link targets onto vault keys
pub(crate) struct LinkResolver<'a> {
    keys: HashSet<&'a str>,
    by_basename: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> LinkResolver<'a> {
    pub(crate) fn new(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let keys: HashSet<&'a str> = keys.into_iter().collect();
        let mut by_basename: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
        for &key in &keys {
            by_basename.entry(bare_title(key)).or_default().push(key);
        }
        for candidates in by_basename.values_mut() {
            candidates.sort_unstable();
        }
        LinkResolver { keys, by_basename }
    }

    /// Resolve a link found in the note at `source`
    ///
    /// Unresolved targets are returned normalized (with `.md` added when they
    /// have no extension) so they still appear in the link map.
    pub(crate) fn resolve(&self, source: &str, link: &RawLink) -> String {
        match link {
            RawLink::Wiki(target) => self.resolve_wiki(target),
            RawLink::Markdown(target) => self.resolve_relative(source, target),
        }
    }

    fn resolve_wiki(&self, target: &str) -> String {
        let target = target.trim_start_matches('/');
        if self.keys.contains(target) {
            return target.to_string();
        }
        let appended = format!("{}.md", target);
        if self.keys.contains(appended.as_str()) {
            return appended;
        }
        if !target.contains('/') {
            let name = target.strip_suffix(".md").unwrap_or(target);
            if let Some(first) = self.by_basename.get(name).and_then(|c| c.first()) {
                return first.to_string();
            }
        }
        with_md_extension(target)
    }

    fn resolve_relative(&self, source: &str, target: &str) -> String {
        let joined = if let Some(rooted) = target.strip_prefix('/') {
            rooted.to_string()
        } else {
            match source.rfind('/') {
                Some(pos) => format!("{}/{}", &source[..pos], target),
                None => target.to_string(),
            }
        };
        let normalized = normalize_path(&joined);
        if self.keys.contains(normalized.as_str()) {
            return normalized;
        }
        let with_ext = with_md_extension(&normalized);
        if self.keys.contains(with_ext.as_str()) {
            return with_ext;
        }
        if target.contains('/') {
            with_ext
        } else {
            self.resolve_wiki(target)
        }
    }
}

fn with_md_extension(target: &str) -> String {
    let name = target.rsplit('/').next().unwrap_or(target);
    if name.contains('.') {
        target.to_string()
    } else {
        format!("{}.md", target)
    }
}

/// Collapse `.` and `..` segments of a `/`-separated path
fn normalize_path(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}
