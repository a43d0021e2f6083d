//! Content Parser: converts Ed's XML-ish post markup into plain text plus a
//! deduplicated, ordered list of resource references.
//!
//! Ed content is a tree of custom elements (`<paragraph>`, `<link>`,
//! `<file>`, `<image>`, ...). A structured parse walks that tree in document
//! order; when the markup is malformed the parser degrades to stripping
//! tag-like spans, never surfacing an error. Either way the cleaned text is
//! then scanned for raw URLs that no tag accounted for.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Domain fragment identifying Ed's file hosting; raw URLs containing it are
/// recorded as file attachments rather than plain links.
pub const FILE_HOST_FRAGMENT: &str = "static.us.edusercontent.com";

static RAW_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s"'<>]+"#).expect("Invalid raw URL regex"));

static TAG_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("Invalid tag strip regex"));

/// Kind of resource referenced by a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Link,
    File,
    Image,
}

/// A link, file, or image referenced by a post. At most one resource exists
/// per distinct trimmed URL per post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub url: String,
    pub name: String,
}

/// Result of the markup parse alone. Resources are only ever populated on
/// the structured path; the fallback path recovers text but no tag-derived
/// resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedContent {
    Structured {
        text: String,
        resources: Vec<Resource>,
    },
    Fallback {
        text: String,
    },
}

/// Final parser output: cleaned text plus resources from both the markup
/// walk and the raw-URL scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub text: String,
    pub resources: Vec<Resource>,
}

/// Ordered resource list deduplicated by trimmed URL.
#[derive(Debug, Default)]
struct ResourceSet {
    resources: Vec<Resource>,
    seen: HashSet<String>,
}

impl ResourceSet {
    fn from_resources(resources: Vec<Resource>) -> Self {
        let seen = resources.iter().map(|r| r.url.clone()).collect();
        Self { resources, seen }
    }

    /// Record a resource unless its URL was already seen. A display name
    /// that merely repeats the URL is replaced with "Link".
    fn add(&mut self, kind: ResourceKind, url: &str, name: &str) {
        let url = url.trim();
        if url.is_empty() || self.seen.contains(url) {
            return;
        }
        self.seen.insert(url.to_string());
        let name = if name == url { "Link" } else { name };
        self.resources.push(Resource {
            kind,
            url: url.to_string(),
            name: name.to_string(),
        });
    }

    fn into_vec(self) -> Vec<Resource> {
        self.resources
    }
}

/// Parse raw markup into cleaned text and tag-derived resources.
///
/// The input is wrapped in a synthetic root so multiple top-level siblings
/// parse cleanly. Malformed markup selects the fallback path instead of
/// returning an error.
#[must_use]
pub fn parse_markup(raw: &str) -> ParsedContent {
    if raw.is_empty() {
        return ParsedContent::Structured {
            text: String::new(),
            resources: Vec::new(),
        };
    }

    let sanitized = raw.replace("&nbsp;", " ");
    let wrapped = format!("<root>{sanitized}</root>");

    match roxmltree::Document::parse(&wrapped) {
        Ok(doc) => {
            let mut parts: Vec<&str> = Vec::new();
            let mut resources = ResourceSet::default();

            // Document-order walk; text nodes cover both element text and
            // the tail text between siblings.
            for node in doc.root_element().descendants() {
                if node.is_text() {
                    if let Some(text) = node.text() {
                        parts.push(text);
                    }
                    continue;
                }
                if !node.is_element() {
                    continue;
                }
                match node.tag_name().name() {
                    "link" => {
                        if let Some(href) = node.attribute("href") {
                            let name: String = node
                                .descendants()
                                .filter(|n| n.is_text())
                                .filter_map(|n| n.text())
                                .collect();
                            let name = name.trim();
                            let name = if name.is_empty() { "External Link" } else { name };
                            resources.add(ResourceKind::Link, href, name);
                        }
                    }
                    "file" | "secure-file" => {
                        if let Some(url) = node.attribute("url") {
                            let name = node.attribute("filename").unwrap_or("File");
                            resources.add(ResourceKind::File, url, name);
                        }
                    }
                    "image" => {
                        if let Some(src) = node.attribute("src") {
                            let name = node.attribute("alt").unwrap_or("Image");
                            resources.add(ResourceKind::Image, src, name);
                        }
                    }
                    _ => {}
                }
            }

            ParsedContent::Structured {
                text: parts.concat().trim().to_string(),
                resources: resources.into_vec(),
            }
        }
        Err(_) => ParsedContent::Fallback {
            text: TAG_STRIP_RE.replace_all(raw, "").trim().to_string(),
        },
    }
}

/// Parse markup and then scan the cleaned text for raw URLs the tags did not
/// account for. Deduplication spans both phases; the first occurrence wins.
#[must_use]
pub fn extract_content(raw: &str) -> Extracted {
    let (text, resources) = match parse_markup(raw) {
        ParsedContent::Structured { text, resources } => (text, resources),
        ParsedContent::Fallback { text } => (text, Vec::new()),
    };

    let mut set = ResourceSet::from_resources(resources);
    for found in RAW_URL_RE.find_iter(&text) {
        let url = found.as_str();
        if url.contains(FILE_HOST_FRAGMENT) {
            set.add(ResourceKind::File, url, "Raw File Attachment");
        } else {
            set.add(ResourceKind::Link, url, "Raw Text Link");
        }
    }

    Extracted {
        text,
        resources: set.into_vec(),
    }
}
