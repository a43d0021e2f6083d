//! Collected post records as persisted to `posts.json`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::content::Resource;

/// One fully assembled showcase post. Immutable after assembly; field order
/// here is the serialization order in the output file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: u64,
    pub title: String,
    pub date: Option<String>,
    pub author: String,
    pub content: String,
    pub resources: Vec<Resource>,
    /// Sorted for deterministic output; the set itself is unordered.
    pub tags: BTreeSet<String>,
    pub original_url: String,
}

/// Author name used when the thread carries no usable user reference.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Canonical URL of a discussion thread. Downstream links depend on this
/// exact format.
#[must_use]
pub fn discussion_url(course_id: u64, thread_id: u64) -> String {
    format!("https://edstem.org/us/courses/{course_id}/discussion/{thread_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discussion_url_format() {
        assert_eq!(
            discussion_url(84647, 999),
            "https://edstem.org/us/courses/84647/discussion/999"
        );
    }
}
