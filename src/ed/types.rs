//! Serde models for the Ed API wire format.

use serde::Deserialize;

/// Author reference attached to a thread.
#[derive(Debug, Clone, Deserialize)]
pub struct EdUser {
    #[serde(default)]
    pub name: Option<String>,
}

/// One entry of the paginated thread listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadSummary {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user: Option<EdUser>,
}

/// Full thread detail, carrying the raw content markup.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadDetail {
    pub id: u64,
    #[serde(default)]
    pub content: String,
}

/// Envelope for `GET /courses/{id}/threads`.
#[derive(Debug, Deserialize)]
pub(crate) struct ThreadListResponse {
    #[serde(default)]
    pub threads: Vec<ThreadSummary>,
}

/// Envelope for `GET /threads/{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ThreadResponse {
    pub thread: ThreadDetail,
}
