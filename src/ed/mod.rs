//! Ed API collaborator.
//!
//! The collector consumes the forum through the [`ForumApi`] capability set
//! so collection logic can be exercised against a scripted fake in tests.

pub mod client;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use client::EdClient;
pub use types::{ThreadDetail, ThreadSummary};

#[derive(Debug, Error)]
pub enum EdApiError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("thread {0} not found")]
    NotFound(u64),
    #[error("unexpected status {status} from {endpoint}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },
    #[error("request failed")]
    Http(#[from] reqwest::Error),
}

/// Capability set offered by the discussion forum.
#[async_trait]
pub trait ForumApi: Send + Sync {
    /// Verify that the configured credentials are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`EdApiError::Auth`] when the token is rejected.
    async fn login(&self) -> Result<(), EdApiError>;

    /// Fetch one batch of thread summaries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn list_threads(
        &self,
        course_id: u64,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ThreadSummary>, EdApiError>;

    /// Fetch the full detail of one thread.
    ///
    /// # Errors
    ///
    /// Returns [`EdApiError::NotFound`] for unknown thread ids, or another
    /// error if the request fails.
    async fn get_thread(&self, thread_id: u64) -> Result<ThreadDetail, EdApiError>;
}
