use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::types::{ThreadListResponse, ThreadResponse};
use super::{EdApiError, ForumApi, ThreadDetail, ThreadSummary};

/// HTTP client for the Ed API.
///
/// Authentication is an opaque token sent as the `x-token` header on every
/// request; there is no session refresh.
#[derive(Debug, Clone)]
pub struct EdClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl EdClient {
    /// Build a client for the given API base URL and token.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str, token: &str) -> Result<Self, EdApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn get(&self, endpoint: &str) -> reqwest::RequestBuilder {
        self.http
            .get(format!("{}{endpoint}", self.base_url))
            .header("x-token", &self.token)
            .header("User-Agent", "ed-showcase/0.1")
    }
}

#[async_trait]
impl ForumApi for EdClient {
    async fn login(&self) -> Result<(), EdApiError> {
        let response = self.get("/user").send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(EdApiError::Auth(format!(
                "token rejected with status {}",
                response.status()
            )))
        }
    }

    async fn list_threads(
        &self,
        course_id: u64,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ThreadSummary>, EdApiError> {
        let endpoint = format!("/courses/{course_id}/threads");
        let response = self
            .get(&endpoint)
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(EdApiError::Status {
                endpoint,
                status: response.status(),
            });
        }
        let body: ThreadListResponse = response.json().await?;
        Ok(body.threads)
    }

    async fn get_thread(&self, thread_id: u64) -> Result<ThreadDetail, EdApiError> {
        let endpoint = format!("/threads/{thread_id}");
        let response = self.get(&endpoint).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(EdApiError::NotFound(thread_id));
        }
        if !response.status().is_success() {
            return Err(EdApiError::Status {
                endpoint,
                status: response.status(),
            });
        }
        let body: ThreadResponse = response.json().await?;
        Ok(body.thread)
    }
}
