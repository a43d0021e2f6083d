//! Post Collector: end-to-end collection for one course.
//!
//! A single linear run: login, paginate the thread list, filter titles,
//! fetch and process each candidate, persist the result. Batch and
//! per-thread failures are logged and skipped; only login failure aborts.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::content::extract_content;
use crate::ed::{EdApiError, ForumApi, ThreadSummary};
use crate::model::{discussion_url, PostRecord, ANONYMOUS_AUTHOR};
use crate::tags::TagGenerator;

pub struct Collector<A> {
    api: A,
    tags: TagGenerator,
    course_id: u64,
    title_pattern: Regex,
    batch_size: usize,
    request_delay: Duration,
}

impl<A: ForumApi> Collector<A> {
    pub fn new(
        api: A,
        tags: TagGenerator,
        course_id: u64,
        title_pattern: Regex,
        batch_size: usize,
        request_delay: Duration,
    ) -> Self {
        Self {
            api,
            tags,
            course_id,
            title_pattern,
            batch_size,
            request_delay,
        }
    }

    /// Build a collector from the application configuration, using the stock
    /// tag taxonomy.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured title pattern does not compile.
    pub fn from_config(api: A, config: &Config) -> Result<Self, crate::config::ConfigError> {
        Ok(Self::new(
            api,
            TagGenerator::default(),
            config.course_id,
            config.compiled_thread_pattern()?,
            config.batch_size,
            config.request_delay,
        ))
    }

    /// Run one full collection pass.
    ///
    /// # Errors
    ///
    /// Returns an error only when login fails; every later failure is
    /// logged and skipped.
    pub async fn run(&self) -> Result<Vec<PostRecord>, EdApiError> {
        self.api.login().await?;
        info!("Logged in successfully");
        info!(course_id = self.course_id, "Scanning course");

        let summaries = self.list_all_threads().await;
        info!(total = summaries.len(), "Thread list complete");

        let mut posts = Vec::new();
        for summary in &summaries {
            if !self.title_pattern.is_match(&summary.title) {
                continue;
            }
            match self.process_thread(summary).await {
                Ok(post) => {
                    posts.push(post);
                    print_progress(&format!("Processed {} matching posts...", posts.len()));
                }
                Err(e) => {
                    warn!(thread_id = summary.id, "Error processing thread: {e:#}");
                }
            }
            tokio::time::sleep(self.request_delay).await;
        }
        finish_progress();

        info!(matched = posts.len(), "Collection complete");
        Ok(posts)
    }

    /// Fetch the full thread list in fixed-size batches. A batch error ends
    /// the listing early but keeps what was already gathered.
    async fn list_all_threads(&self) -> Vec<ThreadSummary> {
        let mut all = Vec::new();
        let mut offset = 0;

        loop {
            match self
                .api
                .list_threads(self.course_id, self.batch_size, offset)
                .await
            {
                Ok(batch) => {
                    if batch.is_empty() {
                        break;
                    }
                    offset += batch.len();
                    all.extend(batch);
                    print_progress(&format!("Fetched {} summaries...", all.len()));
                }
                Err(e) => {
                    warn!(offset, "Error fetching thread batch: {e:#}");
                    break;
                }
            }
            tokio::time::sleep(self.request_delay).await;
        }
        finish_progress();

        all
    }

    async fn process_thread(&self, summary: &ThreadSummary) -> Result<PostRecord, EdApiError> {
        let detail = self.api.get_thread(summary.id).await?;
        debug!(thread_id = summary.id, title = %summary.title, "Processing thread");

        let extracted = extract_content(&detail.content);
        let tags = self.tags.generate(&summary.title, &extracted.text);
        let author = summary
            .user
            .as_ref()
            .and_then(|u| u.name.clone())
            .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string());

        Ok(PostRecord {
            id: summary.id,
            title: summary.title.clone(),
            date: summary.created_at.clone(),
            author,
            content: extracted.text,
            resources: extracted.resources,
            tags,
            original_url: discussion_url(self.course_id, summary.id),
        })
    }
}

/// Serialize the collected posts as a pretty-printed JSON array, overwriting
/// any prior file contents.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
pub async fn write_posts(path: &Path, posts: &[PostRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(posts).context("Failed to serialize posts")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Overwrite the current console line with a progress counter.
fn print_progress(message: &str) {
    let mut out = std::io::stdout();
    let _ = write!(out, "\r{message}");
    let _ = out.flush();
}

fn finish_progress() {
    let mut out = std::io::stdout();
    let _ = writeln!(out);
    let _ = out.flush();
}
