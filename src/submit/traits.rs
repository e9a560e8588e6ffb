//! Trait abstraction for submission targets to enable mocking in tests

use super::sink::Submission;
use anyhow::Result;
use async_trait::async_trait;

/// Destination for accepted survey submissions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Deliver one submission
    async fn submit(&self, submission: Submission) -> Result<()>;
}
