//! Submission envelope, the logging sink and the forwarding task

use super::traits::SubmissionSink;
use crate::state::FormSnapshot;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

/// An accepted submission as handed to a sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub answers: FormSnapshot,
}

impl Submission {
    pub fn new(answers: FormSnapshot) -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            answers,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Writes each submission to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl SubmissionSink for LogSink {
    async fn submit(&self, submission: Submission) -> Result<()> {
        let answers = serde_json::to_string(&submission.answers)?;
        tracing::info!(id = %submission.id, %answers, "form data");
        Ok(())
    }
}

/// Drain snapshots from the form until the sender is dropped, handing each
/// to `sink`. Returns the last submission seen.
pub async fn forward_submissions(
    mut rx: UnboundedReceiver<FormSnapshot>,
    sink: Arc<dyn SubmissionSink>,
) -> Option<Submission> {
    let mut last = None;
    while let Some(answers) = rx.recv().await {
        let submission = Submission::new(answers);
        if let Err(err) = sink.submit(submission.clone()).await {
            tracing::warn!(id = %submission.id, "failed to deliver submission: {err:#}");
        }
        last = Some(submission);
    }
    last
}
