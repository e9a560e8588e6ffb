//! Submission seam: where accepted answers go after the form validates

mod sink;
mod traits;

pub use sink::{forward_submissions, LogSink};

#[cfg(test)]
pub use traits::MockSubmissionSink;
