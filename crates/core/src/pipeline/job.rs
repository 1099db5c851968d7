use std::path::PathBuf;

use thiserror::Error;

use crate::shared::frame::Frame;

/// Configuration errors that prevent a job from ever reaching `Running`.
#[derive(Error, Debug)]
pub enum StartError {
    #[error("whitelist has no usable entries; add reference faces first")]
    EmptyWhitelist,
    #[error("cannot open source {path}: {reason}")]
    Source { path: PathBuf, reason: String },
    #[error("cannot create destination {path}: {reason}")]
    Destination { path: PathBuf, reason: String },
    #[error("provider '{name}' is unavailable: {reason}")]
    Provider { name: String, reason: String },
}

/// Terminal state of a processing job. Every run ends in exactly one.
#[derive(Clone, Debug, PartialEq)]
pub enum JobOutcome {
    /// Source exhausted with no unrecoverable error.
    Completed,
    /// Cancellation observed at a frame boundary.
    Cancelled,
    /// The destination stream failed mid-job; partial output is left on
    /// disk and cleanup is the caller's responsibility.
    Failed(String),
}

/// Summary reported when a job reaches a terminal state.
#[derive(Clone, Debug)]
pub struct JobReport {
    pub outcome: JobOutcome,
    pub frames_processed: usize,
    pub faces_detected: usize,
    pub faces_blurred: usize,
}

impl JobReport {
    pub fn summary(&self) -> String {
        let outcome = match &self.outcome {
            JobOutcome::Completed => "completed".to_string(),
            JobOutcome::Cancelled => "cancelled".to_string(),
            JobOutcome::Failed(reason) => format!("failed ({reason})"),
        };
        format!(
            "job {outcome}: {} frames processed, {} faces detected, {} blurred",
            self.frames_processed, self.faces_detected, self.faces_blurred
        )
    }
}

/// Observer callbacks crossing the boundary to the embedding layer
/// (GUI, CLI, tests). The core knows nothing about what sits behind them.
#[derive(Default)]
pub struct JobCallbacks {
    pub on_progress: Option<Box<dyn Fn(usize, usize) + Send>>,
    pub on_log: Option<Box<dyn Fn(&str) + Send>>,
    pub on_frame: Option<Box<dyn Fn(&Frame) + Send>>,
}

impl JobCallbacks {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_progress(mut self, f: impl Fn(usize, usize) + Send + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    pub fn with_log(mut self, f: impl Fn(&str) + Send + 'static) -> Self {
        self.on_log = Some(Box::new(f));
        self
    }

    pub fn with_frame(mut self, f: impl Fn(&Frame) + Send + 'static) -> Self {
        self.on_frame = Some(Box::new(f));
        self
    }

    pub(crate) fn progress(&self, processed: usize, total: usize) {
        if let Some(ref cb) = self.on_progress {
            cb(processed, total);
        }
    }

    pub(crate) fn log(&self, message: &str) {
        if let Some(ref cb) = self.on_log {
            cb(message);
        }
    }

    pub(crate) fn frame(&self, frame: &Frame) {
        if let Some(ref cb) = self.on_frame {
            cb(frame);
        }
    }
}
