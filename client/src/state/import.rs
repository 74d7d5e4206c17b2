//! Data import progress state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The import backend accepts an uploaded file, answers with either an error
//! or the id of a background job, and exposes the job through
//! `importHistoryDetail`. The job id outlives page reloads in browser-local
//! storage under [`IMPORT_DATA_KEY`] so the loading bar can resume.

#[cfg(test)]
#[path = "import_test.rs"]
mod import_test;

use crate::net::types::{ImportHistory, UploadResponse};

/// Browser-local key holding the id of the running import job.
pub const IMPORT_DATA_KEY: &str = "erxes_import_data";

/// Milliseconds between two `importHistoryDetail` polls.
pub const IMPORT_POLL_INTERVAL_MS: u32 = 3_000;

/// Import types accepted by `/upload-file?type=`.
pub const IMPORT_TYPES: &[&str] = &["customer", "company", "product", "deal", "user"];

/// What the caller must do after an upload finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Show this message as an error alert.
    Failed(String),
    /// Persist this job id and show the loading bar.
    Started(String),
    /// The backend accepted the file without a job to track.
    Accepted,
}

/// Upload flag and the tracked import job.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportState {
    pub uploading: bool,
    pub job_id: Option<String>,
    pub progress: Option<ImportHistory>,
}

impl ImportState {
    /// Resume tracking a job id read back from browser storage.
    #[must_use]
    pub fn resume(job_id: Option<String>) -> Self {
        Self { job_id: job_id.filter(|id| !id.trim().is_empty()), ..Self::default() }
    }

    pub fn begin_upload(&mut self) {
        self.uploading = true;
    }

    /// Clear the upload flag and classify the backend answer.
    pub fn finish_upload(&mut self, response: &UploadResponse) -> UploadOutcome {
        self.uploading = false;
        let outcome = classify_upload(response);
        if let UploadOutcome::Started(id) = &outcome {
            self.job_id = Some(id.clone());
            self.progress = None;
        }
        outcome
    }

    /// Transport failure while uploading.
    pub fn fail_upload(&mut self, message: &str) -> UploadOutcome {
        self.uploading = false;
        UploadOutcome::Failed(message.to_owned())
    }

    /// Record a poll result. Returns `true` once the job is finished, after
    /// which the caller removes [`IMPORT_DATA_KEY`] from storage.
    pub fn record_progress(&mut self, history: ImportHistory) -> bool {
        if self.job_id.as_deref() != Some(history.id.as_str()) {
            log::debug!("ignoring progress for stale import job {}", history.id);
            return false;
        }
        let done = is_finished(&history);
        self.progress = Some(history);
        if done {
            self.job_id = None;
        }
        done
    }

    /// Whether the loading bar is on screen.
    #[must_use]
    pub fn show_loading_bar(&self) -> bool {
        self.job_id.is_some()
    }

    /// Progress percentage clamped to `0..=100`.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.progress.as_ref().map_or(0.0, |h| h.percentage.clamp(0.0, 100.0))
    }
}

/// `status == "error"` wins over any id the backend also sent.
#[must_use]
pub fn classify_upload(response: &UploadResponse) -> UploadOutcome {
    if response.status.as_deref() == Some("error") {
        let message = response.message.clone().filter(|m| !m.is_empty()).unwrap_or_else(|| "Import failed".to_owned());
        return UploadOutcome::Failed(message);
    }
    match response.id.as_deref() {
        Some(id) if !id.is_empty() => UploadOutcome::Started(id.to_owned()),
        _ => UploadOutcome::Accepted,
    }
}

/// A job is finished at 100% or when the backend reports `Done`.
#[must_use]
pub fn is_finished(history: &ImportHistory) -> bool {
    history.percentage >= 100.0 || history.status.as_deref() == Some("Done")
}

/// Whether `kind` is an import type the backend understands.
#[must_use]
pub fn is_known_type(kind: &str) -> bool {
    IMPORT_TYPES.contains(&kind)
}
