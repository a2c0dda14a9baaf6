use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// An uploaded resume file, held in memory for the duration of one request.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// The model's markdown report, returned unmodified.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub markdown: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}
