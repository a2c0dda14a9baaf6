//! Axum route handlers for the screening page.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::analysis::ResumeUpload;
use crate::screening::render::markdown_to_html;
use crate::state::AppState;

pub const JOB_DESCRIPTION_FIELD: &str = "job_description";
pub const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub markdown: String,
    pub html: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

/// The two form inputs, either of which may be missing.
#[derive(Debug, Default)]
struct AnalyzeForm {
    job_description: Option<String>,
    resume: Option<ResumeUpload>,
}

/// POST /api/v1/analyze
///
/// Multipart form with `job_description` (text) and `resume` (PDF file).
/// Returns the model's markdown report and its HTML rendering.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let form = read_form(&mut multipart).await?;

    let report = state
        .generator
        .analyze(form.job_description.as_deref(), form.resume.as_ref())
        .await?;

    Ok(Json(AnalyzeResponse {
        html: markdown_to_html(&report.markdown),
        markdown: report.markdown,
        model: report.model,
        generated_at: report.generated_at,
    }))
}

async fn read_form(multipart: &mut Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(JOB_DESCRIPTION_FIELD) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                form.job_description = Some(text);
            }
            Some(RESUME_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                // Browsers send an empty, unnamed part when no file was picked.
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.resume = Some(ResumeUpload { file_name, bytes });
            }
            other => tracing::debug!("Ignoring unexpected form field {other:?}"),
        }
    }

    Ok(form)
}
