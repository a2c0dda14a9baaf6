//! Report Generation — orchestrates one screening request.
//!
//! Flow: precondition check → extract resume text → build prompt →
//!       one model call → return the model's markdown unmodified.
//!
//! An extraction failure stops the pipeline before the model is called.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::extraction::{extract_resume_text, DocumentDecoder, ExtractError};
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::analysis::{AnalysisReport, ResumeUpload};
use crate::screening::prompts::build_ats_prompt;

/// Failure kinds of a screening request. `Display` is the user-visible text.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("⚠️ Please provide both a Job Description and a Resume.")]
    MissingInput,

    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error("⚠️ API Error: {0}")]
    Api(#[from] LlmError),
}

/// Turns a job description and a resume upload into a markdown report.
pub struct ReportGenerator {
    llm: Arc<dyn TextGenerator>,
    decoder: Arc<dyn DocumentDecoder>,
}

impl ReportGenerator {
    pub fn new(llm: Arc<dyn TextGenerator>, decoder: Arc<dyn DocumentDecoder>) -> Self {
        Self { llm, decoder }
    }

    pub async fn analyze(
        &self,
        job_description: Option<&str>,
        resume: Option<&ResumeUpload>,
    ) -> Result<AnalysisReport, AnalysisError> {
        let (job_description, resume) = match (job_description, resume) {
            (Some(jd), Some(resume)) if !jd.trim().is_empty() => (jd, resume),
            _ => return Err(AnalysisError::MissingInput),
        };

        let span = info_span!("analysis", request_id = %Uuid::new_v4(), file = %resume.file_name);
        async move {
            let resume_text = extract_resume_text(self.decoder.clone(), Some(resume)).await?;
            info!(
                "Extracted {} chars of resume text; job description is {} chars",
                resume_text.chars().count(),
                job_description.chars().count()
            );

            let prompt = build_ats_prompt(job_description, &resume_text);
            let markdown = self.llm.generate(&prompt).await?;
            info!(
                "Report generated by {} ({} chars)",
                self.llm.model(),
                markdown.chars().count()
            );

            Ok(AnalysisReport {
                markdown,
                model: self.llm.model().to_string(),
                generated_at: Utc::now(),
            })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records every prompt and answers with a fixed report.
    #[derive(Default)]
    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingModel {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("## 📊 ATS Evaluation Report\n### 🎯 Match Score: 72%".to_string())
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }

    struct FailingModel;

    #[async_trait]
    impl TextGenerator for FailingModel {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "The model is overloaded.".to_string(),
            })
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }

    /// Returns fixed pages and counts how often it was asked to decode.
    struct CountingDecoder {
        pages: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl CountingDecoder {
        fn new(pages: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                pages,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl DocumentDecoder for CountingDecoder {
        fn decode_pages(&self, _bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.pages.iter().map(|p| p.to_string()).collect())
        }
    }

    struct BrokenDecoder;

    impl DocumentDecoder for BrokenDecoder {
        fn decode_pages(&self, _bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
            Err(ExtractError::Decode("invalid file header".to_string()))
        }
    }

    fn resume() -> ResumeUpload {
        ResumeUpload {
            file_name: "resume.pdf".to_string(),
            bytes: Bytes::from_static(b"%PDF-1.4 stub"),
        }
    }

    #[tokio::test]
    async fn test_missing_inputs_short_circuit_without_calls() {
        let model = Arc::new(RecordingModel::default());
        let decoder = CountingDecoder::new(vec!["text"]);
        let generator = ReportGenerator::new(model.clone(), decoder.clone());

        let upload = resume();
        let cases: [(Option<&str>, Option<&ResumeUpload>); 5] = [
            (None, Some(&upload)),
            (Some(""), Some(&upload)),
            (Some("   \n\t"), Some(&upload)),
            (Some("Backend engineer"), None),
            (None, None),
        ];

        for (jd, file) in cases {
            let err = generator.analyze(jd, file).await.unwrap_err();
            assert!(matches!(err, AnalysisError::MissingInput));
            assert_eq!(
                err.to_string(),
                "⚠️ Please provide both a Job Description and a Resume."
            );
        }

        assert_eq!(decoder.calls.load(Ordering::SeqCst), 0);
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_end_to_end_prompt_contains_inputs_verbatim() {
        let model = Arc::new(RecordingModel::default());
        let decoder = CountingDecoder::new(vec!["Engineer with 5 years Python"]);
        let generator = ReportGenerator::new(model.clone(), decoder);

        let jd = "Hiring a Python backend engineer with Django experience.";
        let report = generator.analyze(Some(jd), Some(&resume())).await.unwrap();

        assert_eq!(
            report.markdown,
            "## 📊 ATS Evaluation Report\n### 🎯 Match Score: 72%"
        );
        assert_eq!(report.model, "stub-model");

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(jd));
        assert!(prompts[0].contains("Engineer with 5 years Python"));
    }

    #[tokio::test]
    async fn test_identical_inputs_send_identical_prompts() {
        let model = Arc::new(RecordingModel::default());
        let decoder = CountingDecoder::new(vec!["Page 1 ", "Page 2"]);
        let generator = ReportGenerator::new(model.clone(), decoder);

        let upload = resume();
        generator.analyze(Some("Rust developer"), Some(&upload)).await.unwrap();
        generator.analyze(Some("Rust developer"), Some(&upload)).await.unwrap();

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0], prompts[1]);
    }

    #[tokio::test]
    async fn test_api_fault_becomes_prefixed_error() {
        let decoder = CountingDecoder::new(vec!["Engineer with 5 years Python"]);
        let generator = ReportGenerator::new(Arc::new(FailingModel), decoder);

        let err = generator
            .analyze(Some("Data engineer"), Some(&resume()))
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Api(_)));
        assert!(err.to_string().starts_with("⚠️ API Error: "));
        assert!(err.to_string().contains("The model is overloaded."));
    }

    #[tokio::test]
    async fn test_extraction_failure_skips_model_call() {
        let model = Arc::new(RecordingModel::default());
        let generator = ReportGenerator::new(model.clone(), Arc::new(BrokenDecoder));

        let err = generator
            .analyze(Some("Data engineer"), Some(&resume()))
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Extraction(_)));
        assert_eq!(err.to_string(), "Error reading PDF: invalid file header");
        assert!(model.prompts.lock().unwrap().is_empty());
    }
}
