//! Resume text extraction.
//!
//! `DocumentDecoder` is the seam over the page-oriented decoder. `PdfDecoder`
//! backs it with `pdf-extract`; tests swap in fixed-page stubs.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::analysis::ResumeUpload;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Error reading PDF: {0}")]
    Decode(String),

    #[error("Error reading PDF: decoder aborted ({0})")]
    Aborted(String),
}

/// Decodes a document into the text of each page, in page order.
pub trait DocumentDecoder: Send + Sync {
    fn decode_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError>;
}

/// Production decoder backed by `pdf-extract`.
pub struct PdfDecoder;

impl DocumentDecoder for PdfDecoder {
    fn decode_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| ExtractError::Decode(e.to_string()))
    }
}

/// Extracts the full text of an uploaded resume.
///
/// An absent upload yields an empty string. Decoding runs on the blocking
/// pool; a decoder panic surfaces as `ExtractError::Aborted`.
pub async fn extract_resume_text(
    decoder: Arc<dyn DocumentDecoder>,
    upload: Option<&ResumeUpload>,
) -> Result<String, ExtractError> {
    let Some(upload) = upload else {
        return Ok(String::new());
    };

    let bytes = upload.bytes.clone();
    let pages = tokio::task::spawn_blocking(move || decoder.decode_pages(&bytes))
        .await
        .map_err(|e| ExtractError::Aborted(e.to_string()))??;

    debug!(
        "Decoded {} page(s) from '{}'",
        pages.len(),
        upload.file_name
    );

    let text = pages.concat();
    if text.trim().is_empty() {
        warn!(
            "No extractable text in '{}' ({} page(s))",
            upload.file_name,
            pages.len()
        );
    }

    Ok(text)
}
