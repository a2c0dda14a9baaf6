// Resume screening: prompt construction, report generation, HTTP handlers.
// All model calls go through llm_client::TextGenerator.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod render;

pub use generator::{AnalysisError, ReportGenerator};
