use std::sync::Arc;

use crate::config::Config;
use crate::screening::ReportGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<ReportGenerator>,
    pub config: Config,
}
