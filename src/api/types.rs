//! Shared state for the gateway API router.

use std::sync::Arc;

use crate::service::DiagnosisService;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub service: Arc<DiagnosisService>,
}

impl ApiContext {
    pub fn new(service: Arc<DiagnosisService>) -> Self {
        Self { service }
    }
}
