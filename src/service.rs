//! Diagnosis Service: gateway queries and result persistence for the HTTP layer.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::GatewayConfig;
use crate::db::{DatabaseError, ResultStore};
use crate::gateway::{DiagnosisGateway, GatewayError};
use crate::models::{DiagnosisCandidate, DiagnosisRequest, DiagnosisResult, Symptom};

pub struct DiagnosisService {
    gateway: DiagnosisGateway,
    store: Arc<ResultStore>,
}

impl DiagnosisService {
    pub fn new(gateway: DiagnosisGateway, store: Arc<ResultStore>) -> Self {
        Self { gateway, store }
    }

    /// Build the gateway from `config` and attach an existing store.
    pub fn from_config(
        config: &GatewayConfig,
        store: Arc<ResultStore>,
    ) -> Result<Self, GatewayError> {
        Ok(Self::new(DiagnosisGateway::new(config)?, store))
    }

    pub fn is_mock(&self) -> bool {
        self.gateway.is_mock()
    }

    pub async fn get_symptoms(&self) -> Result<Vec<Symptom>, GatewayError> {
        self.gateway.get_symptoms().await
    }

    pub async fn get_diagnosis(
        &self,
        request: &DiagnosisRequest,
    ) -> Result<Vec<DiagnosisCandidate>, GatewayError> {
        self.gateway.get_diagnosis(request).await
    }

    pub fn save_diagnosis(&self, result: DiagnosisResult) -> Result<DiagnosisResult, DatabaseError> {
        tracing::info!("Saving diagnosis result for user...");
        self.store.save(result)
    }

    pub fn find_diagnosis(&self, id: &Uuid) -> Result<Option<DiagnosisResult>, DatabaseError> {
        self.store.find(id)
    }

    pub fn stored_results(&self) -> Result<i64, DatabaseError> {
        self.store.count()
    }
}
