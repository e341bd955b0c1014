//! Diagnosis Gateway.
//!
//! Answers symptom and diagnosis queries either from compiled-in mock data
//! or by forwarding them to the ApiMedic service. Live calls are strictly
//! sequential: one token exchange, then one data request. Tokens are not
//! cached between calls.

pub mod client;
pub mod credentials;
pub mod mock;

#[cfg(test)]
pub(crate) mod test_upstream;

pub use client::{ApiMedicClient, AuthToken};

use crate::config::GatewayConfig;
use crate::models::{DiagnosisCandidate, DiagnosisRequest, Symptom};

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Upstream authentication failed (status {status})")]
    Authentication { status: u16, body: String },

    #[error("Cannot reach upstream at {url}: {reason}")]
    Transport {
        url: String,
        reason: String,
        timed_out: bool,
    },

    #[error("Upstream {endpoint} endpoint returned error (status {status}): {body}")]
    Upstream {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to parse {what}: {reason}")]
    Parse { what: &'static str, reason: String },

    #[error("Credential derivation failed: {0}")]
    Credentials(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

enum FetchMode {
    Mock,
    Live(ApiMedicClient),
}

pub struct DiagnosisGateway {
    mode: FetchMode,
}

impl DiagnosisGateway {
    /// Pick mock or live mode from the configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let mode = if config.mock_enabled {
            FetchMode::Mock
        } else {
            FetchMode::Live(ApiMedicClient::new(config)?)
        };
        Ok(Self { mode })
    }

    pub fn mock() -> Self {
        Self {
            mode: FetchMode::Mock,
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self.mode, FetchMode::Mock)
    }

    pub async fn get_symptoms(&self) -> Result<Vec<Symptom>, GatewayError> {
        tracing::info!("Fetching all the symptoms...");

        match &self.mode {
            FetchMode::Mock => {
                tracing::info!("Mock enabled - returning mock symptoms");
                mock::mock_symptoms()
            }
            FetchMode::Live(client) => {
                let token = client.fetch_token().await?;
                tracing::info!("Mock disabled - fetching symptoms from API");
                client.fetch_symptoms(&token.token).await
            }
        }
    }

    pub async fn get_diagnosis(
        &self,
        request: &DiagnosisRequest,
    ) -> Result<Vec<DiagnosisCandidate>, GatewayError> {
        let body = serde_json::to_string(request).map_err(|e| GatewayError::Parse {
            what: "diagnosis request",
            reason: e.to_string(),
        })?;
        tracing::info!(request = %body, "Diagnosis request body");

        match &self.mode {
            FetchMode::Mock => {
                tracing::info!("Mock enabled - returning mock diagnosis");
                mock::mock_diagnosis()
            }
            FetchMode::Live(client) => {
                tracing::info!("Mock disabled - fetching diagnosis from API");
                let token = client.fetch_token().await?;
                client.fetch_diagnosis(&token.token, body).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::test_upstream::FakeUpstream;
    use super::*;
    use crate::config::DiagnosisAuthScheme;

    fn sample_request() -> DiagnosisRequest {
        DiagnosisRequest {
            gender: "female".into(),
            year_of_birth: 1988,
            patient_name: "Jane Doe".into(),
            symptoms: vec![Symptom::new("10", "Headache"), Symptom::new("15", "Fever")],
        }
    }

    #[tokio::test]
    async fn mock_symptoms_are_idempotent() {
        let gateway = DiagnosisGateway::mock();
        let first = gateway.get_symptoms().await.unwrap();
        let second = gateway.get_symptoms().await.unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn mock_diagnosis_ignores_request_content() {
        let gateway = DiagnosisGateway::mock();
        let candidates = gateway.get_diagnosis(&sample_request()).await.unwrap();
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].issue.name, "Urinary Tract Infection (UTI)");
    }

    #[test]
    fn config_selects_mode() {
        let config = GatewayConfig::mock();
        assert!(DiagnosisGateway::new(&config).unwrap().is_mock());

        let mut live = GatewayConfig::mock();
        live.mock_enabled = false;
        assert!(!DiagnosisGateway::new(&live).unwrap().is_mock());
    }

    #[tokio::test]
    async fn mock_mode_never_touches_upstream() {
        let upstream = FakeUpstream::start_ok().await;
        let mut config = upstream.config();
        config.mock_enabled = true;
        let gateway = DiagnosisGateway::new(&config).unwrap();

        gateway.get_symptoms().await.unwrap();
        gateway.get_diagnosis(&sample_request()).await.unwrap();

        assert_eq!(upstream.state.token_hits.load(Ordering::SeqCst), 0);
        assert_eq!(upstream.state.data_hits(), 0);
    }

    #[tokio::test]
    async fn live_symptoms_send_derived_credentials_and_language() {
        let upstream = FakeUpstream::start_ok().await;
        let config = upstream.config();
        let gateway = DiagnosisGateway::new(&config).unwrap();

        let symptoms = gateway.get_symptoms().await.unwrap();
        assert_eq!(
            symptoms,
            vec![Symptom::new("10", "Headache"), Symptom::new("15", "Fever")]
        );

        let expected_auth =
            credentials::derive_auth_header(&config.username, &config.password, &config.auth_url)
                .unwrap();
        let seen = upstream.state.seen();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].path, "/login");
        assert_eq!(seen[0].authorization.as_deref(), Some(expected_auth.as_str()));
        assert_eq!(seen[1].path, "/health/symptoms");
        assert_eq!(seen[1].query.as_deref(), Some("language=en-gb"));
        assert_eq!(
            seen[1].authorization.as_deref(),
            Some("Bearer upstream-token")
        );
    }

    #[tokio::test]
    async fn live_diagnosis_posts_serialized_request() {
        let upstream = FakeUpstream::start_ok().await;
        let gateway = DiagnosisGateway::new(&upstream.config()).unwrap();

        let candidates = gateway.get_diagnosis(&sample_request()).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].issue.name, "Influenza");
        assert_eq!(candidates[0].specialisations[0].name, "General practice");

        let seen = upstream.state.seen();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].path, "/api/diagnosis");
        assert_eq!(seen[1].authorization.as_deref(), Some("Bear upstream-token"));
        let body: DiagnosisRequest = serde_json::from_str(&seen[1].body).unwrap();
        assert_eq!(body, sample_request());
    }

    #[tokio::test]
    async fn bearer_scheme_can_be_selected_for_diagnosis() {
        let upstream = FakeUpstream::start_ok().await;
        let mut config = upstream.config();
        config.diagnosis_auth_scheme = DiagnosisAuthScheme::Bearer;
        let gateway = DiagnosisGateway::new(&config).unwrap();

        gateway.get_diagnosis(&sample_request()).await.unwrap();
        let seen = upstream.state.seen();
        assert_eq!(seen[1].authorization.as_deref(), Some("Bearer upstream-token"));
    }

    #[tokio::test]
    async fn token_rejection_is_authentication_failure_without_data_fetch() {
        let upstream = FakeUpstream::start(401, 200).await;
        let gateway = DiagnosisGateway::new(&upstream.config()).unwrap();

        let err = gateway.get_symptoms().await.unwrap_err();
        assert!(matches!(err, GatewayError::Authentication { status: 401, .. }));

        let err = gateway.get_diagnosis(&sample_request()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Authentication { status: 401, .. }));

        assert_eq!(upstream.state.token_hits.load(Ordering::SeqCst), 2);
        assert_eq!(upstream.state.data_hits(), 0);
    }

    #[tokio::test]
    async fn token_server_error_is_upstream_error() {
        let upstream = FakeUpstream::start(503, 200).await;
        let gateway = DiagnosisGateway::new(&upstream.config()).unwrap();

        let err = gateway.get_symptoms().await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Upstream { endpoint: "token", status: 503, .. }
        ));
        assert_eq!(upstream.state.data_hits(), 0);
    }

    #[tokio::test]
    async fn data_server_error_yields_no_partial_result() {
        let upstream = FakeUpstream::start(200, 500).await;
        let gateway = DiagnosisGateway::new(&upstream.config()).unwrap();

        let err = gateway.get_symptoms().await.unwrap_err();
        match err {
            GatewayError::Upstream { endpoint, status, body } => {
                assert_eq!(endpoint, "symptoms");
                assert_eq!(status, 500);
                assert!(body.contains("boom"));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }

        let err = gateway.get_diagnosis(&sample_request()).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Upstream { endpoint: "diagnosis", status: 500, .. }
        ));
    }

    #[tokio::test]
    async fn every_live_call_requests_a_new_token() {
        let upstream = FakeUpstream::start_ok().await;
        let gateway = DiagnosisGateway::new(&upstream.config()).unwrap();

        gateway.get_symptoms().await.unwrap();
        gateway.get_symptoms().await.unwrap();
        gateway.get_diagnosis(&sample_request()).await.unwrap();

        assert_eq!(upstream.state.token_hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn malformed_upstream_body_is_parse_failure() {
        let upstream = FakeUpstream::start_ok().await;
        upstream.state.set_symptoms_body("{\"not\": \"a list\"}");
        let gateway = DiagnosisGateway::new(&upstream.config()).unwrap();

        let err = gateway.get_symptoms().await.unwrap_err();
        assert!(matches!(err, GatewayError::Parse { what: "symptoms", .. }));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_transport_failure() {
        let mut config = GatewayConfig::mock();
        config.mock_enabled = false;
        config.username = "demo".into();
        config.password = "secret".into();
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        config.auth_url = format!("http://{addr}/login");
        config.base_url = format!("http://{addr}/health");

        let gateway = DiagnosisGateway::new(&config).unwrap();
        let err = gateway.get_symptoms().await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport { timed_out: false, .. }));
    }
}
