use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::credentials;
use super::GatewayError;
use crate::config::{DiagnosisAuthScheme, GatewayConfig};
use crate::models::{DiagnosisCandidate, Symptom};

/// Token issued by the upstream login endpoint.
///
/// `valid_through` (seconds) is read but never enforced: a fresh token is
/// requested for every live call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthToken {
    #[serde(rename = "Token")]
    pub token: String,
    #[serde(rename = "ValidThrough", default)]
    pub valid_through: i64,
}

/// HTTP client for the ApiMedic login and health services.
pub struct ApiMedicClient {
    http: reqwest::Client,
    base_url: String,
    auth_url: String,
    api_root: String,
    username: String,
    password: String,
    language: String,
    diagnosis_scheme: DiagnosisAuthScheme,
}

impl ApiMedicClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_url: config.auth_url.clone(),
            api_root: config.api_root().to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            language: config.language.clone(),
            diagnosis_scheme: config.diagnosis_auth_scheme,
        })
    }

    /// Exchange the derived credential for a bearer token.
    pub async fn fetch_token(&self) -> Result<AuthToken, GatewayError> {
        let auth_header =
            credentials::derive_auth_header(&self.username, &self.password, &self.auth_url)?;

        tracing::debug!(url = %self.auth_url, "Requesting ApiMedic token");
        let response = self
            .http
            .post(&self.auth_url)
            .header(AUTHORIZATION, auth_header)
            .send()
            .await
            .map_err(|e| transport_error(&self.auth_url, e))?;

        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "ApiMedic rejected gateway credentials");
            return Err(GatewayError::Authentication {
                status: status.as_u16(),
                body,
            });
        }

        // Token bodies are credentials: status only, never the body.
        let (status, body) = read_body(response, &self.auth_url).await?;
        tracing::info!(endpoint = "token", %status, "ApiMedic response");
        check_and_parse(status, body, "token")
    }

    /// `GET {base_url}/symptoms?language={language}`
    pub async fn fetch_symptoms(&self, token: &str) -> Result<Vec<Symptom>, GatewayError> {
        let url = format!("{}/symptoms", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("language", self.language.as_str())])
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        read_json(response, "symptoms", &url).await
    }

    /// `POST {api_root}/api/diagnosis` with a pre-serialized request body.
    pub async fn fetch_diagnosis(
        &self,
        token: &str,
        body: String,
    ) -> Result<Vec<DiagnosisCandidate>, GatewayError> {
        let url = format!("{}/api/diagnosis", self.api_root);
        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(
                AUTHORIZATION,
                format!("{} {token}", self.diagnosis_scheme.as_str()),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        read_json(response, "diagnosis", &url).await
    }
}

/// Log status and raw body, fail on any non-2xx, then deserialize.
async fn read_json<T: DeserializeOwned>(
    response: Response,
    endpoint: &'static str,
    url: &str,
) -> Result<T, GatewayError> {
    let (status, body) = read_body(response, url).await?;
    tracing::info!(endpoint, %status, body = %body, "ApiMedic response");
    check_and_parse(status, body, endpoint)
}

async fn read_body(response: Response, url: &str) -> Result<(StatusCode, String), GatewayError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(url, e))?;
    Ok((status, body))
}

fn check_and_parse<T: DeserializeOwned>(
    status: StatusCode,
    body: String,
    endpoint: &'static str,
) -> Result<T, GatewayError> {
    if !status.is_success() {
        return Err(GatewayError::Upstream {
            endpoint,
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| GatewayError::Parse {
        what: endpoint,
        reason: e.to_string(),
    })
}

fn transport_error(url: &str, e: reqwest::Error) -> GatewayError {
    GatewayError::Transport {
        url: url.to_string(),
        timed_out: e.is_timeout(),
        reason: e.to_string(),
    }
}
