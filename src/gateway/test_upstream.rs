//! In-process stand-in for the ApiMedic login and health services.
//!
//! Serves `POST /login`, `GET /health/symptoms` and `POST /api/diagnosis`
//! on `127.0.0.1` with configurable status codes, recording every request.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use tokio::sync::oneshot;

use crate::config::GatewayConfig;

pub const TOKEN_BODY: &str = r#"{"Token": "upstream-token", "ValidThrough": 7200}"#;

pub const SYMPTOMS_BODY: &str = r#"[{"ID": 10, "Name": "Headache"}, {"ID": 15, "Name": "Fever"}]"#;

pub const DIAGNOSIS_BODY: &str = r#"[{
    "Issue": {"ID": 11, "Name": "Influenza", "Accuracy": 72.5, "Icd": "J10;J11",
              "IcdName": "Influenza due to other identified influenza virus", "ProfName": "Influenza",
              "Ranking": 1},
    "Specialisation": [{"ID": 15, "Name": "General practice", "SpecialistID": 0}]
}]"#;

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

pub struct UpstreamState {
    token_status: StatusCode,
    data_status: StatusCode,
    pub token_hits: AtomicUsize,
    pub symptom_hits: AtomicUsize,
    pub diagnosis_hits: AtomicUsize,
    symptoms_body: Mutex<String>,
    seen: Mutex<Vec<SeenRequest>>,
}

impl UpstreamState {
    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn data_hits(&self) -> usize {
        self.symptom_hits.load(Ordering::SeqCst) + self.diagnosis_hits.load(Ordering::SeqCst)
    }

    pub fn set_symptoms_body(&self, body: &str) {
        *self.symptoms_body.lock().unwrap() = body.to_string();
    }

    fn record(&self, uri: &Uri, headers: &HeaderMap, body: String) {
        self.seen.lock().unwrap().push(SeenRequest {
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            authorization: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body,
        });
    }
}

pub struct FakeUpstream {
    pub addr: SocketAddr,
    pub state: Arc<UpstreamState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl FakeUpstream {
    pub async fn start_ok() -> Self {
        Self::start(200, 200).await
    }

    pub async fn start(token_status: u16, data_status: u16) -> Self {
        let state = Arc::new(UpstreamState {
            token_status: StatusCode::from_u16(token_status).unwrap(),
            data_status: StatusCode::from_u16(data_status).unwrap(),
            token_hits: AtomicUsize::new(0),
            symptom_hits: AtomicUsize::new(0),
            diagnosis_hits: AtomicUsize::new(0),
            symptoms_body: Mutex::new(SYMPTOMS_BODY.to_string()),
            seen: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/login", post(token))
            .route("/health/symptoms", get(symptoms))
            .route("/api/diagnosis", post(diagnosis))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Live-mode configuration pointed at this server.
    pub fn config(&self) -> GatewayConfig {
        let mut config = GatewayConfig::mock();
        config.mock_enabled = false;
        config.username = "demo@example.com".into();
        config.password = "s3cret-pass".into();
        config.auth_url = format!("http://{}/login", self.addr);
        config.base_url = format!("http://{}/health", self.addr);
        config
    }
}

impl Drop for FakeUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn token(
    State(state): State<Arc<UpstreamState>>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.token_hits.fetch_add(1, Ordering::SeqCst);
    state.record(&uri, &headers, body);
    if state.token_status.is_success() {
        (state.token_status, TOKEN_BODY.to_string())
    } else {
        (state.token_status, "{\"error\": \"invalid credentials\"}".to_string())
    }
}

async fn symptoms(
    State(state): State<Arc<UpstreamState>>,
    uri: Uri,
    headers: HeaderMap,
) -> impl IntoResponse {
    state.symptom_hits.fetch_add(1, Ordering::SeqCst);
    state.record(&uri, &headers, String::new());
    if state.data_status.is_success() {
        let body = state.symptoms_body.lock().unwrap().clone();
        (state.data_status, body)
    } else {
        (state.data_status, "boom".to_string())
    }
}

async fn diagnosis(
    State(state): State<Arc<UpstreamState>>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.diagnosis_hits.fetch_add(1, Ordering::SeqCst);
    state.record(&uri, &headers, body);
    if state.data_status.is_success() {
        (state.data_status, DIAGNOSIS_BODY.to_string())
    } else {
        (state.data_status, "boom".to_string())
    }
}
