//! Gateway configuration.
//!
//! Loaded once at startup from environment variables. Nothing mutates it
//! after `load()`.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "DiagnosisGateway";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BASE_URL: &str = "https://sandbox-healthservice.priaid.ch";
pub const DEFAULT_AUTH_URL: &str = "https://sandbox-authservice.priaid.ch/login";
pub const DEFAULT_LANGUAGE: &str = "en-gb";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,diagnosis_gateway_lib=debug"
}

/// Get the application data directory
/// ~/DiagnosisGateway/ on all platforms, falling back to the working directory.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default location of the results database.
pub fn default_db_path() -> PathBuf {
    app_data_dir().join("diagnosis.db")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is required when mock mode is disabled")]
    Missing { var: &'static str },

    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Authorization scheme sent on the upstream diagnosis POST.
///
/// `Legacy` sends `Bear <token>`, matching existing upstream traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosisAuthScheme {
    Legacy,
    Bearer,
}

impl DiagnosisAuthScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "Bear",
            Self::Bearer => "Bearer",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bear" | "legacy" => Some(Self::Legacy),
            "bearer" => Some(Self::Bearer),
            _ => None,
        }
    }
}

/// ApiMedic connection settings plus the gateway's own runtime settings.
#[derive(Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub auth_url: String,
    pub username: String,
    pub password: String,
    pub language: String,
    pub mock_enabled: bool,
    pub diagnosis_auth_scheme: DiagnosisAuthScheme,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    pub cors_origin: String,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("auth_url", &self.auth_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("language", &self.language)
            .field("mock_enabled", &self.mock_enabled)
            .field("diagnosis_auth_scheme", &self.diagnosis_auth_scheme)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("bind_addr", &self.bind_addr)
            .field("db_path", &self.db_path)
            .field("cors_origin", &self.cors_origin)
            .finish()
    }
}

impl GatewayConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mock_enabled = match get("APIMEDIC_MOCK_ENABLED") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid {
                var: "APIMEDIC_MOCK_ENABLED",
                value: v,
            })?,
            None => true,
        };

        let username = get("APIMEDIC_USERNAME").unwrap_or_default();
        let password = get("APIMEDIC_PASSWORD").unwrap_or_default();
        if !mock_enabled {
            if username.is_empty() {
                return Err(ConfigError::Missing { var: "APIMEDIC_USERNAME" });
            }
            if password.is_empty() {
                return Err(ConfigError::Missing { var: "APIMEDIC_PASSWORD" });
            }
        }

        let auth_url = get("APIMEDIC_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.into());
        if !auth_url.contains("://") {
            return Err(ConfigError::Invalid {
                var: "APIMEDIC_AUTH_URL",
                value: auth_url,
            });
        }

        let diagnosis_auth_scheme = match get("APIMEDIC_DIAGNOSIS_AUTH_SCHEME") {
            Some(v) => DiagnosisAuthScheme::parse(&v).ok_or(ConfigError::Invalid {
                var: "APIMEDIC_DIAGNOSIS_AUTH_SCHEME",
                value: v,
            })?,
            None => DiagnosisAuthScheme::Legacy,
        };

        let bind_addr = get("GATEWAY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid {
                var: "GATEWAY_BIND_ADDR",
                value: bind_addr,
            })?;

        Ok(Self {
            base_url: get("APIMEDIC_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.into())
                .trim_end_matches('/')
                .to_string(),
            auth_url,
            username,
            password,
            language: get("APIMEDIC_LANGUAGE").unwrap_or_else(|| DEFAULT_LANGUAGE.into()),
            mock_enabled,
            diagnosis_auth_scheme,
            connect_timeout: Duration::from_secs(parse_secs(
                get("APIMEDIC_CONNECT_TIMEOUT_SECS"),
                "APIMEDIC_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?),
            request_timeout: Duration::from_secs(parse_secs(
                get("APIMEDIC_REQUEST_TIMEOUT_SECS"),
                "APIMEDIC_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            bind_addr,
            db_path: get("GATEWAY_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            cors_origin: get("GATEWAY_CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into()),
        })
    }

    /// Mock-mode configuration with defaults everywhere else.
    pub fn mock() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            auth_url: DEFAULT_AUTH_URL.into(),
            username: String::new(),
            password: String::new(),
            language: DEFAULT_LANGUAGE.into(),
            mock_enabled: true,
            diagnosis_auth_scheme: DiagnosisAuthScheme::Legacy,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: default_db_path(),
            cors_origin: DEFAULT_CORS_ORIGIN.into(),
        }
    }

    /// Root the upstream diagnosis endpoint hangs off: `auth_url` up to its
    /// last `/`.
    pub fn api_root(&self) -> &str {
        match self.auth_url.rfind('/') {
            Some(idx) => &self.auth_url[..idx],
            None => &self.auth_url,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_secs(value: Option<String>, var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => match v.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(ConfigError::Invalid { var, value: v }),
        },
    }
}
