use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Listen address override (e.g. "0.0.0.0:8080"), otherwise the Leptos
    /// `site-addr` is used
    pub listen: Option<String>,

    /// Unix socket path; takes precedence over `listen`
    pub socket: Option<String>,

    /// Upstream backend that owns `/api/*`, `/login` and `/logout`
    #[serde(default)]
    pub backend: BackendConfig,

    /// OpenTelemetry configuration
    #[serde(default)]
    pub otel: OtelConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the backend
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtelConfig {
    /// OTLP endpoint (if None, uses OTEL_EXPORTER_OTLP_ENDPOINT env var)
    pub endpoint: Option<String>,

    /// Deployment environment name
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_environment() -> String {
    "development".to_string()
}

impl Default for OtelConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            environment: default_environment(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Supports the following env vars:
    /// - `LAILA_LISTEN`
    /// - `LAILA_SOCKET`
    /// - `LAILA_BACKEND_URL`
    /// - `LAILA_BACKEND_TIMEOUT`
    /// - `LAILA_OTEL_ENDPOINT`
    /// - `LAILA_OTEL_ENVIRONMENT`
    ///
    /// # Errors
    ///
    /// Fails when a variable cannot be parsed into its field.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(ConfigDefaults::default()))
            .merge(Env::prefixed("LAILA_").split("_"))
    }
}

/// Helper struct for default values in figment
#[derive(Debug, Default, Serialize)]
struct ConfigDefaults {
    backend: BackendConfig,
    otel: OtelConfig,
}
