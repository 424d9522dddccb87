use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

/// Remote budget service used when nothing else is configured
pub const PRODUCTION_API_URL: &str = "https://boiling-falls-18986-30e9355ab2d9.herokuapp.com";

/// Development service started by the `budget-service` binary
pub const DEVELOPMENT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// No timeout unless configured; a stuck request simply never resolves
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub failure_reporting: FailureReporting,
}

/// What the user sees when a create or delete is not acknowledged.
/// Failures are always traced; `Inline` also surfaces a fixed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureReporting {
    #[default]
    Silent,
    Inline,
}

impl FailureReporting {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "silent" => Some(FailureReporting::Silent),
            "inline" => Some(FailureReporting::Inline),
            _ => None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("development") | Ok("dev") => Environment::Development,
            _ => Environment::Production,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("BUDGETS_API_URL") {
            if !v.trim().is_empty() {
                self.api.base_url = v.trim().to_string();
            }
        }
        if let Ok(v) = env::var("BUDGETS_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().ok().filter(|secs| *secs > 0);
        }
        if let Ok(v) = env::var("BUDGETS_FAILURE_REPORTING") {
            self.sync.failure_reporting =
                FailureReporting::parse(&v).unwrap_or(self.sync.failure_reporting);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: DEVELOPMENT_API_URL.to_string(),
                request_timeout_secs: None,
            },
            sync: SyncConfig {
                failure_reporting: FailureReporting::Inline,
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: PRODUCTION_API_URL.to_string(),
                request_timeout_secs: None,
            },
            sync: SyncConfig {
                failure_reporting: FailureReporting::Silent,
            },
        }
    }

    /// Same preset pointed at another service, used by tests and local runs
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }
}

// Process-wide config for the binaries; library code takes `&ClientConfig`
pub static CONFIG: Lazy<ClientConfig> = Lazy::new(ClientConfig::from_env);

pub fn config() -> &'static ClientConfig {
    &CONFIG
}
