/// Widget and process configuration
use crate::domain::Configuration;
use crate::errors::ConfigError;
use serde_json::{Map, Value};
use std::env;
use std::time::Duration;

/// Resolve the settings document embedded in the host page.
///
/// Every field is required; nothing is defaulted and nothing touches the
/// network.
pub fn resolve(raw: &str) -> Result<Configuration, ConfigError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ConfigError::Malformed(e.to_string()))?;
    resolve_value(&value)
}

/// Same as [`resolve`] for an already parsed document
pub fn resolve_value(value: &Value) -> Result<Configuration, ConfigError> {
    let settings = value.as_object().ok_or(ConfigError::NotAnObject)?;

    let mut base_url = required_str(settings, "base_url")?;
    // Paths always start with '/', so a trailing slash here would double up
    while base_url.ends_with('/') {
        base_url.pop();
    }
    if base_url.is_empty() {
        return Err(ConfigError::Empty("base_url"));
    }

    Ok(Configuration {
        base_url,
        status_path: required_str(settings, "api_url")?,
        submission_path: required_str(settings, "observe_api_url")?,
        target_id: required_id(settings, "target_pk")?,
        template_name: required_str(settings, "template_name")?,
        facility: required_str(settings, "facility")?,
    })
}

fn required_str(settings: &Map<String, Value>, key: &'static str) -> Result<String, ConfigError> {
    match settings.get(key) {
        None | Some(Value::Null) => Err(ConfigError::Missing(key)),
        Some(Value::String(s)) if s.is_empty() => Err(ConfigError::Empty(key)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ConfigError::WrongType {
            field: key,
            expected: "a string",
        }),
    }
}

fn required_id(settings: &Map<String, Value>, key: &'static str) -> Result<u64, ConfigError> {
    match settings.get(key) {
        None | Some(Value::Null) => Err(ConfigError::Missing(key)),
        Some(v) => v.as_u64().filter(|id| *id > 0).ok_or(ConfigError::WrongType {
            field: key,
            expected: "a positive integer",
        }),
    }
}

/// Process-level settings for the binary
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub settings_path: String,
    pub http_timeout: Duration,
    /// Zero means refresh once, like a single page load
    pub poll_every_seconds: u64,
    pub observe_email: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let settings_path = env::args()
            .nth(1)
            .or_else(|| env::var("WIDGET_SETTINGS").ok())
            .unwrap_or_else(|| "settings.json".to_string());

        let observe_email = env::var("OBSERVE_EMAIL").ok().filter(|s| !s.is_empty());

        Self {
            settings_path,
            http_timeout: Duration::from_secs(env_u64("HTTP_TIMEOUT_SECONDS", 30)),
            poll_every_seconds: env_u64("POLL_EVERY_SECONDS", 0),
            observe_email,
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
