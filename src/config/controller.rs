//! # Controller Configuration
//!
//! Controller-level settings loaded from environment variables.

use super::AzureCredential;
use crate::constants::{DEFAULT_ARM_ENDPOINT, DEFAULT_AUTHORITY_HOST, DEFAULT_HTTP_TIMEOUT_SECS};
use std::time::Duration;

/// Controller-level configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
/// The subscription ID has no default; client construction fails when it is missing.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Azure subscription that owns the certificates
    pub subscription_id: Option<String>,
    /// Azure Resource Manager endpoint
    pub arm_endpoint: String,
    /// Azure AD authority host used for client secret authentication
    pub authority_host: String,
    /// Credential used to acquire Resource Manager tokens
    pub credential: AzureCredential,
    /// Per-request HTTP timeout (seconds)
    pub http_timeout_secs: u64,
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: String,
    /// Enable color in text format logs
    pub log_enable_color: bool,
    /// Enable metrics export
    pub enable_metrics: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            subscription_id: None,
            arm_endpoint: DEFAULT_ARM_ENDPOINT.to_string(),
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            credential: AzureCredential::ManagedIdentity { client_id: None },
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            log_level: "INFO".to_string(),
            log_format: "text".to_string(),
            log_enable_color: false,
            enable_metrics: true,
        }
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            subscription_id: env_var_non_empty("AZURE_SUBSCRIPTION_ID"),
            arm_endpoint: env_var_or_default_str("ARM_ENDPOINT", DEFAULT_ARM_ENDPOINT),
            authority_host: env_var_or_default_str("AZURE_AUTHORITY_HOST", DEFAULT_AUTHORITY_HOST),
            credential: AzureCredential::from_env(),
            http_timeout_secs: env_var_or_default("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS),
            log_level: env_var_or_default_str("LOG_LEVEL", "INFO"),
            log_format: env_var_or_default_str("LOG_FORMAT", "text"),
            log_enable_color: env_var_or_default_bool("LOG_ENABLE_COLOR", false),
            enable_metrics: env_var_or_default_bool("ENABLE_METRICS", true),
        }
    }

    /// Get per-request HTTP timeout duration
    pub fn http_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Read environment variable or return default value
fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T
where
    <T as std::str::FromStr>::Err: std::fmt::Debug,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read environment variable as boolean or return default
fn env_var_or_default_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| {
            let v_lower = v.to_lowercase();
            v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
        })
        .unwrap_or(default)
}

/// Read environment variable as string or return default
fn env_var_or_default_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read environment variable, treating blank values as unset
pub(super) fn env_var_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_targets_public_cloud() {
        let config = ControllerConfig::default();
        assert_eq!(config.arm_endpoint, "https://management.azure.com");
        assert_eq!(config.authority_host, "https://login.microsoftonline.com");
        assert!(config.subscription_id.is_none());
        assert_eq!(config.http_timeout_duration(), Duration::from_secs(60));
        assert!(config.enable_metrics);
    }

    #[test]
    fn test_env_var_or_default_falls_back_on_unparseable_value() {
        // Unset key always yields the default
        let value: u64 = env_var_or_default("APPCERT_TEST_UNSET_NUMERIC_KEY", 42);
        assert_eq!(value, 42);
        assert!(!env_var_or_default_bool("APPCERT_TEST_UNSET_BOOL_KEY", false));
        assert!(env_var_non_empty("APPCERT_TEST_UNSET_STRING_KEY").is_none());
    }
}
