//! # Operation Deadlines
//!
//! Per-operation time budgets and the deadline wrapper applied around each
//! operation body.

use super::Operation;
use crate::constants::{
    DEFAULT_CREATE_TIMEOUT, DEFAULT_DELETE_TIMEOUT, DEFAULT_READ_TIMEOUT, DEFAULT_UPDATE_TIMEOUT,
};
use crate::error::CertificateError;
use crate::schema::TimeoutsConfig;
use regex::Regex;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub create: Duration,
    pub read: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            create: DEFAULT_CREATE_TIMEOUT,
            read: DEFAULT_READ_TIMEOUT,
            update: DEFAULT_UPDATE_TIMEOUT,
            delete: DEFAULT_DELETE_TIMEOUT,
        }
    }
}

impl Timeouts {
    /// Apply configured overrides on top of the defaults
    pub fn from_config(config: Option<&TimeoutsConfig>) -> Result<Self, CertificateError> {
        let mut timeouts = Self::default();
        let Some(config) = config else {
            return Ok(timeouts);
        };

        let overrides = [
            ("create", &config.create, &mut timeouts.create),
            ("read", &config.read, &mut timeouts.read),
            ("update", &config.update, &mut timeouts.update),
            ("delete", &config.delete, &mut timeouts.delete),
        ];
        for (field, value, target) in overrides {
            if let Some(value) = value {
                *target = parse_duration(value).map_err(|e| {
                    CertificateError::configuration(format!("timeouts.{field}: {e}"))
                })?;
            }
        }
        Ok(timeouts)
    }

    /// Budget for an operation; import reads and so uses the read budget
    pub fn for_operation(&self, operation: Operation) -> Duration {
        match operation {
            Operation::Create => self.create,
            Operation::Read | Operation::Import => self.read,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
        }
    }
}

/// Parse a duration string into std::time::Duration
/// Supports formats: "30s", "1m", "5m", "1h", "2h", "1d"
pub fn parse_duration(duration_str: &str) -> Result<Duration, String> {
    let duration_trimmed = duration_str.trim();

    if duration_trimmed.is_empty() {
        return Err("Duration string cannot be empty".to_string());
    }

    let duration_regex = Regex::new(r"^(?P<number>\d+)(?P<unit>[smhd])$")
        .map_err(|e| format!("Failed to compile regex: {e}"))?;

    let interval_lower = duration_trimmed.to_lowercase();

    let captures = duration_regex.captures(&interval_lower).ok_or_else(|| {
        format!(
            "Invalid duration format '{duration_trimmed}'. Expected format: <number><unit> (e.g., '30s', '5m', '1h')"
        )
    })?;

    let number: u64 = captures["number"]
        .parse()
        .map_err(|e| format!("Invalid duration number in '{duration_trimmed}': {e}"))?;

    if number == 0 {
        return Err(format!(
            "Duration number must be greater than 0, got '{duration_trimmed}'"
        ));
    }

    let multiplier = match &captures["unit"] {
        "s" => 1,
        "m" => 60,
        "h" => 3600,
        _ => 86400,
    };

    number
        .checked_mul(multiplier)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("Duration '{duration_trimmed}' is too large"))
}

/// Run `future` to completion or fail with `CertificateError::Timeout` once `budget` elapses
pub async fn with_deadline<T, F>(
    operation: Operation,
    budget: Duration,
    future: F,
) -> Result<T, CertificateError>
where
    F: Future<Output = Result<T, CertificateError>>,
{
    match tokio::time::timeout(budget, future).await {
        Ok(result) => result,
        Err(_) => {
            warn!(operation = operation.as_str(), ?budget, "Operation deadline exceeded");
            Err(CertificateError::Timeout {
                operation: operation.as_str(),
                after: budget,
            })
        }
    }
}
