//! # State Files
//!
//! Loading desired configuration and persisting the [`ResourceData`] record
//! between CLI invocations.

use crate::schema::{CertificateConfig, ResourceData};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a desired configuration from YAML or JSON
pub fn load_config(path: &Path) -> Result<CertificateConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse configuration {}", path.display()))
}

/// Load the persisted record; `None` when the state file does not exist
pub fn load_state(path: &Path) -> Result<Option<ResourceData>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state {}", path.display()))?;
    let data = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse state {}", path.display()))?;
    Ok(Some(data))
}

/// Persist the record as pretty-printed JSON
pub fn save_state(path: &Path, data: &ResourceData) -> Result<()> {
    let content = serde_json::to_string_pretty(data).context("Failed to serialize state")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write state {}", path.display()))
}

/// Drop the record; a missing file is not an error
pub fn remove_state(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove state {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cert1.json");

        assert!(load_state(&path).unwrap().is_none());

        let mut data = ResourceData::from_id(
            "/subscriptions/s/resourceGroups/rg1/providers/Microsoft.Web/certificates/cert1",
        );
        data.config.name = "cert1".to_string();
        save_state(&path, &data).unwrap();
        assert_eq!(load_state(&path).unwrap(), Some(data));

        remove_state(&path).unwrap();
        assert!(!path.exists());
        remove_state(&path).unwrap();
    }

    #[test]
    fn test_load_config_accepts_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("cert.yaml");
        std::fs::write(
            &yaml,
            "name: cert1\nresource_group_name: rg1\nlocation: westus\npfx_blob: aGVsbG8=\n",
        )
        .unwrap();
        assert_eq!(load_config(&yaml).unwrap().name, "cert1");

        let json = dir.path().join("cert.json");
        std::fs::write(
            &json,
            r#"{"name":"cert2","resource_group_name":"rg1","location":"westus"}"#,
        )
        .unwrap();
        assert_eq!(load_config(&json).unwrap().name, "cert2");
    }

    #[test]
    fn test_corrupt_state_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_state(&path).is_err());
    }
}
