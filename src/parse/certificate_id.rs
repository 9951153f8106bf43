//! # Certificate ID
//!
//! Identity codec for App Service certificates.

use super::{parse_resource_id, ParseError};
use crate::constants::{CERTIFICATES_RESOURCE_TYPE, WEB_PROVIDER_NAMESPACE};
use std::fmt;
use std::str::FromStr;

/// Identity of an App Service certificate
///
/// Serialises to
/// `/subscriptions/{subscription}/resourceGroups/{group}/providers/Microsoft.Web/certificates/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CertificateId {
    pub subscription_id: String,
    pub resource_group: String,
    pub name: String,
}

impl CertificateId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group: resource_group.into(),
            name: name.into(),
        }
    }

    /// The canonical ID string
    #[must_use]
    pub fn id(&self) -> String {
        self.to_string()
    }

    /// Unescaped path segments of the ID, for building request URLs
    #[must_use]
    pub fn path_segments(&self) -> [&str; 8] {
        [
            "subscriptions",
            &self.subscription_id,
            "resourceGroups",
            &self.resource_group,
            "providers",
            WEB_PROVIDER_NAMESPACE,
            CERTIFICATES_RESOURCE_TYPE,
            &self.name,
        ]
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}/providers/{WEB_PROVIDER_NAMESPACE}/{CERTIFICATES_RESOURCE_TYPE}/{}",
            self.subscription_id, self.resource_group, self.name
        )
    }
}

impl FromStr for CertificateId {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts = parse_resource_id(
            input,
            "App Service Certificate",
            WEB_PROVIDER_NAMESPACE,
            CERTIFICATES_RESOURCE_TYPE,
        )?;
        Ok(Self {
            subscription_id: parts.subscription_id,
            resource_group: parts.resource_group,
            name: parts.name,
        })
    }
}
