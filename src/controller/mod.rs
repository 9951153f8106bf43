//! # Certificate Controller
//!
//! The reconciliation entry points invoked by the host engine:
//!
//! - [`create_update`]: validate, guard against adopting foreign objects, write, confirm, read back
//! - [`read`]: refresh computed attributes; clears the identity when the object is gone
//! - [`delete`]: delete by identity, tolerating absence
//! - [`import`]: validate an external identity, then read
//! - [`apply`]: create, update or replace a tracked record
//!
//! Each operation receives its API clients explicitly and runs under the
//! deadline selected from the resource's timeouts.

mod certificate;
pub mod timeouts;
pub mod validation;

pub use certificate::{apply, create_update, delete, import, read, Plan};
pub use timeouts::Timeouts;
pub use validation::{validate_config, CertificateSource};

use crate::provider::{CertificatesApi, KeyVaultLocator};
use std::fmt;
use std::sync::Arc;

/// API clients handed to every operation
#[derive(Clone)]
pub struct Clients {
    pub certificates: Arc<dyn CertificatesApi>,
    pub key_vaults: Arc<dyn KeyVaultLocator>,
}

impl Clients {
    pub fn new(
        certificates: Arc<dyn CertificatesApi>,
        key_vaults: Arc<dyn KeyVaultLocator>,
    ) -> Self {
        Self {
            certificates,
            key_vaults,
        }
    }
}

impl fmt::Debug for Clients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clients").finish_non_exhaustive()
    }
}

/// Operation label used for deadlines, spans and metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Import => "import",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
