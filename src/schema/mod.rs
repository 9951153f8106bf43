//! # Resource Schema
//!
//! Types describing the App Service certificate resource as the host engine sees it.
//!
//! ## Module Structure
//!
//! - `spec.rs` - Desired configuration declared by the user
//! - `state.rs` - Computed attributes and the persisted resource record
//! - `fields.rs` - Field metadata (force-new, sensitive, deprecated) and replacement planning

mod fields;
mod spec;
mod state;

pub use fields::{FieldSpec, CERTIFICATE_FIELDS};
pub use spec::{CertificateConfig, TimeoutsConfig};
pub use state::{ComputedAttributes, ResourceData};

/// JSON Schema of the desired configuration document
pub fn certificate_config_schema() -> schemars::Schema {
    schemars::schema_for!(CertificateConfig)
}
