//! # Configuration
//!
//! Process-level configuration for the controller, loaded from environment variables.
//!
//! - `controller`: endpoints, logging, metrics and HTTP settings
//! - `credential`: Azure credential selection

mod controller;
mod credential;

pub use controller::ControllerConfig;
pub use credential::AzureCredential;
