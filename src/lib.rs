//! App Service Certificate Controller Library
//!
//! Reconciles a declared Azure App Service certificate against Azure Resource
//! Manager: create/update, read, delete and import, with classified errors for
//! the host engine.
//!
//! ```no_run
//! use app_service_certificate::{config::ControllerConfig, controller, provider, schema::ResourceData};
//!
//! # async fn example(config: app_service_certificate::schema::CertificateConfig) -> anyhow::Result<()> {
//! let clients = provider::azure::connect(&ControllerConfig::from_env()).await?;
//! let mut data = ResourceData::new(config);
//! controller::create_update(&clients, &mut data).await?;
//! println!("created {:?}", data.id);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod normalize;
pub mod observability;
pub mod parse;
pub mod provider;
pub mod schema;
pub mod sensitive;
pub mod state;

pub use controller::{apply, create_update, delete, import, read, Clients, Operation, Plan};
pub use error::CertificateError;
pub use schema::{CertificateConfig, ResourceData};
