//! # Observability
//!
//! - `logging`: tracing subscriber setup
//! - `metrics`: Prometheus metrics collection

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::{gather_text, register_metrics};
