//! # Certificate Operations
//!
//! One file per entry point. Create/Update and Import both populate fields
//! through the read path in `read.rs`; `apply.rs` chooses between create,
//! update and replacement for a tracked record.

mod apply;
mod create_update;
mod delete;
mod import;
mod read;

pub use apply::{apply, Plan};
pub use create_update::create_update;
pub use delete::delete;
pub use import::import;
pub use read::read;

use super::Operation;
use crate::error::CertificateError;
use crate::observability::metrics;
use crate::provider::ApiError;
use std::future::Future;
use std::time::Instant;
use tracing::{error, info};

/// Record metrics and the outcome log line around an operation
async fn observe<T, F>(operation: Operation, future: F) -> Result<T, CertificateError>
where
    F: Future<Output = Result<T, CertificateError>>,
{
    metrics::increment_operations(operation.as_str());
    let start = Instant::now();

    let result = future.await;

    let elapsed = start.elapsed();
    metrics::observe_operation_duration(operation.as_str(), elapsed.as_secs_f64());
    match &result {
        Ok(_) => info!(operation = operation.as_str(), ?elapsed, "Operation completed"),
        Err(e) => {
            metrics::increment_operation_errors(operation.as_str(), e.kind());
            error!(operation = operation.as_str(), kind = e.kind(), error = %e, "Operation failed");
        }
    }
    result
}

/// Wrap a remote failure with the attempted action and the certificate's identity
fn remote_error(
    action: &'static str,
    resource_group: &str,
    name: &str,
) -> impl FnOnce(ApiError) -> CertificateError {
    let resource_group = resource_group.to_string();
    let name = name.to_string();
    move |source| CertificateError::RemoteApi {
        action,
        name,
        resource_group,
        source,
    }
}
