use super::{observe, remote_error};
use crate::controller::timeouts::{with_deadline, Timeouts};
use crate::controller::{Clients, Operation};
use crate::error::CertificateError;
use crate::parse::CertificateId;
use crate::schema::ResourceData;
use tracing::{debug, info, info_span, Instrument};

/// Delete the certificate named by the retained identity
///
/// An already-absent certificate counts as deleted. The identity is never
/// modified; the host engine drops the record after a successful delete.
pub async fn delete(clients: &Clients, data: &ResourceData) -> Result<(), CertificateError> {
    let span = info_span!("certificate.delete", id = data.id.as_deref().unwrap_or_default());
    observe(Operation::Delete, async {
        let budget = Timeouts::from_config(data.config.timeouts.as_ref())?
            .for_operation(Operation::Delete);
        with_deadline(Operation::Delete, budget, delete_by_id(clients, data)).await
    })
    .instrument(span)
    .await
}

async fn delete_by_id(clients: &Clients, data: &ResourceData) -> Result<(), CertificateError> {
    let id: CertificateId = data.id.as_deref().unwrap_or_default().parse()?;

    info!(resource_group = %id.resource_group, name = %id.name, "Deleting App Service Certificate");
    match clients.certificates.delete(&id.resource_group, &id.name).await {
        Ok(()) => Ok(()),
        Err(e) if e.is_not_found() => {
            debug!(
                resource_group = %id.resource_group,
                name = %id.name,
                "App Service Certificate already absent"
            );
            Ok(())
        }
        Err(e) => Err(remote_error("deleting", &id.resource_group, &id.name)(e)),
    }
}
