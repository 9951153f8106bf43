use super::observe;
use super::read::read_into;
use crate::controller::timeouts::{with_deadline, Timeouts};
use crate::controller::{Clients, Operation};
use crate::error::CertificateError;
use crate::parse::CertificateId;
use crate::schema::{CertificateConfig, ResourceData};
use tracing::{info_span, Instrument};

/// Adopt an existing certificate by its ID
///
/// The ID is validated before any remote call. `config` carries the fields
/// Azure never returns (payload, plan, timeouts); everything else is
/// populated by the read path.
pub async fn import(
    clients: &Clients,
    id: &str,
    config: CertificateConfig,
) -> Result<ResourceData, CertificateError> {
    let span = info_span!("certificate.import", id);
    observe(Operation::Import, async {
        id.parse::<CertificateId>()?;
        let budget = Timeouts::from_config(config.timeouts.as_ref())?
            .for_operation(Operation::Import);

        let mut data = ResourceData::from_id(id).with_config(config);
        with_deadline(Operation::Import, budget, read_into(clients, &mut data)).await?;

        if data.is_new_resource() {
            return Err(CertificateError::ImportNotFound { id: id.to_string() });
        }
        Ok(data)
    })
    .instrument(span)
    .await
}
