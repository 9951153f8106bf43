use super::{observe, remote_error};
use crate::controller::timeouts::{with_deadline, Timeouts};
use crate::controller::{Clients, Operation};
use crate::error::CertificateError;
use crate::normalize::{flatten_tags, normalize_location, normalize_timestamp};
use crate::parse::CertificateId;
use crate::provider::{ApiError, CertificateProperties};
use crate::schema::{ComputedAttributes, ResourceData};
use tracing::{debug, info_span, Instrument};

/// Refresh `data` from the remote certificate named by its retained identity
///
/// When the certificate no longer exists the identity is cleared and the call
/// succeeds. On any error `data` is left as it was.
pub async fn read(clients: &Clients, data: &mut ResourceData) -> Result<(), CertificateError> {
    let span = info_span!("certificate.read", id = data.id.as_deref().unwrap_or_default());
    observe(Operation::Read, async {
        let budget = Timeouts::from_config(data.config.timeouts.as_ref())?
            .for_operation(Operation::Read);
        with_deadline(Operation::Read, budget, read_into(clients, data)).await
    })
    .instrument(span)
    .await
}

/// The shared field-population path, without deadline or metrics
pub(super) async fn read_into(
    clients: &Clients,
    data: &mut ResourceData,
) -> Result<(), CertificateError> {
    let id: CertificateId = data.id.as_deref().unwrap_or_default().parse()?;

    let certificate = match clients.certificates.get(&id.resource_group, &id.name).await {
        Ok(certificate) => certificate,
        Err(e) if e.is_not_found() => {
            debug!(
                resource_group = %id.resource_group,
                name = %id.name,
                "App Service Certificate was not found - removing from state"
            );
            data.id = None;
            return Ok(());
        }
        Err(e) => {
            return Err(remote_error("making Read request on", &id.resource_group, &id.name)(e))
        }
    };

    let properties = certificate.properties.unwrap_or_default();
    let attributes = computed_attributes(&properties)
        .map_err(remote_error("making Read request on", &id.resource_group, &id.name))?;

    data.config.name = certificate.name.unwrap_or(id.name);
    data.config.resource_group_name = id.resource_group;
    if let Some(location) = certificate.location.as_deref() {
        data.config.location = normalize_location(location);
    }
    data.config.tags = flatten_tags(certificate.tags.as_ref());
    if let Some(profile_id) = properties
        .hosting_environment_profile
        .and_then(|profile| profile.id)
    {
        data.config.hosting_environment_profile_id = Some(profile_id);
    }
    data.attributes = attributes;
    Ok(())
}

fn computed_attributes(properties: &CertificateProperties) -> Result<ComputedAttributes, ApiError> {
    let timestamp = |field: &str, raw: Option<&String>| {
        raw.map(|raw| {
            normalize_timestamp(raw).map_err(|e| {
                ApiError::UnexpectedResponse(format!("{field} {raw:?} is not a timestamp: {e}"))
            })
        })
        .transpose()
    };

    Ok(ComputedAttributes {
        friendly_name: properties.friendly_name.clone(),
        subject_name: properties.subject_name.clone(),
        host_names: properties.host_names.clone().unwrap_or_default(),
        issuer: properties.issuer.clone(),
        issue_date: timestamp("issueDate", properties.issue_date.as_ref())?,
        expiration_date: timestamp("expirationDate", properties.expiration_date.as_ref())?,
        thumbprint: properties.thumbprint.clone(),
    })
}
