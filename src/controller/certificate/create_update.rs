use super::read::read_into;
use super::{observe, remote_error};
use crate::controller::timeouts::{with_deadline, Timeouts};
use crate::controller::validation::{validate_config, CertificateSource};
use crate::controller::{Clients, Operation};
use crate::error::CertificateError;
use crate::normalize::{expand_tags, normalize_location};
use crate::provider::{Certificate, CertificateProperties};
use crate::schema::ResourceData;
use tracing::{debug, info, info_span, warn, Instrument};

/// Create or update the certificate described by `data.config`
///
/// A record without a retained identity is a creation: it first checks that
/// no certificate with the same name exists. On success the identity and all
/// computed attributes are set; on failure `data` is unchanged.
pub async fn create_update(
    clients: &Clients,
    data: &mut ResourceData,
) -> Result<(), CertificateError> {
    let operation = if data.is_new_resource() {
        Operation::Create
    } else {
        Operation::Update
    };
    let span = info_span!(
        "certificate.create_update",
        operation = operation.as_str(),
        resource_group = %data.config.resource_group_name,
        name = %data.config.name
    );

    observe(operation, async {
        let budget = Timeouts::from_config(data.config.timeouts.as_ref())?.for_operation(operation);
        with_deadline(operation, budget, apply(clients, data)).await
    })
    .instrument(span)
    .await
}

async fn apply(clients: &Clients, data: &mut ResourceData) -> Result<(), CertificateError> {
    let config = &data.config;
    let source = validate_config(config)?;
    for (field, notice) in config.deprecation_warnings() {
        warn!(field, "{notice}");
    }

    let name = config.name.as_str();
    let resource_group = config.resource_group_name.as_str();
    info!("Preparing arguments for App Service Certificate creation");

    if data.is_new_resource() {
        match clients.certificates.get(resource_group, name).await {
            Ok(existing) => {
                if let Some(id) = existing.id.filter(|id| !id.is_empty()) {
                    return Err(CertificateError::AlreadyExists { id });
                }
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => {
                return Err(remote_error(
                    "checking for presence of existing",
                    resource_group,
                    name,
                )(e))
            }
        }
    }

    let mut properties = resolve_payload(clients, source).await?;
    properties.server_farm_id = config
        .app_service_plan_id
        .clone()
        .filter(|id| !id.is_empty());

    let envelope = Certificate {
        location: Some(normalize_location(&config.location)),
        tags: Some(expand_tags(&config.tags)),
        properties: Some(properties),
        ..Default::default()
    };

    clients
        .certificates
        .create_or_update(resource_group, name, &envelope)
        .await
        .map_err(remote_error("creating/updating", resource_group, name))?;

    let inconsistency = || CertificateError::Inconsistency {
        name: name.to_string(),
        resource_group: resource_group.to_string(),
    };
    let confirmed_id = match clients.certificates.get(resource_group, name).await {
        Ok(certificate) => certificate
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(inconsistency)?,
        Err(e) if e.is_not_found() => return Err(inconsistency()),
        Err(e) => return Err(remote_error("retrieving", resource_group, name)(e)),
    };
    debug!(id = %confirmed_id, "Confirmed App Service Certificate");

    let mut staged = data.clone();
    staged.id = Some(confirmed_id);
    read_into(clients, &mut staged).await?;
    if staged.is_new_resource() {
        return Err(inconsistency());
    }

    *data = staged;
    Ok(())
}

/// Payload properties for the resolved source
///
/// A Key Vault reference is resolved to the vault's management-plane ID; no
/// remote object has been modified if this fails.
async fn resolve_payload(
    clients: &Clients,
    source: CertificateSource,
) -> Result<CertificateProperties, CertificateError> {
    match source {
        CertificateSource::InlinePfx { blob, password } => Ok(CertificateProperties {
            pfx_blob: Some(blob),
            password: Some(password),
            ..Default::default()
        }),
        CertificateSource::VaultReference(secret) => {
            let base_url = secret.vault_base_url;
            let mut ids = clients
                .key_vaults
                .key_vault_ids_from_base_url(&base_url)
                .await
                .map_err(|source| CertificateError::KeyVaultLookup {
                    base_url: base_url.clone(),
                    source,
                })?;

            let key_vault_id = match ids.len() {
                0 => return Err(CertificateError::KeyVaultNotFound { base_url }),
                1 => ids.remove(0),
                _ => return Err(CertificateError::KeyVaultAmbiguous { base_url, ids }),
            };

            Ok(CertificateProperties {
                key_vault_id: Some(key_vault_id),
                key_vault_secret_name: Some(secret.name),
                ..Default::default()
            })
        }
    }
}
