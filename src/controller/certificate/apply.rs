use super::{create_update, delete};
use crate::controller::Clients;
use crate::error::CertificateError;
use crate::schema::{CertificateConfig, ResourceData};
use tracing::info;

/// What applying a configuration does to the tracked record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Create,
    Update,
    /// Force-new fields changed; the certificate is deleted and created again
    Replace { fields: Vec<&'static str> },
}

impl Plan {
    /// Compare `desired` with the tracked record, if any
    #[must_use]
    pub fn for_config(prior: Option<&ResourceData>, desired: &CertificateConfig) -> Self {
        let Some(prior) = prior.filter(|prior| !prior.is_new_resource()) else {
            return Plan::Create;
        };
        let fields = desired.replacement_fields(&prior.config);
        if fields.is_empty() {
            Plan::Update
        } else {
            Plan::Replace { fields }
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            Plan::Create => "create",
            Plan::Update => "update",
            Plan::Replace { .. } => "replace",
        }
    }
}

/// Converge the tracked record on `desired`
///
/// `record` always names what is known to exist remotely. It is cleared as
/// soon as a replaced certificate has been deleted, so a failed re-creation
/// leaves no stale identity behind, and is set once create/update succeeds.
/// Any other failure leaves it untouched.
pub async fn apply(
    clients: &Clients,
    record: &mut Option<ResourceData>,
    desired: CertificateConfig,
) -> Result<Plan, CertificateError> {
    let plan = Plan::for_config(record.as_ref(), &desired);

    let mut data = match (record.clone(), &plan) {
        (Some(prior), Plan::Replace { fields }) => {
            info!(fields = ?fields, "Changes require replacing the certificate");
            delete(clients, &prior).await?;
            *record = None;
            ResourceData::new(desired)
        }
        (Some(prior), Plan::Update) => prior.with_config(desired),
        _ => ResourceData::new(desired),
    };

    create_update(clients, &mut data).await?;
    *record = Some(data);
    Ok(plan)
}
