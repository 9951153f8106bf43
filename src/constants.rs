//! # Constants
//!
//! Shared constants used throughout the controller.
//!
//! These values represent reasonable defaults and can be overridden via
//! configuration or environment variables where applicable.

use std::time::Duration;

/// Resource type name used in operator-facing messages
pub const RESOURCE_TYPE: &str = "azurerm_app_service_certificate";

/// Default Azure Resource Manager endpoint (public cloud)
pub const DEFAULT_ARM_ENDPOINT: &str = "https://management.azure.com";

/// Default Azure AD authority host (public cloud)
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// OAuth2 scope for Azure Resource Manager tokens
pub const ARM_SCOPE: &str = "https://management.azure.com/.default";

/// Resource identifier requested from the instance metadata service
pub const ARM_RESOURCE: &str = "https://management.azure.com/";

/// Instance metadata service token endpoint (managed identity)
pub const IMDS_TOKEN_ENDPOINT: &str = "http://169.254.169.254/metadata/identity/oauth2/token";

pub const IMDS_API_VERSION: &str = "2018-02-01";

/// Microsoft.Web API version used for certificates
pub const WEB_API_VERSION: &str = "2021-02-01";

/// Microsoft.Resources API version used for resource listing
pub const RESOURCES_API_VERSION: &str = "2020-06-01";

/// Microsoft.KeyVault API version used for vault lookups
pub const KEY_VAULT_API_VERSION: &str = "2019-09-01";

pub const WEB_PROVIDER_NAMESPACE: &str = "Microsoft.Web";
pub const CERTIFICATES_RESOURCE_TYPE: &str = "certificates";
pub const KEY_VAULT_PROVIDER_NAMESPACE: &str = "Microsoft.KeyVault";
pub const KEY_VAULTS_RESOURCE_TYPE: &str = "vaults";

/// Page size when listing Key Vaults matching a name
pub const RESOURCE_LIST_PAGE_SIZE: &str = "5";

/// Default create timeout
pub const DEFAULT_CREATE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Default read timeout
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Default update timeout
pub const DEFAULT_UPDATE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Default delete timeout
pub const DEFAULT_DELETE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Default per-request HTTP timeout (seconds)
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Maximum number of tags Azure accepts on a resource
pub const MAX_TAGS: usize = 50;

/// Maximum tag key length
pub const MAX_TAG_KEY_LENGTH: usize = 512;

/// Maximum tag value length
pub const MAX_TAG_VALUE_LENGTH: usize = 256;
