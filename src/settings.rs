use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::credentials::{Credentials, ImpersonationConfig, TokenSource};
use crate::secret::Secret;
use crate::setting::{SettingKey, SettingValue};
use crate::transport::{ClientCertSource, ConnPool, DialOption, HttpClient};

/// Everything needed to establish a connection with an API service.
///
/// A `DialSettings` starts empty, is populated by applying
/// [`ClientOption`](crate::ClientOption)s, is validated once with
/// [`validate`](Self::validate), and is then handed to transport construction.
///
/// # Examples
///
/// ```
/// use dial_settings::{with_quota_project, with_scopes, ClientOption, DialSettings};
///
/// let options: Vec<Box<dyn ClientOption>> = vec![
///     Box::new(with_scopes(["https://www.googleapis.com/auth/cloud-platform"])),
///     Box::new(with_quota_project("proj-1")),
/// ];
/// let settings = DialSettings::from_options(&options).expect("options are compatible");
///
/// assert_eq!(settings.quota_project.as_deref(), Some("proj-1"));
/// ```
#[derive(Default)]
pub struct DialSettings {
    /// Endpoint override supplied by the caller
    pub endpoint: Option<String>,
    /// Default endpoint of the service
    pub default_endpoint: Option<String>,
    /// Default mutual TLS endpoint of the service
    pub default_mtls_endpoint: Option<String>,
    /// OAuth2 scopes
    pub scopes: Vec<String>,
    /// Token source credential
    pub token_source: Option<Arc<dyn TokenSource>>,
    /// Parsed credentials
    pub credentials: Option<Arc<Credentials>>,
    /// Path to a credentials file. If set, the token source is ignored.
    pub credentials_file: Option<PathBuf>,
    /// Raw credentials JSON
    pub credentials_json: Option<Secret<Vec<u8>>>,
    /// User agent sent with every request
    pub user_agent: Option<String>,
    /// API key credential
    pub api_key: Option<Secret<String>>,
    /// JWT audiences
    pub audiences: Vec<String>,
    /// Caller-supplied HTTP client
    pub http_client: Option<Arc<dyn HttpClient>>,
    /// Options appended to the gRPC dial
    pub grpc_dial_opts: Vec<Arc<dyn DialOption>>,
    /// Caller-supplied gRPC connection pool
    pub grpc_conn_pool: Option<Arc<dyn ConnPool>>,
    /// Number of gRPC connections to pool
    pub grpc_conn_pool_size: usize,
    /// Disable authentication entirely
    pub no_auth: bool,
    /// Disable telemetry collection
    pub telemetry_disabled: bool,
    /// Client certificate callback for mutual TLS
    pub client_cert_source: Option<ClientCertSource>,
    /// Extra claims for self-signed JWTs
    pub custom_claims: HashMap<String, serde_json::Value>,
    /// Skip [`validate`](Self::validate) entirely
    pub skip_validation: bool,
    /// Service account impersonation
    pub impersonation_config: Option<ImpersonationConfig>,
    /// Project billed for quota (`x-goog-user-project` system parameter)
    pub quota_project: Option<String>,
    /// Reason for the request, used in audit logs
    pub request_reason: Option<String>,

    // Allocated on first write.
    extensions: Option<HashMap<SettingKey, SettingValue>>,
}

impl DialSettings {
    /// Creates empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a side-table entry, replacing any previous value.
    ///
    /// Should not be called directly but from an option's `apply`.
    pub fn set_setting(&mut self, key: SettingKey, value: SettingValue) {
        self.extensions
            .get_or_insert_with(HashMap::new)
            .insert(key, value);
    }

    /// Returns the side-table entry for `key`, if one was set.
    ///
    /// Should not be called directly but from the typed accessor of the
    /// integration that owns the key.
    pub fn get_setting(&self, key: SettingKey) -> Option<&SettingValue> {
        self.extensions.as_ref().and_then(|m| m.get(&key))
    }

    /// Returns `true` if a side-table entry was set for `key`.
    pub fn is_set(&self, key: SettingKey) -> bool {
        self.get_setting(key).is_some()
    }

    /// Returns `true` if any option that authenticates requests was supplied.
    ///
    /// Raw credentials JSON is not counted here.
    pub fn has_credentials(&self) -> bool {
        self.has_api_key()
            || self.token_source.is_some()
            || self.has_credentials_file()
            || self.credentials.is_some()
    }

    /// Returns how many distinct credential forms were supplied.
    pub fn credential_count(&self) -> usize {
        [
            self.credentials.is_some(),
            self.credentials_json.is_some(),
            self.has_credentials_file(),
            self.has_api_key(),
            self.token_source.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    pub(crate) fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }

    pub(crate) fn has_credentials_file(&self) -> bool {
        self.credentials_file
            .as_ref()
            .is_some_and(|path| !path.as_os_str().is_empty())
    }
}

impl fmt::Debug for DialSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialSettings")
            .field("endpoint", &self.endpoint)
            .field("default_endpoint", &self.default_endpoint)
            .field("default_mtls_endpoint", &self.default_mtls_endpoint)
            .field("scopes", &self.scopes)
            .field("token_source", &self.token_source)
            .field("credentials", &self.credentials)
            .field("credentials_file", &self.credentials_file)
            .field("credentials_json", &self.credentials_json)
            .field("user_agent", &self.user_agent)
            .field("api_key", &self.api_key)
            .field("audiences", &self.audiences)
            .field("http_client", &self.http_client)
            .field("grpc_dial_opts", &self.grpc_dial_opts)
            .field("grpc_conn_pool", &self.grpc_conn_pool)
            .field("grpc_conn_pool_size", &self.grpc_conn_pool_size)
            .field("no_auth", &self.no_auth)
            .field("telemetry_disabled", &self.telemetry_disabled)
            .field("client_cert_source", &self.client_cert_source.is_some())
            .field("custom_claims", &self.custom_claims)
            .field("skip_validation", &self.skip_validation)
            .field("impersonation_config", &self.impersonation_config)
            .field("quota_project", &self.quota_project)
            .field("request_reason", &self.request_reason)
            .field("extensions", &self.extensions)
            .finish()
    }
}
