//! Client options, the only writers of [`DialSettings`].
//!
//! Each option applies exactly one change. Options are applied in order:
//! scalar settings are last-write-wins, while list and map settings
//! accumulate across options.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::credentials::{Credentials, ImpersonationConfig, TokenSource};
use crate::error::Error;
use crate::secret::Secret;
use crate::settings::DialSettings;
use crate::transport::{ClientCertSource, HttpClient};

/// An option for an API client.
///
/// # Examples
///
/// ```
/// use dial_settings::{ClientOption, DialSettings};
///
/// struct WithRegion(&'static str);
///
/// impl ClientOption for WithRegion {
///     fn apply(&self, settings: &mut DialSettings) {
///         settings.endpoint = Some(format!("https://{}-api.example.com", self.0));
///     }
/// }
///
/// let mut settings = DialSettings::new();
/// settings.apply([WithRegion("eu")]);
/// assert_eq!(settings.endpoint.as_deref(), Some("https://eu-api.example.com"));
/// ```
pub trait ClientOption {
    /// Applies this option to `settings`.
    fn apply(&self, settings: &mut DialSettings);
}

impl<T: ClientOption + ?Sized> ClientOption for &T {
    fn apply(&self, settings: &mut DialSettings) {
        (**self).apply(settings);
    }
}

impl<T: ClientOption + ?Sized> ClientOption for Box<T> {
    fn apply(&self, settings: &mut DialSettings) {
        (**self).apply(settings);
    }
}

impl DialSettings {
    /// Applies `options` in order.
    pub fn apply<I>(&mut self, options: I)
    where
        I: IntoIterator,
        I::Item: ClientOption,
    {
        let mut count = 0usize;
        for option in options {
            option.apply(self);
            count += 1;
        }
        tracing::debug!(options = count, "applied client options");
    }

    /// Builds settings from `options` and validates them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSettings`] if the options conflict.
    pub fn from_options<I>(options: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: ClientOption,
    {
        let mut settings = Self::new();
        settings.apply(options);
        settings.validate()?;
        Ok(settings)
    }
}

/// Sets the endpoint override. See [`with_endpoint`].
#[derive(Debug, Clone)]
pub struct WithEndpoint(String);

/// Overrides the service endpoint.
pub fn with_endpoint(url: impl Into<String>) -> WithEndpoint {
    WithEndpoint(url.into())
}

impl ClientOption for WithEndpoint {
    fn apply(&self, settings: &mut DialSettings) {
        settings.endpoint = Some(self.0.clone());
    }
}

/// Sets the default endpoint. See [`with_default_endpoint`].
#[derive(Debug, Clone)]
pub struct WithDefaultEndpoint(String);

/// Sets the default endpoint of the service. Used by generated clients.
pub fn with_default_endpoint(url: impl Into<String>) -> WithDefaultEndpoint {
    WithDefaultEndpoint(url.into())
}

impl ClientOption for WithDefaultEndpoint {
    fn apply(&self, settings: &mut DialSettings) {
        settings.default_endpoint = Some(self.0.clone());
    }
}

/// Sets the default mTLS endpoint. See [`with_default_mtls_endpoint`].
#[derive(Debug, Clone)]
pub struct WithDefaultMtlsEndpoint(String);

/// Sets the default mutual TLS endpoint of the service. Used by generated clients.
pub fn with_default_mtls_endpoint(url: impl Into<String>) -> WithDefaultMtlsEndpoint {
    WithDefaultMtlsEndpoint(url.into())
}

impl ClientOption for WithDefaultMtlsEndpoint {
    fn apply(&self, settings: &mut DialSettings) {
        settings.default_mtls_endpoint = Some(self.0.clone());
    }
}

/// Adds OAuth2 scopes. See [`with_scopes`].
#[derive(Debug, Clone)]
pub struct WithScopes(Vec<String>);

/// Adds `scopes` to the OAuth2 scopes requested for the token.
pub fn with_scopes<I, S>(scopes: I) -> WithScopes
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    WithScopes(scopes.into_iter().map(Into::into).collect())
}

impl ClientOption for WithScopes {
    fn apply(&self, settings: &mut DialSettings) {
        settings.scopes.extend(self.0.iter().cloned());
    }
}

/// Adds JWT audiences. See [`with_audiences`].
#[derive(Debug, Clone)]
pub struct WithAudiences(Vec<String>);

/// Adds `audiences` to the audiences of self-signed JWTs.
pub fn with_audiences<I, S>(audiences: I) -> WithAudiences
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    WithAudiences(audiences.into_iter().map(Into::into).collect())
}

impl ClientOption for WithAudiences {
    fn apply(&self, settings: &mut DialSettings) {
        settings.audiences.extend(self.0.iter().cloned());
    }
}

/// Sets the token source. See [`with_token_source`].
#[derive(Debug, Clone)]
pub struct WithTokenSource(Arc<dyn TokenSource>);

/// Authenticates with tokens from `source`.
pub fn with_token_source(source: Arc<dyn TokenSource>) -> WithTokenSource {
    WithTokenSource(source)
}

impl ClientOption for WithTokenSource {
    fn apply(&self, settings: &mut DialSettings) {
        settings.token_source = Some(Arc::clone(&self.0));
    }
}

/// Sets parsed credentials. See [`with_credentials`].
#[derive(Debug, Clone)]
pub struct WithCredentials(Arc<Credentials>);

/// Authenticates with already parsed credentials.
pub fn with_credentials(credentials: Arc<Credentials>) -> WithCredentials {
    WithCredentials(credentials)
}

impl ClientOption for WithCredentials {
    fn apply(&self, settings: &mut DialSettings) {
        settings.credentials = Some(Arc::clone(&self.0));
    }
}

/// Sets the credentials file. See [`with_credentials_file`].
#[derive(Debug, Clone)]
pub struct WithCredentialsFile(PathBuf);

/// Authenticates with the service account or refresh token file at `path`.
pub fn with_credentials_file(path: impl Into<PathBuf>) -> WithCredentialsFile {
    WithCredentialsFile(path.into())
}

impl ClientOption for WithCredentialsFile {
    fn apply(&self, settings: &mut DialSettings) {
        settings.credentials_file = Some(self.0.clone());
    }
}

/// Sets raw credentials JSON. See [`with_credentials_json`].
#[derive(Debug)]
pub struct WithCredentialsJson(Secret<Vec<u8>>);

/// Authenticates with the contents of a credentials file.
pub fn with_credentials_json(json: impl Into<Vec<u8>>) -> WithCredentialsJson {
    WithCredentialsJson(Secret::new(json.into()))
}

impl ClientOption for WithCredentialsJson {
    fn apply(&self, settings: &mut DialSettings) {
        settings.credentials_json = Some(self.0.duplicate());
    }
}

/// Sets the user agent. See [`with_user_agent`].
#[derive(Debug, Clone)]
pub struct WithUserAgent(String);

/// Sets the user agent sent with every request.
pub fn with_user_agent(user_agent: impl Into<String>) -> WithUserAgent {
    WithUserAgent(user_agent.into())
}

impl ClientOption for WithUserAgent {
    fn apply(&self, settings: &mut DialSettings) {
        settings.user_agent = Some(self.0.clone());
    }
}

/// Sets the API key. See [`with_api_key`].
#[derive(Debug)]
pub struct WithApiKey(Secret<String>);

/// Authenticates with an API key.
pub fn with_api_key(key: impl Into<String>) -> WithApiKey {
    WithApiKey(Secret::new(key.into()))
}

impl ClientOption for WithApiKey {
    fn apply(&self, settings: &mut DialSettings) {
        settings.api_key = Some(self.0.duplicate());
    }
}

/// Sets the HTTP client. See [`with_http_client`].
#[derive(Debug, Clone)]
pub struct WithHttpClient(Arc<dyn HttpClient>);

/// Uses `client` for all requests. The client is responsible for authentication.
pub fn with_http_client(client: Arc<dyn HttpClient>) -> WithHttpClient {
    WithHttpClient(client)
}

impl ClientOption for WithHttpClient {
    fn apply(&self, settings: &mut DialSettings) {
        settings.http_client = Some(Arc::clone(&self.0));
    }
}

/// Disables authentication. See [`without_authentication`].
#[derive(Debug, Clone, Copy)]
pub struct WithoutAuthentication;

/// Sends requests without credentials. Incompatible with every credential option.
pub fn without_authentication() -> WithoutAuthentication {
    WithoutAuthentication
}

impl ClientOption for WithoutAuthentication {
    fn apply(&self, settings: &mut DialSettings) {
        settings.no_auth = true;
    }
}

/// Disables telemetry. See [`with_telemetry_disabled`].
#[derive(Debug, Clone, Copy)]
pub struct WithTelemetryDisabled;

/// Disables default telemetry such as tracing and metrics.
pub fn with_telemetry_disabled() -> WithTelemetryDisabled {
    WithTelemetryDisabled
}

impl ClientOption for WithTelemetryDisabled {
    fn apply(&self, settings: &mut DialSettings) {
        settings.telemetry_disabled = true;
    }
}

/// Sets the client certificate source. See [`with_client_cert_source`].
#[derive(Clone)]
pub struct WithClientCertSource(ClientCertSource);

/// Uses `source` to obtain a client certificate for mutual TLS. HTTP only.
pub fn with_client_cert_source(source: ClientCertSource) -> WithClientCertSource {
    WithClientCertSource(source)
}

impl fmt::Debug for WithClientCertSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WithClientCertSource")
    }
}

impl ClientOption for WithClientCertSource {
    fn apply(&self, settings: &mut DialSettings) {
        settings.client_cert_source = Some(Arc::clone(&self.0));
    }
}

/// Adds custom JWT claims. See [`with_custom_claims`].
#[derive(Debug, Clone)]
pub struct WithCustomClaims(HashMap<String, serde_json::Value>);

/// Adds custom claims to self-signed JWTs. A later claim with the same name wins.
pub fn with_custom_claims(claims: HashMap<String, serde_json::Value>) -> WithCustomClaims {
    WithCustomClaims(claims)
}

impl ClientOption for WithCustomClaims {
    fn apply(&self, settings: &mut DialSettings) {
        settings.custom_claims.extend(self.0.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

/// Skips validation. See [`skip_validation`].
#[derive(Debug, Clone, Copy)]
pub struct SkipValidation;

/// Bypasses [`DialSettings::validate`]. For callers that check settings themselves.
pub fn skip_validation() -> SkipValidation {
    SkipValidation
}

impl ClientOption for SkipValidation {
    fn apply(&self, settings: &mut DialSettings) {
        settings.skip_validation = true;
    }
}

/// Sets impersonation. See [`with_impersonated_credentials`].
#[derive(Debug, Clone)]
pub struct WithImpersonatedCredentials(ImpersonationConfig);

/// Impersonates the target principal in `config`.
///
/// Scopes must come from `config` or from [`with_scopes`].
pub fn with_impersonated_credentials(config: ImpersonationConfig) -> WithImpersonatedCredentials {
    WithImpersonatedCredentials(config)
}

impl ClientOption for WithImpersonatedCredentials {
    fn apply(&self, settings: &mut DialSettings) {
        settings.impersonation_config = Some(self.0.clone());
    }
}

/// Sets the quota project. See [`with_quota_project`].
#[derive(Debug, Clone)]
pub struct WithQuotaProject(String);

/// Bills quota and usage to `project`.
pub fn with_quota_project(project: impl Into<String>) -> WithQuotaProject {
    WithQuotaProject(project.into())
}

impl ClientOption for WithQuotaProject {
    fn apply(&self, settings: &mut DialSettings) {
        settings.quota_project = Some(self.0.clone());
    }
}

/// Sets the request reason. See [`with_request_reason`].
#[derive(Debug, Clone)]
pub struct WithRequestReason(String);

/// Attaches a justification for the request, recorded in audit logs.
pub fn with_request_reason(reason: impl Into<String>) -> WithRequestReason {
    WithRequestReason(reason.into())
}

impl ClientOption for WithRequestReason {
    fn apply(&self, settings: &mut DialSettings) {
        settings.request_reason = Some(self.0.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConflictKind;
    use crate::test_utils::{cert_source, http_client, token_source};

    #[test]
    fn scalar_options_are_last_write_wins() {
        let mut settings = DialSettings::new();
        settings.apply([
            with_endpoint("https://a.example.com"),
            with_endpoint("https://b.example.com"),
        ]);

        assert_eq!(settings.endpoint.as_deref(), Some("https://b.example.com"));
    }

    #[test]
    fn list_options_accumulate() {
        let mut settings = DialSettings::new();
        settings.apply([with_scopes(["scope-a"]), with_scopes(["scope-b", "scope-c"])]);
        settings.apply([with_audiences(["a"]), with_audiences(["b"])]);

        assert_eq!(settings.scopes, ["scope-a", "scope-b", "scope-c"]);
        assert_eq!(settings.audiences, ["a", "b"]);
    }

    #[test]
    fn custom_claims_merge() {
        let mut first = HashMap::new();
        first.insert("tenant".to_string(), serde_json::json!("acme"));
        first.insert("tier".to_string(), serde_json::json!(1));
        let mut second = HashMap::new();
        second.insert("tier".to_string(), serde_json::json!(2));

        let mut settings = DialSettings::new();
        settings.apply([with_custom_claims(first), with_custom_claims(second)]);

        assert_eq!(settings.custom_claims.len(), 2);
        assert_eq!(settings.custom_claims["tenant"], serde_json::json!("acme"));
        assert_eq!(settings.custom_claims["tier"], serde_json::json!(2));
    }

    #[test]
    fn options_can_be_reused() {
        let key = with_api_key("AIza-key");
        let mut first = DialSettings::new();
        let mut second = DialSettings::new();
        key.apply(&mut first);
        key.apply(&mut second);

        let first_key = first.api_key.as_ref().map(|k| k.expose_secret().as_str());
        let second_key = second.api_key.as_ref().map(|k| k.expose_secret().as_str());
        assert_eq!(first_key, Some("AIza-key"));
        assert_eq!(first_key, second_key);
    }

    #[test]
    fn every_field_option_sets_its_field() {
        let mut claims = HashMap::new();
        claims.insert("tenant".to_string(), serde_json::json!("acme"));

        let options: Vec<Box<dyn ClientOption>> = vec![
            Box::new(with_default_endpoint("https://api.example.com")),
            Box::new(with_default_mtls_endpoint("https://api.mtls.example.com")),
            Box::new(with_user_agent("my-app/1.0")),
            Box::new(with_credentials_json(b"{}".to_vec())),
            Box::new(with_audiences(["https://api.example.com/"])),
            Box::new(with_telemetry_disabled()),
            Box::new(with_custom_claims(claims)),
            Box::new(with_impersonated_credentials(ImpersonationConfig::new("sa@example.com"))),
            Box::new(with_request_reason("incident-42")),
        ];
        let mut settings = DialSettings::new();
        settings.apply(&options);

        assert_eq!(settings.default_endpoint.as_deref(), Some("https://api.example.com"));
        assert_eq!(
            settings.default_mtls_endpoint.as_deref(),
            Some("https://api.mtls.example.com")
        );
        assert_eq!(settings.user_agent.as_deref(), Some("my-app/1.0"));
        assert!(settings.credentials_json.is_some());
        assert_eq!(settings.audiences.len(), 1);
        assert!(settings.telemetry_disabled);
        assert_eq!(settings.custom_claims["tenant"], serde_json::json!("acme"));
        assert_eq!(
            settings.impersonation_config.as_ref().map(|c| c.target.as_str()),
            Some("sa@example.com")
        );
        assert_eq!(settings.request_reason.as_deref(), Some("incident-42"));
    }

    #[test]
    fn from_options_validates() {
        let options: Vec<Box<dyn ClientOption>> = vec![
            Box::new(with_http_client(http_client())),
            Box::new(with_quota_project("proj-1")),
        ];

        match DialSettings::from_options(&options) {
            Err(Error::InvalidSettings(conflict)) => {
                assert_eq!(conflict.kind(), ConflictKind::HttpClientWithQuotaProject)
            }
            Ok(_) => panic!("http client with quota project should be rejected"),
        }
    }

    #[test]
    fn from_options_honors_skip_validation() {
        let options: Vec<Box<dyn ClientOption>> = vec![
            Box::new(without_authentication()),
            Box::new(with_token_source(token_source())),
            Box::new(skip_validation()),
        ];

        assert!(DialSettings::from_options(&options).is_ok());
    }

    #[test]
    fn legacy_credential_pair_via_options() {
        let options: Vec<Box<dyn ClientOption>> = vec![
            Box::new(with_token_source(token_source())),
            Box::new(with_credentials_file("f.json")),
        ];

        assert!(DialSettings::from_options(&options).is_ok());
    }

    #[test]
    fn credentials_option_counts_as_credential() {
        let creds = Arc::new(Credentials::from_token_source(token_source()));
        let options: Vec<Box<dyn ClientOption>> = vec![
            Box::new(with_credentials(creds)),
            Box::new(with_api_key("key")),
        ];

        let err = DialSettings::from_options(&options).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("invalid dial settings: {}", ConflictKind::MultipleCredentials)
        );
    }

    #[test]
    fn client_cert_source_option() {
        let mut settings = DialSettings::new();
        settings.apply([with_client_cert_source(cert_source())]);

        assert!(settings.client_cert_source.is_some());
        assert!(settings.validate().is_ok());
    }
}
