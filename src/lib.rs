//! Connection settings for API clients.
//!
//! This crate collects the transport and authentication options a client is
//! constructed with into a [`DialSettings`] record, and checks that the
//! chosen combination is consistent before any connection is made.
//!
//! # Core Types
//!
//! - [`DialSettings`]: every transport/auth knob, plus a keyed side-table for optional integrations
//! - [`ClientOption`]: a single configuration change; options are the record's only writers
//! - [`Conflict`]: the first pair of incompatible settings found by [`DialSettings::validate`]
//! - [`Secret<T>`]: wrapper that redacts API keys and credential bytes in logs/output
//!
//! # Examples
//!
//! ```
//! use dial_settings::{
//!     with_credentials_file, with_http_client, with_quota_project, ClientOption, ConflictKind,
//!     DialSettings, HttpClient,
//! };
//! use std::sync::Arc;
//!
//! #[derive(Debug)]
//! struct MyClient;
//! impl HttpClient for MyClient {}
//!
//! // Compatible options build validated settings.
//! let settings = DialSettings::from_options([with_credentials_file("key.json")])
//!     .expect("a single credential is valid");
//! assert!(settings.has_credentials());
//!
//! // A caller-supplied HTTP client cannot carry system parameters.
//! let options: Vec<Box<dyn ClientOption>> = vec![
//!     Box::new(with_http_client(Arc::new(MyClient))),
//!     Box::new(with_quota_project("proj-1")),
//! ];
//! let mut settings = DialSettings::new();
//! settings.apply(&options);
//!
//! let conflict = settings.validate().unwrap_err();
//! assert_eq!(conflict.kind(), ConflictKind::HttpClientWithQuotaProject);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod credentials;
mod error;
mod grpc;
mod option;
mod secret;
mod setting;
mod settings;
mod transport;
mod validate;

#[cfg(test)]
mod test_utils;

pub use credentials::{Credentials, ImpersonationConfig, Token, TokenSource};
pub use error::{Conflict, ConflictKind, Error};
pub use grpc::{
    grpc_conn, with_conn_pool, with_grpc_conn, with_grpc_connection_pool, with_grpc_dial_option,
    GrpcConnSetting, WithConnPool, WithGrpcConnectionPool, WithGrpcDialOption,
};
pub use option::{
    skip_validation, with_api_key, with_audiences, with_client_cert_source, with_credentials,
    with_credentials_file, with_credentials_json, with_custom_claims, with_default_endpoint,
    with_default_mtls_endpoint, with_endpoint, with_http_client, with_impersonated_credentials,
    with_quota_project, with_request_reason, with_scopes, with_telemetry_disabled,
    with_token_source, with_user_agent, without_authentication, ClientOption, SkipValidation,
    WithApiKey, WithAudiences, WithClientCertSource, WithCredentials, WithCredentialsFile,
    WithCredentialsJson, WithCustomClaims, WithDefaultEndpoint, WithDefaultMtlsEndpoint,
    WithEndpoint, WithHttpClient, WithImpersonatedCredentials, WithQuotaProject,
    WithRequestReason, WithScopes, WithTelemetryDisabled, WithTokenSource, WithUserAgent,
    WithoutAuthentication,
};
pub use secret::Secret;
pub use setting::{SettingKey, SettingValue};
pub use settings::DialSettings;
pub use transport::{
    BoxError, CertificateRequest, ClientCertSource, ClientCertificate, ConnPool, DialOption,
    GrpcConn, HttpClient,
};
