//! Fakes and proptest strategies shared by unit tests.

use std::path::PathBuf;
use std::sync::Arc;

use proptest::prelude::*;

use crate::credentials::{Credentials, ImpersonationConfig, Token, TokenSource};
use crate::secret::Secret;
use crate::setting::{SettingKey, SettingValue};
use crate::settings::DialSettings;
use crate::transport::{
    BoxError, CertificateRequest, ClientCertSource, ClientCertificate, ConnPool, DialOption,
    GrpcConn, HttpClient,
};

#[derive(Debug)]
pub(crate) struct FakeTokenSource;

impl TokenSource for FakeTokenSource {
    fn token(&self) -> Result<Token, BoxError> {
        Ok(Token::bearer("fake-token"))
    }
}

#[derive(Debug)]
pub(crate) struct FakeHttpClient;

impl HttpClient for FakeHttpClient {}

#[derive(Debug)]
pub(crate) struct FakeDialOption;

impl DialOption for FakeDialOption {}

#[derive(Debug)]
pub(crate) struct FakeConn(pub(crate) String);

impl GrpcConn for FakeConn {
    fn target(&self) -> &str {
        &self.0
    }
}

#[derive(Debug)]
pub(crate) struct FakePool;

impl ConnPool for FakePool {}

pub(crate) fn token_source() -> Arc<dyn TokenSource> {
    Arc::new(FakeTokenSource)
}

pub(crate) fn http_client() -> Arc<dyn HttpClient> {
    Arc::new(FakeHttpClient)
}

pub(crate) fn dial_option() -> Arc<dyn DialOption> {
    Arc::new(FakeDialOption)
}

pub(crate) fn conn(target: &str) -> Arc<dyn GrpcConn> {
    Arc::new(FakeConn(target.to_string()))
}

pub(crate) fn pool() -> Arc<dyn ConnPool> {
    Arc::new(FakePool)
}

pub(crate) fn cert_source() -> ClientCertSource {
    Arc::new(
        |_: &CertificateRequest| -> Result<Option<ClientCertificate>, BoxError> { Ok(None) },
    )
}

/// Strategy: settings with every field independently present or absent.
pub(crate) fn arb_settings() -> impl Strategy<Value = DialSettings> {
    let credentials = prop::array::uniform5(any::<bool>());
    let transport = prop::array::uniform6(any::<bool>());
    let flags = (any::<bool>(), any::<bool>(), any::<bool>(), 0usize..4);
    let lists = (any::<bool>(), any::<bool>(), any::<bool>());

    (credentials, transport, flags, lists).prop_map(
        |(creds, transport, (no_auth, skip, impersonate, pool_size), (scopes, audiences, imp_scopes))| {
            let mut settings = DialSettings::new();
            if creds[0] {
                settings.credentials =
                    Some(Arc::new(Credentials::from_token_source(token_source())));
            }
            if creds[1] {
                settings.credentials_json = Some(Secret::new(b"{}".to_vec()));
            }
            if creds[2] {
                settings.credentials_file = Some(PathBuf::from("f.json"));
            }
            if creds[3] {
                settings.api_key = Some(Secret::new("key".to_string()));
            }
            if creds[4] {
                settings.token_source = Some(token_source());
            }
            if transport[0] {
                settings.http_client = Some(http_client());
            }
            if transport[1] {
                settings.grpc_conn_pool = Some(pool());
            }
            if transport[2] {
                settings.set_setting(SettingKey::GrpcConn, SettingValue::GrpcConn(conn("t")));
            }
            if transport[3] {
                settings.grpc_dial_opts.push(dial_option());
            }
            if transport[4] {
                settings.client_cert_source = Some(cert_source());
            }
            if transport[5] {
                settings.quota_project = Some("proj-1".to_string());
            }
            if scopes {
                settings.scopes.push("scope-a".to_string());
            }
            if audiences {
                settings.audiences.push("aud-a".to_string());
            }
            if impersonate {
                let mut config = ImpersonationConfig::new("sa@example.com");
                if imp_scopes {
                    config.scopes.push("scope-b".to_string());
                }
                settings.impersonation_config = Some(config);
            }
            settings.no_auth = no_auth;
            settings.skip_validation = skip;
            settings.grpc_conn_pool_size = pool_size;
            settings
        },
    )
}
