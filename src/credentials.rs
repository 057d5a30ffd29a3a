//! Credential inputs accepted by [`DialSettings`](crate::DialSettings).
//!
//! Acquiring tokens and parsing credential files belong to the auth layer;
//! this module only defines the shapes that layer hands to settings.

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use crate::secret::Secret;
use crate::transport::BoxError;

/// Source of OAuth2 access tokens.
pub trait TokenSource: fmt::Debug + Send + Sync {
    /// Returns a valid token, refreshing it if needed.
    fn token(&self) -> Result<Token, BoxError>;
}

/// An OAuth2 access token.
#[derive(Debug)]
pub struct Token {
    /// The bearer credential
    pub access_token: Secret<String>,
    /// Token type, usually `Bearer`
    pub token_type: String,
    /// When the token stops being valid, if known
    pub expiry: Option<SystemTime>,
}

impl Token {
    /// Creates a bearer token with no known expiry.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: Secret::new(access_token.into()),
            token_type: "Bearer".to_string(),
            expiry: None,
        }
    }
}

/// Credentials that were already parsed by the auth layer.
#[derive(Debug)]
pub struct Credentials {
    /// Project the credentials belong to, if known
    pub project_id: Option<String>,
    /// Token source derived from the credentials
    pub token_source: Arc<dyn TokenSource>,
    /// The raw JSON the credentials were parsed from, if any
    pub json: Option<Secret<Vec<u8>>>,
}

impl Credentials {
    /// Creates credentials from a token source alone.
    pub fn from_token_source(token_source: Arc<dyn TokenSource>) -> Self {
        Self {
            project_id: None,
            token_source,
            json: None,
        }
    }
}

/// Service account impersonation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImpersonationConfig {
    /// Principal to impersonate, e.g. a service account email
    pub target: String,
    /// Delegation chain, each principal granting the next
    pub delegates: Vec<String>,
    /// Scopes for the impersonated token. Falls back to the settings' scopes when empty.
    pub scopes: Vec<String>,
}

impl ImpersonationConfig {
    /// Creates a config impersonating `target` with no delegates or scopes.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }
}
