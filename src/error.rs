use std::fmt;

/// Errors that can occur while building dial settings.
#[derive(Debug)]
pub enum Error {
    /// The applied options conflict with each other
    InvalidSettings(Conflict),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSettings(c) => write!(f, "invalid dial settings: {}", c),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidSettings(c) => Some(c),
        }
    }
}

impl From<Conflict> for Error {
    fn from(c: Conflict) -> Self {
        Error::InvalidSettings(c)
    }
}

/// A pair of settings that cannot be used together.
///
/// Returned by [`DialSettings::validate`](crate::DialSettings::validate) for the
/// first conflicting combination found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    kind: ConflictKind,
}

impl Conflict {
    /// Creates a conflict of the given kind.
    pub fn new(kind: ConflictKind) -> Self {
        Self { kind }
    }

    /// Returns which rule was violated.
    pub fn kind(&self) -> ConflictKind {
        self.kind
    }

    /// Returns the two settings that conflict.
    pub fn settings(&self) -> (&'static str, &'static str) {
        self.kind.settings()
    }

    /// Returns the human-readable message for this conflict.
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for Conflict {}

impl From<ConflictKind> for Conflict {
    fn from(kind: ConflictKind) -> Self {
        Self::new(kind)
    }
}

/// The kind of settings conflict.
///
/// Each variant corresponds to exactly one validation rule. Messages are
/// stable and always name both conflicting settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    /// Authentication was disabled while a credential was supplied
    NoAuthWithCredentials,
    /// Both scopes and audiences were supplied
    ScopesWithAudiences,
    /// More than one credential form was supplied
    MultipleCredentials,
    /// An explicit gRPC connection was supplied together with a connection pool
    GrpcConnWithConnPool,
    /// An HTTP client was supplied together with a gRPC connection pool
    HttpClientWithConnPool,
    /// An HTTP client was supplied together with an explicit gRPC connection
    HttpClientWithGrpcConn,
    /// An HTTP client was supplied together with gRPC dial options
    HttpClientWithDialOptions,
    /// An HTTP client was supplied together with a quota project
    HttpClientWithQuotaProject,
    /// An HTTP client was supplied together with a request reason
    HttpClientWithRequestReason,
    /// An HTTP client was supplied together with a client certificate source
    HttpClientWithClientCertSource,
    /// A client certificate source was supplied together with gRPC settings
    ClientCertSourceWithGrpc,
    /// Impersonation was requested without any scopes
    ImpersonationWithoutScopes,
}

impl ConflictKind {
    /// Every kind, in the order the validator checks them.
    pub const ALL: [ConflictKind; 12] = [
        ConflictKind::NoAuthWithCredentials,
        ConflictKind::ScopesWithAudiences,
        ConflictKind::MultipleCredentials,
        ConflictKind::GrpcConnWithConnPool,
        ConflictKind::HttpClientWithConnPool,
        ConflictKind::HttpClientWithGrpcConn,
        ConflictKind::HttpClientWithDialOptions,
        ConflictKind::HttpClientWithQuotaProject,
        ConflictKind::HttpClientWithRequestReason,
        ConflictKind::HttpClientWithClientCertSource,
        ConflictKind::ClientCertSourceWithGrpc,
        ConflictKind::ImpersonationWithoutScopes,
    ];

    /// Returns the names of the two options involved in the conflict.
    pub fn settings(self) -> (&'static str, &'static str) {
        match self {
            Self::NoAuthWithCredentials => ("without_authentication", "credentials"),
            Self::ScopesWithAudiences => ("with_scopes", "with_audiences"),
            Self::MultipleCredentials => ("credentials", "token_source"),
            Self::GrpcConnWithConnPool => ("with_grpc_conn", "with_conn_pool"),
            Self::HttpClientWithConnPool => ("with_http_client", "with_conn_pool"),
            Self::HttpClientWithGrpcConn => ("with_http_client", "with_grpc_conn"),
            Self::HttpClientWithDialOptions => ("with_http_client", "with_grpc_dial_option"),
            Self::HttpClientWithQuotaProject => ("with_http_client", "with_quota_project"),
            Self::HttpClientWithRequestReason => ("with_http_client", "with_request_reason"),
            Self::HttpClientWithClientCertSource => {
                ("with_http_client", "with_client_cert_source")
            }
            Self::ClientCertSourceWithGrpc => ("with_client_cert_source", "gRPC settings"),
            Self::ImpersonationWithoutScopes => ("with_impersonated_credentials", "with_scopes"),
        }
    }

    /// Returns the stable message for this kind.
    pub fn message(self) -> &'static str {
        match self {
            Self::NoAuthWithCredentials => {
                "without_authentication is incompatible with any option that provides credentials"
            }
            Self::ScopesWithAudiences => "with_scopes is incompatible with with_audiences",
            Self::MultipleCredentials => {
                "multiple credential options provided: at most one of credentials, credentials_json, \
                 credentials_file, api_key and token_source may be set"
            }
            Self::GrpcConnWithConnPool => "with_grpc_conn is incompatible with with_conn_pool",
            Self::HttpClientWithConnPool => "with_http_client is incompatible with with_conn_pool",
            Self::HttpClientWithGrpcConn => "with_http_client is incompatible with with_grpc_conn",
            Self::HttpClientWithDialOptions => {
                "with_http_client is incompatible with with_grpc_dial_option"
            }
            Self::HttpClientWithQuotaProject => {
                "with_http_client is incompatible with with_quota_project"
            }
            Self::HttpClientWithRequestReason => {
                "with_http_client is incompatible with with_request_reason"
            }
            Self::HttpClientWithClientCertSource => {
                "with_http_client is incompatible with with_client_cert_source"
            }
            Self::ClientCertSourceWithGrpc => {
                "with_client_cert_source is only supported for HTTP; gRPC settings are incompatible"
            }
            Self::ImpersonationWithoutScopes => {
                "with_impersonated_credentials requires scopes from with_scopes or the impersonation config"
            }
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_kind_has_a_distinct_message() {
        let messages: HashSet<_> = ConflictKind::ALL.iter().map(|k| k.message()).collect();
        assert_eq!(messages.len(), ConflictKind::ALL.len());
    }

    #[test]
    fn messages_name_both_settings() {
        for kind in ConflictKind::ALL {
            let (first, second) = kind.settings();
            let message = kind.message();
            assert_ne!(first, second, "{:?} names one setting twice", kind);
            assert!(message.contains(first), "{:?} does not name {}", kind, first);
            assert!(message.contains(second), "{:?} does not name {}", kind, second);
        }
    }

    #[test]
    fn conflict_display_matches_kind() {
        let conflict = Conflict::new(ConflictKind::HttpClientWithQuotaProject);
        assert_eq!(
            conflict.to_string(),
            "with_http_client is incompatible with with_quota_project"
        );
        assert_eq!(conflict.message(), conflict.kind().message());
    }

    #[test]
    fn error_wraps_conflict() {
        let err: Error = Conflict::new(ConflictKind::ScopesWithAudiences).into();
        assert_eq!(
            err.to_string(),
            "invalid dial settings: with_scopes is incompatible with with_audiences"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
