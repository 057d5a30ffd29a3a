use crate::error::{Conflict, ConflictKind};
use crate::setting::SettingKey;
use crate::settings::DialSettings;

impl DialSettings {
    /// Reports the first conflicting combination of settings.
    ///
    /// Rules are checked in the order of [`ConflictKind::ALL`], so the same
    /// settings always produce the same error. Returns `Ok(())` without
    /// checking anything when [`skip_validation`](Self::skip_validation) is set.
    ///
    /// # Errors
    ///
    /// Returns a [`Conflict`] naming the two settings that cannot be combined.
    ///
    /// # Examples
    ///
    /// ```
    /// use dial_settings::{ConflictKind, DialSettings};
    ///
    /// let mut settings = DialSettings::new();
    /// settings.scopes = vec!["scope-a".to_string()];
    /// settings.audiences = vec!["aud-a".to_string()];
    ///
    /// let err = settings.validate().unwrap_err();
    /// assert_eq!(err.kind(), ConflictKind::ScopesWithAudiences);
    /// ```
    pub fn validate(&self) -> Result<(), Conflict> {
        if self.skip_validation {
            tracing::debug!("dial settings validation skipped");
            return Ok(());
        }

        for kind in ConflictKind::ALL {
            if self.violates(kind) {
                return Err(Conflict::new(kind));
            }
        }

        tracing::trace!("dial settings validated");
        Ok(())
    }

    /// Checks a single rule.
    fn violates(&self, kind: ConflictKind) -> bool {
        let has_http_client = self.http_client.is_some();
        let has_grpc_conn = self.is_set(SettingKey::GrpcConn);
        let has_conn_pool = self.grpc_conn_pool.is_some();
        let has_dial_opts = !self.grpc_dial_opts.is_empty();
        let has_cert_source = self.client_cert_source.is_some();

        match kind {
            ConflictKind::NoAuthWithCredentials => self.no_auth && self.has_credentials(),
            ConflictKind::ScopesWithAudiences => {
                !self.scopes.is_empty() && !self.audiences.is_empty()
            }
            ConflictKind::MultipleCredentials => {
                // Token source alongside a credentials file is still accepted
                // for backwards compatibility.
                let n = self.credential_count();
                let legacy_pair = n == 2
                    && self.token_source.is_some()
                    && self.has_credentials_file();
                n > 1 && !legacy_pair
            }
            ConflictKind::GrpcConnWithConnPool => has_grpc_conn && has_conn_pool,
            ConflictKind::HttpClientWithConnPool => has_http_client && has_conn_pool,
            ConflictKind::HttpClientWithGrpcConn => has_http_client && has_grpc_conn,
            ConflictKind::HttpClientWithDialOptions => has_http_client && has_dial_opts,
            ConflictKind::HttpClientWithQuotaProject => {
                has_http_client && non_empty(&self.quota_project)
            }
            ConflictKind::HttpClientWithRequestReason => {
                has_http_client && non_empty(&self.request_reason)
            }
            ConflictKind::HttpClientWithClientCertSource => has_http_client && has_cert_source,
            ConflictKind::ClientCertSourceWithGrpc => {
                has_cert_source
                    && (has_grpc_conn
                        || has_conn_pool
                        || self.grpc_conn_pool_size != 0
                        || has_dial_opts)
            }
            ConflictKind::ImpersonationWithoutScopes => self
                .impersonation_config
                .as_ref()
                .is_some_and(|config| config.scopes.is_empty() && self.scopes.is_empty()),
        }
    }
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}
