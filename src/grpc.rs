//! gRPC-only client options.
//!
//! A pre-built connection is carried in the settings side-table under
//! [`SettingKey::GrpcConn`] so the core record does not depend on it.

use std::sync::Arc;

use crate::option::ClientOption;
use crate::setting::{SettingKey, SettingValue};
use crate::settings::DialSettings;
use crate::transport::{ConnPool, DialOption, GrpcConn};

/// Supplies the gRPC connection to use. See [`with_grpc_conn`].
#[derive(Debug, Clone)]
pub struct GrpcConnSetting(Arc<dyn GrpcConn>);

/// Uses `conn` as the basis of all communication instead of dialing.
///
/// Only for services that support gRPC. Takes precedence over every other
/// transport option, and cannot be combined with [`with_conn_pool`] or an
/// HTTP client.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use dial_settings::{grpc_conn, with_grpc_conn, ClientOption, DialSettings, GrpcConn};
///
/// #[derive(Debug)]
/// struct Conn;
///
/// impl GrpcConn for Conn {
///     fn target(&self) -> &str {
///         "dns:///pubsub.googleapis.com:443"
///     }
/// }
///
/// let mut settings = DialSettings::new();
/// with_grpc_conn(Arc::new(Conn)).apply(&mut settings);
///
/// let conn = grpc_conn(&settings).expect("connection was supplied");
/// assert_eq!(conn.target(), "dns:///pubsub.googleapis.com:443");
/// ```
pub fn with_grpc_conn(conn: Arc<dyn GrpcConn>) -> GrpcConnSetting {
    GrpcConnSetting(conn)
}

impl ClientOption for GrpcConnSetting {
    fn apply(&self, settings: &mut DialSettings) {
        let value = SettingValue::GrpcConn(Arc::clone(&self.0));
        settings.set_setting(SettingKey::GrpcConn, value);
    }
}

/// Returns the connection supplied with [`with_grpc_conn`], if any.
pub fn grpc_conn(settings: &DialSettings) -> Option<Arc<dyn GrpcConn>> {
    match settings.get_setting(SettingKey::GrpcConn)? {
        SettingValue::GrpcConn(conn) => Some(Arc::clone(conn)),
    }
}

/// Appends a dial option. See [`with_grpc_dial_option`].
#[derive(Debug, Clone)]
pub struct WithGrpcDialOption(Arc<dyn DialOption>);

/// Appends `opt` to the options of the underlying gRPC dial.
///
/// Has no effect together with [`with_grpc_conn`].
pub fn with_grpc_dial_option(opt: Arc<dyn DialOption>) -> WithGrpcDialOption {
    WithGrpcDialOption(opt)
}

impl ClientOption for WithGrpcDialOption {
    fn apply(&self, settings: &mut DialSettings) {
        settings.grpc_dial_opts.push(Arc::clone(&self.0));
    }
}

/// Sets the connection pool size. See [`with_grpc_connection_pool`].
#[derive(Debug, Clone, Copy)]
pub struct WithGrpcConnectionPool(usize);

/// Balances requests across a pool of `size` gRPC connections.
pub fn with_grpc_connection_pool(size: usize) -> WithGrpcConnectionPool {
    WithGrpcConnectionPool(size)
}

impl ClientOption for WithGrpcConnectionPool {
    fn apply(&self, settings: &mut DialSettings) {
        settings.grpc_conn_pool_size = self.0;
    }
}

/// Supplies a connection pool. See [`with_conn_pool`].
#[derive(Debug, Clone)]
pub struct WithConnPool(Arc<dyn ConnPool>);

/// Uses an existing pool of gRPC connections.
pub fn with_conn_pool(pool: Arc<dyn ConnPool>) -> WithConnPool {
    WithConnPool(pool)
}

impl ClientOption for WithConnPool {
    fn apply(&self, settings: &mut DialSettings) {
        settings.grpc_conn_pool = Some(Arc::clone(&self.0));
    }
}
