//! Side-table keys and values for optional integrations.
//!
//! Integrations that should not grow [`DialSettings`](crate::DialSettings)
//! register a key here and a matching [`SettingValue`] variant. The owning
//! integration provides the typed accessor.

use std::fmt;
use std::sync::Arc;

use crate::transport::GrpcConn;

/// Key of a side-table entry. Each key is unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// A pre-built gRPC connection used in place of dialing one
    GrpcConn,
}

impl SettingKey {
    /// Returns the stable name of the key.
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::GrpcConn => "grpc_conn",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value stored in the side-table.
#[derive(Debug, Clone)]
pub enum SettingValue {
    /// Value for [`SettingKey::GrpcConn`]
    GrpcConn(Arc<dyn GrpcConn>),
}

impl SettingValue {
    /// Returns the key this value belongs under.
    pub fn key(&self) -> SettingKey {
        match self {
            SettingValue::GrpcConn(_) => SettingKey::GrpcConn,
        }
    }
}
