use std::fmt;

/// A wrapper that keeps credential material out of logs and `Debug` output.
///
/// API keys, raw credentials JSON, access tokens and private keys held by
/// [`DialSettings`](crate::DialSettings) are stored as `Secret<T>`. The wrapped
/// value can only be read through [`expose_secret`](Self::expose_secret).
///
/// # Security Properties
///
/// - Does NOT implement `Deref`, `AsRef`, `Borrow`, `Clone`, or `Copy`
/// - Debug and Display output is always `[REDACTED]`
/// - No type information is leaked in formatted output
///
/// # Examples
///
/// ```
/// use dial_settings::Secret;
///
/// let api_key = Secret::new("AIza-example-key".to_string());
///
/// assert_eq!(format!("{:?}", api_key), "[REDACTED]");
/// assert_eq!(api_key.expose_secret(), "AIza-example-key");
/// ```
// Do NOT add Clone, Copy, or Default derives: copies of credentials must be explicit.
pub struct Secret<T> {
    // Must stay private, otherwise redaction is bypassed.
    inner: T,
}

impl<T> Secret<T> {
    /// Wraps a sensitive value in a `Secret`.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Explicitly exposes the secret value.
    ///
    /// Callers must not log or display the returned reference.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

impl<T: Clone> Secret<T> {
    /// Makes an explicit copy of the secret.
    ///
    /// Used by options that are applied to more than one settings record.
    pub(crate) fn duplicate(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
