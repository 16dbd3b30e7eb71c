//! Secret string wrapper for sensitive data.
//!
//! This module provides a wrapper type that prevents accidental logging
//! of sensitive data like API keys and platform tokens.

use std::fmt;

/// A wrapper for sensitive strings that redacts the value in Debug/Display output.
///
/// # Example
///
/// ```
/// use learning_compass::config::SecretString;
///
/// let secret = SecretString::new("sk-ant-api-key-123");
/// assert_eq!(format!("{:?}", secret), "<REDACTED>");
/// assert_eq!(secret.expose(), "sk-ant-api-key-123");
/// ```
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    /// Creates a new `SecretString` from any string-like value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Exposes the underlying secret value.
    ///
    /// Use this method only when you need to actually use the secret,
    /// such as when making API calls.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true if the secret is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the length of the secret.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<REDACTED>")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<REDACTED>")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
