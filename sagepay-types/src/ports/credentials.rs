//! Credentials provider port.
//!
//! Anything able to hand out an API username/password pair can back the
//! client: static configuration, the process environment, a secret store.

use std::sync::Arc;

/// API credentials used for HTTP basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Error type for credential retrieval.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("Credentials unavailable: {0}")]
    Unavailable(String),

    #[error("Credentials source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Port trait for credential sources.
///
/// Called once per outbound request; implementations may cache or recompute.
#[async_trait::async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Returns the credentials to use right now.
    async fn get_credentials(&self) -> Result<Credentials, CredentialsError>;
}

#[async_trait::async_trait]
impl<P: CredentialsProvider + ?Sized> CredentialsProvider for Arc<P> {
    async fn get_credentials(&self) -> Result<Credentials, CredentialsError> {
        (**self).get_credentials().await
    }
}

#[async_trait::async_trait]
impl<P: CredentialsProvider + ?Sized> CredentialsProvider for Box<P> {
    async fn get_credentials(&self) -> Result<Credentials, CredentialsError> {
        (**self).get_credentials().await
    }
}
