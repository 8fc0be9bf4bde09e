//! Concrete credential providers.

use std::env;

use sagepay_types::{Credentials, CredentialsError, CredentialsProvider};

/// Default variable holding the API username.
pub const USERNAME_VAR: &str = "SAGE_USERNAME";

/// Default variable holding the API password.
pub const PASSWORD_VAR: &str = "SAGE_PASSWORD";

/// Always hands out the same credentials.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(username, password),
        }
    }
}

impl From<Credentials> for StaticCredentials {
    fn from(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait::async_trait]
impl CredentialsProvider for StaticCredentials {
    async fn get_credentials(&self) -> Result<Credentials, CredentialsError> {
        Ok(self.credentials.clone())
    }
}

/// Reads credentials from the process environment on every call.
///
/// Unset variables yield empty strings rather than an error; the vendor
/// rejects the request instead.
#[derive(Debug, Clone)]
pub struct EnvironmentCredentials {
    username_var: String,
    password_var: String,
}

impl EnvironmentCredentials {
    /// Uses `SAGE_USERNAME` and `SAGE_PASSWORD`.
    pub fn new() -> Self {
        Self::with_vars(USERNAME_VAR, PASSWORD_VAR)
    }

    pub fn with_vars(username_var: impl Into<String>, password_var: impl Into<String>) -> Self {
        Self {
            username_var: username_var.into(),
            password_var: password_var.into(),
        }
    }
}

impl Default for EnvironmentCredentials {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CredentialsProvider for EnvironmentCredentials {
    async fn get_credentials(&self) -> Result<Credentials, CredentialsError> {
        Ok(Credentials {
            username: env::var(&self.username_var).unwrap_or_default(),
            password: env::var(&self.password_var).unwrap_or_default(),
        })
    }
}
