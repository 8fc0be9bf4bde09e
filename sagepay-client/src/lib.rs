//! # Sage Pay Client SDK
//!
//! A typed Rust client for the Sage Pay (Opayo) Pi REST API.
//!
//! ```no_run
//! use sagepay_client::{EnvironmentCredentials, SagePayClient};
//!
//! # async fn run() -> Result<(), sagepay_client::ClientError> {
//! let client = SagePayClient::builder(EnvironmentCredentials::new())
//!     .test_mode(true)
//!     .build();
//!
//! let key = client.get_session_key("sandbox").await?;
//! println!("session key {} expires at {}", key.key, key.expiry);
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
pub mod config;
pub mod credentials;
pub mod error;

pub use client::{
    ClientBuilder, DEBUG_SEPARATOR, DebugSink, PRODUCTION_HOST, SagePayClient, TEST_HOST,
    USER_AGENT,
};
pub use config::{ClientConfig, ConfigError};
pub use credentials::{EnvironmentCredentials, StaticCredentials};
pub use error::ClientError;
pub use reqwest::Method;
pub use sagepay_types as types;
pub use sagepay_types::{Credentials, CredentialsError, CredentialsProvider};
