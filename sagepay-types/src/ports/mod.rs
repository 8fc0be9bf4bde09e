//! Port traits (interfaces for adapters).
//!
//! The client depends on these traits, not on concrete credential sources.

mod credentials;

pub use credentials::{Credentials, CredentialsError, CredentialsProvider};
