//! # Sage Pay Types
//!
//! Wire types and port traits for the Sage Pay client.
//! This crate has no IO dependencies - only data structures
//! and trait definitions.
//!
//! ## Layout
//!
//! - `dto/` - Request and response bodies, named as the vendor names them
//! - `error/` - The vendor's structured error document
//! - `ports/` - Trait definitions that credential sources must implement

pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use dto::*;
pub use error::{ErrorResponse, VendorError};
pub use ports::{Credentials, CredentialsError, CredentialsProvider};
