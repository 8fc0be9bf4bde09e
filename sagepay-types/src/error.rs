//! Vendor error documents.
//!
//! Any response with status >= 400 carries either an `{"errors": [...]}`
//! document or free text.

use serde::{Deserialize, Deserializer, Serialize};

/// A single error entry returned by the Sage Pay API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("Error({code}): {user_message} ({property}, {description})")]
#[serde(default)]
pub struct VendorError {
    pub code: i64,
    pub property: String,
    pub description: String,
    /// Message suitable for showing to the payer
    #[serde(rename = "clientMessage")]
    pub user_message: String,
}

/// The error document returned alongside a failing status code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<VendorError>,
}

// `"errors": null` carries no entries, same as a missing key.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<VendorError>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<VendorError>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ErrorResponse {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorResponse {}
