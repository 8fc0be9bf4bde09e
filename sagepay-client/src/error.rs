//! Error type for client operations.

use sagepay_types::{CredentialsError, ErrorResponse, VendorError};

/// Everything that can go wrong while talking to the Sage Pay API.
///
/// Nothing is retried; each variant is returned to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(#[source] reqwest::Error),

    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error("HTTP error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to decode response body: {0}")]
    Decoding(#[source] serde_json::Error),

    /// Status >= 400 with at least one structured error entry.
    #[error("{errors}")]
    Vendor { status: u16, errors: ErrorResponse },

    /// Status >= 400 whose body held no structured entries.
    #[error("{body}")]
    Unstructured { status: u16, body: String },
}

impl ClientError {
    /// The HTTP status returned by the vendor, if the call got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Vendor { status, .. } | ClientError::Unstructured { status, .. } => {
                Some(*status)
            }
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The structured vendor error entries, if any.
    pub fn vendor_errors(&self) -> &[VendorError] {
        match self {
            ClientError::Vendor { errors, .. } => &errors.errors,
            _ => &[],
        }
    }

    /// True when the request was abandoned because a timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Transport(e) if e.is_timeout())
    }
}
