//! Data Transfer Objects for the Sage Pay REST API.
//!
//! Field names mirror the vendor's JSON contract exactly. Optional request
//! fields are omitted from the wire when unset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Merchant Session Keys
// ─────────────────────────────────────────────────────────────────────────────

/// Request body for `POST /merchant-session-keys`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionKeyRequest {
    pub vendor_name: String,
}

/// A short-lived merchant session key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionKey {
    #[serde(rename = "merchantSessionKey")]
    pub key: String,
    pub expiry: DateTime<Utc>,
}

impl SessionKey {
    /// Returns true once the key's expiry has passed.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiry
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Card Identifiers
// ─────────────────────────────────────────────────────────────────────────────

/// Raw card details exchanged for a card identifier.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub cardholder_name: String,
    pub card_number: String,
    /// Expiry in `MMYY` form.
    pub expiry_date: String,
    pub security_code: String,
}

// Card numbers must never end up in logs.
impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("cardholder_name", &self.cardholder_name)
            .field("card_number", &"<redacted>")
            .field("expiry_date", &self.expiry_date)
            .field("security_code", &"<redacted>")
            .finish()
    }
}

/// Request body for `POST /card-identifiers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardIdentifierRequest {
    pub card_details: CardDetails,
}

/// A tokenised card reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardIdentifier {
    #[serde(rename = "cardIdentifier")]
    pub identifier: String,
    pub expiry: DateTime<Utc>,
    pub card_type: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Transactions
// ─────────────────────────────────────────────────────────────────────────────

/// The kind of transaction to instigate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// A one-time payment
    Payment,
    /// A repeat of an earlier payment
    Repeat,
    /// A refund against an earlier payment
    Refund,
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Payment" => Ok(TransactionType::Payment),
            "Repeat" => Ok(TransactionType::Repeat),
            "Refund" => Ok(TransactionType::Refund),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Payment => write!(f, "Payment"),
            TransactionType::Repeat => write!(f, "Repeat"),
            TransactionType::Refund => write!(f, "Refund"),
        }
    }
}

/// How 3-D Secure should be applied to a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreeDSMode {
    /// Use the account's configured setting
    #[default]
    #[serde(rename = "UseMSPSetting")]
    UseMspSetting,
    /// Always apply 3DS
    Force,
    /// Never apply 3DS
    Disable,
    /// Apply 3DS but skip fraud-prevention rules
    ForceIgnoringRules,
}

/// Request to create a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub transaction_type: TransactionType,
    pub payment_method: RequestPaymentMethod,
    /// Amount in the currency's smallest unit
    pub amount: i64,
    pub currency: String,
    pub description: String,
    /// Merchant-side unique reference
    pub vendor_tx_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_method: Option<String>,
    #[serde(rename = "apply3dSecure")]
    pub apply_3d_secure: ThreeDSMode,
    pub customer_first_name: String,
    pub customer_last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub billing_address: BillingAddress,
}

/// The payment method for a transaction request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPaymentMethod {
    pub card: RequestCard,
}

/// Card reference used to pay for a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCard {
    pub merchant_session_key: String,
    pub card_identifier: String,
    pub reusable: bool,
    pub save: bool,
}

impl RequestPaymentMethod {
    /// Pays with a freshly tokenised card.
    pub fn card(merchant_session_key: impl Into<String>, card_identifier: impl Into<String>) -> Self {
        Self {
            card: RequestCard {
                merchant_session_key: merchant_session_key.into(),
                card_identifier: card_identifier.into(),
                reusable: false,
                save: false,
            },
        }
    }
}

/// Billing address attached to a transaction request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAddress {
    pub address1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// Response after creating or fetching a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub status_code: String,
    pub status_detail: String,
    pub transaction_id: String,
    /// Kept as text: the vendor reports types (`Deferred`, `Authenticate`, ...)
    /// that cannot be requested through this client.
    pub transaction_type: String,
    pub bank_response_code: String,
    pub bank_auth_code: String,
    pub status: String,
    pub currency: String,
    pub payment_method: ResponsePaymentMethod,
    /// Absent when 3DS was not attempted
    #[serde(
        rename = "3DSecure",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub three_d_secure: Option<ThreeDSecure>,
    pub amount: AmountBreakdown,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acs_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pa_req: Option<String>,
}

impl TransactionResponse {
    /// The transaction type, when it is one this client can request.
    pub fn kind(&self) -> Option<TransactionType> {
        self.transaction_type.parse().ok()
    }

    /// True when the vendor is waiting on a 3DS challenge for this transaction.
    pub fn requires_three_ds_challenge(&self) -> bool {
        self.acs_url.is_some() && self.pa_req.is_some()
    }
}

/// Payment method details echoed back by the vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePaymentMethod {
    pub card: ResponseCard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseCard {
    pub last_four_digits: String,
    pub card_type: String,
}

/// 3-D Secure outcome attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreeDSecure {
    pub status: String,
}

/// Amount breakdown in the currency's smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountBreakdown {
    pub total_amount: i64,
    pub sale_amount: i64,
    pub surcharge_amount: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// 3-D Secure
// ─────────────────────────────────────────────────────────────────────────────

/// Request body for `POST /transactions/{id}/3d-secure`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreeDSChallengeResponse {
    pub pa_res: String,
}

/// Result of answering a 3DS challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreeDSResult {
    pub status: String,
}
