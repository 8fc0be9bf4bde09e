//! Typed Sage Pay operations built on the JSON pipeline.

use reqwest::Method;
use sagepay_types::{
    CardDetails, CardIdentifier, CardIdentifierRequest, SessionKey, SessionKeyRequest,
    ThreeDSChallengeResponse, ThreeDSResult, TransactionRequest, TransactionResponse,
};

use crate::client::{Auth, SagePayClient};
use crate::error::ClientError;

impl SagePayClient {
    /// Gets a new merchant session key.
    #[tracing::instrument(skip(self))]
    pub async fn get_session_key(&self, vendor_name: &str) -> Result<SessionKey, ClientError> {
        let req = SessionKeyRequest {
            vendor_name: vendor_name.to_string(),
        };
        self.send_json(Method::POST, "/merchant-session-keys", Some(&req))
            .await
    }

    /// Exchanges raw card details for a card identifier.
    ///
    /// Authorised with the merchant session key rather than the account
    /// credentials.
    #[tracing::instrument(skip_all)]
    pub async fn create_card_identifier(
        &self,
        merchant_session_key: &str,
        card_details: &CardDetails,
    ) -> Result<CardIdentifier, ClientError> {
        let req = CardIdentifierRequest {
            card_details: card_details.clone(),
        };
        self.send_json_with_auth(
            Method::POST,
            "/card-identifiers",
            Some(&req),
            Auth::Bearer(merchant_session_key),
        )
        .await
    }

    /// Creates a transaction.
    #[tracing::instrument(
        skip(self, transaction),
        fields(vendor_tx_code = %transaction.vendor_tx_code, amount = transaction.amount)
    )]
    pub async fn create_transaction(
        &self,
        transaction: &TransactionRequest,
    ) -> Result<TransactionResponse, ClientError> {
        self.send_json(Method::POST, "/transactions", Some(transaction))
            .await
    }

    /// Gets a transaction by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<TransactionResponse, ClientError> {
        self.send_json::<(), _>(
            Method::GET,
            &format!("/transactions/{}", transaction_id),
            None,
        )
        .await
    }

    /// Answers a 3-D Secure challenge with the payload returned by the ACS.
    #[tracing::instrument(skip(self, pa_res))]
    pub async fn respond_three_ds(
        &self,
        transaction_id: &str,
        pa_res: &str,
    ) -> Result<ThreeDSResult, ClientError> {
        let req = ThreeDSChallengeResponse {
            pa_res: pa_res.to_string(),
        };
        self.send_json(
            Method::POST,
            &format!("/transactions/{}/3d-secure", transaction_id),
            Some(&req),
        )
        .await
    }
}
