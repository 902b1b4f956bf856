//! Up bank API client
//!
//! Two read-only calls: the account list and a per-account transaction list
//! reached through the account's `relationships.transactions.links.related`.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub mod error;
pub mod types;

pub use error::ClientError;
pub use types::{
    minor_unit_exponent, Account, AccountAttributes, AccountRelationships, Amount, CardPurchaseMethod,
    CardPurchaseMethodKind, Cashback, DataEnvelope, HoldInfo, RelatedLinks, RelatedResource, RoundUp,
    Transaction, TransactionAttributes, TransactionStatus,
};

// ==================== Credential ====================

/// Bearer credential for the Up API.
///
/// Opaque to everything except the HTTP layer; `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

// ==================== API Trait ====================

/// Shared API handle
pub type ApiRef = Arc<dyn UpApi>;

/// Read-only access to Up accounts and transactions
#[async_trait]
pub trait UpApi: Send + Sync {
    /// Fetch the account list
    async fn list_accounts(&self, token: &ApiToken) -> Result<Vec<Account>, ClientError>;

    /// Fetch the first page of transactions behind an account's related link
    async fn list_transactions(&self, url: &str, token: &ApiToken) -> Result<Vec<Transaction>, ClientError>;
}

/// Decode a `{ "data": [...] }` body
pub fn decode_data<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, ClientError> {
    let envelope: DataEnvelope<T> = serde_json::from_slice(body)?;
    Ok(envelope.data)
}

/// reqwest-backed implementation
#[derive(Debug, Clone)]
pub struct HttpUpClient {
    http: reqwest::Client,
    accounts_url: String,
}

impl HttpUpClient {
    /// Create a client for the given account list URL
    pub fn new(accounts_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("upview/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(http, accounts_url))
    }

    pub fn with_client(http: reqwest::Client, accounts_url: impl Into<String>) -> Self {
        Self {
            http,
            accounts_url: accounts_url.into(),
        }
    }

    pub fn accounts_url(&self) -> &str {
        &self.accounts_url
    }

    async fn get_data<T: DeserializeOwned>(&self, url: &str, token: &ApiToken) -> Result<Vec<T>, ClientError> {
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .bearer_auth(token.as_str())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        decode_data(&body)
    }
}

#[async_trait]
impl UpApi for HttpUpClient {
    async fn list_accounts(&self, token: &ApiToken) -> Result<Vec<Account>, ClientError> {
        self.get_data(&self.accounts_url, token).await
    }

    async fn list_transactions(&self, url: &str, token: &ApiToken) -> Result<Vec<Transaction>, ClientError> {
        self.get_data(url, token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNTS_BODY: &str = r#"{
        "data": [
            {
                "type": "accounts",
                "id": "a1",
                "attributes": {
                    "displayName": "Spending",
                    "accountType": "TRANSACTIONAL",
                    "ownershipType": "INDIVIDUAL",
                    "balance": {"currencyCode": "AUD", "value": "100.00", "valueInBaseUnits": 10000},
                    "createdAt": "2023-01-05T10:00:00+11:00"
                },
                "relationships": {
                    "transactions": {
                        "links": {"related": "https://api.up.com.au/api/v1/accounts/a1/transactions"}
                    }
                },
                "links": {"self": "https://api.up.com.au/api/v1/accounts/a1"}
            }
        ],
        "links": {"prev": null, "next": null}
    }"#;

    const TRANSACTIONS_BODY: &str = r#"{
        "data": [
            {
                "type": "transactions",
                "id": "t1",
                "attributes": {
                    "status": "SETTLED",
                    "rawText": null,
                    "description": "Coffee",
                    "message": null,
                    "isCategorizable": true,
                    "holdInfo": {
                        "amount": {"currencyCode": "AUD", "value": "-4.50", "valueInBaseUnits": -450},
                        "foreignAmount": null
                    },
                    "roundUp": {
                        "amount": {"currencyCode": "AUD", "value": "-0.50", "valueInBaseUnits": -50},
                        "boostPortion": null
                    },
                    "cashback": null,
                    "amount": {"currencyCode": "AUD", "value": "-4.50", "valueInBaseUnits": -450},
                    "foreignAmount": null,
                    "cardPurchaseMethod": {"method": "CONTACTLESS", "cardNumberSuffix": "1234"},
                    "settledAt": "2024-03-02T04:00:00+11:00",
                    "createdAt": "2024-03-01T08:30:00+11:00"
                }
            }
        ],
        "links": {"prev": null, "next": "https://api.up.com.au/api/v1/accounts/a1/transactions?page[after]=x"}
    }"#;

    #[test]
    fn test_decode_accounts() {
        let accounts: Vec<Account> = decode_data(ACCOUNTS_BODY.as_bytes()).unwrap();
        assert_eq!(accounts.len(), 1);
        let account = &accounts[0];
        assert_eq!(account.id, "a1");
        assert_eq!(account.display_name(), "Spending");
        assert_eq!(account.account_type(), "TRANSACTIONAL");
        assert_eq!(account.attributes.ownership_type.as_deref(), Some("INDIVIDUAL"));
        assert!(account.balance().is_consistent());
        assert_eq!(
            account.transactions_link(),
            Some("https://api.up.com.au/api/v1/accounts/a1/transactions")
        );
    }

    #[test]
    fn test_decode_transactions() {
        let transactions: Vec<Transaction> = decode_data(TRANSACTIONS_BODY.as_bytes()).unwrap();
        assert_eq!(transactions.len(), 1);
        let tx = &transactions[0];
        assert_eq!(tx.description(), "Coffee");
        assert_eq!(tx.amount().value, "-4.50");
        assert!(tx.is_settled());
        assert_eq!(tx.attributes.round_up.as_ref().unwrap().amount.value_in_base_units, -50);
        assert_eq!(
            tx.attributes.card_purchase_method.as_ref().unwrap().method,
            CardPurchaseMethodKind::Contactless
        );
        assert!(tx.attributes.settled_at.is_some());
    }

    #[test]
    fn test_decode_malformed_body() {
        let result: Result<Vec<Account>, _> = decode_data(b"{\"errors\": []}");
        assert!(matches!(result, Err(ClientError::Decode(_))));

        let result: Result<Vec<Transaction>, _> = decode_data(b"<html>");
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = ApiToken::new("up:yeah:secret");
        assert!(!format!("{:?}", token).contains("secret"));
    }

    #[test]
    fn test_unauthorized_status() {
        let err = ClientError::Status {
            status: 401,
            url: "https://api.up.com.au/api/v1/accounts".to_string(),
        };
        assert!(err.is_unauthorized());
        assert!(!ClientError::Status { status: 500, url: String::new() }.is_unauthorized());
    }

    #[test]
    fn test_client_keeps_accounts_url() {
        let client = HttpUpClient::with_client(reqwest::Client::new(), "http://localhost/api/v1/accounts");
        assert_eq!(client.accounts_url(), "http://localhost/api/v1/accounts");
    }

    const TOKEN: &str = "up:yeah:local";

    /// Local stand-in for the Up API; answers only requests carrying `TOKEN`
    async fn serve_up_api() -> String {
        use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
        use axum::routing::get;

        async fn accounts(headers: HeaderMap) -> (StatusCode, &'static str) {
            let expected = format!("Bearer {}", TOKEN);
            match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
                Some(value) if value == expected => (StatusCode::OK, ACCOUNTS_BODY),
                _ => (StatusCode::UNAUTHORIZED, ""),
            }
        }

        let router = axum::Router::new()
            .route("/api/v1/accounts", get(accounts))
            .route("/api/v1/accounts/a1/transactions", get(|| async { TRANSACTIONS_BODY }))
            .route("/api/v1/denied", get(|| async { StatusCode::UNAUTHORIZED }))
            .route("/api/v1/garbage", get(|| async { "<html>maintenance</html>" }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api/v1", addr)
    }

    #[tokio::test]
    async fn test_http_client_sends_bearer_and_decodes() {
        let base = serve_up_api().await;
        let client = HttpUpClient::new(format!("{}/accounts", base)).unwrap();

        let accounts = client.list_accounts(&ApiToken::new(TOKEN)).await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id, "a1");

        let transactions = client
            .list_transactions(&format!("{}/accounts/a1/transactions", base), &ApiToken::new(TOKEN))
            .await
            .unwrap();
        assert_eq!(transactions[0].description(), "Coffee");
    }

    #[tokio::test]
    async fn test_http_client_maps_non_success_to_status() {
        let base = serve_up_api().await;
        let client = HttpUpClient::new(format!("{}/accounts", base)).unwrap();

        let err = client.list_accounts(&ApiToken::new("wrong")).await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 401, .. }));

        let url = format!("{}/denied", base);
        match client.list_transactions(&url, &ApiToken::new(TOKEN)).await {
            Err(ClientError::Status { status, url: failed }) => {
                assert_eq!(status, 401);
                assert_eq!(failed, url);
            }
            other => panic!("expected status error, got {:?}", other),
        }

        let err = client
            .list_transactions(&format!("{}/garbage", base), &ApiToken::new(TOKEN))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
