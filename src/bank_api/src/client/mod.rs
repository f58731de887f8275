pub mod account;
pub mod admin;
pub mod auth;
pub mod error;
pub mod transaction;

use anyhow::{bail, Context, Result};
use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use error::ClientError;

use crate::constants::USER_AGENT;

/// HTTP client for the bank back-office API.
///
/// Holds a single bearer token slot: every request made after [`BankWebClient::set_token`]
/// carries it in the `Authorization` header.
#[derive(Debug, Clone)]
pub struct BankWebClient {
    /// The client used to make requests to the API.
    client: reqwest::Client,
    /// Base URL every path is appended to, without trailing slash, e.g. `http://localhost:8080/api`.
    base_url: String,
    /// Bearer token of the current session.
    token: Option<String>,
}

impl BankWebClient {
    pub fn new(base_url: &str) -> Result<BankWebClient> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(BankWebClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// `GET` a path and decode its JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path, "GET");
        let res = self.request(Method::GET, path).send().await?;
        let res = check_status(res).await?;
        Ok(res.json::<T>().await?)
    }

    /// Send a request with an optional JSON body and decode the JSON response
    async fn send_json<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self.send(method, path, body).await?;
        Ok(res.json::<T>().await?)
    }

    /// Send a request, the response body is discarded
    async fn send_empty<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.send(method, path, body).await?;
        Ok(())
    }

    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        debug!(path, %method, "sending request");
        let mut builder = self.request(method, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let res = builder.send().await?;
        check_status(res).await
    }
}

/// Turn a non-success response into a [`ClientError::Api`]
async fn check_status(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), %body, "request rejected");
    bail!(ClientError::from_response(status.as_u16(), &body));
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    /// Account JSON as returned by the server
    pub(crate) fn account_json(id: i64, number: &str, status: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "accountNumber": number,
            "accountType": "SAVINGS",
            "balance": 1000.0,
            "accountStatus": status,
            "createdAt": "2024-01-01T09:00:00"
        })
    }

    pub(crate) fn transaction_json(id: i64, kind: &str, created_at: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "transactionReference": format!("TXN{id}"),
            "transactionType": kind,
            "amount": 150.0,
            "description": "Account deposit",
            "transactionStatus": "COMPLETED",
            "balanceAfterTransaction": 1150.0,
            "createdAt": created_at
        })
    }

    pub(crate) fn identity_json(id: i64, role: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "username": format!("user{id}"),
            "email": format!("user{id}@bank.example"),
            "firstName": "Jane",
            "lastName": "Doe",
            "role": role,
            "active": true
        })
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = BankWebClient::new("http://localhost:8080/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.url("/accounts"), "http://localhost:8080/api/accounts");
    }

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/accounts/my-accounts"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = BankWebClient::new(&server.uri()).unwrap();
        client.set_token("secret-token");
        let accounts = client.my_accounts().await.unwrap();
        assert!(accounts.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transactions/limits"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(serde_json::json!({"message": "Access is denied"})),
            )
            .mount(&server)
            .await;

        let client = BankWebClient::new(&server.uri()).unwrap();
        let err = client.transaction_limits().await.unwrap_err();
        match err.downcast_ref::<ClientError>() {
            Some(ClientError::Api {
                status, message, ..
            }) => {
                assert_eq!(*status, 403);
                assert_eq!(message.as_deref(), Some("Access is denied"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_an_api_error() {
        // Nothing listens on this port
        let client = BankWebClient::new("http://127.0.0.1:9").unwrap();
        let err = client.banks().await.unwrap_err();
        assert!(err.downcast_ref::<ClientError>().is_none());
        assert!(err.downcast_ref::<reqwest::Error>().is_some());
    }
}
