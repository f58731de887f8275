use core::fmt;

use anyhow::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::BankWebClient;
use crate::{account::Account, transaction::Transaction, types::UserId, user::Identity};

/// Aggregated figures of the admin's bank
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub active_accounts: u64,
    pub total_transactions: u64,
    pub pending_transactions: u64,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub active_users: Option<u64>,
    #[serde(default)]
    pub total_accounts: Option<u64>,
    #[serde(default)]
    pub suspended_accounts: Option<u64>,
    #[serde(default)]
    pub closed_accounts: Option<u64>,
    #[serde(default)]
    pub completed_transactions: Option<u64>,
    #[serde(default)]
    pub cancelled_transactions: Option<u64>,
}

/// Mutations an admin can apply to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum UserAction {
    Activate,
    Deactivate,
    Delete,
}

impl fmt::Display for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserAction::Activate => write!(f, "activate"),
            UserAction::Deactivate => write!(f, "deactivate"),
            UserAction::Delete => write!(f, "delete"),
        }
    }
}

impl BankWebClient {
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.get_json("/admin/dashboard/stats").await
    }

    pub async fn users(&self) -> Result<Vec<Identity>> {
        self.get_json("/admin/users").await
    }

    /// Users whose name contains `name`
    pub async fn search_users(&self, name: &str) -> Result<Vec<Identity>> {
        let res = self
            .request(Method::GET, "/admin/users/search")
            .query(&[("name", name)])
            .send()
            .await?;
        let res = super::check_status(res).await?;
        Ok(res.json().await?)
    }

    pub async fn admin_accounts(&self) -> Result<Vec<Account>> {
        self.get_json("/admin/accounts").await
    }

    pub async fn admin_transactions(&self) -> Result<Vec<Transaction>> {
        self.get_json("/admin/transactions").await
    }

    pub async fn apply_user_action(&self, id: UserId, action: UserAction) -> Result<()> {
        debug!(%id, %action, "applying user action");
        match action {
            UserAction::Activate => {
                self.send_empty::<()>(Method::PUT, &format!("/admin/users/{id}/activate"), None)
                    .await
            }
            UserAction::Deactivate => {
                self.send_empty::<()>(Method::PUT, &format!("/admin/users/{id}/deactivate"), None)
                    .await
            }
            UserAction::Delete => {
                self.send_empty::<()>(Method::DELETE, &format!("/admin/users/{id}"), None)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::identity_json;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    #[tokio::test]
    async fn test_dashboard_stats() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/dashboard/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "bankName": "State Bank",
                "bankCode": "SBI001",
                "totalUsers": 12,
                "activeUsers": 10,
                "totalAccounts": 20,
                "totalTransactions": 140,
                "activeAccounts": 18,
                "suspendedAccounts": 1,
                "closedAccounts": 1,
                "completedTransactions": 130,
                "pendingTransactions": 4,
                "cancelledTransactions": 6
            })))
            .mount(&server)
            .await;

        let client = BankWebClient::new(&server.uri()).unwrap();
        let stats = client.dashboard_stats().await.unwrap();
        assert_eq!(stats.total_users, 12);
        assert_eq!(stats.pending_transactions, 4);
        assert_eq!(stats.closed_accounts, Some(1));
    }

    #[tokio::test]
    async fn test_user_actions_paths() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/admin/users/5/activate"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/admin/users/5/deactivate"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/admin/users/5"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = BankWebClient::new(&server.uri()).unwrap();
        let id: UserId = "5".parse().unwrap();
        for action in [UserAction::Activate, UserAction::Deactivate, UserAction::Delete] {
            client.apply_user_action(id, action).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_search_users() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/users/search"))
            .and(query_param("name", "jane doe"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([identity_json(2, "CUSTOMER")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = BankWebClient::new(&server.uri()).unwrap();
        let users = client.search_users("jane doe").await.unwrap();
        assert_eq!(users.len(), 1);
    }
}
