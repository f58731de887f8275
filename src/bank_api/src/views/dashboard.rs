use rust_decimal::Decimal;

use super::{failure, LoadStatus, NOT_SIGNED_IN};
use crate::{
    account::Account,
    client::admin::DashboardStats,
    constants::{CUSTOMER_RECENT_TRANSACTIONS, STAFF_RECENT_TRANSACTIONS},
    session::{RoleGate, Session},
    transaction::{most_recent, Transaction},
};

/// Landing view: accounts, latest transactions and, for admins, the bank figures
#[derive(Debug, Default)]
pub struct Dashboard {
    status: LoadStatus,
    error: Option<String>,
    accounts: Vec<Account>,
    recent_transactions: Vec<Transaction>,
    stats: Option<DashboardStats>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, session: &Session) {
        if !session.is_authenticated() {
            self.error = Some(NOT_SIGNED_IN.to_string());
            return;
        }

        let client = session.client();
        self.status = LoadStatus::InFlight;

        let result = if session.is_customer() {
            futures_util::try_join!(client.my_accounts(), client.my_transactions())
                .map(|(accounts, transactions)| (accounts, transactions, None))
        } else if session.is_admin() {
            futures_util::try_join!(
                client.all_accounts(),
                client.all_transactions(),
                client.dashboard_stats()
            )
            .map(|(accounts, transactions, stats)| (accounts, transactions, Some(stats)))
        } else {
            futures_util::try_join!(client.all_accounts(), client.all_transactions())
                .map(|(accounts, transactions)| (accounts, transactions, None))
        };
        self.status = LoadStatus::Settled;

        match result {
            Ok((accounts, transactions, stats)) => {
                let shown = if session.is_customer() {
                    CUSTOMER_RECENT_TRANSACTIONS
                } else {
                    STAFF_RECENT_TRANSACTIONS
                };
                self.accounts = accounts;
                self.recent_transactions = most_recent(transactions, shown);
                self.stats = stats;
                self.error = None;
            }
            Err(e) => self.error = Some(failure(&e, "Failed to load dashboard data")),
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Newest first
    pub fn recent_transactions(&self) -> &[Transaction] {
        &self.recent_transactions
    }

    /// Admins only
    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    /// Sum of the balances reported for the listed accounts
    pub fn total_balance(&self) -> Decimal {
        self.accounts.iter().map(|a| a.balance).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::tests::{account_json, transaction_json},
        user::Role,
        views::tests::{forbid_requests, signed_in, signed_out},
    };
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn transactions(n: i64) -> serde_json::Value {
        (1..=n)
            .map(|i| transaction_json(i, "DEPOSIT", &format!("2024-01-{i:02}T10:00:00")))
            .collect()
    }

    async fn respond(server: &MockServer, route: &str, body: serde_json::Value, expected: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(expected)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_customer_dashboard() {
        let server = MockServer::start().await;
        let session = signed_in(&server, Role::Customer).await;
        respond(
            &server,
            "/accounts/my-accounts",
            serde_json::json!([account_json(1, "SAV-001", "ACTIVE"), account_json(2, "BUS-002", "ACTIVE")]),
            1,
        )
        .await;
        respond(&server, "/transactions/my-transactions", transactions(8), 1).await;
        forbid_requests(&server).await;

        let mut dashboard = Dashboard::new();
        dashboard.load(&session).await;

        assert_eq!(dashboard.error(), None);
        assert_eq!(dashboard.status(), LoadStatus::Settled);
        assert_eq!(dashboard.accounts().len(), 2);
        assert_eq!(dashboard.total_balance(), Decimal::from(2000));
        let ids: Vec<i64> = dashboard.recent_transactions().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![8, 7, 6, 5, 4]);
        assert!(dashboard.stats().is_none());
    }

    #[tokio::test]
    async fn test_employee_dashboard_has_no_stats() {
        let server = MockServer::start().await;
        let session = signed_in(&server, Role::Employee).await;
        respond(&server, "/accounts/all", serde_json::json!([]), 1).await;
        respond(&server, "/transactions/all", transactions(12), 1).await;
        forbid_requests(&server).await;

        let mut dashboard = Dashboard::new();
        dashboard.load(&session).await;

        assert_eq!(dashboard.recent_transactions().len(), 10);
        assert_eq!(dashboard.recent_transactions()[0].id, 12);
        assert!(dashboard.stats().is_none());
    }

    #[tokio::test]
    async fn test_admin_dashboard_has_stats() {
        let server = MockServer::start().await;
        let session = signed_in(&server, Role::Admin).await;
        respond(&server, "/accounts/all", serde_json::json!([]), 1).await;
        respond(&server, "/transactions/all", transactions(3), 1).await;
        respond(
            &server,
            "/admin/dashboard/stats",
            serde_json::json!({
                "totalUsers": 3,
                "activeAccounts": 2,
                "totalTransactions": 3,
                "pendingTransactions": 0
            }),
            1,
        )
        .await;

        let mut dashboard = Dashboard::new();
        dashboard.load(&session).await;

        assert_eq!(dashboard.error(), None);
        assert_eq!(dashboard.stats().map(|s| s.total_users), Some(3));
    }

    #[tokio::test]
    async fn test_any_failure_fails_the_whole_load() {
        let server = MockServer::start().await;
        let session = signed_in(&server, Role::Customer).await;
        Mock::given(method("GET"))
            .and(path("/accounts/my-accounts"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([account_json(1, "SAV-001", "ACTIVE")])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/transactions/my-transactions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(transactions(1)))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/transactions/my-transactions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut dashboard = Dashboard::new();
        dashboard.load(&session).await;
        assert_eq!(dashboard.error(), None);
        assert_eq!(dashboard.accounts().len(), 1);

        dashboard.load(&session).await;
        assert_eq!(dashboard.error(), Some("Failed to load dashboard data"));
        // Prior data stays displayed
        assert_eq!(dashboard.accounts().len(), 1);
        assert_eq!(dashboard.recent_transactions().len(), 1);
    }

    #[tokio::test]
    async fn test_signed_out_dashboard_makes_no_request() {
        let server = MockServer::start().await;
        forbid_requests(&server).await;
        let session = signed_out(&server);

        let mut dashboard = Dashboard::new();
        dashboard.load(&session).await;
        assert_eq!(dashboard.error(), Some(NOT_SIGNED_IN));
        assert_eq!(dashboard.status(), LoadStatus::Idle);
    }
}
