use super::{failure, LoadStatus};
use crate::{
    account::Account,
    client::admin::{DashboardStats, UserAction},
    constants::ADMIN_TRANSACTIONS_DISPLAY_LIMIT,
    session::{RoleGate, Session},
    transaction::Transaction,
    types::UserId,
    user::Identity,
};

pub const ACCESS_DENIED: &str = "Access denied. Admin privileges required.";

/// Bank administration: figures, users, accounts and transactions of the admin's bank
#[derive(Debug, Default)]
pub struct AdminPanel {
    status: LoadStatus,
    error: Option<String>,
    access_denied: bool,
    stats: Option<DashboardStats>,
    users: Vec<Identity>,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
}

impl AdminPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load everything at once. Non admins get the access denied notice and nothing is fetched.
    pub async fn load(&mut self, session: &Session) {
        if !session.is_admin() {
            self.access_denied = true;
            return;
        }
        self.access_denied = false;

        let client = session.client();
        self.status = LoadStatus::InFlight;
        let result = futures_util::try_join!(
            client.dashboard_stats(),
            client.users(),
            client.admin_accounts(),
            client.admin_transactions()
        );
        self.status = LoadStatus::Settled;

        match result {
            Ok((stats, users, accounts, mut transactions)) => {
                transactions.truncate(ADMIN_TRANSACTIONS_DISPLAY_LIMIT);
                self.stats = Some(stats);
                self.users = users;
                self.accounts = accounts;
                self.transactions = transactions;
                self.error = None;
            }
            Err(e) => self.error = Some(failure(&e, "Failed to load admin data")),
        }
    }

    /// Apply `action` to a user and reload the whole panel
    pub async fn user_action(&mut self, session: &Session, id: UserId, action: UserAction) -> bool {
        match session.client().apply_user_action(id, action).await {
            Ok(()) => {
                self.load(session).await;
                true
            }
            Err(e) => {
                self.error = Some(failure(&e, &format!("Failed to {action} user")));
                false
            }
        }
    }

    pub fn access_denied(&self) -> bool {
        self.access_denied
    }

    /// Notice shown in place of the panel content
    pub fn notice(&self) -> Option<&str> {
        if self.access_denied {
            Some(ACCESS_DENIED)
        } else {
            self.error.as_deref()
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    pub fn users(&self) -> &[Identity] {
        &self.users
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}
