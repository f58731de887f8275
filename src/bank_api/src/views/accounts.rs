use super::{failure, LoadStatus, NOT_SIGNED_IN};
use crate::{
    account::{Account, AccountStatus, AccountType},
    client::error::failure_message,
    session::{RoleGate, Session},
    types::AccountId,
};

/// Account list. Customers see their own accounts, staff members every account of the bank.
#[derive(Debug, Default)]
pub struct AccountsView {
    status: LoadStatus,
    error: Option<String>,
    accounts: Vec<Account>,
}

impl AccountsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, session: &Session) {
        if !session.is_authenticated() {
            self.error = Some(NOT_SIGNED_IN.to_string());
            return;
        }

        self.status = LoadStatus::InFlight;
        let result = if session.is_customer() {
            session.client().my_accounts().await
        } else {
            session.client().all_accounts().await
        };
        self.status = LoadStatus::Settled;

        match result {
            Ok(accounts) => {
                self.accounts = accounts;
                self.error = None;
            }
            Err(e) => self.error = Some(failure(&e, "Failed to load accounts")),
        }
    }

    /// Open a new account for the current customer, then reload
    pub async fn create_account(&mut self, session: &Session, account_type: AccountType) -> bool {
        let result = session.client().create_account(account_type).await;
        self.after_mutation(session, result.map(|_| ()), "Failed to create account")
            .await
    }

    pub async fn update_status(
        &mut self,
        session: &Session,
        id: AccountId,
        status: AccountStatus,
    ) -> bool {
        let result = session.client().update_account_status(id, status).await;
        self.after_mutation(session, result, "Failed to update account status")
            .await
    }

    pub async fn delete_account(&mut self, session: &Session, id: AccountId) -> bool {
        let result = session.client().delete_account(id).await;
        self.after_mutation(session, result, "Failed to delete account")
            .await
    }

    async fn after_mutation(
        &mut self,
        session: &Session,
        result: anyhow::Result<()>,
        fallback: &str,
    ) -> bool {
        match result {
            Ok(()) => {
                self.load(session).await;
                true
            }
            Err(e) => {
                self.error = Some(failure_message(&e, fallback));
                false
            }
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
}

/// Customers open their own accounts
pub fn can_create(gate: &impl RoleGate) -> bool {
    gate.is_customer()
}

/// Employees and admins suspend, close and reactivate accounts
pub fn can_change_status(gate: &impl RoleGate) -> bool {
    gate.is_staff()
}

pub fn can_delete(gate: &impl RoleGate) -> bool {
    gate.is_admin()
}
