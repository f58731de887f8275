use super::{failure, LoadStatus, NOT_SIGNED_IN};
use crate::{
    session::{RoleGate, Session},
    transaction::{most_recent, Transaction},
    types::AccountId,
};

/// Transaction history, newest first
#[derive(Debug, Default)]
pub struct TransactionsView {
    status: LoadStatus,
    error: Option<String>,
    transactions: Vec<Transaction>,
}

impl TransactionsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Customers get their own transactions, staff members every transaction of the bank
    pub async fn load(&mut self, session: &Session) {
        if !session.is_authenticated() {
            self.error = Some(NOT_SIGNED_IN.to_string());
            return;
        }

        self.status = LoadStatus::InFlight;
        let result = if session.is_customer() {
            session.client().my_transactions().await
        } else {
            session.client().all_transactions().await
        };
        self.settle(result);
    }

    /// History of a single account
    pub async fn load_account(&mut self, session: &Session, id: AccountId) {
        if !session.is_authenticated() {
            self.error = Some(NOT_SIGNED_IN.to_string());
            return;
        }

        self.status = LoadStatus::InFlight;
        let result = session.client().account_transactions(id).await;
        self.settle(result);
    }

    fn settle(&mut self, result: anyhow::Result<Vec<Transaction>>) {
        self.status = LoadStatus::Settled;
        match result {
            Ok(transactions) => {
                let n = transactions.len();
                self.transactions = most_recent(transactions, n);
                self.error = None;
            }
            Err(e) => self.error = Some(failure(&e, "Failed to load transactions")),
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}
