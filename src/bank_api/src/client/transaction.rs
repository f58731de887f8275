use anyhow::Result;
use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::BankWebClient;
use crate::{
    transaction::{Transaction, TransactionLimits, TransactionType},
    types::AccountId,
};

/// Body of a deposit or a withdrawal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTransactionRequest {
    pub account_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
}

/// Body of a transfer. The destination is an account number, the server resolves it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_account_id: i64,
    pub to_account_number: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
}

/// A validated request, ready to be submitted
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionRequest {
    Deposit(AccountTransactionRequest),
    Withdrawal(AccountTransactionRequest),
    Transfer(TransferRequest),
}

impl TransactionRequest {
    pub fn kind(&self) -> TransactionType {
        match self {
            TransactionRequest::Deposit(_) => TransactionType::Deposit,
            TransactionRequest::Withdrawal(_) => TransactionType::Withdrawal,
            TransactionRequest::Transfer(_) => TransactionType::Transfer,
        }
    }
}

#[derive(Deserialize)]
struct TransactionReceipt {
    transaction: Transaction,
}

impl BankWebClient {
    pub async fn deposit(&self, request: &AccountTransactionRequest) -> Result<Transaction> {
        self.post_transaction("/transactions/deposit", request).await
    }

    pub async fn withdraw(&self, request: &AccountTransactionRequest) -> Result<Transaction> {
        self.post_transaction("/transactions/withdrawal", request)
            .await
    }

    pub async fn transfer(&self, request: &TransferRequest) -> Result<Transaction> {
        self.post_transaction("/transactions/transfer", request)
            .await
    }

    /// Submit a request to the endpoint matching its kind. Exactly one request is sent.
    pub async fn create_transaction(&self, request: &TransactionRequest) -> Result<Transaction> {
        debug!(kind = %request.kind(), "creating transaction");
        match request {
            TransactionRequest::Deposit(r) => self.deposit(r).await,
            TransactionRequest::Withdrawal(r) => self.withdraw(r).await,
            TransactionRequest::Transfer(r) => self.transfer(r).await,
        }
    }

    async fn post_transaction<B: Serialize>(&self, path: &str, body: &B) -> Result<Transaction> {
        let receipt: TransactionReceipt = self.send_json(Method::POST, path, Some(body)).await?;
        Ok(receipt.transaction)
    }

    pub async fn transaction_limits(&self) -> Result<TransactionLimits> {
        self.get_json("/transactions/limits").await
    }

    /// Transactions of the current customer
    pub async fn my_transactions(&self) -> Result<Vec<Transaction>> {
        self.get_json("/transactions/my-transactions").await
    }

    /// Every transaction of the bank, staff only
    pub async fn all_transactions(&self) -> Result<Vec<Transaction>> {
        self.get_json("/transactions/all").await
    }

    pub async fn account_transactions(&self, id: AccountId) -> Result<Vec<Transaction>> {
        self.get_json(&format!("/transactions/account/{id}")).await
    }
}
