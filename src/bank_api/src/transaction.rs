use core::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of transaction, also the mode of the transaction workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
}

impl TransactionType {
    /// Lower case name used in messages, e.g. `deposit failed`
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdrawal => "withdrawal",
            TransactionType::Transfer => "transfer",
        }
    }

    /// Description sent when the user left it blank
    pub fn default_description(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "Account deposit",
            TransactionType::Withdrawal => "Account withdrawal",
            TransactionType::Transfer => "Account transfer",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "Make Deposit",
            TransactionType::Withdrawal => "Make Withdrawal",
            TransactionType::Transfer => "Transfer Funds",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Deposit => write!(f, "DEPOSIT"),
            TransactionType::Withdrawal => write!(f, "WITHDRAWAL"),
            TransactionType::Transfer => write!(f, "TRANSFER"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "PENDING"),
            TransactionStatus::Completed => write!(f, "COMPLETED"),
            TransactionStatus::Failed => write!(f, "FAILED"),
            TransactionStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Minimal view of the accounts involved in a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRef {
    pub id: i64,
    #[serde(default)]
    pub account_number: Option<String>,
}

/// A transaction. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub transaction_reference: String,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    pub transaction_status: TransactionStatus,
    #[serde(default)]
    pub balance_after_transaction: Option<Decimal>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub from_account: Option<AccountRef>,
    #[serde(default)]
    pub to_account: Option<AccountRef>,
}

/// Server-side limits. Display only, the server enforces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLimits {
    pub min_transaction_amount: Decimal,
    pub max_single_transaction: Decimal,
    pub daily_withdrawal_limit: Decimal,
    pub daily_transfer_limit: Decimal,
}

impl TransactionLimits {
    /// Hint lines shown next to the form for the given mode
    pub fn hints(&self, mode: TransactionType) -> Vec<String> {
        let mut hints = vec![
            format!("Minimum amount: {}", self.min_transaction_amount),
            format!("Maximum per transaction: {}", self.max_single_transaction),
        ];
        match mode {
            TransactionType::Withdrawal => {
                hints.push(format!("Daily withdrawal limit: {}", self.daily_withdrawal_limit))
            }
            TransactionType::Transfer => {
                hints.push(format!("Daily transfer limit: {}", self.daily_transfer_limit))
            }
            TransactionType::Deposit => {}
        }
        hints
    }
}

/// Sort by creation date, newest first, and keep the first `n`.
/// Transactions without a date keep their server order after dated ones.
pub fn most_recent(mut transactions: Vec<Transaction>, n: usize) -> Vec<Transaction> {
    transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    transactions.truncate(n);
    transactions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: i64, created_at: Option<&str>) -> Transaction {
        Transaction {
            id,
            transaction_reference: format!("TXN{id}"),
            transaction_type: TransactionType::Deposit,
            amount: Decimal::ONE,
            description: None,
            transaction_status: TransactionStatus::Completed,
            balance_after_transaction: None,
            created_at: created_at.map(|s| s.parse().unwrap()),
            from_account: None,
            to_account: None,
        }
    }

    #[test]
    fn test_most_recent() {
        let txs = vec![
            tx(1, Some("2024-01-01T10:00:00")),
            tx(2, None),
            tx(3, Some("2024-03-01T10:00:00")),
            tx(4, Some("2024-02-01T10:00:00")),
        ];
        let ids: Vec<i64> = most_recent(txs, 3).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 4, 1]);
    }

    #[test]
    fn test_limits_hints() {
        let limits: TransactionLimits = serde_json::from_str(
            r#"{"dailyWithdrawalLimit":50000.00,"dailyTransferLimit":100000.00,"maxSingleTransaction":100000.00,"minTransactionAmount":1.00}"#,
        )
        .unwrap();
        assert_eq!(limits.hints(TransactionType::Deposit).len(), 2);
        let hints = limits.hints(TransactionType::Withdrawal);
        assert_eq!(hints[2], "Daily withdrawal limit: 50000");
    }

    #[test]
    fn test_deserialize_transaction() {
        let tx: Transaction = serde_json::from_str(
            r#"{"id":11,"transactionReference":"TXN-1","transactionType":"TRANSFER","amount":25.5,"description":"rent","transactionStatus":"COMPLETED","balanceAfterTransaction":74.5,"createdAt":"2024-05-01T08:00:00","fromAccount":{"id":7,"accountNumber":"SAV-001"},"toAccount":{"id":8}}"#,
        )
        .unwrap();
        assert_eq!(tx.transaction_type, TransactionType::Transfer);
        assert_eq!(tx.balance_after_transaction, Some(Decimal::new(745, 1)));
        assert_eq!(tx.to_account.unwrap().account_number, None);
    }
}
