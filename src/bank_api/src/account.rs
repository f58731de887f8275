use core::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Type of account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Savings,
    Business,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Savings => write!(f, "SAVINGS"),
            AccountType::Business => write!(f, "BUSINESS"),
        }
    }
}

/// Lifecycle status of an account, only staff members can change it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Suspended,
    Closed,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountStatus::Active => write!(f, "ACTIVE"),
            AccountStatus::Suspended => write!(f, "SUSPENDED"),
            AccountStatus::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Owner of an account, as embedded in staff listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOwner {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// A bank account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    /// Unique per bank, used as the destination of transfers
    pub account_number: String,
    pub account_type: AccountType,
    /// Balance as reported by the server, never computed locally
    pub balance: Decimal,
    pub account_status: AccountStatus,
    #[serde(default)]
    pub user: Option<AccountOwner>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.account_status == AccountStatus::Active
    }

    /// Label used in account pickers, e.g. `SAV-001 - SAVINGS (1500.00)`
    pub fn label(&self) -> String {
        format!(
            "{} - {} ({})",
            self.account_number, self.account_type, self.balance
        )
    }
}
