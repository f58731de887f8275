use anyhow::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::BankWebClient;
use crate::{
    account::{Account, AccountStatus, AccountType},
    types::AccountId,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccountRequest {
    account_type: AccountType,
}

#[derive(Serialize)]
struct UpdateStatusRequest {
    status: AccountStatus,
}

#[derive(Deserialize)]
struct AccountEnvelope {
    account: Account,
}

impl BankWebClient {
    /// Open a new account for the current customer
    pub async fn create_account(&self, account_type: AccountType) -> Result<Account> {
        debug!(%account_type, "creating account");
        let res: AccountEnvelope = self
            .send_json(
                Method::POST,
                "/accounts",
                Some(&CreateAccountRequest { account_type }),
            )
            .await?;
        Ok(res.account)
    }

    /// Accounts owned by the current customer
    pub async fn my_accounts(&self) -> Result<Vec<Account>> {
        self.get_json("/accounts/my-accounts").await
    }

    /// Active accounts owned by the current customer, the only ones transactions can use
    pub async fn my_active_accounts(&self) -> Result<Vec<Account>> {
        self.get_json("/accounts/my-accounts/active").await
    }

    /// Every account of the bank, staff only
    pub async fn all_accounts(&self) -> Result<Vec<Account>> {
        self.get_json("/accounts/all").await
    }

    pub async fn account(&self, id: AccountId) -> Result<Account> {
        self.get_json(&format!("/accounts/{id}")).await
    }

    /// Change the status of an account, staff only
    pub async fn update_account_status(&self, id: AccountId, status: AccountStatus) -> Result<()> {
        debug!(%id, %status, "updating account status");
        self.send_empty(
            Method::PUT,
            &format!("/accounts/{id}/status"),
            Some(&UpdateStatusRequest { status }),
        )
        .await
    }

    /// Delete an account, admin only
    pub async fn delete_account(&self, id: AccountId) -> Result<()> {
        debug!(%id, "deleting account");
        self.send_empty::<()>(Method::DELETE, &format!("/accounts/{id}"), None)
            .await
    }
}
