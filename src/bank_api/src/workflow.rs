//! Deposit, withdrawal and transfer form.
//!
//! [`TransactionWorkflow`] mirrors a dialog: [`TransactionWorkflow::open`] resets it and
//! loads the data it needs, the caller fills [`TransactionWorkflow::form`], then
//! [`TransactionWorkflow::submit`] validates locally and sends exactly one request.

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    account::Account,
    client::{
        error::ClientError,
        transaction::{AccountTransactionRequest, TransactionRequest, TransferRequest},
        BankWebClient,
    },
    transaction::{Transaction, TransactionLimits, TransactionType},
    types::Amount,
    views::LoadStatus,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid amount")]
    Amount,
    #[error("Please select an account")]
    Account,
    #[error("Please select a source account")]
    SourceAccount,
    #[error("Please enter destination account number")]
    DestinationAccount,
    #[error("Cannot transfer to the same account")]
    SameAccount,
}

/// Form fields, kept as typed so a rejected form can be corrected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub amount: String,
    pub description: String,
    /// Deposit and withdrawal account
    pub account_id: String,
    /// Transfer source account
    pub from_account_id: String,
    /// Transfer destination, an account number rather than an id
    pub to_account_number: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Transaction),
    /// Rejected locally, nothing was sent
    Invalid(ValidationError),
    /// Rejected by the server or not delivered
    Failed(String),
}

#[derive(Debug)]
pub struct TransactionWorkflow {
    mode: TransactionType,
    pub form: TransactionForm,
    accounts: Vec<Account>,
    limits: Option<TransactionLimits>,
    status: LoadStatus,
    error: Option<String>,
    open: bool,
}

impl TransactionWorkflow {
    pub fn new(mode: TransactionType) -> Self {
        Self {
            mode,
            form: TransactionForm::default(),
            accounts: Vec::new(),
            limits: None,
            status: LoadStatus::Idle,
            error: None,
            open: false,
        }
    }

    pub fn mode(&self) -> TransactionType {
        self.mode
    }

    pub fn title(&self) -> &'static str {
        self.mode.title()
    }

    /// Active accounts of the caller, the only valid sources
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn limits(&self) -> Option<&TransactionLimits> {
        self.limits.as_ref()
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The submit control is disabled while a request is in flight
    pub fn can_submit(&self) -> bool {
        self.open && self.status != LoadStatus::InFlight
    }

    /// Open the dialog: every field is reset, then active accounts and limits are reloaded
    pub async fn open(&mut self, client: &BankWebClient) {
        self.form = TransactionForm::default();
        self.error = None;
        self.status = LoadStatus::Idle;
        self.accounts.clear();
        self.limits = None;
        self.open = true;

        let (accounts, limits) = futures_util::join!(
            client.my_active_accounts(),
            client.transaction_limits()
        );

        match accounts {
            Ok(accounts) => self.accounts = accounts,
            Err(e) => {
                debug!("failed to load accounts: {e:#}");
                self.error = Some("Failed to load accounts".to_string());
            }
        }
        match limits {
            Ok(limits) => self.limits = Some(limits),
            Err(e) => warn!("Failed to load transaction limits: {e:#}"),
        }
    }

    pub fn close(&mut self) {
        self.form = TransactionForm::default();
        self.error = None;
        self.open = false;
    }

    fn own_account(&self, id: &str) -> Option<&Account> {
        let id: i64 = id.trim().parse().ok()?;
        self.accounts.iter().find(|a| a.id == id)
    }

    fn description(&self) -> String {
        let description = self.form.description.trim();
        if description.is_empty() {
            self.mode.default_description().to_string()
        } else {
            description.to_string()
        }
    }

    /// Source account of a transfer whose destination is the same account
    fn self_transfer(&self) -> bool {
        self.mode == TransactionType::Transfer
            && self
                .own_account(&self.form.from_account_id)
                .is_some_and(|from| from.account_number == self.form.to_account_number.trim())
    }

    /// Check the form without any network call and build the request to send
    pub fn validate(&self) -> Result<TransactionRequest, ValidationError> {
        // Rejected whatever the amount
        if self.self_transfer() {
            return Err(ValidationError::SameAccount);
        }

        let amount = self
            .form
            .amount
            .parse::<Amount>()
            .map_err(|_| ValidationError::Amount)?
            .get();

        match self.mode {
            TransactionType::Deposit | TransactionType::Withdrawal => {
                let account = self
                    .own_account(&self.form.account_id)
                    .ok_or(ValidationError::Account)?;
                let request = AccountTransactionRequest {
                    account_id: account.id,
                    amount,
                    description: self.description(),
                };
                Ok(match self.mode {
                    TransactionType::Deposit => TransactionRequest::Deposit(request),
                    _ => TransactionRequest::Withdrawal(request),
                })
            }
            TransactionType::Transfer => {
                let from = self
                    .own_account(&self.form.from_account_id)
                    .ok_or(ValidationError::SourceAccount)?;
                // Format is checked by the server
                let to = self.form.to_account_number.trim();
                if to.is_empty() {
                    return Err(ValidationError::DestinationAccount);
                }
                Ok(TransactionRequest::Transfer(TransferRequest {
                    from_account_id: from.id,
                    to_account_number: to.to_string(),
                    amount,
                    description: self.description(),
                }))
            }
        }
    }

    /// Validate and submit the form.
    ///
    /// `on_success` is called once with the created transaction and the dialog closes;
    /// the caller reloads its own lists. On failure the dialog stays open with the
    /// error set. Nothing is retried.
    pub async fn submit<F>(&mut self, client: &BankWebClient, on_success: F) -> SubmitOutcome
    where
        F: FnOnce(&Transaction),
    {
        self.error = None;

        let request = match self.validate() {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.to_string());
                return SubmitOutcome::Invalid(e);
            }
        };

        self.status = LoadStatus::InFlight;
        let result = client.create_transaction(&request).await;
        self.status = LoadStatus::Settled;

        match result {
            Ok(transaction) => {
                on_success(&transaction);
                self.close();
                SubmitOutcome::Created(transaction)
            }
            Err(e) => {
                debug!("{} rejected: {e:#}", self.mode.label());
                let message = classify_failure(self.mode, &e);
                self.error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}

/// Message shown for a failed submission: the server message (or `<mode> failed`),
/// followed by a hint on a new line when the error code is a known one.
pub fn classify_failure(mode: TransactionType, err: &anyhow::Error) -> String {
    let fallback = format!("{} failed", mode.label());
    match err.downcast_ref::<ClientError>() {
        Some(api @ ClientError::Api { .. }) => {
            let mut message = api.server_message().map(str::to_string).unwrap_or(fallback);
            if let Some(code) = api.known_code() {
                message.push('\n');
                message.push_str(code.hint());
            }
            message
        }
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::client::{
        error::ErrorCode,
        tests::{account_json, transaction_json},
    };
    use rust_decimal::Decimal;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    /// Server with two active accounts (42 `SAV-042`, 7 `SAV-001`) and the limits
    async fn server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/accounts/my-accounts/active"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                account_json(42, "SAV-042", "ACTIVE"),
                account_json(7, "SAV-001", "ACTIVE"),
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/transactions/limits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "dailyWithdrawalLimit": 50000.0,
                "dailyTransferLimit": 100000.0,
                "maxSingleTransaction": 100000.0,
                "minTransactionAmount": 1.0
            })))
            .mount(&server)
            .await;
        server
    }

    /// Fails the test on drop if any transaction creation request was received
    async fn forbid_submissions(server: &MockServer) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(server)
            .await;
    }

    async fn opened(server: &MockServer, mode: TransactionType) -> (BankWebClient, TransactionWorkflow) {
        let client = BankWebClient::new(&server.uri()).unwrap();
        let mut workflow = TransactionWorkflow::new(mode);
        workflow.open(&client).await;
        (client, workflow)
    }

    #[tokio::test]
    async fn test_deposit_with_default_description() {
        let server = server().await;
        Mock::given(method("POST"))
            .and(path("/transactions/deposit"))
            .and(body_json(serde_json::json!({
                "accountId": 42,
                "amount": 150.0,
                "description": "Account deposit"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Deposit successful",
                "transaction": transaction_json(1, "DEPOSIT", "2024-01-01T10:00:00")
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, mut workflow) = opened(&server, TransactionType::Deposit).await;
        assert_eq!(workflow.accounts().len(), 2);
        assert!(workflow.limits().is_some());
        workflow.form.account_id = "42".into();
        workflow.form.amount = "150.00".into();

        let calls = Cell::new(0);
        let outcome = workflow
            .submit(&client, |tx| {
                calls.set(calls.get() + 1);
                assert_eq!(tx.id, 1);
            })
            .await;

        assert!(matches!(outcome, SubmitOutcome::Created(_)));
        assert_eq!(calls.get(), 1);
        assert!(!workflow.is_open());
        assert_eq!(workflow.status(), LoadStatus::Settled);
        assert_eq!(workflow.error(), None);
    }

    #[tokio::test]
    async fn test_invalid_amounts_are_rejected_locally() {
        let server = server().await;
        forbid_submissions(&server).await;
        let (client, mut workflow) = opened(&server, TransactionType::Withdrawal).await;

        for amount in ["", "0", "-10", "abc", "0.00"] {
            workflow.form.account_id = "42".into();
            workflow.form.amount = amount.into();
            let outcome = workflow.submit(&client, |_| panic!("no success expected")).await;
            assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::Amount), "{amount:?}");
            assert_eq!(workflow.error(), Some("Please enter a valid amount"));
            // The form keeps what the user typed
            assert_eq!(workflow.form.amount, amount);
            assert!(workflow.is_open());
        }
    }

    #[tokio::test]
    async fn test_account_must_be_one_of_the_active_accounts() {
        let server = server().await;
        forbid_submissions(&server).await;
        let (_, mut workflow) = opened(&server, TransactionType::Deposit).await;

        workflow.form.amount = "10".into();
        assert_eq!(workflow.validate(), Err(ValidationError::Account));
        workflow.form.account_id = "99".into();
        assert_eq!(workflow.validate(), Err(ValidationError::Account));
        workflow.form.account_id = "7".into();
        assert!(workflow.validate().is_ok());
    }

    #[tokio::test]
    async fn test_transfer_to_same_account_is_rejected() {
        let server = server().await;
        forbid_submissions(&server).await;
        let (client, mut workflow) = opened(&server, TransactionType::Transfer).await;

        workflow.form.from_account_id = "7".into();
        workflow.form.to_account_number = "SAV-001".into();
        workflow.form.amount = "25".into();
        let outcome = workflow.submit(&client, |_| panic!("no success expected")).await;
        assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::SameAccount));
        assert_eq!(workflow.error(), Some("Cannot transfer to the same account"));

        for amount in ["", "0", "-3", "abc", "1"] {
            workflow.form.amount = amount.into();
            workflow.form.to_account_number = " SAV-001 ".into();
            assert_eq!(workflow.validate(), Err(ValidationError::SameAccount), "{amount:?}");
        }
    }

    #[tokio::test]
    async fn test_transfer_validation_order() {
        let server = server().await;
        let (_, mut workflow) = opened(&server, TransactionType::Transfer).await;

        workflow.form.amount = "5".into();
        assert_eq!(workflow.validate(), Err(ValidationError::SourceAccount));
        workflow.form.from_account_id = "42".into();
        workflow.form.to_account_number = "   ".into();
        assert_eq!(workflow.validate(), Err(ValidationError::DestinationAccount));
        workflow.form.to_account_number = "BUS-777".into();
        workflow.form.description = "  rent ".into();
        assert_eq!(
            workflow.validate(),
            Ok(TransactionRequest::Transfer(TransferRequest {
                from_account_id: 42,
                to_account_number: "BUS-777".into(),
                amount: Decimal::from(5),
                description: "rent".into(),
            }))
        );
    }

    #[tokio::test]
    async fn test_destination_format_is_left_to_the_server() {
        let server = server().await;
        let (_, mut workflow) = opened(&server, TransactionType::Transfer).await;

        workflow.form.from_account_id = "7".into();
        workflow.form.amount = "5".into();
        workflow.form.to_account_number = " SAV 002 ".into();
        let Ok(TransactionRequest::Transfer(request)) = workflow.validate() else {
            panic!("expected a transfer request");
        };
        assert_eq!(request.to_account_number, "SAV 002");
    }

    #[tokio::test]
    async fn test_transfer_sends_account_number() {
        let server = server().await;
        Mock::given(method("POST"))
            .and(path("/transactions/transfer"))
            .and(body_json(serde_json::json!({
                "fromAccountId": 7,
                "toAccountNumber": "BUS-777",
                "amount": 12.5,
                "description": "Account transfer"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Transfer successful",
                "transaction": transaction_json(2, "TRANSFER", "2024-01-01T10:00:00")
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, mut workflow) = opened(&server, TransactionType::Transfer).await;
        workflow.form.from_account_id = "7".into();
        workflow.form.to_account_number = "BUS-777".into();
        workflow.form.amount = "12.50".into();
        let outcome = workflow.submit(&client, |_| {}).await;
        assert!(matches!(outcome, SubmitOutcome::Created(tx) if tx.id == 2));
    }

    #[tokio::test]
    async fn test_known_error_code_gets_a_hint() {
        let server = server().await;
        Mock::given(method("POST"))
            .and(path("/transactions/withdrawal"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "errorCode": "INSUFFICIENT_BALANCE",
                "message": "Insufficient balance. Available: 1000.00",
                "success": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, mut workflow) = opened(&server, TransactionType::Withdrawal).await;
        workflow.form.account_id = "42".into();
        workflow.form.amount = "5000".into();
        let outcome = workflow.submit(&client, |_| panic!("no success expected")).await;

        let SubmitOutcome::Failed(message) = outcome else {
            panic!("expected a failure");
        };
        assert!(message.starts_with("Insufficient balance. Available: 1000.00\n"));
        assert!(message.ends_with("Tip: Check your account balance before making transactions."));
        assert_eq!(workflow.error(), Some(message.as_str()));
        // Dialog stays open with the user's input
        assert!(workflow.is_open());
        assert_eq!(workflow.form.amount, "5000");
    }

    #[tokio::test]
    async fn test_unknown_error_code_falls_back() {
        let server = server().await;
        Mock::given(method("POST"))
            .and(path("/transactions/deposit"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({"errorCode": "UNKNOWN_ERROR"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (client, mut workflow) = opened(&server, TransactionType::Deposit).await;
        workflow.form.account_id = "42".into();
        workflow.form.amount = "1".into();
        let outcome = workflow.submit(&client, |_| {}).await;
        assert_eq!(outcome, SubmitOutcome::Failed("deposit failed".into()));
    }

    #[tokio::test]
    async fn test_open_resets_every_field() {
        let server = server().await;
        let (client, mut workflow) = opened(&server, TransactionType::Transfer).await;
        workflow.form = TransactionForm {
            amount: "10".into(),
            description: "left over".into(),
            account_id: "42".into(),
            from_account_id: "42".into(),
            to_account_number: "SAV-042".into(),
        };
        let _ = workflow.submit(&client, |_| {}).await;
        assert!(workflow.error().is_some());

        workflow.open(&client).await;
        assert_eq!(workflow.form, TransactionForm::default());
        assert_eq!(workflow.error(), None);
        assert!(workflow.is_open());
    }

    #[tokio::test]
    async fn test_failed_account_load() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/accounts/my-accounts/active"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (_, workflow) = opened(&server, TransactionType::Deposit).await;
        assert_eq!(workflow.error(), Some("Failed to load accounts"));
        assert!(workflow.accounts().is_empty());
        assert!(workflow.limits().is_none());
    }

    #[test]
    fn test_every_known_code_gets_its_hint() {
        let cases = [
            (
                "INSUFFICIENT_BALANCE",
                ErrorCode::InsufficientBalance,
                "Tip: Check your account balance before making transactions.",
            ),
            (
                "INVALID_AMOUNT",
                ErrorCode::InvalidAmount,
                "Tip: Amount must be positive and not exceed limits.",
            ),
            (
                "DAILY_LIMIT_EXCEEDED",
                ErrorCode::DailyLimitExceeded,
                "Tip: Try again tomorrow or contact your bank for higher limits.",
            ),
            (
                "ACCOUNT_NOT_ACTIVE",
                ErrorCode::AccountNotActive,
                "Tip: Please contact customer service to activate your account.",
            ),
        ];

        for (code, expected, hint) in cases {
            assert_eq!(ErrorCode::parse(code), Some(expected), "{code}");
            assert_eq!(expected.hint(), hint);

            let body = serde_json::json!({"errorCode": code, "message": "Rejected"}).to_string();
            let err = anyhow::Error::new(ClientError::from_response(400, &body));
            assert_eq!(
                classify_failure(TransactionType::Withdrawal, &err),
                format!("Rejected\n{hint}")
            );

            let body = serde_json::json!({"errorCode": code}).to_string();
            let err = anyhow::Error::new(ClientError::from_response(400, &body));
            assert_eq!(
                classify_failure(TransactionType::Transfer, &err),
                format!("transfer failed\n{hint}")
            );
        }
    }

    #[test]
    fn test_classify_transport_failure() {
        let err = anyhow::anyhow!("connection reset");
        assert_eq!(classify_failure(TransactionType::Transfer, &err), "transfer failed");
    }
}
