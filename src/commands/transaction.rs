use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};

use bank_api::{
    transaction::TransactionType,
    views::accounts::AccountsView,
    workflow::{SubmitOutcome, TransactionForm, TransactionWorkflow},
};

use crate::{
    cli::{AccountTransactionArgs, TransferArgs},
    ux::table,
    AppCtx,
};

pub async fn deposit(args: AccountTransactionArgs, ctx: &AppCtx) -> Result<()> {
    submit(TransactionType::Deposit, account_form(args), ctx).await
}

pub async fn withdraw(args: AccountTransactionArgs, ctx: &AppCtx) -> Result<()> {
    submit(TransactionType::Withdrawal, account_form(args), ctx).await
}

pub async fn transfer(args: TransferArgs, ctx: &AppCtx) -> Result<()> {
    let form = TransactionForm {
        amount: args.amount,
        description: args.description.unwrap_or_default(),
        from_account_id: args.from_account,
        to_account_number: args.to_account,
        ..TransactionForm::default()
    };
    submit(TransactionType::Transfer, form, ctx).await
}

fn account_form(args: AccountTransactionArgs) -> TransactionForm {
    TransactionForm {
        amount: args.amount,
        description: args.description.unwrap_or_default(),
        account_id: args.account,
        ..TransactionForm::default()
    }
}

async fn submit(mode: TransactionType, form: TransactionForm, ctx: &AppCtx) -> Result<()> {
    let Some(session) = ctx.auth().require_session().await? else {
        return Ok(());
    };

    let mut workflow = TransactionWorkflow::new(mode);
    workflow.open(session.client()).await;
    if let Some(error) = workflow.error() {
        bail!("{error}");
    }
    if workflow.accounts().is_empty() {
        warn!("You have no active account, run `bank-cli accounts` to check their status");
    }

    info!("{}", workflow.title());
    if let Some(limits) = workflow.limits() {
        for hint in limits.hints(mode) {
            debug!("{hint}");
        }
    }

    workflow.form = form;
    info!("Processing...");
    let outcome = workflow
        .submit(session.client(), |tx| {
            info!(
                "{} {} of {:.2} completed ✅",
                mode.title(),
                tx.transaction_reference,
                tx.amount
            );
        })
        .await;

    match outcome {
        SubmitOutcome::Created(transaction) => {
            println!("{}", table::transactions(std::slice::from_ref(&transaction)));
        }
        SubmitOutcome::Invalid(e) => bail!("{e}"),
        SubmitOutcome::Failed(message) => bail!("{message}"),
    }

    // Balances changed, show them again
    let mut accounts = AccountsView::new();
    accounts.load(&session).await;
    match accounts.error() {
        Some(error) => warn!("{error}"),
        None => println!("{}", table::accounts(accounts.accounts())),
    }
    Ok(())
}

pub async fn limits(ctx: &AppCtx) -> Result<()> {
    let Some(session) = ctx.auth().require_session().await? else {
        return Ok(());
    };

    let limits = session
        .client()
        .transaction_limits()
        .await
        .context("Failed to load transaction limits")?;

    info!("Minimum amount: {:.2}", limits.min_transaction_amount);
    info!("Maximum per transaction: {:.2}", limits.max_single_transaction);
    info!("Daily withdrawal limit: {:.2}", limits.daily_withdrawal_limit);
    info!("Daily transfer limit: {:.2}", limits.daily_transfer_limit);
    Ok(())
}
