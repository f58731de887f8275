use anyhow::{bail, Result};
use tracing::{info, warn};

use bank_api::{
    client::error::failure_message,
    session::Session,
    views::{
        accounts::{can_change_status, can_create, can_delete, AccountsView},
        transactions::TransactionsView,
    },
};

use crate::{
    cli::{AccountIdArgs, AccountStatusArgs, AccountsArgs, AccountsCommands, CreateAccountArgs},
    ux::table,
    AppCtx,
};

pub async fn handle(args: AccountsArgs, ctx: &AppCtx) -> Result<()> {
    let Some(session) = ctx.auth().require_session().await? else {
        return Ok(());
    };

    match args.command.unwrap_or(AccountsCommands::List) {
        AccountsCommands::List => list(&session).await,
        AccountsCommands::Show(args) => show(args, &session).await,
        AccountsCommands::Create(args) => create(args, &session).await,
        AccountsCommands::Status(args) => update_status(args, &session).await,
        AccountsCommands::Delete(args) => delete(args, &session).await,
    }
}

fn print(view: &AccountsView) -> Result<()> {
    if let Some(error) = view.error() {
        bail!("{error}");
    }
    info!("Found {} accounts", view.accounts().len());
    println!("{}", table::accounts(view.accounts()));
    Ok(())
}

async fn list(session: &Session) -> Result<()> {
    let mut view = AccountsView::new();
    view.load(session).await;
    print(&view)
}

async fn show(args: AccountIdArgs, session: &Session) -> Result<()> {
    let account = session
        .client()
        .account(args.id)
        .await
        .map_err(|e| anyhow::anyhow!(failure_message(&e, "Failed to load account")))?;
    println!("{}", table::accounts(std::slice::from_ref(&account)));

    let mut history = TransactionsView::new();
    history.load_account(session, args.id).await;
    if let Some(error) = history.error() {
        bail!("{error}");
    }
    info!("{} transactions", history.transactions().len());
    println!("{}", table::transactions(history.transactions()));
    Ok(())
}

async fn create(args: CreateAccountArgs, session: &Session) -> Result<()> {
    if !can_create(session) {
        warn!("Only customers can open accounts");
        return Ok(());
    }

    let mut view = AccountsView::new();
    if !view.create_account(session, args.account_type).await {
        bail!("{}", view.error().unwrap_or("Failed to create account"));
    }
    info!("{} account created ✅", args.account_type);
    print(&view)
}

async fn update_status(args: AccountStatusArgs, session: &Session) -> Result<()> {
    if !can_change_status(session) {
        warn!("Only employees and admins can change the status of an account");
        return Ok(());
    }

    let mut view = AccountsView::new();
    if !view.update_status(session, args.id, args.status).await {
        bail!("{}", view.error().unwrap_or("Failed to update account status"));
    }
    info!("Account {} is now {} ✅", args.id, args.status);
    print(&view)
}

async fn delete(args: AccountIdArgs, session: &Session) -> Result<()> {
    if !can_delete(session) {
        warn!("Only admins can delete accounts");
        return Ok(());
    }

    let mut view = AccountsView::new();
    if !view.delete_account(session, args.id).await {
        bail!("{}", view.error().unwrap_or("Failed to delete account"));
    }
    info!("Account {} deleted ✅", args.id);
    print(&view)
}
