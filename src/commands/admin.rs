use anyhow::{bail, Result};
use tracing::{info, warn};

use bank_api::{
    client::error::failure_message,
    session::{RoleGate, Session},
    views::admin::{AdminPanel, ACCESS_DENIED},
};

use crate::{
    cli::{AdminArgs, AdminCommands, UsersArgs},
    ux::table,
    AppCtx,
};

pub async fn handle(args: AdminArgs, ctx: &AppCtx) -> Result<()> {
    let Some(session) = ctx.auth().require_session().await? else {
        return Ok(());
    };
    if !session.is_admin() {
        warn!("{ACCESS_DENIED}");
        return Ok(());
    }

    let mut panel = AdminPanel::new();
    if let Some((action, id)) = args.command.user_action() {
        if !panel.user_action(&session, id, action).await {
            bail!("{}", panel.error().unwrap_or("User action failed"));
        }
        info!("User {id}: {action} done ✅");
        return print_users(&panel);
    }

    if let AdminCommands::Users(UsersArgs { search: Some(name) }) = &args.command {
        return search_users(&session, name).await;
    }

    panel.load(&session).await;
    if let Some(notice) = panel.notice() {
        bail!("{notice}");
    }

    match args.command {
        AdminCommands::Stats => {
            if let Some(stats) = panel.stats() {
                info!("Total users: {}", stats.total_users);
                info!("Active accounts: {}", stats.active_accounts);
                info!("Total transactions: {}", stats.total_transactions);
                info!("Pending transactions: {}", stats.pending_transactions);
            }
            Ok(())
        }
        AdminCommands::Accounts => {
            info!("Found {} accounts", panel.accounts().len());
            println!("{}", table::accounts(panel.accounts()));
            Ok(())
        }
        AdminCommands::Transactions => {
            info!("Showing {} transactions", panel.transactions().len());
            println!("{}", table::transactions(panel.transactions()));
            Ok(())
        }
        _ => print_users(&panel),
    }
}

fn print_users(panel: &AdminPanel) -> Result<()> {
    if let Some(notice) = panel.notice() {
        bail!("{notice}");
    }
    info!("Found {} users", panel.users().len());
    println!("{}", table::users(panel.users()));
    Ok(())
}

async fn search_users(session: &Session, name: &str) -> Result<()> {
    let users = session
        .client()
        .search_users(name)
        .await
        .map_err(|e| anyhow::anyhow!(failure_message(&e, "Failed to search users")))?;
    info!("Found {} users matching {:?}", users.len(), name);
    println!("{}", table::users(&users));
    Ok(())
}
