use anyhow::{bail, Result};
use tracing::info;

use bank_api::{session::RoleGate, views::dashboard::Dashboard};

use crate::{ux::table, AppCtx};

pub async fn handle(ctx: &AppCtx) -> Result<()> {
    let Some(session) = ctx.auth().require_session().await? else {
        return Ok(());
    };

    let mut dashboard = Dashboard::new();
    dashboard.load(&session).await;
    if let Some(error) = dashboard.error() {
        bail!("{error}");
    }

    if let Some(identity) = session.identity() {
        info!("Welcome back, {}", identity.full_name());
    }

    if let Some(stats) = dashboard.stats() {
        if let Some(bank) = &stats.bank_name {
            info!("{bank}");
        }
        info!("Total users: {}", stats.total_users);
        info!("Active accounts: {}", stats.active_accounts);
        info!("Total transactions: {}", stats.total_transactions);
        info!("Pending transactions: {}", stats.pending_transactions);
    }

    let scope = if session.is_customer() { "Your" } else { "All" };
    info!(
        "{scope} accounts: {} (total balance {:.2})",
        dashboard.accounts().len(),
        dashboard.total_balance()
    );
    println!("{}", table::accounts(dashboard.accounts()));
    println!();
    info!("Recent transactions");
    println!("{}", table::transactions(dashboard.recent_transactions()));
    Ok(())
}
