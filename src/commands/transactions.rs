use anyhow::{bail, Result};
use tracing::info;

use bank_api::views::transactions::TransactionsView;

use crate::{cli::TransactionsArgs, ux::table, AppCtx};

pub async fn handle(args: TransactionsArgs, ctx: &AppCtx) -> Result<()> {
    let Some(session) = ctx.auth().require_session().await? else {
        return Ok(());
    };

    let mut view = TransactionsView::new();
    match args.account {
        Some(id) => view.load_account(&session, id).await,
        None => view.load(&session).await,
    }
    if let Some(error) = view.error() {
        bail!("{error}");
    }

    info!("Found {} transactions", view.transactions().len());
    println!("{}", table::transactions(view.transactions()));
    Ok(())
}
