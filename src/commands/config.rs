use anyhow::Result;
use tracing::info;

use crate::{cli::ConfigArgs, settings::Settings, AppCtx};

pub async fn handle(args: ConfigArgs, ctx: &AppCtx) -> Result<()> {
    if args.url.is_none() && args.username.is_none() {
        let settings = ctx.settings_store.load()?;
        info!("API base URL: {}", settings.base_url());
        match settings.username {
            Some(username) => info!("Username: {username}"),
            None => info!("No username configured"),
        }
        return Ok(());
    }

    let url = args.url.map(|url| url.trim().trim_end_matches('/').to_string());
    let username = args.username.map(|u| u.as_str().to_string());
    let url_changed = url.is_some();
    ctx.settings_store.update(&mut |s: &mut Settings| {
        if let Some(url) = &url {
            s.base_url = Some(url.clone());
            // A token is only valid for the server that issued it
            s.token = None;
        }
        if let Some(username) = &username {
            s.username = Some(username.clone());
        }
    })?;
    if url_changed {
        info!("Base URL changed, please log in again");
    }
    info!("Configuration saved successfully ✅");
    Ok(())
}
