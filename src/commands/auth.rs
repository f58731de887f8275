use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use bank_api::{
    registration::RegistrationForm,
    session::RegistrationOutcome,
    types::Password,
};

use crate::{
    cli::{LoginArgs, RegisterArgs},
    ux::table,
    AppCtx,
};

pub async fn login(args: LoginArgs, ctx: &AppCtx) -> Result<()> {
    let Some(session) = ctx.auth().login(args.username).await? else {
        return Ok(());
    };
    if let Some(identity) = session.identity() {
        info!("Welcome {} ({})", identity.full_name(), identity.role);
    }
    Ok(())
}

pub async fn logout(ctx: &AppCtx) -> Result<()> {
    ctx.auth().logout()?;
    info!("Logged out ✅");
    Ok(())
}

pub async fn whoami(ctx: &AppCtx) -> Result<()> {
    let Some(session) = ctx.auth().require_session().await? else {
        return Ok(());
    };
    let Some(identity) = session.identity() else {
        return Ok(());
    };

    info!(
        "Logged in as {} ({}) with role {}",
        identity.username,
        identity.full_name(),
        identity.role
    );
    if let Some(bank) = &identity.bank {
        info!("Bank: {} ({})", bank.bank_name, bank.bank_code);
    }
    if !identity.active {
        warn!("Your profile is deactivated, please contact your bank");
    }
    Ok(())
}

pub async fn banks(ctx: &AppCtx) -> Result<()> {
    let banks = ctx
        .client()?
        .banks()
        .await
        .context("Failed to load banks")?;

    info!("Found {} banks", banks.len());
    println!("{}", table::banks(&banks));
    Ok(())
}

pub async fn register(args: RegisterArgs, ctx: &AppCtx) -> Result<()> {
    let auth = ctx.auth();
    let password = auth
        .credentials_provider()
        .read_password("Choose a password")?;
    let confirm_password = auth
        .credentials_provider()
        .read_password("Confirm your password")?;

    let form = RegistrationForm {
        username: args.username,
        password,
        confirm_password,
        email: args.email.as_str().to_string(),
        first_name: args.first_name,
        last_name: args.last_name,
        phone_number: args.phone.unwrap_or_default(),
        address: args.address.unwrap_or_default(),
        bank_id: Some(args.bank),
    };

    let settings = ctx.settings_store.load()?;
    let session = auth.session(&settings)?;
    match session.register(&form).await {
        RegistrationOutcome::Registered { message, user } => {
            info!(
                "{} ✅",
                message.unwrap_or_else(|| "Registration successful".to_string())
            );
            info!(
                "You can now log in with `bank-cli login --username {}`",
                user.username
            );
            Ok(())
        }
        RegistrationOutcome::Failure(message) => bail!("{message}"),
    }
}

pub async fn change_password(ctx: &AppCtx) -> Result<()> {
    let auth = ctx.auth();
    let Some(session) = auth.require_session().await? else {
        return Ok(());
    };

    let provider = auth.credentials_provider();
    let current = Password::new(&provider.read_password("Enter your current password")?)?;
    let new = provider.read_password("Enter your new password")?;
    let confirm = provider.read_password("Confirm your new password")?;
    let Ok(new) = Password::new_secret(&new) else {
        bail!("Password must be at least 6 characters long");
    };
    if new.as_str() != confirm {
        bail!("Passwords do not match");
    }

    let res = session
        .client()
        .change_password(&current, &new)
        .await
        .map_err(|e| {
            anyhow::anyhow!(bank_api::client::error::failure_message(
                &e,
                "Failed to change password"
            ))
        })?;
    info!(
        "{} ✅",
        res.message
            .unwrap_or_else(|| "Password changed successfully".to_string())
    );
    Ok(())
}
