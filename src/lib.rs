use anyhow::Result;
use std::{path::PathBuf, sync::Arc};
use tracing::{debug, info};

pub mod cli;
pub mod commands;
pub mod services;
pub mod settings;
pub mod ux;

use bank_api::client::BankWebClient;
use cli::{Cli, Commands};
use services::AuthService;
use settings::{FileSettingsStore, JsonFileSettingsStore, SettingsStore};

/// Shared by every command
pub struct AppCtx {
    pub settings_store: Arc<dyn SettingsStore>,
}

impl AppCtx {
    pub fn new(settings_store: Arc<dyn SettingsStore>) -> Self {
        Self { settings_store }
    }

    pub fn auth(&self) -> AuthService {
        AuthService::with_defaults(self.settings_store.clone())
    }

    /// Client without any session, for the commands that do not require authentication
    pub fn client(&self) -> Result<BankWebClient> {
        let settings = self.settings_store.load()?;
        bank_api::get_client(&settings.base_url())
    }
}

#[cfg(not(tarpaulin_include))]
pub async fn run(cli: Cli) -> Result<()> {
    let settings_store: Arc<dyn SettingsStore> = match cli.settings {
        Some(path) => Arc::new(JsonFileSettingsStore::new(PathBuf::from(path))),
        None => Arc::new(FileSettingsStore::new()?),
    };
    let ctx = AppCtx::new(settings_store);

    info!("Welcome to the bank CLI 👋");
    debug!("Version {}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Config(args) => commands::config::handle(args, &ctx).await,
        Commands::Login(args) => commands::auth::login(args, &ctx).await,
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Register(args) => commands::auth::register(args, &ctx).await,
        Commands::Banks => commands::auth::banks(&ctx).await,
        Commands::Password => commands::auth::change_password(&ctx).await,
        Commands::Accounts(args) => commands::accounts::handle(args, &ctx).await,
        Commands::Deposit(args) => commands::transaction::deposit(args, &ctx).await,
        Commands::Withdraw(args) => commands::transaction::withdraw(args, &ctx).await,
        Commands::Transfer(args) => commands::transaction::transfer(args, &ctx).await,
        Commands::Limits => commands::transaction::limits(&ctx).await,
        Commands::Transactions(args) => commands::transactions::handle(args, &ctx).await,
        Commands::Dashboard => commands::dashboard::handle(&ctx).await,
        Commands::Admin(args) => commands::admin::handle(args, &ctx).await,
    }
}
