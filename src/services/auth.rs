use anyhow::{bail, Result};
use std::{
    io::{stdout, Write},
    sync::Arc,
};
use tracing::{info, warn};

use crate::settings::{Settings, SettingsStore, SettingsTokenStore};
use bank_api::{
    client::{auth::Credentials, BankWebClient},
    session::{AuthOutcome, RoleGate, Session},
    types::{Password, Username},
};

pub trait CredentialsProvider {
    fn read_password(&self, prompt: &str) -> Result<String>;
}
pub struct StdinCredentialsProvider;
impl CredentialsProvider for StdinCredentialsProvider {
    fn read_password(&self, prompt: &str) -> Result<String> {
        print!("\n{prompt} (hidden): ");
        let _ = stdout().flush();
        let password = rpassword::read_password()?;
        println!();
        Ok(password)
    }
}

pub trait ClientFactory {
    fn new_client(&self, base_url: &str) -> Result<BankWebClient>;
}
pub struct DefaultClientFactory;
impl ClientFactory for DefaultClientFactory {
    fn new_client(&self, base_url: &str) -> Result<BankWebClient> {
        bank_api::get_client(base_url)
    }
}

pub struct AuthService {
    settings_store: Arc<dyn SettingsStore>,
    credentials_provider: Box<dyn CredentialsProvider>,
    client_factory: Box<dyn ClientFactory>,
}

impl AuthService {
    pub fn new(
        settings_store: Arc<dyn SettingsStore>,
        credentials_provider: Box<dyn CredentialsProvider>,
        client_factory: Box<dyn ClientFactory>,
    ) -> Self {
        Self {
            settings_store,
            credentials_provider,
            client_factory,
        }
    }

    pub fn with_defaults(settings_store: Arc<dyn SettingsStore>) -> Self {
        Self::new(
            settings_store,
            Box::new(StdinCredentialsProvider),
            Box::new(DefaultClientFactory),
        )
    }

    pub fn credentials_provider(&self) -> &dyn CredentialsProvider {
        self.credentials_provider.as_ref()
    }

    /// Session built from the settings, without any network call
    pub fn session(&self, settings: &Settings) -> Result<Session> {
        let client = self.client_factory.new_client(&settings.base_url())?;
        let token_store = SettingsTokenStore::new(self.settings_store.clone());
        Ok(Session::new(client, Box::new(token_store)))
    }

    /// Session rebuilt from the saved token. Unauthenticated when there is none or it expired.
    pub async fn resume(&self) -> Result<Session> {
        let settings = self.settings_store.load()?;
        let mut session = self.session(&settings)?;
        session.resolve().await;
        Ok(session)
    }

    /// Like [`AuthService::resume`], but only returns a logged in session
    pub async fn require_session(&self) -> Result<Option<Session>> {
        let session = self.resume().await?;
        if session.is_authenticated() {
            return Ok(Some(session));
        }
        warn!("You are not logged in, please run `bank-cli login` first");
        Ok(None)
    }

    pub fn logout(&self) -> Result<()> {
        let settings = self.settings_store.load()?;
        self.session(&settings)?.logout();
        Ok(())
    }

    /// Ask for the password and log in. The username defaults to the last one used.
    pub async fn login(&self, username: Option<Username>) -> Result<Option<Session>> {
        let settings = self.settings_store.load()?;
        let username = match username {
            Some(username) => username,
            None => match settings.username.as_deref() {
                Some(saved) => Username::new(saved)?,
                None => {
                    warn!("No username found in settings, please run `bank-cli login --username <USERNAME>`");
                    return Ok(None);
                }
            },
        };

        info!("We'll try to log you in as {:?}", username.as_str());
        let password = Password::new(
            &self
                .credentials_provider
                .read_password("Enter your password")?,
        )?;

        let mut session = self.session(&settings)?;
        let credentials = Credentials {
            username: username.clone(),
            password,
        };
        match session.login(&credentials).await {
            AuthOutcome::Success => {
                let name = username.as_str().to_string();
                self.settings_store
                    .update(&mut |s: &mut Settings| s.username = Some(name.clone()))?;
                info!("Login successful ✅");
                Ok(Some(session))
            }
            AuthOutcome::Failure(message) => bail!("{message}"),
        }
    }
}
