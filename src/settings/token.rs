use std::sync::Arc;

use anyhow::Result;
use bank_api::session::TokenStore;

use super::{Settings, SettingsStore};

/// Keeps the session token in the settings file so it survives between commands
pub struct SettingsTokenStore {
    settings_store: Arc<dyn SettingsStore>,
}

impl SettingsTokenStore {
    pub fn new(settings_store: Arc<dyn SettingsStore>) -> Self {
        Self { settings_store }
    }
}

impl TokenStore for SettingsTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.settings_store.load()?.token)
    }

    fn save(&self, token: &str) -> Result<()> {
        self.settings_store
            .update(&mut |s: &mut Settings| s.token = Some(token.to_string()))?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.settings_store.update(&mut |s: &mut Settings| s.token = None)?;
        Ok(())
    }
}
