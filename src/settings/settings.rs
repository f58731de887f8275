use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::{from_str, to_string_pretty};
use std::{fs, path::PathBuf};

use bank_api::constants::DEFAULT_BASE_URL;

use crate::settings::consts::{
    APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, BASE_URL_ENV, SETTINGS_FILE,
};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// API base URL, e.g. `http://localhost:8080/api`
    #[serde(default)]
    pub base_url: Option<String>,
    /// Last username used to log in
    #[serde(default)]
    pub username: Option<String>,
    /// Bearer token of the current session, removed on logout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Settings {
    /// Base URL to use: `BANK_API_URL` first, then the saved one, then the default
    pub fn base_url(&self) -> String {
        std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}

pub trait SettingsStore: Send + Sync {
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;

    /// Load, apply `f` and save back
    fn update(&self, f: &mut dyn FnMut(&mut Settings)) -> Result<Settings> {
        let mut settings = self.load()?;
        f(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }
}

pub struct FileSettingsStore {
    directory: PathBuf, // platform config directory (from ProjectDirs)
    file: &'static str, // "settings.json"
}

impl FileSettingsStore {
    /// Build from ProjectDirs config directory:
    ///   - Windows:   %APPDATA%\<qualifier>\<org>\<app>\settings.json
    ///   - macOS:     ~/Library/Application Support/<app>/settings.json
    ///   - Linux:     ~/.config/<app>/settings.json
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .ok_or_else(|| anyhow!("Could not determine project directories"))?;

        Ok(Self {
            directory: project_dirs.config_dir().to_path_buf(),
            file: SETTINGS_FILE,
        })
    }

    fn path(&self) -> PathBuf {
        self.directory.join(self.file)
    }

    fn ensure_directory(&self) -> Result<()> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!(
                "Failed to create settings directory: {}",
                self.directory.display()
            )
        })
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Settings> {
        self.ensure_directory()?;
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => {
                let defaults = Settings::default();
                self.save(&defaults)?;
                return Ok(defaults);
            }
        };
        from_str(&content).context("Failed to deserialize settings")
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        self.ensure_directory()?;
        fs::write(self.path(), to_string_pretty(settings)?)
            .with_context(|| format!("Failed to persist settings file: {}", self.path().display()))
    }
}

/// Settings kept in a file chosen by the user with `--settings`
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings file: {}", self.path.display()))?;
        from_str(&content).context("Failed to deserialize settings")
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        fs::write(&self.path, to_string_pretty(settings)?)
            .with_context(|| format!("Failed to persist settings file: {}", self.path.display()))
    }
}
