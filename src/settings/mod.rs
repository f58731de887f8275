pub mod consts;
mod logging;
mod settings;
mod token;

pub use logging::init_logger;
pub use settings::{FileSettingsStore, JsonFileSettingsStore, Settings, SettingsStore};
pub use token::SettingsTokenStore;
