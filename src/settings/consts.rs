pub const APP_QUALIFIER: &str = "com";
pub const APP_ORGANIZATION: &str = "bank";
pub const APP_NAME: &str = "bank-cli";

pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "bank-cli.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Overrides the configured API base URL
pub const BASE_URL_ENV: &str = "BANK_API_URL";
