pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const USER_AGENT: &str = concat!("bank-cli/", env!("CARGO_PKG_VERSION"));

/// Number of transactions a customer sees on the dashboard
pub const CUSTOMER_RECENT_TRANSACTIONS: usize = 5;
/// Number of transactions staff members see on the dashboard
pub const STAFF_RECENT_TRANSACTIONS: usize = 10;
/// Admin panel only displays the first transactions returned by the server
pub const ADMIN_TRANSACTIONS_DISPLAY_LIMIT: usize = 100;

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
