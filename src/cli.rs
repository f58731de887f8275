use bank_api::{
    account::{AccountStatus, AccountType},
    client::admin::UserAction,
    types::{AccountId, Email, UserId, Username},
};
use clap::{value_parser, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Optional path to a settings JSON file, instead of the one in the config directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub settings: Option<String>,

    /// Log debug messages on the console
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure the CLI
    Config(ConfigArgs),

    /// Log in, the session is kept until `logout`
    Login(LoginArgs),

    /// Log out and forget the session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Create a customer profile (does not require authentication)
    Register(RegisterArgs),

    /// List the banks you can register with (does not require authentication)
    Banks,

    /// List and manage accounts
    Accounts(AccountsArgs),

    /// Deposit money on one of your active accounts
    Deposit(AccountTransactionArgs),

    /// Withdraw money from one of your active accounts
    Withdraw(AccountTransactionArgs),

    /// Transfer money from one of your active accounts to any account number
    Transfer(TransferArgs),

    /// Show the transaction limits
    Limits,

    /// List transactions
    Transactions(TransactionsArgs),

    /// Overview of accounts and latest transactions
    Dashboard,

    /// Bank administration (admins only)
    Admin(AdminArgs),

    /// Change your password
    Password,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Base URL of the bank API, e.g. http://localhost:8080/api
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Username to log in with
    #[arg(short, long, value_name = "USERNAME")]
    pub username: Option<Username>,
}

#[derive(Args)]
pub struct LoginArgs {
    /// Defaults to the last username used
    #[arg(short, long, value_name = "USERNAME")]
    pub username: Option<Username>,
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(short, long, value_name = "USERNAME")]
    pub username: String,

    #[arg(long, value_name = "EMAIL")]
    pub email: Email,

    #[arg(long, value_name = "NAME")]
    pub first_name: String,

    #[arg(long, value_name = "NAME")]
    pub last_name: String,

    #[arg(long, value_name = "PHONE")]
    pub phone: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    /// Bank to register with, you can get it with the `bank-cli banks` command
    #[arg(long, value_name = "ID", value_parser = value_parser!(i64).range(1..))]
    pub bank: i64,
}

#[derive(Args)]
pub struct AccountsArgs {
    #[command(subcommand)]
    pub command: Option<AccountsCommands>,
}

#[derive(Subcommand)]
pub enum AccountsCommands {
    /// List accounts: yours as a customer, every account of the bank as staff (default)
    List,

    /// Show an account and its transactions
    Show(AccountIdArgs),

    /// Open a new account (customers)
    Create(CreateAccountArgs),

    /// Change the status of an account (employees and admins)
    Status(AccountStatusArgs),

    /// Delete an account (admins)
    Delete(AccountIdArgs),
}

#[derive(Args)]
pub struct AccountIdArgs {
    /// Account ID, you can get it with the `bank-cli accounts` command
    #[arg(long, value_name = "ID")]
    pub id: AccountId,
}

#[derive(Args)]
pub struct CreateAccountArgs {
    #[arg(long = "type", value_enum, default_value_t = AccountType::Savings)]
    pub account_type: AccountType,
}

#[derive(Args)]
pub struct AccountStatusArgs {
    /// Account ID, you can get it with the `bank-cli accounts` command
    #[arg(long, value_name = "ID")]
    pub id: AccountId,

    #[arg(long, value_enum)]
    pub status: AccountStatus,
}

/// Amounts are kept as typed and checked when submitting
#[derive(Args)]
pub struct AccountTransactionArgs {
    /// One of your active accounts, by ID
    #[arg(long, value_name = "ID")]
    pub account: String,

    /// Amount, e.g. 150.00
    #[arg(long)]
    pub amount: String,

    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct TransferArgs {
    /// Source account, one of your active accounts, by ID
    #[arg(long = "from", value_name = "ID")]
    pub from_account: String,

    /// Destination account number (e.g: "SAV-001")
    #[arg(long = "to", value_name = "NUMBER")]
    pub to_account: String,

    /// Amount, e.g. 150.00
    #[arg(long)]
    pub amount: String,

    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct TransactionsArgs {
    /// Only the transactions of this account
    #[arg(long, value_name = "ID")]
    pub account: Option<AccountId>,
}

#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommands,
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Figures of your bank
    Stats,

    /// List users
    Users(UsersArgs),

    /// List every account of your bank
    Accounts,

    /// List the latest transactions of your bank
    Transactions,

    /// Activate a user
    Activate(UserIdArgs),

    /// Deactivate a user
    Deactivate(UserIdArgs),

    /// Delete a user
    Delete(UserIdArgs),
}

impl AdminCommands {
    pub fn user_action(&self) -> Option<(UserAction, UserId)> {
        match self {
            AdminCommands::Activate(args) => Some((UserAction::Activate, args.id)),
            AdminCommands::Deactivate(args) => Some((UserAction::Deactivate, args.id)),
            AdminCommands::Delete(args) => Some((UserAction::Delete, args.id)),
            _ => None,
        }
    }
}

#[derive(Args)]
pub struct UsersArgs {
    /// Only users whose name contains this
    #[arg(long, value_name = "NAME")]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct UserIdArgs {
    #[arg(long, value_name = "ID")]
    pub id: UserId,
}
