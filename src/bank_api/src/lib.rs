pub mod account;
pub mod client;
pub mod constants;
pub mod registration;
pub mod session;
pub mod transaction;
pub mod types;
pub mod user;
pub mod views;
pub mod workflow;

#[cfg(not(tarpaulin_include))]
pub fn get_client(base_url: &str) -> anyhow::Result<client::BankWebClient> {
    client::BankWebClient::new(base_url)
}
