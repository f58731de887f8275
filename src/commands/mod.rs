pub mod accounts;
pub mod admin;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod transaction;
pub mod transactions;
