//! Role-shaped view models.
//!
//! Every view loads through a [`crate::session::Session`], picks what to fetch with
//! [`crate::session::RoleGate`], and turns failures into a message: no method here
//! returns an error.

pub mod accounts;
pub mod admin;
pub mod dashboard;
pub mod transactions;

use tracing::debug;

/// Progress of the last load or submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    InFlight,
    Settled,
}

/// Shown when a view is loaded without a signed in user
pub const NOT_SIGNED_IN: &str = "Please log in first";

fn failure(err: &anyhow::Error, message: &str) -> String {
    debug!("{message}: {err:#}");
    message.to_string()
}
