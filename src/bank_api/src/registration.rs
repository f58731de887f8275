//! Sign-up form of a new customer.
//!
//! New identities are bound to a bank chosen among [`crate::client::BankWebClient::banks`].

use serde::Serialize;
use thiserror::Error;

use crate::{
    types::{Email, Password, Username},
    user::Role,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Username is required")]
    Username,
    #[error("Password must be at least 6 characters long")]
    Password,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please enter a valid email address")]
    Email,
    #[error("First and last name are required")]
    Name,
    #[error("Please select a bank")]
    Bank,
}

/// Raw form fields, as typed by the user
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address: String,
    pub bank_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Self registration always creates customers
    pub role: Role,
    pub bank_id: Option<i64>,
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

impl RegistrationForm {
    /// Check the form locally and build the request body
    pub fn validate(&self) -> Result<RegistrationRequest, RegistrationError> {
        let username = Username::new(&self.username).map_err(|_| RegistrationError::Username)?;
        let password =
            Password::new_secret(&self.password).map_err(|_| RegistrationError::Password)?;
        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }
        let email = Email::new(&self.email).map_err(|_| RegistrationError::Email)?;
        let (Some(first_name), Some(last_name)) =
            (non_blank(&self.first_name), non_blank(&self.last_name))
        else {
            return Err(RegistrationError::Name);
        };
        let bank_id = self.bank_id.ok_or(RegistrationError::Bank)?;

        Ok(RegistrationRequest {
            username: username.as_str().to_string(),
            password: password.as_str().to_string(),
            email: email.as_str().to_string(),
            first_name,
            last_name,
            phone_number: non_blank(&self.phone_number),
            address: non_blank(&self.address),
            role: Role::Customer,
            bank_id: Some(bank_id),
        })
    }
}
