use anyhow::{bail, Result};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{error::ClientError, BankWebClient};
use crate::{
    registration::RegistrationRequest,
    types::{Password, Username},
    user::{Bank, Identity},
};

/// Login credentials
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: Username,
    pub password: Password,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Identity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: Identity,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl BankWebClient {
    /// Exchange credentials for a bearer token and the matching identity.
    ///
    /// The token is not kept by the client, see [`crate::session::Session::login`].
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        debug!(username = credentials.username.as_str(), "logging in");
        self.send_json(
            Method::POST,
            "/auth/login",
            Some(&LoginRequest {
                username: credentials.username.as_str(),
                password: credentials.password.as_str(),
            }),
        )
        .await
    }

    pub async fn register(&self, request: &RegistrationRequest) -> Result<RegistrationResponse> {
        self.send_json(Method::POST, "/auth/register", Some(request))
            .await
    }

    /// Banks a new customer can register with
    pub async fn banks(&self) -> Result<Vec<Bank>> {
        self.get_json("/auth/banks").await
    }

    /// Resolve the current token to an identity
    pub async fn current_user(&self) -> Result<Identity> {
        if self.token.is_none() {
            bail!(ClientError::NotAuthenticated);
        }
        self.get_json("/auth/user").await
    }

    pub async fn change_password(
        &self,
        current_password: &Password,
        new_password: &Password,
    ) -> Result<MessageResponse> {
        self.send_json(
            Method::PUT,
            "/auth/change-password",
            Some(&ChangePasswordRequest {
                current_password: current_password.as_str(),
                new_password: new_password.as_str(),
            }),
        )
        .await
    }
}
