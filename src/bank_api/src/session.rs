//! Session of the current user.
//!
//! A [`Session`] owns the API client and the single token slot. It is created
//! once at start up with [`Session::start`] and handed to every view that needs
//! to know who is logged in.

use std::sync::Mutex;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{
    client::{
        auth::Credentials,
        error::{server_message, ClientError},
        BankWebClient,
    },
    registration::RegistrationForm,
    user::{Identity, Role},
};

/// Single-slot persistence of the authentication token
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Token store that only lives as long as the process
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            slot: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.slot.lock().map_err(|_| anyhow::anyhow!("token store poisoned"))?.clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.slot.lock().map_err(|_| anyhow::anyhow!("token store poisoned"))? =
            Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.lock().map_err(|_| anyhow::anyhow!("token store poisoned"))? = None;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unauthenticated,
    /// A stored token awaits confirmation by the server
    Resolving,
    Authenticated(Identity),
}

/// Role predicates. Every view decides what to fetch and show through this trait.
///
/// Advisory only: the server enforces authorization on every request.
pub trait RoleGate {
    fn role(&self) -> Option<Role>;

    fn is_authenticated(&self) -> bool {
        self.role().is_some()
    }

    fn has_role(&self, role: Role) -> bool {
        self.role() == Some(role)
    }

    fn has_any_role(&self, roles: &[Role]) -> bool {
        self.role().is_some_and(|r| roles.contains(&r))
    }

    fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    fn is_employee(&self) -> bool {
        self.has_role(Role::Employee)
    }

    fn is_customer(&self) -> bool {
        self.has_role(Role::Customer)
    }

    /// Employees and admins
    fn is_staff(&self) -> bool {
        self.has_any_role(&[Role::Employee, Role::Admin])
    }
}

impl RoleGate for SessionState {
    fn role(&self) -> Option<Role> {
        match self {
            SessionState::Authenticated(identity) => Some(identity.role),
            _ => None,
        }
    }
}

impl RoleGate for Option<&Identity> {
    fn role(&self) -> Option<Role> {
        self.map(|identity| identity.role)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Success,
    /// Human readable reason, the session is left unauthenticated
    Failure(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationOutcome {
    Registered { message: Option<String>, user: Identity },
    Failure(String),
}

pub struct Session {
    client: BankWebClient,
    token_store: Box<dyn TokenStore>,
    state: SessionState,
}

impl Session {
    /// Build a session without any network call.
    ///
    /// The state is `Resolving` when a token is stored, `Unauthenticated` otherwise.
    pub fn new(mut client: BankWebClient, token_store: Box<dyn TokenStore>) -> Self {
        let token = token_store.load().unwrap_or_else(|e| {
            warn!("Failed to read the stored token: {e:#}");
            None
        });

        let state = match token {
            Some(token) => {
                client.set_token(token);
                SessionState::Resolving
            }
            None => {
                client.clear_token();
                SessionState::Unauthenticated
            }
        };

        Self {
            client,
            token_store,
            state,
        }
    }

    /// Build a session and resolve the stored token, if any, to an identity
    pub async fn start(client: BankWebClient, token_store: Box<dyn TokenStore>) -> Self {
        let mut session = Self::new(client, token_store);
        session.resolve().await;
        session
    }

    /// Ask the server who the stored token belongs to.
    ///
    /// Any failure discards the token and leaves the session unauthenticated.
    pub async fn resolve(&mut self) {
        if self.state != SessionState::Resolving {
            return;
        }

        match self.client.current_user().await {
            Ok(identity) => {
                debug!(username = %identity.username, role = %identity.role, "session resolved");
                self.state = SessionState::Authenticated(identity);
            }
            Err(e) => {
                warn!("Stored session is no longer valid: {e:#}");
                self.discard_token();
                self.state = SessionState::Unauthenticated;
            }
        }
    }

    pub fn client(&self) -> &BankWebClient {
        &self.client
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn identity(&self) -> Option<&Identity> {
        match &self.state {
            SessionState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    /// Log in with the given credentials. Never fails, errors are reported in the outcome.
    pub async fn login(&mut self, credentials: &Credentials) -> AuthOutcome {
        match self.client.login(credentials).await {
            Ok(res) => {
                if let Err(e) = self.token_store.save(&res.token) {
                    warn!("Failed to persist the session token: {e:#}");
                }
                self.client.set_token(res.token);
                info!(username = %res.user.username, "logged in");
                self.state = SessionState::Authenticated(res.user);
                AuthOutcome::Success
            }
            Err(e) => {
                debug!("login failed: {e:#}");
                self.discard_token();
                self.state = SessionState::Unauthenticated;
                AuthOutcome::Failure(login_failure_message(&e))
            }
        }
    }

    /// Register a new customer. Does not log in.
    pub async fn register(&self, form: &RegistrationForm) -> RegistrationOutcome {
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => return RegistrationOutcome::Failure(e.to_string()),
        };

        match self.client.register(&request).await {
            Ok(res) => RegistrationOutcome::Registered {
                message: res.message,
                user: res.user,
            },
            Err(e) => RegistrationOutcome::Failure(registration_failure_message(&e)),
        }
    }

    /// Always ends unauthenticated
    pub fn logout(&mut self) {
        self.discard_token();
        self.state = SessionState::Unauthenticated;
        info!("logged out");
    }

    fn discard_token(&mut self) {
        self.client.clear_token();
        if let Err(e) = self.token_store.clear() {
            warn!("Failed to clear the stored token: {e:#}");
        }
    }
}

impl RoleGate for Session {
    fn role(&self) -> Option<Role> {
        self.state.role()
    }
}

fn login_failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ClientError>() {
        Some(ClientError::Api { .. }) => {
            server_message(err).unwrap_or_else(|| "Login failed".to_string())
        }
        _ => err.to_string(),
    }
}

fn registration_failure_message(err: &anyhow::Error) -> String {
    if let Some(ClientError::Api { field_errors, .. }) = err.downcast_ref::<ClientError>() {
        if !field_errors.is_empty() {
            return field_errors
                .iter()
                .map(|(field, msg)| format!("{field}: {msg}"))
                .collect::<Vec<_>>()
                .join(", ");
        }
        return server_message(err).unwrap_or_else(|| "Registration failed".to_string());
    }
    err.to_string()
}
