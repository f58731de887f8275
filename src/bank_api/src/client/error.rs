use serde::Deserialize;
use thiserror::Error;

/// Business error codes the server attaches to rejected transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InsufficientBalance,
    InvalidAmount,
    DailyLimitExceeded,
    AccountNotActive,
}

impl ErrorCode {
    pub fn parse(code: &str) -> Option<ErrorCode> {
        match code {
            "INSUFFICIENT_BALANCE" => Some(ErrorCode::InsufficientBalance),
            "INVALID_AMOUNT" => Some(ErrorCode::InvalidAmount),
            "DAILY_LIMIT_EXCEEDED" => Some(ErrorCode::DailyLimitExceeded),
            "ACCOUNT_NOT_ACTIVE" => Some(ErrorCode::AccountNotActive),
            _ => None,
        }
    }

    /// Remediation hint appended to the server message
    pub fn hint(&self) -> &'static str {
        match self {
            ErrorCode::InsufficientBalance => {
                "Tip: Check your account balance before making transactions."
            }
            ErrorCode::InvalidAmount => "Tip: Amount must be positive and not exceed limits.",
            ErrorCode::DailyLimitExceeded => {
                "Tip: Try again tomorrow or contact your bank for higher limits."
            }
            ErrorCode::AccountNotActive => {
                "Tip: Please contact customer service to activate your account."
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status
    #[error("request failed with status {status}: {}", describe(.message, .error))]
    Api {
        status: u16,
        code: Option<String>,
        message: Option<String>,
        error: Option<String>,
        /// Field validation errors, as `(field, message)`
        field_errors: Vec<(String, String)>,
    },
    #[error("not authenticated, please log in")]
    NotAuthenticated,
}

impl ClientError {
    /// Build an API error out of a response status and its raw body
    pub(crate) fn from_response(status: u16, body: &str) -> ClientError {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let field_errors = parsed
            .errors
            .map(|errors| {
                errors
                    .into_iter()
                    .map(|(field, msg)| {
                        let msg = match msg {
                            serde_json::Value::String(s) => s,
                            other => other.to_string(),
                        };
                        (field, msg)
                    })
                    .collect()
            })
            .unwrap_or_default();

        ClientError::Api {
            status,
            code: parsed.error_code,
            message: parsed.message.filter(|m| !m.is_empty()),
            error: parsed.error.filter(|m| !m.is_empty()),
            field_errors,
        }
    }

    pub fn known_code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { code: Some(code), .. } => ErrorCode::parse(code),
            _ => None,
        }
    }

    /// The human readable `message` reported by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

fn describe<'a>(message: &'a Option<String>, error: &'a Option<String>) -> &'a str {
    message
        .as_deref()
        .or(error.as_deref())
        .unwrap_or("no details")
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error_code: Option<String>,
    message: Option<String>,
    error: Option<String>,
    errors: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Server message carried by an error, falling back to its `error` field.
pub fn server_message(err: &anyhow::Error) -> Option<String> {
    match err.downcast_ref::<ClientError>() {
        Some(ClientError::Api { message, error, .. }) => message.clone().or_else(|| error.clone()),
        _ => None,
    }
}

/// Message shown when an action fails: the server message when there is one,
/// the given fallback otherwise.
pub fn failure_message(err: &anyhow::Error, fallback: &str) -> String {
    server_message(err).unwrap_or_else(|| fallback.to_string())
}
