use std::{fmt, str::FromStr};

use derive_more::{Display, Into};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::constants::{EMAIL_PATTERN, MIN_PASSWORD_LENGTH};

lazy_static::lazy_static! {
    static ref EMAIL_REGEX: regex::Regex = regex::Regex::new(EMAIL_PATTERN)
        .expect("Failed to compile email regex");
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("invalid account id: must be a positive integer")]
    AccountId,
    #[error("invalid user id: must be a positive integer")]
    UserId,
    #[error("invalid amount: must be a number greater than zero")]
    Amount,
    #[error("invalid username: must be a non-empty string")]
    Username,
    #[error("invalid password: must be at least 6 characters")]
    Password,
    #[error("invalid email address")]
    Email,
}

fn parse_positive_id(s: &str) -> Option<i64> {
    s.trim().parse::<i64>().ok().filter(|v| *v > 0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Into)]
pub struct AccountId(i64);
impl AccountId {
    pub fn new(v: i64) -> Result<Self, ValueError> {
        if v > 0 {
            Ok(Self(v))
        } else {
            Err(ValueError::AccountId)
        }
    }
    pub fn get(self) -> i64 {
        self.0
    }
}
impl FromStr for AccountId {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_positive_id(s).map(Self).ok_or(ValueError::AccountId)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Into)]
pub struct UserId(i64);
impl UserId {
    pub fn get(self) -> i64 {
        self.0
    }
}
impl FromStr for UserId {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_positive_id(s).map(Self).ok_or(ValueError::UserId)
    }
}

/// A strictly positive money amount as typed by the user.
///
/// Only positivity is checked here, the minimum amount and the limits are
/// enforced by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Into)]
pub struct Amount(Decimal);
impl Amount {
    pub fn new(v: Decimal) -> Result<Self, ValueError> {
        if v > Decimal::ZERO {
            Ok(Self(v))
        } else {
            Err(ValueError::Amount)
        }
    }
    pub fn get(self) -> Decimal {
        self.0
    }
}
impl FromStr for Amount {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let v = Decimal::from_str(t)
            .or_else(|_| Decimal::from_scientific(t))
            .map_err(|_| ValueError::Amount)?;
        Self::new(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct Username(String);
impl Username {
    pub fn new(s: &str) -> Result<Self, ValueError> {
        let t = s.trim();
        if t.is_empty() {
            Err(ValueError::Username)
        } else {
            Ok(Self(t.into()))
        }
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl FromStr for Username {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Login password. Only checked for emptiness, the length rule applies to new passwords.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);
impl Password {
    pub fn new(s: &str) -> Result<Self, ValueError> {
        if s.is_empty() {
            Err(ValueError::Password)
        } else {
            Ok(Self(s.into()))
        }
    }
    /// Password accepted for a new account or a password change
    pub fn new_secret(s: &str) -> Result<Self, ValueError> {
        if s.chars().count() >= MIN_PASSWORD_LENGTH {
            Ok(Self(s.into()))
        } else {
            Err(ValueError::Password)
        }
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}
impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct Email(String);
impl Email {
    pub fn new(s: &str) -> Result<Self, ValueError> {
        let t = s.trim();
        if EMAIL_REGEX.is_match(t) {
            Ok(Self(t.into()))
        } else {
            Err(ValueError::Email)
        }
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl FromStr for Email {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
