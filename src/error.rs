// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::money::MoneyError;

/// Problems caught on the client before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("'{0}' is not a valid phone number")]
    InvalidPhone(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] MoneyError),
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("installments must be between {min} and {max}, got {count}")]
    InstallmentsOutOfRange { count: u32, min: u32, max: u32 },
    #[error("installments are only available for credit payments")]
    InstallmentsRequireCredit,
    #[error("a category must be selected")]
    MissingCategory,
    #[error("password must be at least {0} characters long")]
    PasswordTooShort(usize),
    #[error("unknown {field} '{value}'")]
    UnknownOption { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("email or password is incorrect")]
    InvalidCredentials,
    #[error("this email address has not been confirmed yet, check your inbox")]
    EmailNotConfirmed,
    #[error("an account with this email address already exists")]
    EmailTaken,
    #[error("an account with this phone number already exists")]
    PhoneTaken,
    #[error("you are not signed in")]
    NotSignedIn,
    #[error("{0}")]
    Other(String),
}

impl AuthError {
    /// Maps the auth service's English error strings onto known variants.
    pub fn from_backend_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("invalid login credentials") {
            AuthError::InvalidCredentials
        } else if lower.contains("email not confirmed") {
            AuthError::EmailNotConfirmed
        } else if lower.contains("already registered") || lower.contains("already been registered")
        {
            AuthError::EmailTaken
        } else {
            AuthError::Other(message.to_string())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected backend response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("local storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl Error {
    /// Text suitable for showing to the user. Transport failures are kept generic.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(e) => e.to_string(),
            Error::Auth(e) => e.to_string(),
            Error::Backend { .. } | Error::Http(_) | Error::Decode(_) => {
                "Something went wrong while talking to the server. Please try again.".to_string()
            }
            Error::Storage(_) => "Could not read or write local settings.".to_string(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
