// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backend::Backend;
use crate::error::{AuthError, Result};
use crate::session::Session;
use crate::validation::{SignUpForm, validate_credentials};

/// Registers a new account.
///
/// Duplicate email addresses and phone numbers are checked against the
/// backend before the account is created. Returns `None` when the account
/// exists but still has to be confirmed by email.
pub fn sign_up<B: Backend + ?Sized>(backend: &B, form: &SignUpForm) -> Result<Option<Session>> {
    let valid = form.validate()?;
    if backend.email_exists(&valid.email)? {
        return Err(AuthError::EmailTaken.into());
    }
    if let Some(phone) = &valid.phone {
        if backend.phone_exists(phone)? {
            return Err(AuthError::PhoneTaken.into());
        }
    }
    let session = backend.sign_up(&valid)?;
    tracing::info!(email = %valid.email, confirmed = session.is_some(), "account created");
    Ok(session)
}

pub fn sign_in<B: Backend + ?Sized>(backend: &B, email: &str, password: &str) -> Result<Session> {
    let email = validate_credentials(email, password)?;
    let session = backend.sign_in(&email, password)?;
    tracing::info!(user = %session.user_id, "signed in");
    Ok(session)
}

/// Revokes the session remotely. Local state is cleared by the caller even if
/// this fails.
pub fn sign_out<B: Backend + ?Sized>(backend: &B, session: &Session) -> Result<()> {
    backend.sign_out(session)
}
