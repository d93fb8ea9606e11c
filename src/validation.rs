// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client-side checks run before anything is sent to the backend.

use crate::error::ValidationError;
use crate::models::{PaymentMethod, RecordId, TransactionKind};
use crate::money::Money;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const MIN_INSTALLMENTS: u32 = 2;
pub const MAX_INSTALLMENTS: u32 = 48;
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("valid phone regex"));

pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required("email"));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(email.to_lowercase())
}

/// Strips spaces, dashes and parentheses, then expects an optional `+` and 7-15 digits.
pub fn validate_phone(phone: &str) -> Result<String, ValidationError> {
    let compact: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    if compact.is_empty() {
        return Err(ValidationError::Required("phone"));
    }
    if !PHONE_RE.is_match(&compact) {
        return Err(ValidationError::InvalidPhone(phone.trim().to_string()));
    }
    Ok(compact)
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Required("password"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    Ok(())
}

pub fn validate_amount(amount: &str) -> Result<Money, ValidationError> {
    if amount.trim().is_empty() {
        return Err(ValidationError::Required("amount"));
    }
    let money = Money::parse_input(amount)?;
    if money.is_zero() {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(money)
}

fn required_text(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(value.to_string())
}

/// Which insert procedure a new transaction goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPlan {
    Single,
    Installments(u32),
}

/// Maps an optional installment count onto an [`InsertPlan`]. A count of one
/// is an ordinary single insert.
pub fn plan_installments(
    count: Option<u32>,
    method: PaymentMethod,
) -> Result<InsertPlan, ValidationError> {
    match count {
        None | Some(1) => Ok(InsertPlan::Single),
        Some(n) if !(MIN_INSTALLMENTS..=MAX_INSTALLMENTS).contains(&n) => {
            Err(ValidationError::InstallmentsOutOfRange {
                count: n,
                min: MIN_INSTALLMENTS,
                max: MAX_INSTALLMENTS,
            })
        }
        Some(_) if method != PaymentMethod::Credit => Err(ValidationError::InstallmentsRequireCredit),
        Some(n) => Ok(InsertPlan::Installments(n)),
    }
}

/// Raw input for a new transaction, as typed by the user.
#[derive(Debug, Clone)]
pub struct TransactionForm {
    pub date: NaiveDate,
    pub description: String,
    pub amount: String,
    pub kind: TransactionKind,
    pub main_category_id: Option<RecordId>,
    pub subcategory_id: Option<RecordId>,
    pub payment_method: PaymentMethod,
    pub installments: Option<u32>,
}

/// Insert payload for the backend's transaction procedures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionInsert {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub kind: TransactionKind,
    pub main_category_id: RecordId,
    pub subcategory_id: Option<RecordId>,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidTransaction {
    pub insert: TransactionInsert,
    pub plan: InsertPlan,
}

impl TransactionForm {
    pub fn validate(&self) -> Result<ValidTransaction, ValidationError> {
        let description = required_text(&self.description, "description")?;
        let amount = validate_amount(&self.amount)?;
        let main_category_id = self
            .main_category_id
            .clone()
            .ok_or(ValidationError::MissingCategory)?;
        let plan = plan_installments(self.installments, self.payment_method)?;
        Ok(ValidTransaction {
            insert: TransactionInsert {
                date: self.date,
                description,
                amount,
                kind: self.kind,
                main_category_id,
                subcategory_id: self.subcategory_id.clone(),
                payment_method: self.payment_method,
            },
            plan,
        })
    }
}

/// Raw input for editing a transaction. Only fields that are set are checked
/// and sent.
#[derive(Debug, Clone, Default)]
pub struct TransactionEdit {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount: Option<String>,
    pub kind: Option<TransactionKind>,
    pub main_category_id: Option<RecordId>,
    pub subcategory_id: Option<RecordId>,
    pub payment_method: Option<PaymentMethod>,
}

/// Column updates for a PATCH against `transactions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_category_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        *self == TransactionPatch::default()
    }
}

impl TransactionEdit {
    pub fn validate(&self) -> Result<TransactionPatch, ValidationError> {
        let description = self
            .description
            .as_deref()
            .map(|d| required_text(d, "description"))
            .transpose()?;
        let amount = self.amount.as_deref().map(validate_amount).transpose()?;
        Ok(TransactionPatch {
            date: self.date,
            description,
            amount,
            kind: self.kind,
            main_category_id: self.main_category_id.clone(),
            subcategory_id: self.subcategory_id.clone(),
            payment_method: self.payment_method,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
}

/// Sign-up input after validation: trimmed, lower-cased email and compacted phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSignUp {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<ValidSignUp, ValidationError> {
        let full_name = required_text(&self.full_name, "name")?;
        let email = validate_email(&self.email)?;
        validate_password(&self.password)?;
        let phone = self
            .phone
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(validate_phone)
            .transpose()?;
        Ok(ValidSignUp {
            email,
            password: self.password.clone(),
            full_name,
            phone,
        })
    }
}

/// Sign-in only checks that both fields are usable; the backend judges the rest.
pub fn validate_credentials(email: &str, password: &str) -> Result<String, ValidationError> {
    let email = validate_email(email)?;
    if password.is_empty() {
        return Err(ValidationError::Required("password"));
    }
    Ok(email)
}
