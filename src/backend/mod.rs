// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The remote store. Everything the ledger knows comes through [`Backend`];
//! [`rest::RestBackend`] talks to the hosted REST/RPC service.

pub mod rest;

pub use rest::RestBackend;

use crate::error::Result;
use crate::models::{
    Installment, MainCategory, MonthlySummary, PaymentMethod, RecordId, Subcategory,
    TransactionKind,
};
use crate::money::Money;
use crate::session::Session;
use crate::validation::{TransactionInsert, TransactionPatch, ValidSignUp};
use crate::view::MonthRange;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A `transactions` row as stored remotely, before category resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: RecordId,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub main_category_id: Option<RecordId>,
    #[serde(default)]
    pub subcategory_id: Option<RecordId>,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub installment_number: Option<u32>,
    #[serde(default)]
    pub total_installments: Option<u32>,
}

impl TransactionRow {
    /// Installment badge for this row, if it carries a consistent marker pair.
    pub fn installment(&self) -> Option<Installment> {
        match (self.installment_number, self.total_installments) {
            (None, None) => None,
            (current, total) => {
                let installment = Installment::from_markers(current, total);
                if installment.is_none() {
                    tracing::warn!(
                        id = %self.id,
                        ?current,
                        ?total,
                        "ignoring inconsistent installment markers"
                    );
                }
                installment
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionQuery {
    pub range: MonthRange,
    pub kind: Option<TransactionKind>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubcategory {
    pub name: String,
    pub main_category_id: RecordId,
    pub kind: TransactionKind,
}

/// Blocking access to the hosted store. Calls that touch user data take the
/// current [`Session`], whose scope restricts every query and mutation.
pub trait Backend {
    /// Returns `None` when the account still needs email confirmation.
    fn sign_up(&self, form: &ValidSignUp) -> Result<Option<Session>>;
    fn sign_in(&self, email: &str, password: &str) -> Result<Session>;
    fn refresh_session(&self, refresh_token: &str) -> Result<Session>;
    fn sign_out(&self, session: &Session) -> Result<()>;

    fn email_exists(&self, email: &str) -> Result<bool>;
    fn phone_exists(&self, phone: &str) -> Result<bool>;

    fn main_categories(&self, session: &Session) -> Result<Vec<MainCategory>>;
    fn subcategories(&self, session: &Session) -> Result<Vec<Subcategory>>;
    fn insert_subcategory(&self, session: &Session, sub: &NewSubcategory) -> Result<()>;
    fn delete_subcategory(&self, session: &Session, id: &RecordId) -> Result<()>;

    fn transactions(&self, session: &Session, query: &TransactionQuery)
    -> Result<Vec<TransactionRow>>;
    fn insert_transaction(&self, session: &Session, tx: &TransactionInsert) -> Result<()>;
    /// The backend splits the amount into `count` monthly rows.
    fn insert_installments(
        &self,
        session: &Session,
        tx: &TransactionInsert,
        count: u32,
    ) -> Result<()>;
    fn update_transaction(
        &self,
        session: &Session,
        id: &RecordId,
        patch: &TransactionPatch,
    ) -> Result<()>;
    fn delete_transaction(&self, session: &Session, id: &RecordId) -> Result<()>;

    fn financial_summary(&self, session: &Session, range: &MonthRange) -> Result<MonthlySummary>;
}
