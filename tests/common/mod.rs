// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::NaiveDate;
use pocketbook::app::App;
use pocketbook::backend::{Backend, NewSubcategory, TransactionQuery, TransactionRow};
use pocketbook::error::{AuthError, Error, Result};
use pocketbook::models::{
    MainCategory, MonthlySummary, PaymentMethod, RecordId, Subcategory, TransactionKind,
};
use pocketbook::session::Session;
use pocketbook::validation::{TransactionInsert, TransactionPatch, ValidSignUp};
use pocketbook::view::{MonthRange, summarize};
use rusqlite::Connection;
use std::cell::RefCell;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SignUp(String),
    SignIn(String),
    Refresh(String),
    SignOut,
    EmailExists(String),
    PhoneExists(String),
    MainCategories,
    Subcategories,
    InsertSubcategory(NewSubcategory),
    DeleteSubcategory(RecordId),
    Transactions(TransactionQuery),
    Insert(TransactionInsert),
    InsertInstallments(TransactionInsert, u32),
    Update(RecordId, TransactionPatch),
    Delete(RecordId),
    FinancialSummary(MonthRange),
}

/// In-memory stand-in for the hosted store that records every call.
#[derive(Default)]
pub struct FakeBackend {
    pub mains: Vec<MainCategory>,
    pub subs: Vec<Subcategory>,
    pub rows: Vec<TransactionRow>,
    pub taken_emails: Vec<String>,
    pub taken_phones: Vec<String>,
    pub fail_writes: bool,
    pub reject_refresh: bool,
    pub offline_refresh: bool,
    pub calls: RefCell<Vec<Call>>,
}

impl FakeBackend {
    pub fn with_categories() -> Self {
        FakeBackend {
            mains: vec![
                main_category(1, "Food", "🍔", TransactionKind::Expense),
                main_category(2, "Transport", "🚌", TransactionKind::Expense),
                main_category(3, "Salary", "💼", TransactionKind::Income),
            ],
            subs: vec![Subcategory {
                id: RecordId::Int(10),
                name: "Groceries".into(),
                main_category_id: RecordId::Int(1),
                kind: TransactionKind::Expense,
                workspace_id: None,
                user_id: None,
            }],
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn write_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::Insert(_)
                        | Call::InsertInstallments(..)
                        | Call::Update(..)
                        | Call::Delete(_)
                        | Call::InsertSubcategory(_)
                        | Call::DeleteSubcategory(_)
                )
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn write(&self, call: Call) -> Result<()> {
        self.record(call);
        if self.fail_writes {
            return Err(Error::Backend {
                status: 500,
                message: "boom".into(),
            });
        }
        Ok(())
    }
}

impl Backend for FakeBackend {
    fn sign_up(&self, form: &ValidSignUp) -> Result<Option<Session>> {
        self.record(Call::SignUp(form.email.clone()));
        Ok(None)
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        self.record(Call::SignIn(email.to_string()));
        if password != "secret1" {
            return Err(AuthError::InvalidCredentials.into());
        }
        Ok(Session {
            email: email.to_string(),
            ..session()
        })
    }

    fn refresh_session(&self, refresh_token: &str) -> Result<Session> {
        self.record(Call::Refresh(refresh_token.to_string()));
        if self.reject_refresh {
            return Err(AuthError::Other("Invalid Refresh Token".into()).into());
        }
        if self.offline_refresh {
            return Err(Error::Backend {
                status: 503,
                message: "service unavailable".into(),
            });
        }
        Ok(Session {
            access_token: "fresh-token".into(),
            ..session()
        })
    }

    fn sign_out(&self, _session: &Session) -> Result<()> {
        self.record(Call::SignOut);
        Ok(())
    }

    fn email_exists(&self, email: &str) -> Result<bool> {
        self.record(Call::EmailExists(email.to_string()));
        Ok(self.taken_emails.iter().any(|e| e == email))
    }

    fn phone_exists(&self, phone: &str) -> Result<bool> {
        self.record(Call::PhoneExists(phone.to_string()));
        Ok(self.taken_phones.iter().any(|p| p == phone))
    }

    fn main_categories(&self, _session: &Session) -> Result<Vec<MainCategory>> {
        self.record(Call::MainCategories);
        Ok(self.mains.clone())
    }

    fn subcategories(&self, _session: &Session) -> Result<Vec<Subcategory>> {
        self.record(Call::Subcategories);
        Ok(self.subs.clone())
    }

    fn insert_subcategory(&self, _session: &Session, sub: &NewSubcategory) -> Result<()> {
        self.write(Call::InsertSubcategory(sub.clone()))
    }

    fn delete_subcategory(&self, _session: &Session, id: &RecordId) -> Result<()> {
        self.write(Call::DeleteSubcategory(id.clone()))
    }

    fn transactions(
        &self,
        _session: &Session,
        query: &TransactionQuery,
    ) -> Result<Vec<TransactionRow>> {
        self.record(Call::Transactions(*query));
        let mut rows: Vec<TransactionRow> = self
            .rows
            .iter()
            .filter(|r| query.range.contains(r.date))
            .filter(|r| query.kind.is_none_or(|k| r.kind == k))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    fn insert_transaction(&self, _session: &Session, tx: &TransactionInsert) -> Result<()> {
        self.write(Call::Insert(tx.clone()))
    }

    fn insert_installments(
        &self,
        _session: &Session,
        tx: &TransactionInsert,
        count: u32,
    ) -> Result<()> {
        self.write(Call::InsertInstallments(tx.clone(), count))
    }

    fn update_transaction(
        &self,
        _session: &Session,
        id: &RecordId,
        patch: &TransactionPatch,
    ) -> Result<()> {
        self.write(Call::Update(id.clone(), patch.clone()))
    }

    fn delete_transaction(&self, _session: &Session, id: &RecordId) -> Result<()> {
        self.write(Call::Delete(id.clone()))
    }

    fn financial_summary(&self, session: &Session, range: &MonthRange) -> Result<MonthlySummary> {
        self.record(Call::FinancialSummary(*range));
        let query = TransactionQuery {
            range: *range,
            kind: None,
        };
        let rows = self.transactions(session, &query)?;
        let dir = pocketbook::categories::CategoryDirectory::default();
        let txs: Vec<_> = rows.into_iter().map(|r| dir.hydrate(r)).collect();
        Ok(summarize(&txs))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn main_category(id: i64, name: &str, icon: &str, kind: TransactionKind) -> MainCategory {
    MainCategory {
        id: RecordId::Int(id),
        name: name.into(),
        icon: icon.into(),
        kind,
    }
}

pub fn row(
    id: i64,
    date: NaiveDate,
    amount: &str,
    kind: TransactionKind,
    main_category_id: Option<i64>,
) -> TransactionRow {
    TransactionRow {
        id: RecordId::Int(id),
        date,
        description: format!("tx {}", id),
        amount: amount.parse().unwrap(),
        kind,
        main_category_id: main_category_id.map(RecordId::Int),
        subcategory_id: None,
        payment_method: PaymentMethod::Debit,
        installment_number: None,
        total_installments: None,
    }
}

pub fn session() -> Session {
    Session {
        access_token: "token".into(),
        refresh_token: "refresh".into(),
        expires_at: i64::MAX / 2,
        user_id: RecordId::Text("user-1".into()),
        email: "ana@example.com".into(),
        workspace_id: Some(RecordId::Int(7)),
    }
}

pub fn settings_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    pocketbook::db::init_schema(&conn).unwrap();
    conn
}

/// An app that is already signed in.
pub fn signed_in_app(backend: FakeBackend) -> App<FakeBackend> {
    let conn = settings_conn();
    pocketbook::session::save(&conn, &session()).unwrap();
    App::new(conn, backend, 10).unwrap()
}
