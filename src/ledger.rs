// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backend::{Backend, NewSubcategory, TransactionQuery};
use crate::categories::CategoryDirectory;
use crate::error::{Result, ValidationError};
use crate::models::{MonthlySummary, RecordId, Transaction};
use crate::session::Session;
use crate::validation::{InsertPlan, TransactionEdit, TransactionForm};
use crate::view::{MonthRange, MonthView, TypeFilter};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Ledger operations on top of a [`Backend`].
///
/// Nothing is cached between calls: every read goes to the backend, and
/// nothing local changes until the backend has accepted a write.
pub struct Ledger<B> {
    backend: B,
    page_size: usize,
}

impl<B: Backend> Ledger<B> {
    pub fn new(backend: B, page_size: usize) -> Self {
        Ledger {
            backend,
            page_size: page_size.max(1),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn categories(&self, session: &Session) -> Result<CategoryDirectory> {
        let mains = self.backend.main_categories(session)?;
        let subs = self.backend.subcategories(session)?;
        Ok(CategoryDirectory::new(mains, subs))
    }

    pub fn transactions(
        &self,
        session: &Session,
        categories: &CategoryDirectory,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>> {
        let rows = self
            .backend
            .transactions(session, query)
            .inspect_err(|e| tracing::error!(range = %query.range, "loading transactions failed: {}", e))?;
        tracing::debug!(range = %query.range, count = rows.len(), "loaded transactions");
        Ok(rows.into_iter().map(|row| categories.hydrate(row)).collect())
    }

    /// Loads the whole month eagerly and wraps it in a [`MonthView`] on page 1.
    pub fn load_month(
        &self,
        session: &Session,
        range: MonthRange,
        filter: TypeFilter,
    ) -> Result<MonthView> {
        let categories = self.categories(session)?;
        let query = TransactionQuery { range, kind: None };
        let transactions = self.transactions(session, &categories, &query)?;
        let mut view = MonthView::new(range, transactions, self.page_size);
        view.set_filter(filter);
        Ok(view)
    }

    /// Validates and stores a new transaction, routing split credit purchases
    /// to the installment procedure.
    pub fn add_transaction(&self, session: &Session, form: &TransactionForm) -> Result<InsertPlan> {
        let valid = form.validate()?;
        let saved = match valid.plan {
            InsertPlan::Single => self.backend.insert_transaction(session, &valid.insert),
            InsertPlan::Installments(count) => {
                self.backend
                    .insert_installments(session, &valid.insert, count)
            }
        };
        saved.inspect_err(|e| tracing::error!("saving transaction failed: {}", e))?;
        tracing::info!(plan = ?valid.plan, date = %valid.insert.date, "transaction saved");
        Ok(valid.plan)
    }

    pub fn edit_transaction(
        &self,
        session: &Session,
        id: &RecordId,
        edit: &TransactionEdit,
    ) -> Result<()> {
        let patch = edit.validate()?;
        if patch.is_empty() {
            return Err(ValidationError::Required("a field to change").into());
        }
        self.backend
            .update_transaction(session, id, &patch)
            .inspect_err(|e| tracing::error!(%id, "updating transaction failed: {}", e))?;
        tracing::info!(%id, "transaction updated");
        Ok(())
    }

    /// Callers must have asked the user to confirm before calling this.
    pub fn delete_transaction(&self, session: &Session, id: &RecordId) -> Result<()> {
        self.backend
            .delete_transaction(session, id)
            .inspect_err(|e| tracing::error!(%id, "deleting transaction failed: {}", e))?;
        tracing::info!(%id, "transaction deleted");
        Ok(())
    }

    pub fn add_subcategory(&self, session: &Session, sub: &NewSubcategory) -> Result<()> {
        if sub.name.trim().is_empty() {
            return Err(ValidationError::Required("name").into());
        }
        let sub = NewSubcategory {
            name: sub.name.trim().to_string(),
            ..sub.clone()
        };
        self.backend
            .insert_subcategory(session, &sub)
            .inspect_err(|e| tracing::error!("saving subcategory failed: {}", e))
    }

    pub fn delete_subcategory(&self, session: &Session, id: &RecordId) -> Result<()> {
        self.backend
            .delete_subcategory(session, id)
            .inspect_err(|e| tracing::error!(%id, "deleting subcategory failed: {}", e))
    }

    /// Month totals computed by the backend's `get_financial_summary` procedure.
    pub fn remote_summary(&self, session: &Session, range: MonthRange) -> Result<MonthlySummary> {
        self.backend
            .financial_summary(session, &range)
            .inspect_err(|e| tracing::error!(%range, "loading summary failed: {}", e))
    }
}
