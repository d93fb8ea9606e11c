// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The month dashboard view-model: one month of transactions, a type filter,
//! the summary and category breakdown over the filtered set, and a pager.

pub mod filter;
pub mod paging;
pub mod range;
pub mod summary;

pub use filter::TypeFilter;
pub use paging::{Page, Pager, paginate};
pub use range::{MonthRange, month_range};
pub use summary::{PALETTE, by_category, summarize};

use crate::models::{CategoryExpense, MonthlySummary, RecordId, Transaction};

#[derive(Debug, Clone)]
pub struct MonthView {
    range: MonthRange,
    transactions: Vec<Transaction>,
    filter: TypeFilter,
    pager: Pager,
}

impl MonthView {
    pub fn new(range: MonthRange, transactions: Vec<Transaction>, page_size: usize) -> Self {
        MonthView {
            range,
            transactions,
            filter: TypeFilter::All,
            pager: Pager::new(page_size),
        }
    }

    pub fn range(&self) -> MonthRange {
        self.range
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn filter(&self) -> TypeFilter {
        self.filter
    }

    pub fn current_page(&self) -> usize {
        self.pager.current()
    }

    pub fn filtered(&self) -> Vec<&Transaction> {
        self.filter.apply(&self.transactions)
    }

    pub fn summary(&self) -> MonthlySummary {
        summarize(self.filtered())
    }

    pub fn categories(&self) -> Vec<CategoryExpense> {
        by_category(self.filtered())
    }

    pub fn page(&self) -> Page<&Transaction> {
        self.pager.slice(&self.filtered())
    }

    pub fn page_size(&self) -> usize {
        self.pager.page_size()
    }

    /// Starts over on page 1 with a different page size.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.pager = Pager::new(page_size);
    }

    /// Changing the selector always returns to the first page.
    pub fn set_filter(&mut self, filter: TypeFilter) {
        self.filter = filter;
        self.pager.reset();
    }

    pub fn has_next_page(&self) -> bool {
        self.pager.has_next(self.filtered().len())
    }

    pub fn has_previous_page(&self) -> bool {
        self.pager.has_previous()
    }

    pub fn next_page(&mut self) {
        let count = self.filtered().len();
        self.pager.next(count);
    }

    pub fn previous_page(&mut self) {
        self.pager.previous();
    }

    pub fn go_to_page(&mut self, page: usize) {
        let count = self.filtered().len();
        self.pager.go_to(page, count);
    }

    /// Swaps in freshly fetched data, keeping the current page when it still exists.
    pub fn replace(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
        self.clamp_pager();
    }

    /// Drops a transaction the backend has already confirmed as deleted.
    pub fn remove(&mut self, id: &RecordId) -> Option<Transaction> {
        let pos = self.transactions.iter().position(|tx| &tx.id == id)?;
        let removed = self.transactions.remove(pos);
        self.clamp_pager();
        Some(removed)
    }

    fn clamp_pager(&mut self) {
        let current = self.pager.current();
        self.go_to_page(current);
    }
}
