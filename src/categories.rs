// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backend::TransactionRow;
use crate::models::{
    CategoryRef, MainCategory, RecordId, Subcategory, SubcategoryRef, Transaction, TransactionKind,
};

/// Label used wherever a transaction has no category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";
pub const UNCATEGORIZED_ICON: &str = "🏷️";

/// Id to name/icon lookup over the category tables, shared by the fetch layer
/// and the aggregation layer.
#[derive(Debug, Clone, Default)]
pub struct CategoryDirectory {
    mains: Vec<MainCategory>,
    subs: Vec<Subcategory>,
}

impl CategoryDirectory {
    pub fn new(mains: Vec<MainCategory>, subs: Vec<Subcategory>) -> Self {
        CategoryDirectory { mains, subs }
    }

    pub fn mains(&self) -> &[MainCategory] {
        &self.mains
    }

    pub fn subs(&self) -> &[Subcategory] {
        &self.subs
    }

    pub fn main(&self, id: &RecordId) -> Option<&MainCategory> {
        self.mains.iter().find(|c| &c.id == id)
    }

    pub fn sub(&self, id: &RecordId) -> Option<&Subcategory> {
        self.subs.iter().find(|c| &c.id == id)
    }

    pub fn mains_of_kind(&self, kind: TransactionKind) -> impl Iterator<Item = &MainCategory> {
        self.mains.iter().filter(move |c| c.kind == kind)
    }

    pub fn subs_of<'a>(&'a self, main_id: &'a RecordId) -> impl Iterator<Item = &'a Subcategory> {
        self.subs.iter().filter(move |s| &s.main_category_id == main_id)
    }

    /// Case-insensitive lookup by display name, optionally restricted to a kind.
    pub fn find_main(&self, name: &str, kind: Option<TransactionKind>) -> Option<&MainCategory> {
        let name = name.trim();
        self.mains.iter().find(|c| {
            c.name.eq_ignore_ascii_case(name) && kind.is_none_or(|k| c.kind == k)
        })
    }

    pub fn find_sub<'a>(&'a self, main_id: &'a RecordId, name: &str) -> Option<&'a Subcategory> {
        let name = name.trim();
        self.subs_of(main_id)
            .find(move |s| s.name.eq_ignore_ascii_case(name))
    }

    /// Resolves a (main, sub) id pair. A missing main id is recovered from the
    /// subcategory's owner; an unknown main category resolves to `None`.
    pub fn resolve(
        &self,
        main_id: Option<&RecordId>,
        sub_id: Option<&RecordId>,
    ) -> Option<CategoryRef> {
        let sub = sub_id.and_then(|id| self.sub(id));
        let main_id = main_id.or(sub.map(|s| &s.main_category_id))?;
        let main = self.main(main_id)?;
        Some(CategoryRef {
            main_id: main.id.clone(),
            name: main.name.clone(),
            icon: main.icon.clone(),
            subcategory: sub
                .filter(|s| s.main_category_id == main.id)
                .map(|s| SubcategoryRef {
                    id: s.id.clone(),
                    name: s.name.clone(),
                }),
        })
    }

    /// Turns a wire row into a [`Transaction`] with its category resolved.
    pub fn hydrate(&self, row: TransactionRow) -> Transaction {
        let category = self.resolve(row.main_category_id.as_ref(), row.subcategory_id.as_ref());
        if category.is_none() && row.main_category_id.is_some() {
            tracing::debug!(id = %row.id, "transaction references an unknown category");
        }
        let installment = row.installment();
        Transaction {
            id: row.id,
            date: row.date,
            description: row.description,
            amount: row.amount,
            kind: row.kind,
            category,
            payment_method: row.payment_method,
            installment,
        }
    }
}

/// Display label and icon for an optional category, with the shared fallback.
pub fn label_and_icon(category: Option<&CategoryRef>) -> (String, &str) {
    match category {
        Some(c) => (c.label(), c.icon.as_str()),
        None => (UNCATEGORIZED_LABEL.to_string(), UNCATEGORIZED_ICON),
    }
}
