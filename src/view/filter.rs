// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ValidationError;
use crate::models::{Transaction, TransactionKind};
use serde::Serialize;
use std::str::FromStr;

/// Transaction-type selector shown above the transaction list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn kind(&self) -> Option<TransactionKind> {
        match self {
            TypeFilter::All => None,
            TypeFilter::Income => Some(TransactionKind::Income),
            TypeFilter::Expense => Some(TransactionKind::Expense),
        }
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        self.kind().is_none_or(|kind| tx.kind == kind)
    }

    /// Keeps only the transactions this selector admits, in their original order.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|tx| self.matches(tx)).collect()
    }
}

impl From<Option<TransactionKind>> for TypeFilter {
    fn from(kind: Option<TransactionKind>) -> Self {
        match kind {
            None => TypeFilter::All,
            Some(TransactionKind::Income) => TypeFilter::Income,
            Some(TransactionKind::Expense) => TypeFilter::Expense,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        s.parse::<TransactionKind>().map(|k| TypeFilter::from(Some(k)))
    }
}
