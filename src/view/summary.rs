// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::{UNCATEGORIZED_ICON, UNCATEGORIZED_LABEL};
use crate::models::{CategoryExpense, MonthlySummary, Transaction, TransactionKind};
use crate::money::Money;

/// Chart colors, handed out by rank in the category breakdown.
pub const PALETTE: [&str; 8] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#8AC926", "#C9CBCF",
];

pub fn summarize<'a, I>(transactions: I) -> MonthlySummary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut summary = MonthlySummary::default();
    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => summary.income += tx.amount,
            TransactionKind::Expense => summary.expense += tx.amount,
        }
    }
    summary
}

/// Expense totals per main category, largest first.
///
/// Groups with equal totals keep the order in which their first transaction
/// was seen. Colors follow output position, so a category's color moves with
/// its rank.
pub fn by_category<'a, I>(transactions: I) -> Vec<CategoryExpense>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut groups: Vec<(String, String, Money)> = Vec::new();
    for tx in transactions {
        if tx.kind != TransactionKind::Expense {
            continue;
        }
        let (label, icon) = match &tx.category {
            Some(c) => (c.name.as_str(), c.icon.as_str()),
            None => (UNCATEGORIZED_LABEL, UNCATEGORIZED_ICON),
        };
        match groups.iter_mut().find(|(l, _, _)| l == label) {
            Some(group) => group.2 += tx.amount,
            None => groups.push((label.to_string(), icon.to_string(), tx.amount)),
        }
    }

    groups.sort_by(|a, b| b.2.cmp(&a.2));
    groups
        .into_iter()
        .enumerate()
        .map(|(i, (label, icon, amount))| CategoryExpense {
            label,
            icon,
            amount,
            color: PALETTE[i % PALETTE.len()],
        })
        .collect()
}
