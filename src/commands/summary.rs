// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::backend::Backend;
use crate::commands::transactions::month_arg;
use crate::models::{CategoryExpense, MonthlySummary};
use crate::utils::{maybe_print_json, pretty_table};
use crate::view::{MonthView, TypeFilter};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MonthReport {
    pub month: String,
    pub filter: TypeFilter,
    pub income: String,
    pub expense: String,
    pub balance: String,
    pub categories: Vec<CategoryExpense>,
}

impl MonthReport {
    pub fn from_view(view: &MonthView) -> Self {
        MonthReport::new(view.range().to_string(), view.filter(), view.summary(), view.categories())
    }

    fn new(
        month: String,
        filter: TypeFilter,
        summary: MonthlySummary,
        categories: Vec<CategoryExpense>,
    ) -> Self {
        MonthReport {
            month,
            filter,
            income: summary.income.to_string(),
            expense: summary.expense.to_string(),
            balance: format!("{:.2}", summary.balance()),
            categories,
        }
    }
}

pub fn handle<B: Backend>(app: &mut App<B>, sub: &clap::ArgMatches) -> Result<()> {
    let report = build_report(app, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Month", "Income", "Expense", "Balance"],
            vec![vec![
                report.month.clone(),
                report.income.clone(),
                report.expense.clone(),
                report.balance.clone(),
            ]],
        )
    );
    if !report.categories.is_empty() {
        let rows: Vec<Vec<String>> = report
            .categories
            .iter()
            .map(|c| {
                vec![
                    format!("{} {}", c.icon, c.label),
                    c.amount.to_string(),
                    c.color.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Color"], rows));
    }
    Ok(())
}

/// With `--remote` the totals come from the backend procedure and no
/// category breakdown is produced.
pub fn build_report<B: Backend>(app: &mut App<B>, sub: &clap::ArgMatches) -> Result<MonthReport> {
    let session = app.active_session()?;
    let range = month_arg(sub)?;
    let filter: TypeFilter = sub.get_one::<String>("kind").unwrap().parse()?;
    if sub.get_flag("remote") {
        let summary = app.ledger.remote_summary(&session, range)?;
        return Ok(MonthReport::new(
            range.to_string(),
            TypeFilter::All,
            summary,
            Vec::new(),
        ));
    }
    let view = app.ledger.load_month(&session, range, filter)?;
    Ok(MonthReport::from_view(&view))
}
