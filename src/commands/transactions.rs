// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::backend::Backend;
use crate::categories::label_and_icon;
use crate::commands::categories::resolve_names;
use crate::models::{PaymentMethod, RecordId, Transaction, TransactionKind};
use crate::utils::{confirm, maybe_print_json, parse_date, pretty_table, today};
use crate::validation::{InsertPlan, TransactionEdit, TransactionForm};
use crate::view::{MonthRange, MonthView, TypeFilter, month_range};
use anyhow::Result;
use std::io::{BufRead, Write};

pub fn handle<B: Backend>(app: &mut App<B>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            add(app, sub)?;
        }
        Some(("list", sub)) => list(app, sub)?,
        Some(("edit", sub)) => edit(app, sub)?,
        Some(("rm", sub)) => {
            remove(app, sub, &mut std::io::stdin().lock(), &mut std::io::stdout())?;
        }
        _ => {}
    }
    Ok(())
}

/// `--month` if given, otherwise the current month.
pub fn month_arg(sub: &clap::ArgMatches) -> Result<MonthRange> {
    Ok(match sub.get_one::<String>("month") {
        Some(m) => MonthRange::parse(m)?,
        None => month_range(today()),
    })
}

pub fn add<B: Backend>(app: &mut App<B>, sub: &clap::ArgMatches) -> Result<InsertPlan> {
    let session = app.active_session()?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let kind: TransactionKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let payment_method: PaymentMethod = sub.get_one::<String>("method").unwrap().parse()?;
    let categories = app.ledger.categories(&session)?;
    let (main_category_id, subcategory_id) = resolve_names(
        &categories,
        Some(kind),
        sub.get_one::<String>("category"),
        sub.get_one::<String>("subcategory"),
    )?;
    let form = TransactionForm {
        date,
        description: sub.get_one::<String>("description").unwrap().to_string(),
        amount: sub.get_one::<String>("amount").unwrap().to_string(),
        kind,
        main_category_id,
        subcategory_id,
        payment_method,
        installments: sub.get_one::<u32>("installments").copied(),
    };
    let plan = app.ledger.add_transaction(&session, &form)?;
    match plan {
        InsertPlan::Single => println!(
            "Recorded {} of {} on {} '{}'",
            kind,
            form.amount.trim(),
            date,
            form.description.trim()
        ),
        InsertPlan::Installments(n) => println!(
            "Recorded {} of {} on {} '{}' in {} monthly installments",
            kind,
            form.amount.trim(),
            date,
            form.description.trim(),
            n
        ),
    }
    Ok(plan)
}

/// Loads the requested month and positions it on the requested page.
pub fn query_view<B: Backend>(app: &mut App<B>, sub: &clap::ArgMatches) -> Result<MonthView> {
    let session = app.active_session()?;
    let range = month_arg(sub)?;
    let filter: TypeFilter = sub.get_one::<String>("kind").unwrap().parse()?;
    let mut view = app.ledger.load_month(&session, range, filter)?;
    if let Some(size) = sub.get_one::<usize>("page-size") {
        view.set_page_size(*size);
    }
    view.go_to_page(*sub.get_one::<usize>("page").unwrap_or(&1));
    Ok(view)
}

pub fn transaction_cells(tx: &Transaction) -> Vec<String> {
    let (label, icon) = label_and_icon(tx.category.as_ref());
    vec![
        tx.id.to_string(),
        tx.date.to_string(),
        tx.description.clone(),
        format!("{} {}", icon, label),
        tx.payment_method.to_string(),
        tx.installment.map(|i| i.to_string()).unwrap_or_default(),
        tx.kind.to_string(),
        tx.amount.to_string(),
    ]
}

fn list<B: Backend>(app: &mut App<B>, sub: &clap::ArgMatches) -> Result<()> {
    let view = query_view(app, sub)?;
    let page = view.page();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &page)? {
        let rows: Vec<Vec<String>> = page.items.iter().map(|tx| transaction_cells(tx)).collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Category", "Method", "Inst.", "Kind", "Amount"],
                rows,
            )
        );
        println!(
            "{} · {} · page {}/{}",
            view.range(),
            filter_label(view.filter()),
            page.number,
            page.total_pages
        );
    }
    Ok(())
}

fn filter_label(filter: TypeFilter) -> &'static str {
    match filter {
        TypeFilter::All => "all",
        TypeFilter::Income => "income",
        TypeFilter::Expense => "expense",
    }
}

pub fn edit<B: Backend>(app: &mut App<B>, sub: &clap::ArgMatches) -> Result<()> {
    let session = app.active_session()?;
    let id: RecordId = sub.get_one::<String>("id").unwrap().parse()?;
    let kind = sub
        .get_one::<String>("kind")
        .map(|k| k.parse::<TransactionKind>())
        .transpose()?;
    let payment_method = sub
        .get_one::<String>("method")
        .map(|m| m.parse::<PaymentMethod>())
        .transpose()?;
    let date = sub.get_one::<String>("date").map(|d| parse_date(d)).transpose()?;
    let (main_category_id, subcategory_id) = if sub.contains_id("category") {
        let categories = app.ledger.categories(&session)?;
        resolve_names(
            &categories,
            kind,
            sub.get_one::<String>("category"),
            sub.get_one::<String>("subcategory"),
        )?
    } else {
        resolve_names(&Default::default(), kind, None, sub.get_one::<String>("subcategory"))?
    };
    let edit = TransactionEdit {
        date,
        description: sub.get_one::<String>("description").cloned(),
        amount: sub.get_one::<String>("amount").cloned(),
        kind,
        main_category_id,
        subcategory_id,
        payment_method,
    };
    app.ledger.edit_transaction(&session, &id, &edit)?;
    println!("Updated transaction {}", id);
    Ok(())
}

/// Deletes after an explicit confirmation; declining sends nothing.
pub fn remove<B: Backend, R: BufRead, W: Write>(
    app: &mut App<B>,
    sub: &clap::ArgMatches,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    let id: RecordId = sub.get_one::<String>("id").unwrap().parse()?;
    if !sub.get_flag("yes") && !confirm(&format!("Delete transaction {}?", id), input, output)? {
        writeln!(output, "Cancelled.")?;
        return Ok(false);
    }
    let session = app.active_session()?;
    app.ledger.delete_transaction(&session, &id)?;
    writeln!(output, "Deleted transaction {}", id)?;
    Ok(true)
}
