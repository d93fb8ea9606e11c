// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::backend::{Backend, TransactionQuery};
use crate::categories::label_and_icon;
use crate::commands::transactions::month_arg;
use crate::view::TypeFilter;
use anyhow::Result;
use serde_json::json;

pub fn handle<B: Backend>(app: &mut App<B>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(app, sub),
        _ => Ok(()),
    }
}

pub fn export_transactions<B: Backend>(app: &mut App<B>, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    let session = app.active_session()?;
    let range = month_arg(sub)?;
    let filter: TypeFilter = sub.get_one::<String>("kind").unwrap().parse()?;
    let categories = app.ledger.categories(&session)?;
    let query = TransactionQuery {
        range,
        kind: filter.kind(),
    };
    let mut rows = app.ledger.transactions(&session, &categories, &query)?;
    rows.sort_by(|a, b| a.date.cmp(&b.date));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "date",
                "description",
                "kind",
                "amount",
                "category",
                "payment_method",
                "installment",
            ])?;
            for tx in &rows {
                let (label, _) = label_and_icon(tx.category.as_ref());
                wtr.write_record([
                    tx.id.to_string(),
                    tx.date.to_string(),
                    tx.description.clone(),
                    tx.kind.to_string(),
                    tx.amount.to_string(),
                    label,
                    tx.payment_method.to_string(),
                    tx.installment.map(|i| i.to_string()).unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|tx| {
                    json!({
                        "id": tx.id,
                        "date": tx.date,
                        "description": tx.description,
                        "kind": tx.kind,
                        "amount": tx.amount.to_string(),
                        "category": tx.category.as_ref().map(|c| c.label()),
                        "payment_method": tx.payment_method,
                        "installment": tx.installment.map(|i| i.to_string()),
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} transactions for {} to {}", rows.len(), range, out);
    Ok(())
}
