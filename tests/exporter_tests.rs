// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::*;
use pocketbook::backend::TransactionQuery;
use pocketbook::models::TransactionKind;
use pocketbook::{cli, commands::exporter};
use serde_json::json;
use tempfile::tempdir;

fn backend() -> FakeBackend {
    let mut backend = FakeBackend::with_categories();
    let mut split = row(3, date(2025, 3, 20), "100", TransactionKind::Expense, Some(1));
    split.installment_number = Some(2);
    split.total_installments = Some(4);
    backend.rows = vec![
        split,
        row(1, date(2025, 3, 2), "3000", TransactionKind::Income, Some(3)),
        row(2, date(2025, 3, 5), "12.5", TransactionKind::Expense, None),
        row(4, date(2025, 4, 1), "99", TransactionKind::Expense, Some(2)),
    ];
    backend
}

#[test]
fn export_transactions_writes_csv_oldest_first() {
    let mut app = signed_in_app(backend());
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("march.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "pocketbook",
        "export",
        "transactions",
        "--month",
        "2025-03",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&mut app, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        [
            "id",
            "date",
            "description",
            "kind",
            "amount",
            "category",
            "payment_method",
            "installment"
        ]
    );
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 3);
    assert_eq!(
        records[0].iter().collect::<Vec<_>>(),
        ["1", "2025-03-02", "tx 1", "income", "3000.00", "Salary", "debit", ""]
    );
    assert_eq!(&records[1][5], "Uncategorized");
    assert_eq!(&records[1][4], "12.50");
    assert_eq!(&records[2][7], "2/4");
}

#[test]
fn export_transactions_streams_pretty_json() {
    let mut app = signed_in_app(backend());
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("march.json");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "pocketbook",
        "export",
        "transactions",
        "--month",
        "2025-03",
        "--format",
        "json",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&mut app, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 3);
    assert_eq!(
        parsed[2],
        json!({
            "id": 3,
            "date": "2025-03-20",
            "description": "tx 3",
            "kind": "expense",
            "amount": "100.00",
            "category": "Food",
            "payment_method": "debit",
            "installment": "2/4",
        })
    );
    assert!(parsed[1]["category"].is_null());
}

#[test]
fn export_transactions_filters_by_kind_on_the_server() {
    let mut app = signed_in_app(backend());
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("expenses.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "pocketbook",
        "export",
        "transactions",
        "--month",
        "2025-03",
        "--kind",
        "expense",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&mut app, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let queried: Vec<TransactionQuery> = app
        .ledger
        .backend()
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Transactions(q) => Some(q),
            _ => None,
        })
        .collect();
    assert_eq!(queried.len(), 1);
    assert_eq!(queried[0].kind, Some(TransactionKind::Expense));

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let kinds: Vec<String> = rdr
        .records()
        .map(|r| r.unwrap()[3].to_string())
        .collect();
    assert_eq!(kinds, ["expense", "expense"]);
}
