// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::*;
use pocketbook::backend::{NewSubcategory, TransactionQuery};
use pocketbook::categories::UNCATEGORIZED_LABEL;
use pocketbook::ledger::Ledger;
use pocketbook::models::{PaymentMethod, RecordId, TransactionKind};
use pocketbook::validation::{InsertPlan, TransactionEdit, TransactionForm};
use pocketbook::view::{TypeFilter, month_range};
use pocketbook::{Error, ValidationError};

fn credit_form(installments: Option<u32>) -> TransactionForm {
    TransactionForm {
        date: date(2025, 3, 14),
        description: "TV".into(),
        amount: "1200".into(),
        kind: TransactionKind::Expense,
        main_category_id: Some(RecordId::Int(1)),
        subcategory_id: None,
        payment_method: PaymentMethod::Credit,
        installments,
    }
}

#[test]
fn one_installment_is_a_single_insert() {
    let ledger = Ledger::new(FakeBackend::with_categories(), 10);
    let plan = ledger.add_transaction(&session(), &credit_form(Some(1))).unwrap();
    assert_eq!(plan, InsertPlan::Single);
    let calls = ledger.backend().write_calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], Call::Insert(_)));
}

#[test]
fn split_purchases_use_the_installment_procedure() {
    let ledger = Ledger::new(FakeBackend::with_categories(), 10);
    let plan = ledger.add_transaction(&session(), &credit_form(Some(12))).unwrap();
    assert_eq!(plan, InsertPlan::Installments(12));
    match &ledger.backend().write_calls()[..] {
        [Call::InsertInstallments(insert, 12)] => {
            assert_eq!(insert.description, "TV");
            assert_eq!(insert.payment_method, PaymentMethod::Credit);
        }
        other => panic!("unexpected calls: {:?}", other),
    }
}

#[test]
fn out_of_range_installments_never_reach_the_backend() {
    let ledger = Ledger::new(FakeBackend::with_categories(), 10);
    let err = ledger
        .add_transaction(&session(), &credit_form(Some(49)))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InstallmentsOutOfRange { count: 49, .. })
    ));
    assert!(ledger.backend().calls().is_empty());
}

#[test]
fn failed_write_is_reported() {
    let backend = FakeBackend {
        fail_writes: true,
        ..FakeBackend::with_categories()
    };
    let ledger = Ledger::new(backend, 10);
    let err = ledger.add_transaction(&session(), &credit_form(None)).unwrap_err();
    assert!(matches!(err, Error::Backend { status: 500, .. }));
    assert_eq!(ledger.backend().write_calls().len(), 1);
}

#[test]
fn load_month_hydrates_and_filters() {
    let mut backend = FakeBackend::with_categories();
    backend.rows = vec![
        row(1, date(2025, 3, 2), "3000", TransactionKind::Income, Some(3)),
        row(2, date(2025, 3, 5), "45.10", TransactionKind::Expense, Some(1)),
        row(3, date(2025, 3, 9), "20", TransactionKind::Expense, Some(99)),
        row(4, date(2025, 3, 10), "4.90", TransactionKind::Expense, Some(1)),
        row(5, date(2025, 2, 27), "500", TransactionKind::Expense, Some(2)),
    ];
    let ledger = Ledger::new(backend, 10);
    let range = month_range(date(2025, 3, 1));
    let view = ledger
        .load_month(&session(), range, TypeFilter::Expense)
        .unwrap();

    assert_eq!(view.transactions().len(), 4);
    assert_eq!(view.filtered().len(), 3);
    assert_eq!(view.current_page(), 1);
    assert!(view.filtered().iter().all(|t| t.kind == TransactionKind::Expense));

    let summary = view.summary();
    assert_eq!(summary.income.to_string(), "0.00");
    assert_eq!(summary.expense.to_string(), "70.00");

    let cats = view.categories();
    assert_eq!(cats.len(), 2);
    assert_eq!(cats[0].label, "Food");
    assert_eq!(cats[0].amount.to_string(), "50.00");
    assert_eq!(cats[1].label, UNCATEGORIZED_LABEL);

    let query = TransactionQuery { range, kind: None };
    assert!(ledger.backend().calls().contains(&Call::Transactions(query)));
}

#[test]
fn empty_edit_is_rejected() {
    let ledger = Ledger::new(FakeBackend::with_categories(), 10);
    let err = ledger
        .edit_transaction(&session(), &RecordId::Int(1), &TransactionEdit::default())
        .unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::Required(_))));
    assert!(ledger.backend().calls().is_empty());
}

#[test]
fn edit_sends_only_changed_fields() {
    let ledger = Ledger::new(FakeBackend::with_categories(), 10);
    let edit = TransactionEdit {
        amount: Some("9,90".into()),
        ..Default::default()
    };
    ledger
        .edit_transaction(&session(), &RecordId::Int(4), &edit)
        .unwrap();
    match &ledger.backend().write_calls()[..] {
        [Call::Update(id, patch)] => {
            assert_eq!(*id, RecordId::Int(4));
            assert_eq!(patch.amount.unwrap().to_string(), "9.90");
            assert!(patch.description.is_none());
        }
        other => panic!("unexpected calls: {:?}", other),
    }
}

#[test]
fn subcategory_names_are_trimmed() {
    let ledger = Ledger::new(FakeBackend::with_categories(), 10);
    let sub = NewSubcategory {
        name: "  Snacks ".into(),
        main_category_id: RecordId::Int(1),
        kind: TransactionKind::Expense,
    };
    ledger.add_subcategory(&session(), &sub).unwrap();
    assert_eq!(
        ledger.backend().write_calls(),
        vec![Call::InsertSubcategory(NewSubcategory {
            name: "Snacks".into(),
            ..sub.clone()
        })]
    );

    let blank = NewSubcategory {
        name: "   ".into(),
        ..sub
    };
    assert!(ledger.add_subcategory(&session(), &blank).is_err());
    assert_eq!(ledger.backend().write_calls().len(), 1);
}

#[test]
fn remote_summary_uses_backend_totals() {
    let mut backend = FakeBackend::with_categories();
    backend.rows = vec![
        row(1, date(2025, 3, 2), "100", TransactionKind::Income, Some(3)),
        row(2, date(2025, 3, 5), "30", TransactionKind::Expense, Some(1)),
    ];
    let ledger = Ledger::new(backend, 10);
    let range = month_range(date(2025, 3, 20));
    let summary = ledger.remote_summary(&session(), range).unwrap();
    assert_eq!(summary.balance().to_string(), "70");
    assert_eq!(ledger.backend().calls()[0], Call::FinancialSummary(range));
}
