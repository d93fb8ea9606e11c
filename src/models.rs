// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ValidationError;
use crate::money::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Backend-assigned identifier, kept in whatever JSON form it arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(i) => write!(f, "{}", i),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for RecordId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<i64>() {
            Ok(i) => RecordId::Int(i),
            Err(_) => RecordId::Text(s.to_string()),
        })
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(ValidationError::UnknownOption {
                field: "kind",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Debit,
    Credit,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Debit => "debit",
            PaymentMethod::Credit => "credit",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debit" => Ok(PaymentMethod::Debit),
            "credit" => Ok(PaymentMethod::Credit),
            "cash" => Ok(PaymentMethod::Cash),
            _ => Err(ValidationError::UnknownOption {
                field: "payment method",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of one slice of a credit purchase split over several months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Installment {
    current: u32,
    total: u32,
}

impl Installment {
    /// Returns `None` unless `1 <= current <= total`.
    pub fn new(current: u32, total: u32) -> Option<Self> {
        (current >= 1 && current <= total).then_some(Installment { current, total })
    }

    /// Both markers must be present together.
    pub fn from_markers(current: Option<u32>, total: Option<u32>) -> Option<Self> {
        match (current, total) {
            (Some(c), Some(t)) => Installment::new(c, t),
            _ => None,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }
}

impl fmt::Display for Installment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainCategory {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: RecordId,
    pub name: String,
    pub main_category_id: RecordId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub workspace_id: Option<RecordId>,
    #[serde(default)]
    pub user_id: Option<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcategoryRef {
    pub id: RecordId,
    pub name: String,
}

/// A transaction's resolved category: the main category plus an optional subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRef {
    pub main_id: RecordId,
    pub name: String,
    pub icon: String,
    pub subcategory: Option<SubcategoryRef>,
}

impl CategoryRef {
    pub fn label(&self) -> String {
        match &self.subcategory {
            Some(sub) => format!("{} / {}", self.name, sub.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: RecordId,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub kind: TransactionKind,
    pub category: Option<CategoryRef>,
    pub payment_method: PaymentMethod,
    pub installment: Option<Installment>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub income: Money,
    pub expense: Money,
}

impl MonthlySummary {
    /// Income minus expense; may be negative.
    pub fn balance(&self) -> rust_decimal::Decimal {
        self.income.amount() - self.expense.amount()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryExpense {
    pub label: String,
    pub icon: String,
    pub amount: Money,
    pub color: &'static str,
}
