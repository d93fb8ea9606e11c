// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed money values.
//!
//! Amounts reach the client either as JSON numbers or as text, depending on the
//! backend column type and the code path that produced the row. [`Money`] is
//! built once at that boundary so nothing downstream re-parses or coerces.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("amount {0} is negative")]
    Negative(Decimal),
}

/// A non-negative amount in the ledger's base currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(MoneyError::Negative(value));
        }
        Ok(Money(value))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parses user-typed text. A lone `,` is accepted as the decimal separator.
    pub fn parse_input(s: &str) -> Result<Self, MoneyError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyError::NotANumber(s.to_string()));
        }
        let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
            trimmed.replacen(',', ".", 1)
        } else {
            trimmed.to_string()
        };
        let value = normalized
            .parse::<Decimal>()
            .map_err(|_| MoneyError::NotANumber(s.to_string()))?;
        Money::new(value)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse_input(s)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Sums saturate at `Decimal::MAX` instead of overflowing.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Int(i64),
    Float(f64),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = match RawAmount::deserialize(deserializer)? {
            RawAmount::Text(s) => s
                .trim()
                .parse::<Decimal>()
                .map_err(|_| MoneyError::NotANumber(s.clone())),
            RawAmount::Int(i) => Ok(Decimal::from(i)),
            RawAmount::Float(f) => {
                Decimal::try_from(f).map_err(|_| MoneyError::NotANumber(f.to_string()))
            }
        };
        value.and_then(Money::new).map_err(serde::de::Error::custom)
    }
}
