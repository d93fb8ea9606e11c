// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ValidationError;
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use std::fmt;

/// Inclusive calendar-month boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MonthRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// First and last day of the month containing `date`.
pub fn month_range(date: NaiveDate) -> MonthRange {
    let start = date.with_day(1).unwrap_or(date);
    // The last representable month has no successor to step back from.
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    MonthRange { start, end }
}

impl MonthRange {
    /// Parses `YYYY-MM`.
    pub fn parse(month: &str) -> Result<Self, ValidationError> {
        let month = month.trim();
        NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
            .map(month_range)
            .map_err(|_| ValidationError::UnknownOption {
                field: "month",
                value: month.to_string(),
            })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The month before this one; stays put at the earliest supported month.
    pub fn previous(&self) -> MonthRange {
        self.start
            .checked_sub_months(Months::new(1))
            .map_or(*self, month_range)
    }

    /// The month after this one; stays put at the latest supported month.
    pub fn next(&self) -> MonthRange {
        self.start
            .checked_add_months(Months::new(1))
            .map_or(*self, month_range)
    }
}

impl fmt::Display for MonthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start.format("%Y-%m"))
    }
}
