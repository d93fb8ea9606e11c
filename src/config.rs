// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::DEFAULT_PAGE_SIZE;
use anyhow::{Context, Result, anyhow};
use std::env;

pub const API_URL_VAR: &str = "POCKETBOOK_API_URL";
pub const ANON_KEY_VAR: &str = "POCKETBOOK_ANON_KEY";
pub const PAGE_SIZE_VAR: &str = "POCKETBOOK_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Project URL of the hosted backend, without a trailing slash.
    pub api_url: String,
    /// Public API key sent with every request.
    pub anon_key: String,
    pub page_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("{} must be set to the backend URL", API_URL_VAR))?;
        let anon_key = lookup(ANON_KEY_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("{} must be set to the backend API key", ANON_KEY_VAR))?;
        let page_size = match lookup(PAGE_SIZE_VAR) {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| format!("Invalid {} '{}', expected a positive integer", PAGE_SIZE_VAR, v))?,
            None => DEFAULT_PAGE_SIZE,
        };
        Ok(Config {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            anon_key: anon_key.trim().to_string(),
            page_size,
        })
    }
}
