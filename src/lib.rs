// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod app;
pub mod auth;
pub mod backend;
pub mod categories;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod money;
pub mod session;
pub mod settings;
pub mod utils;
pub mod validation;
pub mod view;

pub use error::{AuthError, Error, Result, ValidationError};
