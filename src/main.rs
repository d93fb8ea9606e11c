// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::process::ExitCode;

use pocketbook::backend::RestBackend;
use pocketbook::config::Config;
use pocketbook::{app::App, cli, commands, db, logging};

fn main() -> ExitCode {
    logging::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("command failed: {:?}", e);
            eprintln!("Error: {}", user_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    let conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("settings", sub)) => commands::settings::handle(&conn, sub)?,
        Some((name, sub)) => {
            let config = Config::from_env()?;
            let backend = RestBackend::new(&config)?;
            let mut app = App::new(conn, backend, config.page_size)?;
            match name {
                "auth" => commands::auth::handle(&mut app, sub)?,
                "tx" => commands::transactions::handle(&mut app, sub)?,
                "summary" => commands::summary::handle(&mut app, sub)?,
                "category" => commands::categories::handle(&mut app, sub)?,
                "export" => commands::exporter::handle(&mut app, sub)?,
                _ => {}
            }
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

/// Library errors carry their own user-facing wording; anything else is
/// shown with its context chain.
fn user_message(e: &anyhow::Error) -> String {
    if let Some(err) = e.downcast_ref::<pocketbook::Error>() {
        return err.user_message();
    }
    if let Some(err) = e.downcast_ref::<pocketbook::ValidationError>() {
        return err.to_string();
    }
    format!("{:#}", e)
}
