// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::settings::{notifications_enabled, set_notifications_enabled};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("notifications", sub)) => {
            if let Some(state) = sub.get_one::<String>("state") {
                set_notifications_enabled(conn, state == "on")?;
            }
            let enabled = notifications_enabled(conn)?;
            println!("Notifications: {}", if enabled { "on" } else { "off" });
        }
        _ => {}
    }
    Ok(())
}
