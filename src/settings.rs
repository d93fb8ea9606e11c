// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, params};

pub const NOTIFICATIONS_KEY: &str = "notifications_enabled";

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn delete_setting(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key=?1", params![key])?;
    Ok(())
}

/// Reminder notifications are on unless the user turned them off.
pub fn notifications_enabled(conn: &Connection) -> Result<bool> {
    Ok(get_setting(conn, NOTIFICATIONS_KEY)?.is_none_or(|v| v != "false"))
}

pub fn set_notifications_enabled(conn: &Connection, enabled: bool) -> Result<()> {
    set_setting(conn, NOTIFICATIONS_KEY, if enabled { "true" } else { "false" })
}
