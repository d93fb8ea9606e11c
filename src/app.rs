// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backend::Backend;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::session::{Session, SessionHolder};
use rusqlite::Connection;

/// State handed to every command: local storage, the ledger service and the
/// current session.
pub struct App<B> {
    pub conn: Connection,
    pub ledger: Ledger<B>,
    pub session: SessionHolder,
}

impl<B: Backend> App<B> {
    pub fn new(conn: Connection, backend: B, page_size: usize) -> Result<Self> {
        let session = SessionHolder::restore(&conn)?;
        Ok(App {
            conn,
            ledger: Ledger::new(backend, page_size),
            session,
        })
    }

    /// The signed-in session, refreshed if its token has expired.
    pub fn active_session(&mut self) -> Result<Session> {
        let now = chrono::Utc::now().timestamp();
        self.session
            .ensure_fresh(&self.conn, self.ledger.backend(), now)
            .cloned()
    }
}
