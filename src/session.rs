// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backend::Backend;
use crate::error::{AuthError, Error, Result};
use crate::models::RecordId;
use crate::settings::{delete_setting, get_setting, set_setting};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

const SESSION_KEY: &str = "session";

/// Seconds before expiry at which a session is treated as stale.
const EXPIRY_LEEWAY_SECS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp, seconds.
    pub expires_at: i64,
    pub user_id: RecordId,
    pub email: String,
    pub workspace_id: Option<RecordId>,
}

/// Access-control boundary applied to every query and mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Workspace(RecordId),
    User(RecordId),
}

impl Scope {
    pub fn column(&self) -> &'static str {
        match self {
            Scope::Workspace(_) => "workspace_id",
            Scope::User(_) => "user_id",
        }
    }

    pub fn id(&self) -> &RecordId {
        match self {
            Scope::Workspace(id) | Scope::User(id) => id,
        }
    }
}

impl Session {
    pub fn scope(&self) -> Scope {
        match &self.workspace_id {
            Some(ws) => Scope::Workspace(ws.clone()),
            None => Scope::User(self.user_id.clone()),
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now + EXPIRY_LEEWAY_SECS >= self.expires_at
    }
}

pub fn load(conn: &Connection) -> Result<Option<Session>> {
    match get_setting(conn, SESSION_KEY)? {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!("discarding unreadable stored session: {}", e);
                delete_setting(conn, SESSION_KEY)?;
                Ok(None)
            }
        },
        None => Ok(None),
    }
}

pub fn save(conn: &Connection, session: &Session) -> Result<()> {
    set_setting(conn, SESSION_KEY, &serde_json::to_string(session)?)
}

pub fn clear(conn: &Connection) -> Result<()> {
    delete_setting(conn, SESSION_KEY)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    Refreshed,
    SignedOut,
}

type Listener = Box<dyn Fn(SessionEvent, Option<&Session>)>;

/// The single owner of "who is signed in, and in which workspace".
///
/// Changes are written through to local storage and announced to listeners.
#[derive(Default)]
pub struct SessionHolder {
    current: Option<Session>,
    listeners: Vec<Listener>,
}

impl SessionHolder {
    pub fn new(current: Option<Session>) -> Self {
        SessionHolder {
            current,
            listeners: Vec::new(),
        }
    }

    pub fn restore(conn: &Connection) -> Result<Self> {
        Ok(SessionHolder::new(load(conn)?))
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn require(&self) -> Result<&Session> {
        self.current
            .as_ref()
            .ok_or_else(|| AuthError::NotSignedIn.into())
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(SessionEvent, Option<&Session>) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn set(&mut self, conn: &Connection, session: Session, event: SessionEvent) -> Result<()> {
        save(conn, &session)?;
        self.current = Some(session);
        self.notify(event);
        Ok(())
    }

    pub fn clear(&mut self, conn: &Connection) -> Result<()> {
        clear(conn)?;
        self.current = None;
        self.notify(SessionEvent::SignedOut);
        Ok(())
    }

    /// Returns the current session, refreshing it first if it has expired.
    /// A rejected refresh signs the user out; transport and server failures
    /// are returned as-is and the stored session is kept.
    pub fn ensure_fresh<B: Backend + ?Sized>(
        &mut self,
        conn: &Connection,
        backend: &B,
        now: i64,
    ) -> Result<&Session> {
        let stale = self.require()?;
        if stale.is_expired(now) {
            let refresh_token = stale.refresh_token.clone();
            tracing::debug!("session expired, refreshing");
            match backend.refresh_session(&refresh_token) {
                Ok(fresh) => self.set(conn, fresh, SessionEvent::Refreshed)?,
                Err(e) if is_rejection(&e) => {
                    tracing::warn!("session refresh rejected: {}", e);
                    self.clear(conn)?;
                    return Err(AuthError::NotSignedIn.into());
                }
                Err(e) => {
                    tracing::warn!("session refresh failed, keeping stored session: {}", e);
                    return Err(e);
                }
            }
        }
        self.require()
    }

    fn notify(&self, event: SessionEvent) {
        for listener in &self.listeners {
            listener(event, self.current.as_ref());
        }
    }
}

/// The auth service turned the refresh token down, as opposed to being unreachable.
fn is_rejection(err: &Error) -> bool {
    match err {
        Error::Auth(_) => true,
        Error::Backend { status, .. } => matches!(status, 400 | 401 | 403),
        _ => false,
    }
}
