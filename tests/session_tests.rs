// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::*;
use pocketbook::models::RecordId;
use pocketbook::session::{self, Scope, Session, SessionEvent, SessionHolder};
use pocketbook::settings::{
    get_setting, notifications_enabled, set_notifications_enabled, set_setting,
};
use pocketbook::{AuthError, Error};
use std::cell::RefCell;
use std::rc::Rc;

fn expired() -> Session {
    Session {
        expires_at: 1_000,
        ..session()
    }
}

#[test]
fn session_survives_a_restart() {
    let conn = settings_conn();
    assert!(session::load(&conn).unwrap().is_none());
    session::save(&conn, &session()).unwrap();
    let holder = SessionHolder::restore(&conn).unwrap();
    assert_eq!(holder.current(), Some(&session()));

    session::clear(&conn).unwrap();
    assert!(SessionHolder::restore(&conn).unwrap().current().is_none());
}

#[test]
fn unreadable_session_is_discarded() {
    let conn = settings_conn();
    set_setting(&conn, "session", "{not json").unwrap();
    assert!(session::load(&conn).unwrap().is_none());
    assert!(get_setting(&conn, "session").unwrap().is_none());
}

#[test]
fn scope_prefers_the_workspace() {
    let s = session();
    assert_eq!(s.scope(), Scope::Workspace(RecordId::Int(7)));
    assert_eq!(s.scope().column(), "workspace_id");

    let personal = Session {
        workspace_id: None,
        ..session()
    };
    assert_eq!(personal.scope().column(), "user_id");
    assert_eq!(personal.scope().id(), &RecordId::Text("user-1".into()));
}

#[test]
fn expiry_has_leeway() {
    let s = Session {
        expires_at: 1_000,
        ..session()
    };
    assert!(!s.is_expired(900));
    assert!(s.is_expired(970));
    assert!(s.is_expired(2_000));
}

#[test]
fn listeners_hear_sign_in_and_out() {
    let conn = settings_conn();
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut holder = SessionHolder::default();
    let seen = Rc::clone(&events);
    holder.subscribe(move |event, current| {
        seen.borrow_mut().push((event, current.map(|s| s.email.clone())));
    });

    holder.set(&conn, session(), SessionEvent::SignedIn).unwrap();
    holder.clear(&conn).unwrap();

    assert_eq!(
        *events.borrow(),
        vec![
            (SessionEvent::SignedIn, Some("ana@example.com".to_string())),
            (SessionEvent::SignedOut, None),
        ]
    );
    assert!(session::load(&conn).unwrap().is_none());
}

#[test]
fn require_without_session_fails() {
    let holder = SessionHolder::default();
    assert!(matches!(
        holder.require(),
        Err(Error::Auth(AuthError::NotSignedIn))
    ));
}

#[test]
fn fresh_session_is_not_refreshed() {
    let conn = settings_conn();
    let backend = FakeBackend::default();
    let mut holder = SessionHolder::new(Some(session()));
    let current = holder.ensure_fresh(&conn, &backend, 0).unwrap().clone();
    assert_eq!(current, session());
    assert!(backend.calls().is_empty());
}

#[test]
fn expired_session_is_refreshed_and_stored() {
    let conn = settings_conn();
    let backend = FakeBackend::default();
    let mut holder = SessionHolder::new(Some(expired()));
    let current = holder.ensure_fresh(&conn, &backend, 5_000).unwrap().clone();
    assert_eq!(current.access_token, "fresh-token");
    assert_eq!(backend.calls(), vec![Call::Refresh("refresh".into())]);
    assert_eq!(
        session::load(&conn).unwrap().map(|s| s.access_token),
        Some("fresh-token".to_string())
    );
}

#[test]
fn rejected_refresh_signs_out() {
    let conn = settings_conn();
    session::save(&conn, &expired()).unwrap();
    let backend = FakeBackend {
        reject_refresh: true,
        ..Default::default()
    };
    let mut holder = SessionHolder::restore(&conn).unwrap();
    let err = holder.ensure_fresh(&conn, &backend, 5_000).unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::NotSignedIn)));
    assert!(holder.current().is_none());
    assert!(session::load(&conn).unwrap().is_none());
}

#[test]
fn unreachable_auth_service_keeps_the_session() {
    let conn = settings_conn();
    session::save(&conn, &expired()).unwrap();
    let backend = FakeBackend {
        offline_refresh: true,
        ..Default::default()
    };
    let mut holder = SessionHolder::restore(&conn).unwrap();
    let err = holder.ensure_fresh(&conn, &backend, 5_000).unwrap_err();
    assert!(matches!(err, Error::Backend { status: 503, .. }));
    assert_eq!(holder.current(), Some(&expired()));
    assert_eq!(session::load(&conn).unwrap(), Some(expired()));
}

#[test]
fn notifications_default_on_and_persist() {
    let conn = settings_conn();
    assert!(notifications_enabled(&conn).unwrap());
    set_notifications_enabled(&conn, false).unwrap();
    assert!(!notifications_enabled(&conn).unwrap());
    set_notifications_enabled(&conn, true).unwrap();
    assert!(notifications_enabled(&conn).unwrap());
}
