// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::auth;
use crate::backend::Backend;
use crate::session::SessionEvent;
use crate::utils::pretty_table;
use crate::validation::SignUpForm;
use anyhow::Result;

pub fn handle<B: Backend>(app: &mut App<B>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("signup", sub)) => signup(app, sub)?,
        Some(("login", sub)) => login(app, sub)?,
        Some(("logout", _)) => logout(app)?,
        Some(("whoami", _)) => whoami(app)?,
        _ => {}
    }
    Ok(())
}

fn signup<B: Backend>(app: &mut App<B>, sub: &clap::ArgMatches) -> Result<()> {
    let form = SignUpForm {
        email: sub.get_one::<String>("email").unwrap().to_string(),
        password: sub.get_one::<String>("password").unwrap().to_string(),
        full_name: sub.get_one::<String>("name").unwrap().to_string(),
        phone: sub.get_one::<String>("phone").cloned(),
    };
    match auth::sign_up(app.ledger.backend(), &form)? {
        Some(session) => {
            let email = session.email.clone();
            app.session.set(&app.conn, session, SessionEvent::SignedIn)?;
            println!("Account created, signed in as {}", email);
        }
        None => println!(
            "Account created. Confirm your email address ({}) and then log in.",
            form.email.trim()
        ),
    }
    Ok(())
}

pub fn login<B: Backend>(app: &mut App<B>, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    let session = auth::sign_in(app.ledger.backend(), email, password)?;
    let email = session.email.clone();
    app.session.set(&app.conn, session, SessionEvent::SignedIn)?;
    println!("Signed in as {}", email);
    Ok(())
}

pub fn logout<B: Backend>(app: &mut App<B>) -> Result<()> {
    if let Some(session) = app.session.current() {
        if let Err(e) = auth::sign_out(app.ledger.backend(), session) {
            tracing::warn!("remote sign-out failed, clearing local session anyway: {}", e);
        }
    }
    app.session.clear(&app.conn)?;
    println!("Signed out");
    Ok(())
}

fn whoami<B: Backend>(app: &mut App<B>) -> Result<()> {
    let session = app.active_session()?;
    let rows = vec![
        vec!["Email".to_string(), session.email.clone()],
        vec!["User".to_string(), session.user_id.to_string()],
        vec![
            "Workspace".to_string(),
            session
                .workspace_id
                .as_ref()
                .map(|w| w.to_string())
                .unwrap_or_else(|| "(personal)".to_string()),
        ],
    ];
    println!("{}", pretty_table(&["", ""], rows));
    Ok(())
}
