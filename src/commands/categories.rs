// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::backend::{Backend, NewSubcategory};
use crate::categories::CategoryDirectory;
use crate::models::{RecordId, TransactionKind};
use crate::utils::{confirm, pretty_table};
use anyhow::{Result, anyhow, bail};
use std::io::{BufRead, Write};

pub fn handle<B: Backend>(app: &mut App<B>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(app, sub)?,
        Some(("sub", sub)) => match sub.subcommand() {
            Some(("list", s)) => list_subs(app, s)?,
            Some(("add", s)) => add_sub(app, s)?,
            Some(("rm", s)) => {
                remove_sub(app, s, &mut std::io::stdin().lock(), &mut std::io::stdout())?
            }
            _ => {}
        },
        _ => {}
    }
    Ok(())
}

/// Maps `--category` / `--subcategory` names onto ids.
pub fn resolve_names(
    categories: &CategoryDirectory,
    kind: Option<TransactionKind>,
    category: Option<&String>,
    subcategory: Option<&String>,
) -> Result<(Option<RecordId>, Option<RecordId>)> {
    let Some(name) = category else {
        if subcategory.is_some() {
            bail!("--subcategory needs --category");
        }
        return Ok((None, None));
    };
    let main = categories
        .find_main(name, kind)
        .ok_or_else(|| anyhow!("Category '{}' not found", name))?;
    let sub_id = match subcategory {
        Some(s) => Some(
            categories
                .find_sub(&main.id, s)
                .ok_or_else(|| anyhow!("Subcategory '{}' not found under '{}'", s, main.name))?
                .id
                .clone(),
        ),
        None => None,
    };
    Ok((Some(main.id.clone()), sub_id))
}

fn list<B: Backend>(app: &mut App<B>, sub: &clap::ArgMatches) -> Result<()> {
    let session = app.active_session()?;
    let kind = sub
        .get_one::<String>("kind")
        .map(|k| k.parse::<TransactionKind>())
        .transpose()?;
    let categories = app.ledger.categories(&session)?;
    let rows: Vec<Vec<String>> = categories
        .mains()
        .iter()
        .filter(|c| kind.is_none_or(|k| c.kind == k))
        .map(|c| {
            vec![
                c.icon.clone(),
                c.name.clone(),
                c.kind.to_string(),
                categories.subs_of(&c.id).count().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["", "Category", "Kind", "Subcategories"], rows)
    );
    Ok(())
}

fn list_subs<B: Backend>(app: &mut App<B>, sub: &clap::ArgMatches) -> Result<()> {
    let session = app.active_session()?;
    let categories = app.ledger.categories(&session)?;
    let only = match sub.get_one::<String>("category") {
        Some(name) => Some(
            categories
                .find_main(name, None)
                .ok_or_else(|| anyhow!("Category '{}' not found", name))?
                .id
                .clone(),
        ),
        None => None,
    };
    let rows: Vec<Vec<String>> = categories
        .subs()
        .iter()
        .filter(|s| only.as_ref().is_none_or(|id| &s.main_category_id == id))
        .map(|s| {
            let parent = categories
                .main(&s.main_category_id)
                .map(|m| m.name.clone())
                .unwrap_or_default();
            let owner = if s.workspace_id.is_some() || s.user_id.is_some() {
                "custom"
            } else {
                "shared"
            };
            vec![s.id.to_string(), parent, s.name.clone(), owner.to_string()]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Category", "Subcategory", "Owner"], rows)
    );
    Ok(())
}

fn add_sub<B: Backend>(app: &mut App<B>, sub: &clap::ArgMatches) -> Result<()> {
    let session = app.active_session()?;
    let category = sub.get_one::<String>("category").unwrap();
    let name = sub.get_one::<String>("name").unwrap();
    let categories = app.ledger.categories(&session)?;
    let main = categories
        .find_main(category, None)
        .ok_or_else(|| anyhow!("Category '{}' not found", category))?;
    app.ledger.add_subcategory(
        &session,
        &NewSubcategory {
            name: name.to_string(),
            main_category_id: main.id.clone(),
            kind: main.kind,
        },
    )?;
    println!("Added subcategory '{}' under '{}'", name.trim(), main.name);
    Ok(())
}

pub fn remove_sub<B: Backend, R: BufRead, W: Write>(
    app: &mut App<B>,
    sub: &clap::ArgMatches,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let id: RecordId = sub.get_one::<String>("id").unwrap().parse()?;
    if !sub.get_flag("yes") && !confirm(&format!("Delete subcategory {}?", id), input, output)? {
        writeln!(output, "Cancelled.")?;
        return Ok(());
    }
    let session = app.active_session()?;
    app.ledger.delete_subcategory(&session, &id)?;
    writeln!(output, "Removed subcategory {}", id)?;
    Ok(())
}
