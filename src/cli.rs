// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON document per line"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .help("Month as YYYY-MM (default: current month)")
}

fn kind_filter_arg() -> Arg {
    Arg::new("kind")
        .long("kind")
        .default_value("all")
        .value_parser(["all", "income", "expense"])
}

fn auth_cmd() -> Command {
    Command::new("auth")
        .about("Sign up, sign in and out")
        .subcommand_required(true)
        .subcommand(
            Command::new("signup")
                .about("Create an account")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true))
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("phone").long("phone")),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in with email and password")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(Command::new("logout").about("Sign out and forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the signed-in account"))
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and browse transactions")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record an income or expense")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD (default: today)"),
                )
                .arg(Arg::new("description").long("description").required(true))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(
                    Arg::new("method")
                        .long("method")
                        .default_value("debit")
                        .value_parser(["debit", "credit", "cash"]),
                )
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("subcategory").long("subcategory"))
                .arg(
                    Arg::new("installments")
                        .long("installments")
                        .value_parser(value_parser!(u32))
                        .help("Split a credit purchase over N months (2-48)"),
                ),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List one month of transactions, a page at a time")
                .arg(month_arg())
                .arg(kind_filter_arg())
                .arg(
                    Arg::new("page")
                        .long("page")
                        .default_value("1")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("page-size")
                        .long("page-size")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Change fields of a transaction")
                .arg(Arg::new("id").required(true))
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("description").long("description"))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_parser(["income", "expense"]),
                )
                .arg(
                    Arg::new("method")
                        .long("method")
                        .value_parser(["debit", "credit", "cash"]),
                )
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("subcategory").long("subcategory")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").required(true))
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Do not ask for confirmation"),
                ),
        )
}

fn summary_cmd() -> Command {
    json_args(
        Command::new("summary")
            .about("Income, expense and spending by category for a month")
            .arg(month_arg())
            .arg(kind_filter_arg())
            .arg(
                Arg::new("remote")
                    .long("remote")
                    .action(ArgAction::SetTrue)
                    .conflicts_with("kind")
                    .help("Use the server-side summary procedure (all transactions)"),
            ),
    )
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Browse categories and manage subcategories")
        .subcommand_required(true)
        .subcommand(
            Command::new("list").arg(
                Arg::new("kind")
                    .long("kind")
                    .value_parser(["income", "expense"]),
            ),
        )
        .subcommand(
            Command::new("sub")
                .about("Subcategories")
                .subcommand_required(true)
                .subcommand(Command::new("list").arg(Arg::new("category").long("category")))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("id").required(true))
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .short('y')
                                .action(ArgAction::SetTrue),
                        ),
                ),
        )
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Export data to files")
        .subcommand_required(true)
        .subcommand(
            Command::new("transactions")
                .arg(month_arg())
                .arg(kind_filter_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .value_parser(["csv", "json"]),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
}

fn settings_cmd() -> Command {
    Command::new("settings")
        .about("Local preferences")
        .subcommand_required(true)
        .subcommand(
            Command::new("notifications")
                .about("Show or change the reminder notification preference")
                .arg(Arg::new("state").value_parser(["on", "off"])),
        )
}

pub fn build_cli() -> Command {
    Command::new("pocketbook")
        .version(clap::crate_version!())
        .about("Monthly income and expense ledger")
        .subcommand(auth_cmd())
        .subcommand(tx_cmd())
        .subcommand(summary_cmd())
        .subcommand(category_cmd())
        .subcommand(export_cmd())
        .subcommand(settings_cmd())
}
