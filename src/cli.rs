// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .short('m')
        .value_name("YYYY-MM")
        .help("Month to show (defaults to the current month)")
}

fn filter_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .short('t')
        .value_parser(["all", "income", "expense"])
        .default_value("all")
        .help("Only include entries of this type")
}

fn kind_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .short('t')
        .required(true)
        .value_parser(["income", "expense"])
}

fn credentials(cmd: Command) -> Command {
    cmd.arg(Arg::new("email").long("email").required(true))
        .arg(
            Arg::new("password")
                .long("password")
                .help("Prompted for when omitted"),
        )
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .value_name("URL")
                .help("API base URL (defaults to the configured one)"),
        )
}

pub fn build_cli() -> Command {
    Command::new("finboard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Personal finance tracking client with a monthly dashboard")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug)"),
        )
        .subcommand(
            Command::new("config")
                .about("Manage the configuration file")
                .subcommand(Command::new("init").about("Write a default config file"))
                .subcommand(Command::new("show").about("Print the effective configuration")),
        )
        .subcommand(
            Command::new("auth")
                .about("Log in, register or log out")
                .subcommand(credentials(
                    Command::new("register").about("Create an account and log in"),
                ))
                .subcommand(credentials(Command::new("login").about("Start a session")))
                .subcommand(Command::new("logout").about("End the current session"))
                .subcommand(Command::new("status").about("Show who is logged in")),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(kind_arg()),
                )
                .subcommand(json_flags(Command::new("list").arg(filter_arg()))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record, list and delete transactions")
                .subcommand(
                    Command::new("add")
                        .arg(kind_arg())
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .help("Defaults to today"),
                        )
                        .arg(Arg::new("note").long("note"))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Category name or id; must match the transaction type"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(month_arg()).arg(filter_arg()),
                ))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Monthly totals, top categories and largest transactions")
                .arg(month_arg())
                .arg(filter_arg())
                .arg(
                    Arg::new("top")
                        .long("top")
                        .value_parser(value_parser!(usize))
                        .help("Entries per top list (defaults to the configured limit)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("browse")
                .about("Interactive month browser")
                .arg(month_arg())
                .arg(filter_arg()),
        )
}
