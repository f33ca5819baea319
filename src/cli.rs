// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flags(cmd: Command) -> Command {
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
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .help("Reminder id")
}

pub fn build_cli() -> Command {
    Command::new("pocketledger")
        .version(crate_version!())
        .about("Track income, expenses, savings goals and payment reminders")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("POCKETLEDGER_DB")
                .help("Database file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log more (-v info, -vv debug)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-owner").arg(Arg::new("owner").required(true)),
                )
                .subcommand(
                    Command::new("set-reminder-interval").arg(
                        Arg::new("secs")
                            .required(true)
                            .value_parser(value_parser!(u64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Income and expense transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .help("income|expense"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD [HH:MM], defaults to now"),
                        )
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("type").long("type").help("income|expense"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD, inclusive"))
                        .arg(Arg::new("search").long("search"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(
                            Arg::new("grouped")
                                .long("grouped")
                                .action(ArgAction::SetTrue)
                                .help("Group by day"),
                        ),
                )),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("saved").long("saved").default_value("0"))
                        .arg(
                            Arg::new("target-date")
                                .long("target-date")
                                .required(true)
                                .help("YYYY-MM-DD"),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("reminder")
                .about("Payment reminders")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("due")
                                .long("due")
                                .required(true)
                                .help("YYYY-MM-DD"),
                        )
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("title").long("title"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("due").long("due").help("YYYY-MM-DD"))
                        .arg(Arg::new("note").long("note").help("Empty clears the note")),
                )
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("watch")
                        .about("Re-check for payments due today until Enter is pressed")
                        .arg(
                            Arg::new("interval-secs")
                                .long("interval-secs")
                                .value_parser(value_parser!(u64)),
                        ),
                ),
        )
        .subcommand(json_flags(
            Command::new("analytics")
                .about("Totals, series and category breakdown for a week, month or year")
                .arg(
                    Arg::new("range")
                        .long("range")
                        .default_value("month")
                        .help("week|month|year"),
                )
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_parser(value_parser!(i32)),
                )
                .arg(Arg::new("month").long("month").help("1-12")),
        ))
        .subcommand(json_flags(
            Command::new("dashboard").about("Overall totals, recent activity and upcoming payments"),
        ))
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for problems"))
}
