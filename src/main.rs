// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;

use pocketledger::{cli, commands, db, store::SqliteStore, utils};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    utils::init_tracing(matches.get_count("verbose"));

    let db_override = matches.get_one::<String>("db").map(PathBuf::from);
    let store = SqliteStore::new(db::open_or_init(db_override.as_deref())?);

    match matches.subcommand() {
        Some(("init", _)) => match &db_override {
            Some(p) => println!("Database initialized at {}", p.display()),
            None => println!("Database initialized at {}", db::db_path()?.display()),
        },
        Some(("config", sub)) => commands::config::handle(store.conn(), sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&store, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&store, sub)?,
        Some(("reminder", sub)) => commands::reminders::handle(&store, sub)?,
        Some(("analytics", sub)) => commands::analytics::handle(&store, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
