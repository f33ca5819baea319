// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{
    get_owner_id, get_reminder_interval, pretty_table, set_owner_id, set_reminder_interval,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-owner", sub)) => {
            let owner = sub.get_one::<String>("owner").map_or("", |s| s.as_str());
            set_owner_id(conn, owner)?;
            println!("Owner id set to {}", owner.trim());
        }
        Some(("set-reminder-interval", sub)) => {
            let secs = sub.get_one::<u64>("secs").copied().unwrap_or_default();
            set_reminder_interval(conn, secs)?;
            println!("Reminder check interval set to {}s", secs);
        }
        _ => {
            let rows = vec![
                vec!["owner_id".to_string(), get_owner_id(conn)?],
                vec![
                    "reminder_check_secs".to_string(),
                    get_reminder_interval(conn)?.as_secs().to_string(),
                ],
            ];
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
    }
    Ok(())
}
