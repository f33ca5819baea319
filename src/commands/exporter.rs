// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{RecordStore, SqliteStore, fmt_timestamp};
use anyhow::{Result, anyhow};
use serde_json::json;

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(store, sub),
        _ => Ok(()),
    }
}

fn export_transactions(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map_or("csv", |s| s.as_str())
        .trim()
        .to_lowercase();
    let out = sub.get_one::<String>("out").map_or("", |s| s.as_str());
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }

    // Oldest first, unlike the listing order.
    let mut rows = store.list_transactions()?;
    rows.reverse();

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record([
            "date",
            "description",
            "type",
            "amount",
            "category",
            "notes",
        ])?;
        for t in &rows {
            wtr.write_record([
                fmt_timestamp(t.date),
                t.description.clone(),
                t.kind.to_string(),
                t.amount.to_string(),
                t.category.clone(),
                t.notes.clone().unwrap_or_default(),
            ])?;
        }
        wtr.flush()?;
    } else {
        let items: Vec<_> = rows
            .iter()
            .map(|t| {
                json!({
                    "date": fmt_timestamp(t.date),
                    "description": t.description,
                    "type": t.kind.as_str(),
                    "amount": t.amount.to_string(),
                    "category": t.category,
                    "notes": t.notes,
                })
            })
            .collect();
        std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
    }
    tracing::info!(count = rows.len(), path = out, "exported transactions");
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
