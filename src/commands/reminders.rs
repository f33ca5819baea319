// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::BufRead;
use std::time::Duration;

use crate::ledger::Ledger;
use crate::models::{NewReminder, ReminderPatch};
use crate::reminders::{ReminderStatus, evaluate_all};
use crate::store::SqliteStore;
use crate::utils::{
    fmt_money, get_owner_id, get_reminder_interval, maybe_print_json, non_empty, now, parse_date,
    parse_decimal, pretty_table,
};
use crate::watch::DueReminderWatch;
use anyhow::{Context, Result};

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("watch", sub)) => watch(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn load(store: &SqliteStore) -> Result<Ledger> {
    let owner = get_owner_id(store.conn())?;
    Ledger::load(store, &owner).context("Failed to load reminders")
}

fn parse_id(sub: &clap::ArgMatches) -> Result<i64> {
    let raw = sub.get_one::<String>("id").map_or("", |s| s.as_str()).trim();
    raw.parse::<i64>()
        .with_context(|| format!("Invalid reminder id '{}'", raw))
}

fn add(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let new = NewReminder {
        title: non_empty(sub.get_one::<String>("title")).unwrap_or_default(),
        amount: parse_decimal(sub.get_one::<String>("amount").map_or("", |s| s.as_str()))?,
        due_date: parse_date(sub.get_one::<String>("due").map_or("", |s| s.as_str()))?,
        notes: non_empty(sub.get_one::<String>("note")),
    };
    let mut ledger = load(store)?;
    let r = ledger
        .add_reminder(store, new, now())
        .context("Failed to save reminder")?;
    println!(
        "Reminder #{} added: {} {} due {}",
        r.id,
        r.title,
        fmt_money(&r.amount),
        r.due_date
    );
    Ok(())
}

fn edit(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    let patch = ReminderPatch {
        title: non_empty(sub.get_one::<String>("title")),
        amount: non_empty(sub.get_one::<String>("amount"))
            .map(|s| parse_decimal(&s))
            .transpose()?,
        due_date: non_empty(sub.get_one::<String>("due"))
            .map(|s| parse_date(&s))
            .transpose()?,
        // An empty --note clears the notes.
        notes: sub.get_one::<String>("note").map(|s| s.trim().to_string()),
    };
    let mut ledger = load(store)?;
    let r = ledger
        .update_reminder(store, id, patch, now())
        .context("Failed to save reminder")?;
    println!("Reminder #{} updated: {} due {}", r.id, r.title, r.due_date);
    Ok(())
}

fn remove(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    let mut ledger = load(store)?;
    ledger
        .delete_reminder(store, id)
        .context("Failed to delete reminder")?;
    println!("Reminder #{} deleted", id);
    Ok(())
}

pub fn status_rows(store: &SqliteStore) -> Result<Vec<ReminderStatus>> {
    let ledger = load(store)?;
    Ok(evaluate_all(&ledger.reminders, now().date()))
}

fn list(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = status_rows(store)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|s| {
                vec![
                    s.reminder.id.to_string(),
                    s.reminder.title.clone(),
                    fmt_money(&s.reminder.amount),
                    s.reminder.due_date.to_string(),
                    s.urgency.label(),
                    s.reminder.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Title", "Amount", "Due", "Status", "Notes"], rows)
        );
    }
    Ok(())
}

fn watch(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let interval = match sub.get_one::<u64>("interval-secs") {
        Some(&secs) if secs > 0 => Duration::from_secs(secs),
        _ => get_reminder_interval(store.conn())?,
    };
    let ledger = load(store)?;
    let watch = DueReminderWatch::spawn(
        ledger.reminders,
        interval,
        || now().date(),
        |notices| {
            for n in notices {
                println!("{}", n.message);
            }
        },
    )
    .context("Failed to start reminder watch")?;
    println!(
        "Checking for payments due today every {}s; press Enter to stop",
        interval.as_secs()
    );
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    watch.stop();
    Ok(())
}
