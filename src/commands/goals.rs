// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::goals::{GoalProgress, evaluate_all};
use crate::ledger::Ledger;
use crate::models::NewGoal;
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{
    fmt_money, fmt_percent, get_owner_id, maybe_print_json, non_empty, now, parse_date, parse_decimal,
    pretty_table,
};
use anyhow::{Context, Result};

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let new = NewGoal {
        title: non_empty(sub.get_one::<String>("title")).unwrap_or_default(),
        amount: parse_decimal(sub.get_one::<String>("amount").map_or("", |s| s.as_str()))?,
        saved_amount: match non_empty(sub.get_one::<String>("saved")) {
            Some(s) => parse_decimal(&s)?,
            None => rust_decimal::Decimal::ZERO,
        },
        target_date: parse_date(sub.get_one::<String>("target-date").map_or("", |s| s.as_str()))?,
        category: non_empty(sub.get_one::<String>("category")),
        notes: non_empty(sub.get_one::<String>("note")),
    };

    let mut ledger = Ledger::load(store, &get_owner_id(store.conn())?)?;
    let g = ledger
        .add_goal(store, new, now())
        .context("Failed to add goal")?;
    println!(
        "Goal '{}' added: {} of {} saved, target {}",
        g.title,
        fmt_money(&g.saved_amount),
        fmt_money(&g.amount),
        g.target_date
    );
    Ok(())
}

pub fn progress_rows(store: &SqliteStore) -> Result<Vec<GoalProgress>> {
    let goals = store.list_goals()?;
    Ok(evaluate_all(&goals, now()))
}

fn list(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = progress_rows(store)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|p| {
                vec![
                    p.goal.title.clone(),
                    p.goal
                        .category
                        .clone()
                        .unwrap_or_else(|| "No Category".to_string()),
                    format!("{} / {}", fmt_money(&p.goal.saved_amount), fmt_money(&p.goal.amount)),
                    fmt_percent(&p.progress, 1),
                    p.goal.target_date.to_string(),
                    p.status_text(),
                    format!("Need {} more", fmt_money(&p.remaining_amount)),
                    p.daily_rate
                        .map(|r| format!("{}/day", fmt_money(&r)))
                        .unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Goal", "Category", "Saved", "Progress", "Target", "Status", "Remaining",
                    "Rate",
                ],
                rows,
            )
        );
    }
    Ok(())
}
