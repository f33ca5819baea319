// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::history::{HistoryFilter, group_by_day};
use crate::ledger::Ledger;
use crate::models::{NewTransaction, Transaction, TransactionKind};
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{
    fmt_decimal, fmt_money, get_owner_id, maybe_print_json, non_empty, now, parse_date, parse_datetime,
    parse_decimal, pretty_table,
};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let now = now();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_datetime(s)?,
        None => now,
    };
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionKind>())
        .transpose()?
        .unwrap_or(TransactionKind::Expense);
    let new = NewTransaction {
        description: non_empty(sub.get_one::<String>("description")).unwrap_or_default(),
        amount: parse_decimal(sub.get_one::<String>("amount").map_or("", |s| s.as_str()))?,
        kind,
        category: non_empty(sub.get_one::<String>("category")).unwrap_or_default(),
        date,
        notes: non_empty(sub.get_one::<String>("note")),
    };

    let mut ledger = Ledger::load(store, &get_owner_id(store.conn())?)?;
    let t = ledger
        .add_transaction(store, new, now)
        .context("Failed to add transaction")?;
    println!(
        "Recorded {} {} on {} ({}, {})",
        t.kind,
        fmt_money(&t.amount),
        t.date.format("%Y-%m-%d"),
        t.description,
        t.category
    );
    Ok(())
}

fn list(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;

    if sub.get_flag("grouped") {
        let refs: Vec<&Transaction> = data.iter().collect();
        let groups = group_by_day(&refs);
        if !maybe_print_json(json_flag, jsonl_flag, &groups)? {
            for g in groups {
                println!("{}", g.date.format("%b %-d, %Y"));
                let rows = g.transactions.iter().map(|t| row_cells(t)).collect();
                println!("{}", table(rows));
            }
        }
        return Ok(());
    }

    let out: Vec<TransactionRow> = data.iter().map(TransactionRow::from).collect();
    if !maybe_print_json(json_flag, jsonl_flag, &out)? {
        let rows = data.iter().map(row_cells).collect();
        println!("{}", table(rows));
    }
    Ok(())
}

fn table(rows: Vec<Vec<String>>) -> comfy_table::Table {
    pretty_table(
        &["Date", "Description", "Type", "Amount", "Category", "Notes"],
        rows,
    )
}

fn row_cells(t: &Transaction) -> Vec<String> {
    let sign = if t.is_income() { "+" } else { "-" };
    vec![
        t.date.format("%Y-%m-%d %H:%M").to_string(),
        t.description.clone(),
        t.kind.to_string(),
        format!("{}{}", sign, fmt_money(&t.amount)),
        t.category.clone(),
        t.notes.clone().unwrap_or_default(),
    ]
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub notes: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        TransactionRow {
            id: t.id,
            date: t.date.format("%Y-%m-%d %H:%M").to_string(),
            description: t.description.clone(),
            kind: t.kind.to_string(),
            amount: fmt_decimal(&t.amount, 2),
            category: t.category.clone(),
            notes: t.notes.clone().unwrap_or_default(),
        }
    }
}

pub fn history_filter(sub: &clap::ArgMatches) -> Result<HistoryFilter> {
    Ok(HistoryFilter {
        kind: non_empty(sub.get_one::<String>("type"))
            .map(|s| s.parse::<TransactionKind>())
            .transpose()?,
        category: non_empty(sub.get_one::<String>("category")),
        from: sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?,
        to: sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?,
        search: non_empty(sub.get_one::<String>("search")),
    })
}

/// Newest first, filtered and limited per the `list` arguments.
pub fn query_rows(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let filter = history_filter(sub)?;
    let all = store.list_transactions()?;
    let mut data: Vec<Transaction> = filter.apply(&all).into_iter().cloned().collect();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}
