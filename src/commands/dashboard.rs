// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::dashboard::summarize;
use crate::ledger::Ledger;
use crate::store::SqliteStore;
use crate::utils::{
    fmt_decimal, fmt_money, fmt_percent, get_owner_id, maybe_print_json, now, pretty_table,
};
use anyhow::Result;

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let ledger = Ledger::load(store, &get_owner_id(store.conn())?)?;
    let summary = summarize(&ledger, now());
    if maybe_print_json(json_flag, jsonl_flag, &summary)? {
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["Balance", "Income", "Expenses", "Savings Rate"],
            vec![vec![
                fmt_money(&summary.totals.balance),
                fmt_money(&summary.totals.income),
                fmt_money(&summary.totals.expenses),
                fmt_percent(&summary.savings_rate, 1),
            ]],
        )
    );

    println!("Recent transactions");
    if summary.recent.is_empty() {
        println!("No transactions yet");
    } else {
        let rows = summary
            .recent
            .iter()
            .map(|t| {
                let sign = if t.is_income() { "+" } else { "-" };
                vec![
                    t.date.format("%Y-%m-%d").to_string(),
                    t.description.clone(),
                    t.category.clone(),
                    format!("{}{}", sign, fmt_money(&t.amount)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Category", "Amount"], rows)
        );
    }

    println!("Upcoming payments");
    if summary.upcoming.is_empty() {
        println!("No upcoming payments");
    } else {
        let rows = summary
            .upcoming
            .iter()
            .map(|u| {
                vec![
                    u.reminder.title.clone(),
                    fmt_money(&u.reminder.amount),
                    u.reminder.due_date.to_string(),
                    format!("{} days", u.days_left),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Title", "Amount", "Due", "In"], rows));
    }

    let rows = summary
        .monthly
        .iter()
        .map(|p| {
            vec![
                p.label.clone(),
                fmt_decimal(&p.income, 2),
                fmt_decimal(&p.expense, 2),
            ]
        })
        .collect();
    println!("This year by month");
    println!("{}", pretty_table(&["Month", "Income", "Expense"], rows));
    Ok(())
}
