// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use pocketledger::analytics::Totals;
use pocketledger::cli;
use pocketledger::commands::{exporter, transactions};
use pocketledger::dashboard::{savings_rate, summarize};
use pocketledger::history::{HistoryFilter, categories, group_by_day};
use pocketledger::ledger::Ledger;
use pocketledger::models::{NewReminder, NewTransaction, Transaction, TransactionKind};
use pocketledger::store::{RecordStore, SqliteStore};
use pocketledger::utils::{fmt_decimal, fmt_money, fmt_percent};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn setup() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    let created = at("2024-03-01 12:00");
    let rows = [
        ("Salary", "3000", TransactionKind::Income, "Salary", "2024-02-01 09:00", None),
        ("Groceries", "82.40", TransactionKind::Expense, "Food", "2024-02-03 18:00", None),
        ("Bus pass", "45", TransactionKind::Expense, "Transport", "2024-02-03 08:00", Some("monthly")),
        ("Coffee", "3.80", TransactionKind::Expense, "Food", "2024-02-10 07:30", Some("Oat latte")),
    ];
    for (description, amount, kind, category, date, notes) in rows {
        store
            .create_transaction(
                &NewTransaction {
                    description: description.into(),
                    amount: Decimal::from_str_exact(amount).unwrap(),
                    kind,
                    category: category.into(),
                    date: at(date),
                    notes: notes.map(String::from),
                },
                created,
            )
            .unwrap();
    }
    store
}

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["pocketledger", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let (_, tx) = matches.subcommand().unwrap();
    let (_, list) = tx.subcommand().unwrap();
    list.clone()
}

#[test]
fn list_limit_keeps_newest() {
    let store = setup();
    let rows = transactions::query_rows(&store, &list_matches(&["--limit", "2"])).unwrap();
    let names: Vec<&str> = rows.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(names, vec!["Coffee", "Groceries"]);
}

#[test]
fn list_filters_combine() {
    let store = setup();
    let sub = list_matches(&["--type", "expense", "--category", "Food", "--from", "2024-02-04"]);
    let rows = transactions::query_rows(&store, &sub).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Coffee");

    let sub = list_matches(&["--to", "2024-02-03"]);
    assert_eq!(transactions::query_rows(&store, &sub).unwrap().len(), 3);

    let sub = list_matches(&["--search", "LATTE"]);
    let rows = transactions::query_rows(&store, &sub).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Coffee");
}

#[test]
fn list_rejects_unknown_type() {
    let store = setup();
    let sub = list_matches(&["--type", "transfer"]);
    assert!(transactions::query_rows(&store, &sub).is_err());
}

#[test]
fn group_by_day_newest_first() {
    let store = setup();
    let all = store.list_transactions().unwrap();
    let refs: Vec<&Transaction> = all.iter().collect();
    let groups = group_by_day(&refs);
    let days: Vec<NaiveDate> = groups.iter().map(|g| g.date).collect();
    assert_eq!(
        days,
        vec![
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        ]
    );
    assert_eq!(groups[1].transactions.len(), 2);
    assert_eq!(groups[1].transactions[0].description, "Groceries");
}

#[test]
fn history_filter_and_categories() {
    let store = setup();
    let all = store.list_transactions().unwrap();
    let filter = HistoryFilter {
        kind: Some(TransactionKind::Income),
        ..Default::default()
    };
    assert_eq!(filter.apply(&all).len(), 1);
    assert_eq!(categories(&all), vec!["Food", "Transport", "Salary"]);
}

#[test]
fn dashboard_summary_from_ledger() {
    let store = setup();
    let now = at("2024-03-01 12:00");
    let mut ledger = Ledger::load(&store, "local").unwrap();
    ledger
        .add_reminder(
            &store,
            NewReminder {
                title: "Rent".into(),
                amount: Decimal::from(900),
                due_date: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
                notes: None,
            },
            now,
        )
        .unwrap();

    let s = summarize(&ledger, now);
    assert_eq!(s.totals.income, Decimal::from(3000));
    assert_eq!(s.totals.expenses, Decimal::from_str_exact("131.20").unwrap());
    assert_eq!(s.recent.len(), 4);
    assert_eq!(s.recent[0].description, "Coffee");
    assert_eq!(s.upcoming.len(), 1);
    assert_eq!(s.upcoming[0].days_left, 2);
    assert_eq!(s.monthly.len(), 12);
    assert_eq!(s.savings_rate, Decimal::from_str_exact("95.6").unwrap());
    let no_income = Totals {
        expenses: Decimal::from(10),
        ..Default::default()
    };
    assert_eq!(savings_rate(&no_income), Decimal::ZERO);
}

#[test]
fn export_json_oldest_first() {
    let store = setup();
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.json");
    let out_str = out.to_str().unwrap();
    let matches = cli::build_cli().get_matches_from([
        "pocketledger",
        "export",
        "transactions",
        "--format",
        "json",
        "--out",
        out_str,
    ]);
    let (_, export) = matches.subcommand().unwrap();
    exporter::handle(&store, export).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let items: serde_json::Value = serde_json::from_str(&text).unwrap();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["description"], "Salary");
    assert_eq!(items[0]["type"], "income");
    assert_eq!(items[3]["amount"], "3.80");
}

#[test]
fn export_unknown_format_writes_nothing() {
    let store = setup();
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.xml");
    let matches = cli::build_cli().get_matches_from([
        "pocketledger",
        "export",
        "transactions",
        "--format",
        "xml",
        "--out",
        out.to_str().unwrap(),
    ]);
    let (_, export) = matches.subcommand().unwrap();
    assert!(exporter::handle(&store, export).is_err());
    assert!(!out.exists());
}

#[test]
fn display_rounds_half_away_from_zero() {
    let rate = Decimal::from(750) / Decimal::from(45);
    assert_eq!(fmt_money(&rate), "$16.67");
    assert_eq!(fmt_decimal(&Decimal::from_str_exact("0.666666").unwrap(), 2), "0.67");
    assert_eq!(fmt_decimal(&Decimal::from_str_exact("-0.125").unwrap(), 2), "-0.13");
    assert_eq!(fmt_decimal(&Decimal::from(3), 2), "3.00");
    assert_eq!(fmt_percent(&Decimal::from_str_exact("33.36").unwrap(), 1), "33.4%");
    assert_eq!(fmt_percent(&Decimal::from_str_exact("62.5").unwrap(), 0), "63%");
}
