// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{AnalyticsReport, SeriesPoint, analyze};
use crate::periods::{MONTH_NAMES, TimeRange, WindowSelector};
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{
    fmt_decimal, fmt_money, fmt_percent, maybe_print_json, now, parse_month, pretty_table,
};
use anyhow::{Result, anyhow};
use chrono::{Datelike, NaiveDateTime};

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let now = now();
    let selector = selector_from_args(m, now)?;
    let transactions = store.list_transactions()?;
    let report = analyze(&transactions, &selector, now);
    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        print_report(&report, &selector);
    }
    Ok(())
}

/// Year and month default to the current ones; week mode ignores both.
pub fn selector_from_args(m: &clap::ArgMatches, now: NaiveDateTime) -> Result<WindowSelector> {
    let range: TimeRange = m
        .get_one::<String>("range")
        .map_or("month", |s| s.as_str())
        .parse()?;
    let year = m.get_one::<i32>("year").copied().unwrap_or(now.year());
    let month0 = match m.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => now.month0(),
    };
    let selector = match range {
        TimeRange::Week => Some(WindowSelector::week()),
        TimeRange::Month => WindowSelector::month(year, month0),
        TimeRange::Year => WindowSelector::year(year),
    };
    selector.ok_or_else(|| anyhow!("Year {} is out of range", year))
}

fn series_rows(points: &[SeriesPoint]) -> Vec<Vec<String>> {
    points
        .iter()
        .map(|p| {
            vec![
                p.label.clone(),
                fmt_decimal(&p.income, 2),
                fmt_decimal(&p.expense, 2),
                fmt_decimal(&p.balance, 2),
            ]
        })
        .collect()
}

fn print_report(report: &AnalyticsReport, selector: &WindowSelector) {
    let title = match report.range {
        TimeRange::Week => format!(
            "Week of {}",
            report.window.start.format("%Y-%m-%d")
        ),
        TimeRange::Month => format!(
            "{} {}",
            MONTH_NAMES[selector.selected_month0() as usize],
            selector.selected_year()
        ),
        TimeRange::Year => selector.selected_year().to_string(),
    };
    println!("Financial analytics: {}", title);
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Balance", "Transactions"],
            vec![vec![
                fmt_money(&report.total_income),
                fmt_money(&report.total_expenses),
                fmt_money(&report.balance),
                report.transaction_count.to_string(),
            ]],
        )
    );

    println!("Income vs expenses");
    println!(
        "{}",
        pretty_table(
            &["Period", "Income", "Expense", "Balance"],
            series_rows(&report.bar_series)
        )
    );
    println!("Balance trend");
    println!(
        "{}",
        pretty_table(
            &["Period", "Income", "Expense", "Balance"],
            series_rows(&report.series)
        )
    );

    if report.category_breakdown.is_empty() {
        println!("No expense data available for the selected time range");
    } else {
        let total = report.total_expenses;
        let rows = report
            .category_breakdown
            .iter()
            .map(|c| {
                let share = if total.is_zero() {
                    rust_decimal::Decimal::ZERO
                } else {
                    c.amount / total * rust_decimal::Decimal::ONE_HUNDRED
                };
                vec![c.category.clone(), fmt_decimal(&c.amount, 2), fmt_percent(&share, 0)]
            })
            .collect();
        println!("Expense breakdown");
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));

        let rows = report
            .top_categories
            .iter()
            .enumerate()
            .map(|(i, c)| vec![(i + 1).to_string(), c.category.clone(), fmt_money(&c.amount)])
            .collect();
        println!("Top spending categories");
        println!("{}", pretty_table(&["#", "Category", "Spent"], rows));
    }

    if let Some(trend) = &report.trend {
        let rows = trend
            .iter()
            .map(|t| vec![t.month.clone(), fmt_decimal(&t.average, 2)])
            .collect();
        println!("Spending trend (3-month moving average)");
        println!("{}", pretty_table(&["Month", "Average"], rows));
    }
}
