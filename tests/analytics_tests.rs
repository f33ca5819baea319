// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pocketledger::analytics::{
    analyze, available_years, category_breakdown, moving_average_trend, top_categories,
    CategoryTotal,
};
use pocketledger::cli;
use pocketledger::commands::analytics::selector_from_args;
use pocketledger::models::{Transaction, TransactionKind};
use pocketledger::periods::{WindowSelector, resolve_window};
use rust_decimal::Decimal;

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.3f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn tx(id: i64, amount: &str, kind: TransactionKind, category: &str, date: &str) -> Transaction {
    Transaction {
        id,
        description: format!("t{}", id),
        amount: dec(amount),
        kind,
        category: category.to_string(),
        date: at(date),
        notes: None,
        created_at: at(date),
    }
}

fn income(id: i64, amount: &str, category: &str, date: &str) -> Transaction {
    tx(id, amount, TransactionKind::Income, category, date)
}

fn expense(id: i64, amount: &str, category: &str, date: &str) -> Transaction {
    tx(id, amount, TransactionKind::Expense, category, date)
}

fn sample() -> Vec<Transaction> {
    vec![
        income(1, "100", "Salary", "2024-01-05 09:00"),
        expense(2, "40", "Food", "2024-01-06 12:00"),
        expense(3, "20", "Food", "2024-02-01 18:30"),
    ]
}

#[test]
fn year_scenario_totals_and_series() {
    let txs = sample();
    let sel = WindowSelector::year(2024).unwrap();
    let r = analyze(&txs, &sel, at("2024-06-01 10:00"));

    assert_eq!(r.total_income, dec("100"));
    assert_eq!(r.total_expenses, dec("60"));
    assert_eq!(r.balance, dec("40"));
    assert_eq!(r.transaction_count, 3);
    assert_eq!(
        r.category_breakdown,
        vec![CategoryTotal {
            category: "Food".into(),
            amount: dec("60")
        }]
    );
    assert_eq!(r.series.len(), 12);
    assert_eq!(r.series[0].label, "Jan");
    assert_eq!(r.series[0].expense, dec("40"));
    assert_eq!(r.series[0].income, dec("100"));
    assert_eq!(r.series[0].balance, dec("60"));
    assert_eq!(r.series[1].expense, dec("20"));
    assert_eq!(r.series[1].balance, dec("-20"));
}

#[test]
fn series_sums_match_totals_in_every_mode() {
    let txs = vec![
        income(1, "1000.10", "Salary", "2024-05-13 00:00"),
        expense(2, "12.35", "Food", "2024-05-15 13:00"),
        expense(3, "7.65", "Transport", "2024-05-19 23:59:59.999"),
        expense(4, "99.99", "Housing", "2024-05-31 23:00"),
        income(5, "50", "Gift", "2024-05-29 08:00"),
        expense(6, "5", "Food", "2024-11-02 10:00"),
    ];
    let now = at("2024-05-15 12:00");
    for sel in [
        WindowSelector::week(),
        WindowSelector::month(2024, 4).unwrap(),
        WindowSelector::year(2024).unwrap(),
    ] {
        let r = analyze(&txs, &sel, now);
        assert_eq!(r.total_income - r.total_expenses, r.balance);
        for series in [&r.series, &r.bar_series] {
            let inc: Decimal = series.iter().map(|p| p.income).sum();
            let exp: Decimal = series.iter().map(|p| p.expense).sum();
            assert_eq!(inc, r.total_income, "{:?}", sel);
            assert_eq!(exp, r.total_expenses, "{:?}", sel);
        }
        let cat_sum: Decimal = r.category_breakdown.iter().map(|c| c.amount).sum();
        assert_eq!(cat_sum, r.total_expenses);
    }
}

#[test]
fn week_window_is_monday_through_sunday_inclusive() {
    // 2024-05-15 is a Wednesday.
    let now = at("2024-05-15 12:00");
    let w = resolve_window(&WindowSelector::week(), now);
    assert_eq!(w.start, at("2024-05-13 00:00"));
    assert_eq!(w.end, at("2024-05-19 23:59:59.999"));

    let txs = vec![
        expense(1, "1", "A", "2024-05-12 23:59:59.999"),
        expense(2, "2", "A", "2024-05-13 00:00"),
        expense(3, "4", "A", "2024-05-19 23:59:59.999"),
        expense(4, "8", "A", "2024-05-20 00:00"),
    ];
    let r = analyze(&txs, &WindowSelector::week(), now);
    assert_eq!(r.total_expenses, dec("6"));
    assert_eq!(r.series.len(), 7);
    assert_eq!(r.series[0].label, "Monday");
    assert_eq!(r.series[0].expense, dec("2"));
    assert_eq!(r.series[6].label, "Sunday");
    assert_eq!(r.series[6].expense, dec("4"));
    assert_eq!(r.bar_series[6].label, "Sun");
    assert!(r.trend.is_none());
}

#[test]
fn week_mode_on_sunday_uses_preceding_monday() {
    let w = resolve_window(&WindowSelector::week(), at("2024-05-19 22:00"));
    assert_eq!(w.start, at("2024-05-13 00:00"));
}

#[test]
fn month_mode_has_a_point_per_day_and_five_weeks() {
    let txs = vec![
        expense(1, "10", "Food", "2024-02-29 10:00"),
        expense(2, "5", "Food", "2024-02-07 10:00"),
        expense(3, "3", "Food", "2024-02-08 10:00"),
        // Same day of month in another month stays out of every bucket.
        expense(4, "100", "Food", "2024-03-29 10:00"),
    ];
    let sel = WindowSelector::month(2024, 1).unwrap();
    let r = analyze(&txs, &sel, at("2024-06-01 10:00"));
    assert_eq!(r.series.len(), 29);
    assert_eq!(r.series[28].label, "29");
    assert_eq!(r.series[28].expense, dec("10"));
    assert_eq!(r.bar_series.len(), 5);
    assert_eq!(r.bar_series[0].label, "Week 1");
    assert_eq!(r.bar_series[0].expense, dec("5"));
    assert_eq!(r.bar_series[1].expense, dec("3"));
    assert_eq!(r.bar_series[4].expense, dec("10"));
    assert_eq!(r.total_expenses, dec("18"));
    assert!(r.trend.is_none());
}

#[test]
fn month_window_covers_last_millisecond() {
    let sel = WindowSelector::month(2023, 1).unwrap();
    let w = resolve_window(&sel, at("2024-01-01 00:00"));
    assert_eq!(w.start, at("2023-02-01 00:00"));
    assert_eq!(w.end, at("2023-02-28 23:59:59.999"));
    assert!(WindowSelector::month(2024, 12).is_none());
}

#[test]
fn empty_input_yields_zeroed_structure() {
    let sel = WindowSelector::year(2024).unwrap();
    let r = analyze(&[], &sel, at("2024-06-01 10:00"));
    assert_eq!(r.total_income, Decimal::ZERO);
    assert_eq!(r.total_expenses, Decimal::ZERO);
    assert_eq!(r.balance, Decimal::ZERO);
    assert_eq!(r.series.len(), 12);
    assert!(r.series.iter().all(|p| p.income.is_zero() && p.expense.is_zero()));
    assert!(r.category_breakdown.is_empty());
    assert!(r.top_categories.is_empty());
    let trend = r.trend.unwrap();
    assert_eq!(trend.len(), 10);
    assert!(trend.iter().all(|t| t.average.is_zero()));
    assert_eq!(r.available_years, vec![2024]);
}

#[test]
fn trend_is_three_month_average_rounded() {
    let mut monthly = [Decimal::ZERO; 12];
    monthly[0] = dec("10");
    monthly[1] = dec("10");
    let trend = moving_average_trend(&monthly);
    assert_eq!(trend.len(), 10);
    assert_eq!(trend[0].month, "Mar");
    assert_eq!(trend[0].average, dec("6.67"));
    assert_eq!(trend[1].month, "Apr");
    assert_eq!(trend[1].average, dec("3.33"));
    assert_eq!(trend[9].month, "Dec");
}

#[test]
fn top_categories_ranked_stable_and_capped() {
    let txs = vec![
        expense(1, "5", "A", "2024-03-01 10:00"),
        expense(2, "30", "B", "2024-03-01 10:00"),
        expense(3, "20", "C", "2024-03-01 10:00"),
        expense(4, "20", "D", "2024-03-01 10:00"),
        expense(5, "1", "E", "2024-03-01 10:00"),
        expense(6, "40", "F", "2024-03-01 10:00"),
        income(7, "500", "Salary", "2024-03-01 10:00"),
    ];
    let refs: Vec<&Transaction> = txs.iter().collect();
    let breakdown = category_breakdown(&refs);
    assert_eq!(breakdown.len(), 6);
    let top = top_categories(&breakdown, 5);
    let names: Vec<&str> = top.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["F", "B", "C", "D", "A"]);
    assert!(top.windows(2).all(|w| w[0].amount >= w[1].amount));
    assert!(top.iter().all(|c| breakdown.contains(c)));
}

#[test]
fn categories_are_not_normalized() {
    let txs = vec![
        expense(1, "5", "Food", "2024-03-01 10:00"),
        expense(2, "5", "food", "2024-03-01 10:00"),
        expense(3, "5", "Food ", "2024-03-01 10:00"),
    ];
    let refs: Vec<&Transaction> = txs.iter().collect();
    assert_eq!(category_breakdown(&refs).len(), 3);
}

#[test]
fn decimal_sums_do_not_drift() {
    let txs: Vec<Transaction> = (0..1000)
        .map(|i| expense(i, "0.1", "Coffee", "2024-07-04 08:00"))
        .collect();
    let sel = WindowSelector::year(2024).unwrap();
    let r = analyze(&txs, &sel, at("2024-08-01 00:00"));
    assert_eq!(r.total_expenses, dec("100"));
    assert_eq!(format!("{:.2}", r.total_expenses), "100.00");
}

#[test]
fn analyze_is_idempotent() {
    let txs = sample();
    let sel = WindowSelector::year(2024).unwrap();
    let now = at("2024-06-01 10:00");
    assert_eq!(analyze(&txs, &sel, now), analyze(&txs, &sel, now));
}

#[test]
fn available_years_descending_and_distinct() {
    let txs = vec![
        expense(1, "1", "A", "2022-03-01 10:00"),
        expense(2, "1", "A", "2024-03-01 10:00"),
        expense(3, "1", "A", "2022-07-01 10:00"),
    ];
    assert_eq!(available_years(&txs, 2025), vec![2024, 2022]);
}

#[test]
fn selector_from_cli_args() {
    let now = at("2024-05-15 12:00");
    let matches = cli::build_cli().get_matches_from([
        "pocketledger",
        "analytics",
        "--range",
        "month",
        "--year",
        "2023",
        "--month",
        "2",
    ]);
    let (_, sub) = matches.subcommand().unwrap();
    let sel = selector_from_args(sub, now).unwrap();
    assert_eq!(sel, WindowSelector::month(2023, 1).unwrap());

    let matches = cli::build_cli().get_matches_from(["pocketledger", "analytics"]);
    let (_, sub) = matches.subcommand().unwrap();
    assert_eq!(
        selector_from_args(sub, now).unwrap(),
        WindowSelector::month(2024, 4).unwrap()
    );

    let matches =
        cli::build_cli().get_matches_from(["pocketledger", "analytics", "--month", "13"]);
    let (_, sub) = matches.subcommand().unwrap();
    assert!(selector_from_args(sub, now).is_err());
}

#[test]
fn last_representable_year_resolves_without_overflow() {
    let now = at("2024-05-15 12:00");
    let sel = WindowSelector::year(262142).unwrap();
    let r = analyze(&[], &sel, now);
    assert_eq!(r.window.end.date(), NaiveDate::MAX);
    assert_eq!(r.window.end.time(), NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap());
    assert_eq!(r.series.len(), 12);

    let sel = WindowSelector::month(262142, 11).unwrap();
    let r = analyze(&[], &sel, now);
    assert_eq!(r.window.end.date(), NaiveDate::MAX);
    assert_eq!(r.series.len(), 31);

    assert!(WindowSelector::year(262143).is_none());

    let w = resolve_window(&WindowSelector::week(), NaiveDate::MAX.and_hms_opt(12, 0, 0).unwrap());
    assert_eq!(w.end.date(), NaiveDate::MAX);
    assert!(w.contains(NaiveDate::MAX.and_hms_opt(12, 0, 0).unwrap()));
}

#[test]
fn huge_amounts_saturate_instead_of_overflowing() {
    let txs = vec![
        expense(1, "1", "Big", "2024-03-01 10:00"),
        expense(2, "1", "Big", "2024-03-02 10:00"),
    ]
    .into_iter()
    .map(|mut t| {
        t.amount = Decimal::MAX;
        t
    })
    .collect::<Vec<_>>();
    let sel = WindowSelector::year(2024).unwrap();
    let r = analyze(&txs, &sel, at("2024-06-01 10:00"));
    assert_eq!(r.total_expenses, Decimal::MAX);
    assert_eq!(r.balance, Decimal::MIN);
    assert_eq!(r.series[2].expense, Decimal::MAX);
    assert_eq!(r.category_breakdown[0].amount, Decimal::MAX);
    assert_eq!(r.trend.unwrap().len(), 10);
}

#[test]
fn week_spanning_month_boundary_buckets_by_day_offset() {
    // 2024-05-01 is a Wednesday, so the week starts on 2024-04-29.
    let now = at("2024-05-01 12:00");
    let txs = vec![
        expense(1, "1", "A", "2024-04-28 23:00"),
        expense(2, "2", "A", "2024-04-29 08:00"),
        expense(3, "4", "A", "2024-04-30 08:00"),
        expense(4, "8", "A", "2024-05-01 08:00"),
        income(5, "16", "B", "2024-05-05 20:00"),
        expense(6, "32", "A", "2024-05-06 00:00"),
    ];
    let r = analyze(&txs, &WindowSelector::week(), now);
    assert_eq!(r.window.start, at("2024-04-29 00:00"));
    assert_eq!(r.total_expenses, dec("14"));
    assert_eq!(r.total_income, dec("16"));
    let expenses: Vec<Decimal> = r.series.iter().map(|p| p.expense).collect();
    assert_eq!(
        expenses,
        vec![dec("2"), dec("4"), dec("8"), dec("0"), dec("0"), dec("0"), dec("0")]
    );
    assert_eq!(r.series[6].income, dec("16"));
    assert_eq!(r.bar_series[1].label, "Tue");
    assert_eq!(r.bar_series[1].expense, dec("4"));
}
