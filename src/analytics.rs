// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Window filtering, totals, chart series, category rankings and the
//! 3-month spending trend. Everything here is pure and never fails; sums
//! saturate at `Decimal::MAX` instead of overflowing.

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{Transaction, TransactionKind};
use crate::periods::{
    DAY_NAMES, TimeRange, Window, WindowSelector, day_abbrev, days_between, days_in_month,
    month_abbrev, resolve_window,
};

pub const TOP_CATEGORY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

impl SeriesPoint {
    fn empty(label: String) -> Self {
        SeriesPoint {
            label,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }

    fn record(&mut self, t: &Transaction) {
        match t.kind {
            TransactionKind::Income => self.income = self.income.saturating_add(t.amount),
            TransactionKind::Expense => self.expense = self.expense.saturating_add(t.amount),
        }
        self.balance = self.income.saturating_sub(self.expense);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: String,
    pub average: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub range: TimeRange,
    pub window: Window,
    pub transaction_count: usize,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    /// Balance trend points: weekday, day of month or month of year.
    pub series: Vec<SeriesPoint>,
    /// Income vs expense bars; month mode groups days into weeks of the month.
    pub bar_series: Vec<SeriesPoint>,
    pub category_breakdown: Vec<CategoryTotal>,
    pub top_categories: Vec<CategoryTotal>,
    pub trend: Option<Vec<TrendPoint>>,
    pub available_years: Vec<i32>,
}

pub fn analyze(
    transactions: &[Transaction],
    selector: &WindowSelector,
    now: NaiveDateTime,
) -> AnalyticsReport {
    let window = resolve_window(selector, now);
    let filtered = filter_by_window(transactions, &window);
    let totals = totals(filtered.iter().copied());
    let breakdown = category_breakdown(&filtered);
    let top = top_categories(&breakdown, TOP_CATEGORY_LIMIT);
    let trend = match selector.range() {
        TimeRange::Year => Some(moving_average_trend(&monthly_expenses(&filtered))),
        TimeRange::Week | TimeRange::Month => None,
    };

    AnalyticsReport {
        range: selector.range(),
        window,
        transaction_count: filtered.len(),
        total_income: totals.income,
        total_expenses: totals.expenses,
        balance: totals.balance,
        series: line_series(&filtered, selector, &window),
        bar_series: bar_series(&filtered, selector, &window),
        category_breakdown: breakdown,
        top_categories: top,
        trend,
        available_years: available_years(transactions, now.year()),
    }
}

pub fn filter_by_window<'a>(transactions: &'a [Transaction], window: &Window) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|t| window.contains(t.date))
        .collect()
}

pub fn totals<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut out = Totals::default();
    for t in transactions {
        match t.kind {
            TransactionKind::Income => out.income = out.income.saturating_add(t.amount),
            TransactionKind::Expense => out.expenses = out.expenses.saturating_add(t.amount),
        }
    }
    out.balance = out.income.saturating_sub(out.expenses);
    out
}

/// One point per bucket of the window. Buckets come from the transaction's
/// calendar date relative to the window start, so they partition the window.
pub fn line_series(
    filtered: &[&Transaction],
    selector: &WindowSelector,
    window: &Window,
) -> Vec<SeriesPoint> {
    match selector.range() {
        TimeRange::Week => {
            let labels = DAY_NAMES.iter().map(|d| d.to_string()).collect();
            bucketed(filtered, labels, |t| weekday_slot(t, window))
        }
        TimeRange::Month => {
            let days = days_in_month(selector.selected_year(), selector.selected_month0() + 1);
            let labels = (1..=days).map(|d| d.to_string()).collect();
            bucketed(filtered, labels, |t| Some(t.date.day0() as usize))
        }
        TimeRange::Year => year_series(filtered),
    }
}

pub fn bar_series(
    filtered: &[&Transaction],
    selector: &WindowSelector,
    window: &Window,
) -> Vec<SeriesPoint> {
    match selector.range() {
        TimeRange::Week => {
            let labels = (0..7).map(|i| day_abbrev(i).to_string()).collect();
            bucketed(filtered, labels, |t| weekday_slot(t, window))
        }
        TimeRange::Month => {
            // Days 1-7, 8-14, 15-21, 22-28 and 29 to month end.
            let labels = (1..=5).map(|w| format!("Week {}", w)).collect();
            bucketed(filtered, labels, |t| Some((t.date.day0() as usize / 7).min(4)))
        }
        TimeRange::Year => year_series(filtered),
    }
}

fn year_series(filtered: &[&Transaction]) -> Vec<SeriesPoint> {
    let labels = (0..12).map(|m| month_abbrev(m).to_string()).collect();
    bucketed(filtered, labels, |t| Some(t.date.month0() as usize))
}

fn weekday_slot(t: &Transaction, window: &Window) -> Option<usize> {
    usize::try_from(days_between(window.start.date(), t.date.date())).ok()
}

fn bucketed<F>(filtered: &[&Transaction], labels: Vec<String>, slot: F) -> Vec<SeriesPoint>
where
    F: Fn(&Transaction) -> Option<usize>,
{
    let mut points: Vec<SeriesPoint> = labels.into_iter().map(SeriesPoint::empty).collect();
    for &t in filtered {
        if let Some(point) = slot(t).and_then(|i| points.get_mut(i)) {
            point.record(t);
        }
    }
    points
}

/// Expense totals per category, in the order each category first appears.
pub fn category_breakdown(filtered: &[&Transaction]) -> Vec<CategoryTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<CategoryTotal> = Vec::new();
    for t in filtered.iter().filter(|t| t.is_expense()) {
        match index.get(t.category.as_str()) {
            Some(&i) => out[i].amount = out[i].amount.saturating_add(t.amount),
            None => {
                index.insert(t.category.as_str(), out.len());
                out.push(CategoryTotal {
                    category: t.category.clone(),
                    amount: t.amount,
                });
            }
        }
    }
    out
}

/// Largest categories first; equal amounts keep breakdown order.
pub fn top_categories(breakdown: &[CategoryTotal], limit: usize) -> Vec<CategoryTotal> {
    let mut ranked = breakdown.to_vec();
    ranked.sort_by(|a, b| b.amount.cmp(&a.amount));
    ranked.truncate(limit);
    ranked
}

pub fn monthly_expenses(filtered: &[&Transaction]) -> [Decimal; 12] {
    let mut months = [Decimal::ZERO; 12];
    for t in filtered.iter().filter(|t| t.is_expense()) {
        let slot = &mut months[t.date.month0() as usize];
        *slot = slot.saturating_add(t.amount);
    }
    months
}

pub fn moving_average_trend(monthly: &[Decimal; 12]) -> Vec<TrendPoint> {
    let three = Decimal::from(3);
    (2..monthly.len())
        .map(|i| TrendPoint {
            month: month_abbrev(i).to_string(),
            average: (monthly[i]
                .saturating_add(monthly[i - 1])
                .saturating_add(monthly[i - 2])
                / three)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        })
        .collect()
}

/// Distinct transaction years, newest first. Falls back to `current_year`
/// so a selector always has something to offer.
pub fn available_years(transactions: &[Transaction], current_year: i32) -> Vec<i32> {
    let years: BTreeSet<i32> = transactions.iter().map(|t| t.date.year()).collect();
    if years.is_empty() {
        return vec![current_year];
    }
    years.into_iter().rev().collect()
}
