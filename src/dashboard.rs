// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::analytics::{self, CategoryTotal, SeriesPoint, Totals};
use crate::ledger::Ledger;
use crate::models::Transaction;
use crate::periods::{WindowSelector, resolve_window};
use crate::reminders::{self, UpcomingReminder};

pub const RECENT_LIMIT: usize = 5;
pub const UPCOMING_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub totals: Totals,
    /// Share of income kept, in percent with one decimal; 0 without income.
    pub savings_rate: Decimal,
    pub recent: Vec<Transaction>,
    pub upcoming: Vec<UpcomingReminder>,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub monthly: Vec<SeriesPoint>,
}

pub fn summarize(ledger: &Ledger, now: NaiveDateTime) -> DashboardSummary {
    let all: Vec<&Transaction> = ledger.transactions.iter().collect();
    let totals = analytics::totals(all.iter().copied());
    let monthly = current_year_series(&ledger.transactions, now);

    DashboardSummary {
        totals,
        savings_rate: savings_rate(&totals),
        recent: ledger.transactions.iter().take(RECENT_LIMIT).cloned().collect(),
        upcoming: reminders::upcoming(&ledger.reminders, now, UPCOMING_LIMIT),
        expenses_by_category: analytics::category_breakdown(&all),
        monthly,
    }
}

pub fn savings_rate(totals: &Totals) -> Decimal {
    if totals.income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    totals
        .balance
        .checked_div(totals.income)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

fn current_year_series(transactions: &[Transaction], now: NaiveDateTime) -> Vec<SeriesPoint> {
    match WindowSelector::year(now.year()) {
        Some(selector) => {
            let window = resolve_window(&selector, now);
            let filtered = analytics::filter_by_window(transactions, &window);
            analytics::line_series(&filtered, &selector, &window)
        }
        None => Vec::new(),
    }
}
