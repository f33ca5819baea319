// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Goal;
use crate::periods::{ceil_days_between, start_of_day};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub goal: Goal,
    /// Percent saved. A zero target reports 0 rather than dividing by zero.
    pub progress: Decimal,
    pub days_remaining: i64,
    pub remaining_amount: Decimal,
    /// Amount to put aside per day to reach the target on time.
    pub daily_rate: Option<Decimal>,
}

impl GoalProgress {
    pub fn is_overdue(&self) -> bool {
        self.days_remaining < 0
    }

    pub fn status_text(&self) -> String {
        if self.is_overdue() {
            format!("Overdue by {} days", self.days_remaining.abs())
        } else {
            format!("{} days remaining", self.days_remaining)
        }
    }
}

pub fn progress_percent(goal: &Goal) -> Decimal {
    if goal.amount.is_zero() {
        return Decimal::ZERO;
    }
    goal.saved_amount
        .checked_div(goal.amount)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

pub fn evaluate(goal: &Goal, now: NaiveDateTime) -> GoalProgress {
    let days_remaining = ceil_days_between(now, start_of_day(goal.target_date));
    let remaining_amount = goal.amount.saturating_sub(goal.saved_amount);
    let daily_rate = if days_remaining > 0 {
        Some(remaining_amount / Decimal::from(days_remaining))
    } else {
        None
    };
    GoalProgress {
        goal: goal.clone(),
        progress: progress_percent(goal),
        days_remaining,
        remaining_amount,
        daily_rate,
    }
}

/// Least progressed goals first, earlier target dates breaking ties.
pub fn sort_goals(goals: &mut [Goal]) {
    goals.sort_by(|a, b| {
        progress_percent(a)
            .cmp(&progress_percent(b))
            .then_with(|| a.target_date.cmp(&b.target_date))
    });
}

pub fn evaluate_all(goals: &[Goal], now: NaiveDateTime) -> Vec<GoalProgress> {
    let mut ordered = goals.to_vec();
    sort_goals(&mut ordered);
    ordered.iter().map(|g| evaluate(g, now)).collect()
}
