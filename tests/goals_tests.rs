// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use pocketledger::goals::{evaluate, evaluate_all, progress_percent};
use pocketledger::models::Goal;
use rust_decimal::Decimal;

fn now() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-03-01 10:30", "%Y-%m-%d %H:%M").unwrap()
}

fn goal(id: i64, amount: &str, saved: &str, target: &str) -> Goal {
    Goal {
        id,
        title: format!("goal {}", id),
        amount: Decimal::from_str_exact(amount).unwrap(),
        saved_amount: Decimal::from_str_exact(saved).unwrap(),
        target_date: NaiveDate::parse_from_str(target, "%Y-%m-%d").unwrap(),
        category: None,
        notes: None,
        created_at: now(),
    }
}

#[test]
fn progress_days_and_daily_rate() {
    // 2024-04-20 is 50 days after 2024-03-01.
    let p = evaluate(&goal(1, "1000", "250", "2024-04-20"), now());
    assert_eq!(p.progress, Decimal::from(25));
    assert_eq!(p.days_remaining, 50);
    assert_eq!(p.remaining_amount, Decimal::from(750));
    assert_eq!(format!("{:.2}", p.daily_rate.unwrap()), "15.00");
    assert_eq!(p.status_text(), "50 days remaining");
    assert!(!p.is_overdue());
}

#[test]
fn overdue_goal_has_no_daily_rate() {
    let p = evaluate(&goal(1, "1000", "250", "2024-02-28"), now());
    assert_eq!(p.days_remaining, -2);
    assert!(p.is_overdue());
    assert_eq!(p.daily_rate, None);
    assert_eq!(p.status_text(), "Overdue by 2 days");
}

#[test]
fn target_today_counts_as_zero_days() {
    let p = evaluate(&goal(1, "100", "0", "2024-03-01"), now());
    assert_eq!(p.days_remaining, 0);
    assert_eq!(p.daily_rate, None);
}

#[test]
fn zero_target_reports_zero_progress() {
    let g = goal(1, "0", "0", "2024-04-20");
    assert_eq!(progress_percent(&g), Decimal::ZERO);
    let p = evaluate(&g, now());
    assert_eq!(p.progress, Decimal::ZERO);
    assert_eq!(p.daily_rate, Some(Decimal::ZERO));
}

#[test]
fn goals_sorted_by_progress_then_target_date() {
    let goals = vec![
        goal(1, "100", "50", "2024-05-01"),
        goal(2, "100", "10", "2024-09-01"),
        goal(3, "200", "20", "2024-06-01"),
        goal(4, "100", "0", "2025-01-01"),
    ];
    let ids: Vec<i64> = evaluate_all(&goals, now()).iter().map(|p| p.goal.id).collect();
    assert_eq!(ids, vec![4, 3, 2, 1]);
}
