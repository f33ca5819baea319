// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::Reminder;
use crate::periods::{ceil_days_between, days_between, start_of_day};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "days")]
pub enum ReminderUrgency {
    Overdue(i64),
    DueToday,
    /// 1 to 3 days left.
    Urgent(i64),
    /// 4 to 7 days left.
    Warning(i64),
    Normal(i64),
}

impl ReminderUrgency {
    pub fn classify(days_remaining: i64) -> Self {
        match days_remaining {
            d if d < 0 => ReminderUrgency::Overdue(d.abs()),
            0 => ReminderUrgency::DueToday,
            d @ 1..=3 => ReminderUrgency::Urgent(d),
            d @ 4..=7 => ReminderUrgency::Warning(d),
            d => ReminderUrgency::Normal(d),
        }
    }

    pub fn label(&self) -> String {
        match self {
            ReminderUrgency::Overdue(d) => format!("Overdue by {} days", d),
            ReminderUrgency::DueToday => "Due Today".to_string(),
            ReminderUrgency::Urgent(d) | ReminderUrgency::Warning(d) | ReminderUrgency::Normal(d) => {
                format!("{} days left", d)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReminderStatus {
    pub reminder: Reminder,
    pub days_remaining: i64,
    pub urgency: ReminderUrgency,
}

pub fn days_remaining(reminder: &Reminder, today: NaiveDate) -> i64 {
    days_between(today, reminder.due_date)
}

pub fn evaluate(reminder: &Reminder, today: NaiveDate) -> ReminderStatus {
    let days = days_remaining(reminder, today);
    ReminderStatus {
        reminder: reminder.clone(),
        days_remaining: days,
        urgency: ReminderUrgency::classify(days),
    }
}

/// Statuses ordered by due date, closest first.
pub fn evaluate_all(reminders: &[Reminder], today: NaiveDate) -> Vec<ReminderStatus> {
    let mut statuses: Vec<ReminderStatus> = reminders.iter().map(|r| evaluate(r, today)).collect();
    statuses.sort_by_key(|s| s.reminder.due_date);
    statuses
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DueNotice {
    pub reminder_id: i64,
    pub message: String,
}

pub fn due_today(reminders: &[Reminder], today: NaiveDate) -> Vec<DueNotice> {
    reminders
        .iter()
        .filter(|r| r.due_date == today)
        .map(|r| DueNotice {
            reminder_id: r.id,
            message: format!("Payment due today: {} - ${}", r.title, r.amount),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingReminder {
    pub reminder: Reminder,
    pub days_left: i64,
}

/// Reminders falling due strictly after `now`, soonest first.
pub fn upcoming(reminders: &[Reminder], now: NaiveDateTime, limit: usize) -> Vec<UpcomingReminder> {
    let mut pending: Vec<&Reminder> = reminders
        .iter()
        .filter(|r| start_of_day(r.due_date) > now)
        .collect();
    pending.sort_by_key(|r| r.due_date);
    pending
        .into_iter()
        .take(limit)
        .map(|r| UpcomingReminder {
            reminder: r.clone(),
            days_left: ceil_days_between(now, start_of_day(r.due_date)),
        })
        .collect()
}
