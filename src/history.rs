// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Transaction, TransactionKind};
use crate::periods::{end_of_day, start_of_day};

#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    /// Inclusive through the end of the day.
    pub to: Option<NaiveDate>,
    /// Case-insensitive match on description or notes.
    pub search: Option<String>,
}

impl HistoryFilter {
    pub fn matches(&self, t: &Transaction) -> bool {
        if self.kind.is_some_and(|k| k != t.kind) {
            return false;
        }
        if self.category.as_ref().is_some_and(|c| *c != t.category) {
            return false;
        }
        if self.from.is_some_and(|d| t.date < start_of_day(d)) {
            return false;
        }
        if self.to.is_some_and(|d| t.date > end_of_day(d)) {
            return false;
        }
        if let Some(term) = self.search.as_ref().filter(|s| !s.is_empty()) {
            let term = term.to_lowercase();
            let in_description = t.description.to_lowercase().contains(&term);
            let in_notes = t
                .notes
                .as_ref()
                .is_some_and(|n| n.to_lowercase().contains(&term));
            if !in_description && !in_notes {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup<'a> {
    pub date: NaiveDate,
    pub transactions: Vec<&'a Transaction>,
}

/// Newest day first; transactions keep their input order within a day.
pub fn group_by_day<'a>(transactions: &[&'a Transaction]) -> Vec<DayGroup<'a>> {
    let mut groups: Vec<DayGroup<'a>> = Vec::new();
    for &t in transactions {
        let day = t.date.date();
        match groups.iter_mut().find(|g| g.date == day) {
            Some(group) => group.transactions.push(t),
            None => groups.push(DayGroup {
                date: day,
                transactions: vec![t],
            }),
        }
    }
    groups.sort_by(|a, b| b.date.cmp(&a.date));
    groups
}

/// Distinct categories in the order they first appear.
pub fn categories(transactions: &[Transaction]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in transactions {
        if !out.contains(&t.category) {
            out.push(t.category.clone());
        }
    }
    out
}
