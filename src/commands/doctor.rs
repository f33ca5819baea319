// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::MAX_AMOUNT;
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{get_owner_id, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;

pub fn handle(store: &SqliteStore) -> Result<()> {
    let rows = diagnose(store)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn diagnose(store: &SqliteStore) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Records that cannot be read back
    match store.list_transactions() {
        Ok(txs) => {
            for t in &txs {
                let issue = if t.amount <= Decimal::ZERO {
                    "transaction_non_positive_amount"
                } else if t.amount > MAX_AMOUNT {
                    "transaction_amount_too_large"
                } else {
                    continue;
                };
                rows.push(vec![
                    issue.into(),
                    format!("#{} {} {}", t.id, t.description, t.amount),
                ]);
            }
        }
        Err(e) => rows.push(vec!["unreadable_transactions".into(), e.to_string()]),
    }

    // 2) Goals whose progress cannot be computed or exceeds the target
    match store.list_goals() {
        Ok(goals) => {
            for g in goals {
                if g.amount.is_zero() {
                    rows.push(vec![
                        "goal_zero_target".into(),
                        format!("#{} {}", g.id, g.title),
                    ]);
                } else if g.saved_amount > g.amount {
                    rows.push(vec![
                        "goal_saved_exceeds_target".into(),
                        format!("#{} {} ({} > {})", g.id, g.title, g.saved_amount, g.amount),
                    ]);
                }
            }
        }
        Err(e) => rows.push(vec!["unreadable_goals".into(), e.to_string()]),
    }

    // 3) Reminders that belong to some other owner id and are never shown
    let owner = get_owner_id(store.conn())?;
    let mut stmt = store
        .conn()
        .prepare("SELECT user_id, COUNT(*) FROM reminders WHERE user_id != ?1 GROUP BY user_id")?;
    let mut cur = stmt.query([&owner])?;
    while let Some(r) = cur.next()? {
        let other: String = r.get(0)?;
        let n: i64 = r.get(1)?;
        rows.push(vec![
            "reminder_other_owner".into(),
            format!("{} reminder(s) owned by '{}'", n, other),
        ]);
    }
    if let Err(e) = store.list_reminders(&owner) {
        rows.push(vec!["unreadable_reminders".into(), e.to_string()]);
    }

    Ok(rows)
}
