// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory session state: everything loaded from the store once, then kept
//! in step with successful writes instead of being fetched again.

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::error::{StoreError, ValidationError, WriteError};
use crate::models::{
    Goal, NewGoal, NewReminder, NewTransaction, Reminder, ReminderPatch, Transaction,
};
use crate::store::RecordStore;

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub owner: String,
    /// Newest first.
    pub transactions: Vec<Transaction>,
    pub goals: Vec<Goal>,
    pub reminders: Vec<Reminder>,
}

impl Ledger {
    /// Loads all three collections. Any failure fails the whole load so a
    /// view never works from partial data.
    pub fn load<S: RecordStore + ?Sized>(store: &S, owner: &str) -> Result<Self, StoreError> {
        let transactions = store.list_transactions()?;
        let goals = store.list_goals()?;
        let reminders = store.list_reminders(owner)?;
        debug!(
            transactions = transactions.len(),
            goals = goals.len(),
            reminders = reminders.len(),
            "ledger loaded"
        );
        Ok(Ledger {
            owner: owner.to_string(),
            transactions,
            goals,
            reminders,
        })
    }

    pub fn add_transaction<S: RecordStore + ?Sized>(
        &mut self,
        store: &S,
        new: NewTransaction,
        now: NaiveDateTime,
    ) -> Result<&Transaction, WriteError> {
        reject_invalid(new.validate())?;
        let id = store
            .create_transaction(&new, now)
            .inspect_err(|e| warn!(error = %e, "failed to add transaction"))?;
        info!(id, kind = %new.kind, amount = %new.amount, "transaction added");
        self.transactions.insert(
            0,
            Transaction {
                id,
                description: new.description,
                amount: new.amount,
                kind: new.kind,
                category: new.category,
                date: new.date,
                notes: new.notes,
                created_at: now,
            },
        );
        Ok(&self.transactions[0])
    }

    pub fn add_goal<S: RecordStore + ?Sized>(
        &mut self,
        store: &S,
        new: NewGoal,
        now: NaiveDateTime,
    ) -> Result<&Goal, WriteError> {
        reject_invalid(new.validate())?;
        let id = store
            .create_goal(&new, now)
            .inspect_err(|e| warn!(error = %e, "failed to add goal"))?;
        info!(id, title = %new.title, "goal added");
        self.goals.insert(
            0,
            Goal {
                id,
                title: new.title,
                amount: new.amount,
                saved_amount: new.saved_amount,
                target_date: new.target_date,
                category: new.category,
                notes: new.notes,
                created_at: now,
            },
        );
        Ok(&self.goals[0])
    }

    pub fn add_reminder<S: RecordStore + ?Sized>(
        &mut self,
        store: &S,
        new: NewReminder,
        now: NaiveDateTime,
    ) -> Result<&Reminder, WriteError> {
        reject_invalid(new.validate())?;
        let id = store
            .create_reminder(&new, &self.owner, now)
            .inspect_err(|e| warn!(error = %e, "failed to add reminder"))?;
        info!(id, title = %new.title, due = %new.due_date, "reminder added");
        self.reminders.insert(
            0,
            Reminder {
                id,
                title: new.title,
                amount: new.amount,
                due_date: new.due_date,
                notes: new.notes,
                user_id: self.owner.clone(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(&self.reminders[0])
    }

    pub fn update_reminder<S: RecordStore + ?Sized>(
        &mut self,
        store: &S,
        id: i64,
        patch: ReminderPatch,
        now: NaiveDateTime,
    ) -> Result<Reminder, WriteError> {
        reject_invalid(patch.validate())?;
        let updated = store
            .update_reminder(id, &self.owner, &patch, now)
            .inspect_err(|e| warn!(error = %e, id, "failed to update reminder"))?;
        info!(id, "reminder updated");
        match self.reminders.iter_mut().find(|r| r.id == id) {
            Some(slot) => *slot = updated.clone(),
            None => self.reminders.insert(0, updated.clone()),
        }
        Ok(updated)
    }

    pub fn delete_reminder<S: RecordStore + ?Sized>(
        &mut self,
        store: &S,
        id: i64,
    ) -> Result<(), WriteError> {
        store
            .delete_reminder(id, &self.owner)
            .inspect_err(|e| warn!(error = %e, id, "failed to delete reminder"))?;
        info!(id, "reminder deleted");
        self.reminders.retain(|r| r.id != id);
        Ok(())
    }
}

fn reject_invalid(result: Result<(), ValidationError>) -> Result<(), ValidationError> {
    result.inspect_err(|e| warn!(error = %e, "rejected input"))
}
