// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record store: three collections of records keyed by generated ids.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::error::StoreError;
use crate::models::{
    Goal, NewGoal, NewReminder, NewTransaction, Reminder, ReminderPatch, Transaction,
    TransactionKind,
};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Transactions,
    Goals,
    Reminders,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Transactions => "transactions",
            Collection::Goals => "goals",
            Collection::Reminders => "reminders",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read/write contract the ledger relies on. Only reminders can be edited
/// or deleted, and only by the owner they are stamped with; another owner's
/// reminder reads as not found.
pub trait RecordStore {
    /// Newest first.
    fn list_transactions(&self) -> Result<Vec<Transaction>, StoreError>;
    fn list_goals(&self) -> Result<Vec<Goal>, StoreError>;
    fn list_reminders(&self, owner: &str) -> Result<Vec<Reminder>, StoreError>;

    fn create_transaction(
        &self,
        tx: &NewTransaction,
        created_at: NaiveDateTime,
    ) -> Result<i64, StoreError>;
    fn create_goal(&self, goal: &NewGoal, created_at: NaiveDateTime) -> Result<i64, StoreError>;
    fn create_reminder(
        &self,
        reminder: &NewReminder,
        owner: &str,
        created_at: NaiveDateTime,
    ) -> Result<i64, StoreError>;

    fn update_reminder(
        &self,
        id: i64,
        owner: &str,
        patch: &ReminderPatch,
        updated_at: NaiveDateTime,
    ) -> Result<Reminder, StoreError>;
    fn delete_reminder(&self, id: i64, owner: &str) -> Result<(), StoreError>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        SqliteStore { conn }
    }

    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        crate::db::init_schema(&conn)?;
        Ok(SqliteStore { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn get_reminder(&self, id: i64, owner: &str) -> Result<Reminder, StoreError> {
        let raw = self
            .conn
            .query_row(
                "SELECT id, title, amount, due_date, notes, user_id, created_at, updated_at
                 FROM reminders WHERE id=?1 AND user_id=?2",
                params![id, owner],
                RawReminder::from_row,
            )
            .optional()?;
        match raw {
            Some(r) => r.parse(),
            None => Err(StoreError::NotFound {
                collection: Collection::Reminders,
                id,
            }),
        }
    }
}

impl RecordStore for SqliteStore {
    fn list_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, description, amount, type, category, date, notes, created_at
             FROM transactions ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], RawTransaction::from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?.parse()?);
        }
        Ok(out)
    }

    fn list_goals(&self) -> Result<Vec<Goal>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, amount, saved_amount, target_date, category, notes, created_at
             FROM goals",
        )?;
        let rows = stmt.query_map([], RawGoal::from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?.parse()?);
        }
        Ok(out)
    }

    fn list_reminders(&self, owner: &str) -> Result<Vec<Reminder>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, amount, due_date, notes, user_id, created_at, updated_at
             FROM reminders WHERE user_id=?1",
        )?;
        let rows = stmt.query_map(params![owner], RawReminder::from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?.parse()?);
        }
        Ok(out)
    }

    fn create_transaction(
        &self,
        tx: &NewTransaction,
        created_at: NaiveDateTime,
    ) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO transactions(description, amount, type, category, date, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                tx.description,
                tx.amount.to_string(),
                tx.kind.as_str(),
                tx.category,
                fmt_timestamp(tx.date),
                tx.notes,
                fmt_timestamp(created_at),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_goal(&self, goal: &NewGoal, created_at: NaiveDateTime) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO goals(title, amount, saved_amount, target_date, category, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                goal.title,
                goal.amount.to_string(),
                goal.saved_amount.to_string(),
                fmt_date(goal.target_date),
                goal.category,
                goal.notes,
                fmt_timestamp(created_at),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_reminder(
        &self,
        reminder: &NewReminder,
        owner: &str,
        created_at: NaiveDateTime,
    ) -> Result<i64, StoreError> {
        let stamp = fmt_timestamp(created_at);
        self.conn.execute(
            "INSERT INTO reminders(title, amount, due_date, notes, user_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![
                reminder.title,
                reminder.amount.to_string(),
                fmt_date(reminder.due_date),
                reminder.notes,
                owner,
                stamp,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_reminder(
        &self,
        id: i64,
        owner: &str,
        patch: &ReminderPatch,
        updated_at: NaiveDateTime,
    ) -> Result<Reminder, StoreError> {
        let current = self.get_reminder(id, owner)?;
        let updated = patch.apply(&current, updated_at);
        self.conn.execute(
            "UPDATE reminders SET title=?1, amount=?2, due_date=?3, notes=?4, updated_at=?5
             WHERE id=?6 AND user_id=?7",
            params![
                updated.title,
                updated.amount.to_string(),
                fmt_date(updated.due_date),
                updated.notes,
                fmt_timestamp(updated.updated_at),
                id,
                owner,
            ],
        )?;
        Ok(updated)
    }

    fn delete_reminder(&self, id: i64, owner: &str) -> Result<(), StoreError> {
        let n = self.conn.execute(
            "DELETE FROM reminders WHERE id=?1 AND user_id=?2",
            params![id, owner],
        )?;
        if n == 0 {
            return Err(StoreError::NotFound {
                collection: Collection::Reminders,
                id,
            });
        }
        Ok(())
    }
}

pub fn fmt_timestamp(t: NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

pub fn fmt_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

// Rows are read as text first so a bad value can be reported with the
// record it came from.

struct RawTransaction {
    id: i64,
    description: String,
    amount: String,
    kind: String,
    category: String,
    date: String,
    notes: Option<String>,
    created_at: String,
}

impl RawTransaction {
    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(RawTransaction {
            id: r.get(0)?,
            description: r.get(1)?,
            amount: r.get(2)?,
            kind: r.get(3)?,
            category: r.get(4)?,
            date: r.get(5)?,
            notes: r.get(6)?,
            created_at: r.get(7)?,
        })
    }

    fn parse(self) -> Result<Transaction, StoreError> {
        let c = Collection::Transactions;
        Ok(Transaction {
            id: self.id,
            amount: parse_amount(c, self.id, "amount", &self.amount)?,
            kind: self
                .kind
                .parse::<TransactionKind>()
                .map_err(|_| malformed(c, self.id, "type", &self.kind))?,
            date: parse_timestamp(c, self.id, "date", &self.date)?,
            created_at: parse_timestamp(c, self.id, "created_at", &self.created_at)?,
            description: self.description,
            category: self.category,
            notes: self.notes,
        })
    }
}

struct RawGoal {
    id: i64,
    title: String,
    amount: String,
    saved_amount: String,
    target_date: String,
    category: Option<String>,
    notes: Option<String>,
    created_at: String,
}

impl RawGoal {
    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(RawGoal {
            id: r.get(0)?,
            title: r.get(1)?,
            amount: r.get(2)?,
            saved_amount: r.get(3)?,
            target_date: r.get(4)?,
            category: r.get(5)?,
            notes: r.get(6)?,
            created_at: r.get(7)?,
        })
    }

    fn parse(self) -> Result<Goal, StoreError> {
        let c = Collection::Goals;
        Ok(Goal {
            id: self.id,
            amount: parse_amount(c, self.id, "amount", &self.amount)?,
            saved_amount: parse_amount(c, self.id, "saved_amount", &self.saved_amount)?,
            target_date: parse_date(c, self.id, "target_date", &self.target_date)?,
            created_at: parse_timestamp(c, self.id, "created_at", &self.created_at)?,
            title: self.title,
            category: self.category,
            notes: self.notes,
        })
    }
}

struct RawReminder {
    id: i64,
    title: String,
    amount: String,
    due_date: String,
    notes: Option<String>,
    user_id: String,
    created_at: String,
    updated_at: String,
}

impl RawReminder {
    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(RawReminder {
            id: r.get(0)?,
            title: r.get(1)?,
            amount: r.get(2)?,
            due_date: r.get(3)?,
            notes: r.get(4)?,
            user_id: r.get(5)?,
            created_at: r.get(6)?,
            updated_at: r.get(7)?,
        })
    }

    fn parse(self) -> Result<Reminder, StoreError> {
        let c = Collection::Reminders;
        Ok(Reminder {
            id: self.id,
            amount: parse_amount(c, self.id, "amount", &self.amount)?,
            due_date: parse_date(c, self.id, "due_date", &self.due_date)?,
            created_at: parse_timestamp(c, self.id, "created_at", &self.created_at)?,
            updated_at: parse_timestamp(c, self.id, "updated_at", &self.updated_at)?,
            title: self.title,
            notes: self.notes,
            user_id: self.user_id,
        })
    }
}

fn malformed(collection: Collection, id: i64, field: &'static str, value: &str) -> StoreError {
    StoreError::Malformed {
        collection,
        id,
        field,
        value: value.to_string(),
    }
}

fn parse_amount(c: Collection, id: i64, field: &'static str, s: &str) -> Result<Decimal, StoreError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_| malformed(c, id, field, s))
}

fn parse_timestamp(
    c: Collection,
    id: i64,
    field: &'static str,
    s: &str,
) -> Result<NaiveDateTime, StoreError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| {
            NaiveDate::parse_from_str(s, DATE_FORMAT).map(crate::periods::start_of_day)
        })
        .map_err(|_| malformed(c, id, field, s))
}

fn parse_date(c: Collection, id: i64, field: &'static str, s: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| malformed(c, id, field, s))
}
