// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Once;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate, NaiveDateTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::periods::start_of_day;
use crate::watch::DEFAULT_CHECK_INTERVAL;

pub const DEFAULT_OWNER: &str = "local";

static TRACING_INIT: Once = Once::new();

/// Installs the stderr subscriber once. `RUST_LOG` wins over `verbosity`.
pub fn init_tracing(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let level = match verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("pocketledger={}", level)));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Accepts `YYYY-MM-DD` (midnight) or `YYYY-MM-DD HH:MM`.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Ok(dt);
    }
    parse_date(s)
        .map(start_of_day)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD [HH:MM]", s))
}

/// Parses a 1-12 month number into the 0-based index the calculators use.
pub fn parse_month(s: &str) -> Result<u32> {
    let m: u32 = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid month '{}', expected 1-12", s))?;
    if !(1..=12).contains(&m) {
        return Err(anyhow!("Invalid month '{}', expected 1-12", s));
    }
    Ok(m - 1)
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("${}", fmt_decimal(d, 2))
}

/// Rounds half away from zero to `dp` places and pads to exactly `dp`.
pub fn fmt_decimal(d: &Decimal, dp: u32) -> String {
    let rounded = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

pub fn fmt_percent(d: &Decimal, dp: u32) -> String {
    format!("{}%", fmt_decimal(d, dp))
}

pub fn non_empty(s: Option<&String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Owner id stamped on reminders and used to select them.
pub fn get_owner_id(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "owner_id")?.unwrap_or_else(|| DEFAULT_OWNER.to_string()))
}

pub fn set_owner_id(conn: &Connection, owner: &str) -> Result<()> {
    if owner.trim().is_empty() {
        return Err(anyhow!("Owner id cannot be empty"));
    }
    set_setting(conn, "owner_id", owner.trim())
}

pub fn get_reminder_interval(conn: &Connection) -> Result<Duration> {
    match get_setting(conn, "reminder_check_secs")? {
        Some(s) => {
            let secs: u64 = s
                .parse()
                .with_context(|| format!("Invalid reminder_check_secs '{}'", s))?;
            if secs == 0 {
                return Err(anyhow!("Invalid reminder_check_secs '0', expected at least 1"));
            }
            Ok(Duration::from_secs(secs))
        }
        None => Ok(DEFAULT_CHECK_INTERVAL),
    }
}

pub fn set_reminder_interval(conn: &Connection, secs: u64) -> Result<()> {
    if secs == 0 {
        return Err(anyhow!("Reminder check interval must be at least one second"));
    }
    set_setting(conn, "reminder_check_secs", &secs.to_string())
}
