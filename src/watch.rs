// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Background re-check of reminders due today. Reminders do not change while
//! a view is open but "today" does, so the check reruns on an interval until
//! the watch is stopped or dropped.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::Reminder;
use crate::reminders::{DueNotice, due_today};

pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(86_400);

pub struct DueReminderWatch {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl DueReminderWatch {
    /// Runs one check immediately, then one per `interval`. `today` is asked
    /// for the current date on every check; `notify` only hears about checks
    /// that found something due.
    pub fn spawn<C, N>(
        reminders: Vec<Reminder>,
        interval: Duration,
        today: C,
        mut notify: N,
    ) -> std::io::Result<Self>
    where
        C: Fn() -> NaiveDate + Send + 'static,
        N: FnMut(&[DueNotice]) + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("due-reminders".into())
            .spawn(move || {
                loop {
                    let date = today();
                    let notices = due_today(&reminders, date);
                    debug!(%date, due = notices.len(), "checked reminders");
                    if !notices.is_empty() {
                        notify(&notices);
                    }
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;
        Ok(DueReminderWatch {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancels the pending check and waits for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("due reminder watch panicked");
            }
        }
    }
}

impl Drop for DueReminderWatch {
    fn drop(&mut self) {
        self.shutdown();
    }
}
