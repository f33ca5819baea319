// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analytics;
pub mod cli;
pub mod commands;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod goals;
pub mod history;
pub mod ledger;
pub mod models;
pub mod periods;
pub mod reminders;
pub mod store;
pub mod utils;
pub mod watch;
