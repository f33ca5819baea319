// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::store::Collection;

/// Input rejected before anything is written to the store.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Please fill all required fields ({0} is missing)")]
    MissingField(&'static str),
    #[error("{field} must be greater than zero (got {value})")]
    NonPositiveAmount { field: &'static str, value: Decimal },
    #[error("{field} is too large (got {value}, maximum {})", crate::models::MAX_AMOUNT)]
    AmountTooLarge { field: &'static str, value: Decimal },
    #[error("{field} cannot be negative")]
    NegativeAmount { field: &'static str },
    #[error("Saved amount cannot exceed target amount ({saved} > {target})")]
    SavedExceedsTarget { saved: Decimal, target: Decimal },
    #[error("Unknown transaction type '{0}', expected income or expense")]
    UnknownKind(String),
    #[error("Nothing to update")]
    EmptyPatch,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("malformed {collection} record {id}: invalid {field} '{value}'")]
    Malformed {
        collection: Collection,
        id: i64,
        field: &'static str,
        value: String,
    },
    #[error("{collection} record {id} not found")]
    NotFound { collection: Collection, id: i64 },
}

/// Failure of a write issued through the ledger. Local state is untouched
/// in both cases.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
