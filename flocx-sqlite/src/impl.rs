//! Repository trait implementations for the SQLite database.
//!
//! Reads go through the reader pool and writes through the writer pool. When a
//! write has to check ownership first, the check and the write share one
//! transaction; returning early without committing rolls it back.

use crate::Db;
use flocx_core::ports::Repository;

mod bid;
mod contract;
mod offer;
mod relationship;

impl Repository for Db {
    type Error = sqlx::Error;
}

/// True if the store refused a write because of a unique index.
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|error| error.is_unique_violation())
}
