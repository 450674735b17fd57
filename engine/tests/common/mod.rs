//! Common test utilities for integration tests.
//!
//! - [`factories`] - builders for legislators and terms with valid defaults
//! - [`date`] - parse an ISO date literal
//! - [`store_with`] - a temporary record store seeded with collections

#![allow(dead_code)]

pub mod factories;

use chrono::NaiveDate;
use congress_legislators::store::{Collection, Document, RecordStore, Records};
use tempfile::TempDir;

/// Parse `YYYY-MM-DD`. Panics on malformed test input.
pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid test date")
}

/// A record store in a fresh temporary directory. Keep the `TempDir`
/// alive for as long as the store is used.
pub fn empty_store() -> (TempDir, RecordStore) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = RecordStore::new(dir.path());
    (dir, store)
}

/// A temporary store with the given collections saved into it.
pub fn store_with<T: Records>(collections: &[(Collection, &T)]) -> (TempDir, RecordStore) {
    let (dir, store) = empty_store();
    for (collection, records) in collections {
        store
            .save(*collection, &Document::new(*records))
            .expect("seed collection");
    }
    (dir, store)
}
