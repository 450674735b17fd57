//! Reconciliation and validation engine for the congress-legislators dataset.
//!
//! The engine loads the canonical YAML collections into typed records
//! ([`store`]), resolves scraped people to canonical legislators
//! ([`index`], [`matcher`]), applies new facts without breaking invariants
//! ([`merger`], [`partition`]) and checks the whole corpus ([`validator`]).

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod committees;
pub mod config;
pub mod corpus;
pub mod index;
pub mod matcher;
pub mod merger;
pub mod model;
pub mod names;
pub mod partition;
pub mod store;
pub mod validator;

pub use corpus::Corpus;
pub use index::IdentityIndex;
pub use matcher::{match_candidate, MatchResult, PartialIdentity};
pub use store::{Collection, Document, RecordStore, StoreError};
pub use validator::{validate, ValidationOptions, ValidationReport};
