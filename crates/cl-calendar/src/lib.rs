//! Reference calendar and apportionment data for congress-legislators
//!
//! This crate holds the static facts every other tool leans on: how dates
//! map to Congress numbers, which Congress opens each Senate class's
//! six-year cycle, and which states and territories send members to the
//! House and Senate.

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

mod congress;
pub use congress::{congress_span, Congress, SenateClass, FIRST_CONGRESS_YEAR};

mod states;
pub use states::{state, Jurisdiction, StateInfo, STATES, VOTING_HOUSE_SEATS};

/// Errors from calendar lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("{0} is before the First Congress convened")]
    BeforeFirstCongress(chrono::NaiveDate),
    #[error("invalid Congress number {0}")]
    InvalidCongress(u32),
    #[error("invalid Senate class {0} (expected 1, 2 or 3)")]
    InvalidSenateClass(u8),
}
