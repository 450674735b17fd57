//! Test data factories for reducing test setup boilerplate.
//!
//! # Usage
//!
//! ```rust
//! use common::factories::{LegislatorFactory, TermFactory};
//!
//! let senator = LegislatorFactory::new()
//!     .with_name("Cory", "Booker")
//!     .with_term(TermFactory::senate("NJ", SenateClass::Two).senior().build())
//!     .build();
//! ```

mod legislator;
mod term;

pub use legislator::LegislatorFactory;
pub use term::TermFactory;

use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for generating unique test data.
/// Each call to `next_id()` returns a unique value across all tests.
static FACTORY_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Returns a unique ID for generating test data.
/// Thread-safe and guaranteed unique within a test run.
pub fn next_id() -> u64 {
    FACTORY_COUNTER.fetch_add(1, Ordering::SeqCst)
}
