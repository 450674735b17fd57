//! Apply matched facts to canonical records.
//!
//! Every operation takes the current record by reference and returns an
//! updated copy, or an error describing why the single mutation was refused.
//! Callers replace the record in their collection and rebuild any index.

mod offices;
mod ranks;
mod sweep;
mod terms;

use chrono::NaiveDate;

use crate::model::{TermField, TermType};

pub use offices::{
    apply_office_fact, office_id_base, recompute_office_ids, remove_office, OfficeError, OfficeFact,
};
pub use ranks::{assign_senate_ranks, continuous_service_start, RankAssignment, RankNote};
pub use sweep::{sweep_offices, sweep_social_media, Swept};
pub use terms::{apply_new_term, end_current_term, end_leadership_role, set_current_state_rank};

/// Declared term fields copied from the preceding term when a new one omits
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarryForward {
    /// Copied when the new term is for the same seat as the previous one.
    pub reelection: Vec<TermField>,
    /// Copied when the new term continues service in the same chamber
    /// without a gap.
    pub continuing: Vec<TermField>,
}

impl Default for CarryForward {
    fn default() -> Self {
        Self {
            reelection: vec![TermField::Url, TermField::RssUrl],
            continuing: vec![TermField::Office, TermField::Phone, TermField::Address],
        }
    }
}

impl CarryForward {
    /// Carry nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            reelection: Vec::new(),
            continuing: Vec::new(),
        }
    }
}

/// A refused term mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    #[error("{bioguide}: new term starting {start} overlaps previous term ending {previous_end}")]
    TermOverlap {
        bioguide: String,
        start: NaiveDate,
        previous_end: NaiveDate,
    },

    #[error("{bioguide}: term end {end} is not after start {start}")]
    InvalidRange {
        bioguide: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("{bioguide}: {kind} term is missing its {field}")]
    MissingSeatField {
        bioguide: String,
        kind: TermType,
        field: &'static str,
    },

    #[error("{bioguide}: unknown state '{state}'")]
    UnknownState { bioguide: String, state: String },

    #[error("{bioguide}: legislator has no terms")]
    NoTerms { bioguide: String },

    #[error("{bioguide}: current term is not a Senate term")]
    NotSenator { bioguide: String },

    #[error("{bioguide}: no open leadership role titled '{title}'")]
    NoOpenLeadershipRole { bioguide: String, title: String },
}
