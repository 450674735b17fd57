//! Typed records for the canonical collections.
//!
//! Every record keeps fields it does not model in a trailing `extra` map so a
//! load followed by a save never drops data. Field declaration order is the
//! serialized order of a new record; a loaded record carries its [`Layout`]
//! and is written back in the order it was read.

mod committee;
mod layout;
mod legislator;
mod office;
mod social;
mod term;

use serde::Serialize;

pub use committee::{Committee, CommitteeMember, CommitteeType, Membership, PartySide, Subcommittee};
pub use layout::Layout;
pub use legislator::{
    Bio, Chamber, FamilyRelation, Gender, Ids, LeadershipRole, Legislator, Name, OtherName,
};
pub use office::{DistrictOffice, OfficeEntry, PersonRef};
pub use social::{SocialAccounts, SocialMediaEntry};
pub use term::{PartyAffiliation, Seat, StateRank, Term, TermField, TermType, UnknownTermField};

/// Unmodelled fields carried through a load/save cycle untouched, in file order.
pub type Extra = serde_yaml::Mapping;

/// A top-level entry of a collection file.
pub trait Record: Serialize {
    fn layout(&self) -> &Layout;
    fn set_layout(&mut self, layout: Layout);
}

macro_rules! impl_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Record for $ty {
                fn layout(&self) -> &Layout {
                    &self.layout
                }

                fn set_layout(&mut self, layout: Layout) {
                    self.layout = layout;
                }
            }
        )+
    };
}

impl_record!(Legislator, OfficeEntry, SocialMediaEntry, Committee, CommitteeMember);

/// A record that belongs to one legislator, keyed by bioguide ID.
pub trait PersonRecord {
    fn bioguide(&self) -> &str;
}

impl PersonRecord for Legislator {
    fn bioguide(&self) -> &str {
        &self.ids.bioguide
    }
}

impl PersonRecord for OfficeEntry {
    fn bioguide(&self) -> &str {
        &self.person.bioguide
    }
}

impl PersonRecord for SocialMediaEntry {
    fn bioguide(&self) -> &str {
        &self.person.bioguide
    }
}
