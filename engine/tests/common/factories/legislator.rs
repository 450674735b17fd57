//! Legislator factory.

use chrono::NaiveDate;
use congress_legislators::model::{Gender, Ids, Legislator, Name, Term};

use super::next_id;
use crate::common::date;

/// Builder for legislators with unique identifiers and a complete bio.
///
/// # Examples
///
/// ```rust
/// let rep = LegislatorFactory::new()
///     .with_name("Alma", "Adams")
///     .with_term(TermFactory::house("NC", 12).build())
///     .build();
/// ```
pub struct LegislatorFactory {
    bioguide: Option<String>,
    govtrack: Option<u32>,
    name: Name,
    birthday: Option<NaiveDate>,
    gender: Option<Gender>,
    terms: Vec<Term>,
}

impl LegislatorFactory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bioguide: None,
            govtrack: None,
            name: Name::new("Pat", "Doe"),
            birthday: Some(date("1960-01-01")),
            gender: Some(Gender::F),
            terms: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_bioguide(mut self, bioguide: &str) -> Self {
        self.bioguide = Some(bioguide.to_string());
        self
    }

    #[must_use]
    pub const fn with_govtrack(mut self, govtrack: u32) -> Self {
        self.govtrack = Some(govtrack);
        self
    }

    #[must_use]
    pub fn with_name(mut self, first: &str, last: &str) -> Self {
        self.name.first = first.to_string();
        self.name.last = last.to_string();
        self
    }

    #[must_use]
    pub fn with_middle(mut self, middle: &str) -> Self {
        self.name.middle = Some(middle.to_string());
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.name.suffix = Some(suffix.to_string());
        self
    }

    #[must_use]
    pub fn with_nickname(mut self, nickname: &str) -> Self {
        self.name.nickname = Some(nickname.to_string());
        self
    }

    #[must_use]
    pub const fn without_bio(mut self) -> Self {
        self.birthday = None;
        self.gender = None;
        self
    }

    #[must_use]
    pub fn with_term(mut self, term: Term) -> Self {
        self.terms.push(term);
        self
    }

    #[must_use]
    pub fn build(self) -> Legislator {
        let id = next_id();
        let bioguide = self.bioguide.unwrap_or_else(|| format!("T{:06}", id % 1_000_000));
        #[allow(clippy::cast_possible_truncation)]
        let govtrack = self.govtrack.unwrap_or(400_000 + id as u32);
        let mut legislator = Legislator::new(Ids::new(bioguide, govtrack), self.name);
        legislator.bio.birthday = self.birthday;
        legislator.bio.gender = self.gender;
        legislator.terms = self.terms;
        legislator
    }
}

impl Default for LegislatorFactory {
    fn default() -> Self {
        Self::new()
    }
}
