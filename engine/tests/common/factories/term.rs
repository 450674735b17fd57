//! Term factory.

use chrono::NaiveDate;
use cl_calendar::{Congress, SenateClass};
use congress_legislators::model::{StateRank, Term, TermType};

use crate::common::date;

/// Builder for terms. Defaults produce a term the validator accepts: a
/// House term for the 119th Congress, or a Senate term ending with the
/// next regular election of its class.
pub struct TermFactory {
    term: Term,
}

impl TermFactory {
    /// A representative for the 119th Congress.
    #[must_use]
    pub fn house(state: &str, district: u32) -> Self {
        let mut term = Term::new(TermType::Representative, date("2025-01-03"), date("2027-01-03"), state);
        term.district = Some(district);
        Self::with_defaults(term)
    }

    /// A senator whose term ends with the regular election of `class`
    /// following 2025.
    #[must_use]
    pub fn senate(state: &str, class: SenateClass) -> Self {
        let end = match class {
            SenateClass::One => "2031-01-03",
            SenateClass::Two => "2027-01-03",
            SenateClass::Three => "2029-01-03",
        };
        let start = match class {
            SenateClass::One => "2025-01-03",
            SenateClass::Two => "2021-01-03",
            SenateClass::Three => "2023-01-03",
        };
        let mut term = Term::new(TermType::Senator, date(start), date(end), state);
        term.senate_class = Some(class);
        Self::with_defaults(term)
    }

    fn with_defaults(mut term: Term) -> Self {
        term.party = Some("Democrat".into());
        term.url = Some(format!("https://{}.example.gov", term.state.to_lowercase()));
        Self { term }
    }

    /// Occupy exactly the given Congresses.
    #[must_use]
    pub fn congresses(mut self, first: u32, last: u32) -> Self {
        self.term.start = Congress::new(first).expect("valid congress").start();
        self.term.end = Congress::new(last).expect("valid congress").end();
        self
    }

    #[must_use]
    pub const fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.term.start = start;
        self.term.end = end;
        self
    }

    #[must_use]
    pub const fn senior(mut self) -> Self {
        self.term.state_rank = Some(StateRank::Senior);
        self
    }

    #[must_use]
    pub const fn junior(mut self) -> Self {
        self.term.state_rank = Some(StateRank::Junior);
        self
    }

    #[must_use]
    pub fn party(mut self, party: &str) -> Self {
        self.term.party = Some(party.into());
        self
    }

    #[must_use]
    pub fn url(mut self, url: Option<&str>) -> Self {
        self.term.url = url.map(str::to_string);
        self
    }

    #[must_use]
    pub fn office(mut self, office: &str) -> Self {
        self.term.office = Some(office.into());
        self
    }

    #[must_use]
    pub fn build(self) -> Term {
        self.term
    }
}
