//! Read-only lookup tables over a legislator snapshot.
//!
//! An [`IdentityIndex`] borrows the collections it was built from, so the
//! underlying records cannot be mutated while it is alive. Rebuild it after
//! applying merges.

use std::collections::{BTreeMap, HashMap};

use cl_calendar::SenateClass;
use regex::Regex;

use crate::model::{Legislator, StateRank, TermType};
use crate::names::{normalize, wildcard};

/// Which canonical collection an indexed legislator came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Current,
    Historical,
}

/// Two legislators share an identifier value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate {namespace} id '{value}' on {first} and {second}")]
pub struct DuplicateIdError {
    pub namespace: String,
    pub value: String,
    /// Bioguide of the record indexed first.
    pub first: String,
    pub second: String,
}

#[derive(Debug, Clone, Copy)]
struct Entry<'a> {
    legislator: &'a Legislator,
    standing: Standing,
}

/// Lookup tables over one snapshot of the corpus.
#[derive(Debug)]
pub struct IdentityIndex<'a> {
    entries: Vec<Entry<'a>>,
    by_id: HashMap<(String, String), usize>,
    by_house_seat: HashMap<(String, u32), Vec<usize>>,
    by_senate_seat: HashMap<(String, SenateClass), Vec<usize>>,
    by_senate_name: HashMap<(String, String), Vec<usize>>,
    by_last_name: BTreeMap<String, Vec<usize>>,
    duplicates: Vec<DuplicateIdError>,
}

impl<'a> IdentityIndex<'a> {
    /// Index the current collection only.
    #[must_use]
    pub fn build(current: &'a [Legislator]) -> Self {
        Self::build_corpus(current, &[])
    }

    /// Index current and historical legislators together. Seat tables only
    /// ever hold current legislators.
    #[must_use]
    pub fn build_corpus(current: &'a [Legislator], historical: &'a [Legislator]) -> Self {
        let mut index = Self {
            entries: Vec::with_capacity(current.len() + historical.len()),
            by_id: HashMap::new(),
            by_house_seat: HashMap::new(),
            by_senate_seat: HashMap::new(),
            by_senate_name: HashMap::new(),
            by_last_name: BTreeMap::new(),
            duplicates: Vec::new(),
        };
        for legislator in current {
            index.insert(legislator, Standing::Current);
        }
        for legislator in historical {
            index.insert(legislator, Standing::Historical);
        }
        tracing::debug!(
            legislators = index.entries.len(),
            duplicates = index.duplicates.len(),
            "built identity index"
        );
        index
    }

    fn insert(&mut self, legislator: &'a Legislator, standing: Standing) {
        let slot = self.entries.len();
        self.entries.push(Entry {
            legislator,
            standing,
        });

        for (namespace, value) in legislator.ids.entries() {
            match self.by_id.get(&(namespace.clone(), value.clone())) {
                Some(&existing) if existing == slot => {}
                Some(&existing) => self.duplicates.push(DuplicateIdError {
                    namespace,
                    value,
                    first: self.entries[existing].legislator.bioguide().to_string(),
                    second: legislator.bioguide().to_string(),
                }),
                None => {
                    self.by_id.insert((namespace, value), slot);
                }
            }
        }

        let last_names = last_names(legislator);
        for last in &last_names {
            let bucket = self.by_last_name.entry(last.clone()).or_default();
            if !bucket.contains(&slot) {
                bucket.push(slot);
            }
        }

        if standing != Standing::Current {
            return;
        }
        let Some(term) = legislator.current_term() else {
            return;
        };
        match term.kind {
            TermType::Representative => {
                if let Some(district) = term.district {
                    self.by_house_seat
                        .entry((term.state.clone(), district))
                        .or_default()
                        .push(slot);
                }
            }
            TermType::Senator => {
                if let Some(class) = term.senate_class {
                    self.by_senate_seat
                        .entry((term.state.clone(), class))
                        .or_default()
                        .push(slot);
                }
                for last in last_names {
                    let bucket = self
                        .by_senate_name
                        .entry((term.state.clone(), last))
                        .or_default();
                    if !bucket.contains(&slot) {
                        bucket.push(slot);
                    }
                }
            }
        }
    }

    fn resolve(&self, slots: Option<&Vec<usize>>) -> Vec<&'a Legislator> {
        slots
            .map(|slots| slots.iter().map(|&i| self.entries[i].legislator).collect())
            .unwrap_or_default()
    }

    /// Legislator holding `value` in the `namespace` id table.
    #[must_use]
    pub fn by_id(&self, namespace: &str, value: &str) -> Option<&'a Legislator> {
        self.by_id
            .get(&(namespace.to_string(), value.to_string()))
            .map(|&i| self.entries[i].legislator)
    }

    #[must_use]
    pub fn by_bioguide(&self, bioguide: &str) -> Option<&'a Legislator> {
        self.by_id("bioguide", bioguide)
    }

    /// Current representatives whose current term is for `state`-`district`.
    /// More than one entry means the seat is double-booked.
    #[must_use]
    pub fn house_seat(&self, state: &str, district: u32) -> Vec<&'a Legislator> {
        self.resolve(self.by_house_seat.get(&(state.to_string(), district)))
    }

    #[must_use]
    pub fn senate_seat(&self, state: &str, class: SenateClass) -> Vec<&'a Legislator> {
        self.resolve(self.by_senate_seat.get(&(state.to_string(), class)))
    }

    /// Current senators from `state` holding `rank` on their current term.
    #[must_use]
    pub fn senators_by_rank(&self, state: &str, rank: StateRank) -> Vec<&'a Legislator> {
        SenateClass::ALL
            .into_iter()
            .flat_map(|class| self.senate_seat(state, class))
            .filter(|l| l.current_term().and_then(|t| t.state_rank) == Some(rank))
            .collect()
    }

    /// Current senators from `state` whose last name, or any former last
    /// name, folds to the same form as `last`.
    #[must_use]
    pub fn senators_named(&self, state: &str, last: &str) -> Vec<&'a Legislator> {
        self.resolve(self.by_senate_name.get(&(state.to_string(), normalize(last))))
    }

    /// Every indexed legislator answering to `last`, current ones first.
    #[must_use]
    pub fn last_name(&self, last: &str) -> Vec<&'a Legislator> {
        self.resolve(self.by_last_name.get(&normalize(last)))
    }

    /// Legislators whose folded last name matches a `*` wildcard pattern.
    ///
    /// # Errors
    /// Returns the regex error when the pattern does not compile.
    pub fn last_name_wildcard(&self, pattern: &str) -> Result<Vec<&'a Legislator>, regex::Error> {
        let re: Regex = wildcard(pattern)?;
        let mut slots: Vec<usize> = self
            .by_last_name
            .iter()
            .filter(|(name, _)| re.is_match(name))
            .flat_map(|(_, slots)| slots.iter().copied())
            .collect();
        slots.sort_unstable();
        slots.dedup();
        Ok(slots.into_iter().map(|i| self.entries[i].legislator).collect())
    }

    /// Which collection `legislator` was indexed from.
    #[must_use]
    pub fn standing(&self, bioguide: &str) -> Option<Standing> {
        self.by_id
            .get(&("bioguide".to_string(), bioguide.to_string()))
            .map(|&i| self.entries[i].standing)
    }

    /// Identifier collisions found while building, in discovery order.
    #[must_use]
    pub fn duplicates(&self) -> &[DuplicateIdError] {
        &self.duplicates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The folded current last name followed by any distinct former ones.
fn last_names(legislator: &Legislator) -> Vec<String> {
    let mut names = vec![normalize(&legislator.name.last)];
    for other in &legislator.other_names {
        let folded = normalize(&other.last);
        if !names.contains(&folded) {
            names.push(folded);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Ids, Name, OtherName, Term};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    fn legislator(bioguide: &str, govtrack: u32, first: &str, last: &str, term: Term) -> Legislator {
        let mut l = Legislator::new(Ids::new(bioguide, govtrack), Name::new(first, last));
        l.terms.push(term);
        l
    }

    fn rep(state: &str, district: u32) -> Term {
        let mut t = Term::new(TermType::Representative, date("2023-01-03"), date("2025-01-03"), state);
        t.district = Some(district);
        t
    }

    fn sen(state: &str, class: SenateClass) -> Term {
        let mut t = Term::new(TermType::Senator, date("2019-01-03"), date("2025-01-03"), state);
        t.senate_class = Some(class);
        t.state_rank = Some(StateRank::Senior);
        t
    }

    #[test]
    fn lookups_by_id_seat_and_name() {
        let mut menendez = legislator("M000639", 300_072, "Robert", "Menéndez", sen("NJ", SenateClass::One));
        menendez.ids.thomas = Some("00791".into());
        let current = vec![
            menendez,
            legislator("S001203", 412_000, "Mikie", "Sherrill", rep("NJ", 11)),
        ];
        let index = IdentityIndex::build(&current);

        assert_eq!(index.len(), 2);
        assert_eq!(index.by_bioguide("S001203").map(Legislator::bioguide), Some("S001203"));
        assert_eq!(index.by_id("govtrack", "300072").map(Legislator::bioguide), Some("M000639"));
        assert_eq!(index.by_id("thomas", "00791").map(Legislator::bioguide), Some("M000639"));
        assert_eq!(index.house_seat("NJ", 11).len(), 1);
        assert!(index.house_seat("NJ", 5).is_empty());
        assert_eq!(index.senate_seat("NJ", SenateClass::One).len(), 1);
        assert_eq!(index.senators_named("NJ", "MENENDEZ").len(), 1);
        assert_eq!(index.senators_by_rank("NJ", StateRank::Senior).len(), 1);
        assert!(index.senators_by_rank("NJ", StateRank::Junior).is_empty());
        assert_eq!(index.last_name("sherrill").len(), 1);
        assert!(index.duplicates().is_empty());
    }

    #[test]
    fn duplicates_are_collected_not_thrown() {
        let current = vec![
            legislator("A000001", 1, "Ann", "Able", rep("OH", 1)),
            legislator("B000002", 1, "Bob", "Baker", rep("OH", 2)),
        ];
        let historical = vec![legislator("A000001", 3, "Ann", "Able", rep("OH", 1))];
        let index = IdentityIndex::build_corpus(&current, &historical);

        let dups = index.duplicates();
        assert_eq!(dups.len(), 2);
        assert_eq!(dups[0].namespace, "govtrack");
        assert_eq!(dups[0].first, "A000001");
        assert_eq!(dups[0].second, "B000002");
        assert_eq!(dups[1].namespace, "bioguide");
    }

    #[test]
    fn historical_legislators_have_no_seat() {
        let historical = vec![legislator("C000003", 3, "Cal", "Carter", rep("TX", 7))];
        let index = IdentityIndex::build_corpus(&[], &historical);
        assert!(index.house_seat("TX", 7).is_empty());
        assert_eq!(index.last_name("Carter").len(), 1);
        assert_eq!(index.standing("C000003"), Some(Standing::Historical));
    }

    #[test]
    fn other_names_are_indexed() {
        let mut senator = legislator("G000555", 412_223, "Kirsten", "Gillibrand", sen("NY", SenateClass::One));
        senator.other_names.push(OtherName {
            first: None,
            middle: None,
            last: "Rutnik".into(),
            end: None,
            extra: crate::model::Extra::new(),
        });
        let current = vec![senator];
        let index = IdentityIndex::build(&current);
        assert_eq!(index.last_name("Rutnik").len(), 1);
        assert_eq!(index.senators_named("NY", "Rutnik").len(), 1);
    }

    #[test]
    fn wildcard_last_names() {
        let current = vec![
            legislator("M000355", 300_075, "Mitch", "McConnell", sen("KY", SenateClass::Two)),
            legislator("M001190", 412_444, "Markwayne", "Mullin", sen("OK", SenateClass::Two)),
            legislator("J000300", 412_419, "Doug", "Johnson", rep("LA", 4)),
        ];
        let index = IdentityIndex::build(&current);
        let hits = index.last_name_wildcard("Mc*").expect("compile");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].bioguide(), "M000355");
        assert_eq!(index.last_name_wildcard("*son").expect("compile").len(), 1);
        assert_eq!(index.last_name_wildcard("*").expect("compile").len(), 3);
    }
}
