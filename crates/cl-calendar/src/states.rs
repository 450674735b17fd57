//! States, territories and House apportionment.
//!
//! Seat counts follow the 2020 census apportionment (118th Congress onward).

/// Number of voting House seats.
pub const VOTING_HOUSE_SEATS: u32 = 435;

/// How a jurisdiction is represented in Congress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jurisdiction {
    /// Two senators and one or more voting representatives.
    State,
    /// A single non-voting delegate or resident commissioner.
    Territory,
    /// No longer represented (pre-statehood territories, the Philippines).
    Historical,
}

/// Static facts about a state or territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub jurisdiction: Jurisdiction,
    /// Currently apportioned House seats (delegates count as one).
    pub house_seats: u32,
}

impl StateInfo {
    const fn state(code: &'static str, name: &'static str, house_seats: u32) -> Self {
        Self {
            code,
            name,
            jurisdiction: Jurisdiction::State,
            house_seats,
        }
    }

    const fn territory(code: &'static str, name: &'static str) -> Self {
        Self {
            code,
            name,
            jurisdiction: Jurisdiction::Territory,
            house_seats: 1,
        }
    }

    const fn historical(code: &'static str, name: &'static str) -> Self {
        Self {
            code,
            name,
            jurisdiction: Jurisdiction::Historical,
            house_seats: 0,
        }
    }

    #[must_use]
    pub fn has_senators(&self) -> bool {
        self.jurisdiction == Jurisdiction::State
    }

    /// District numbers currently apportioned; a single seat is at-large (district 0).
    #[must_use]
    pub fn house_districts(&self) -> Vec<u32> {
        match self.house_seats {
            0 => Vec::new(),
            1 => vec![0],
            n => (1..=n).collect(),
        }
    }

    /// Longest House term for this jurisdiction, in Congresses.
    ///
    /// Puerto Rico's resident commissioner serves four years; the Philippine
    /// commissioners served three-year terms.
    #[must_use]
    pub fn max_house_term_congresses(&self) -> u32 {
        match self.code {
            "PR" | "PI" => 2,
            _ => 1,
        }
    }
}

pub static STATES: &[StateInfo] = &[
    StateInfo::state("AL", "Alabama", 7),
    StateInfo::state("AK", "Alaska", 1),
    StateInfo::state("AZ", "Arizona", 9),
    StateInfo::state("AR", "Arkansas", 4),
    StateInfo::state("CA", "California", 52),
    StateInfo::state("CO", "Colorado", 8),
    StateInfo::state("CT", "Connecticut", 5),
    StateInfo::state("DE", "Delaware", 1),
    StateInfo::state("FL", "Florida", 28),
    StateInfo::state("GA", "Georgia", 14),
    StateInfo::state("HI", "Hawaii", 2),
    StateInfo::state("ID", "Idaho", 2),
    StateInfo::state("IL", "Illinois", 17),
    StateInfo::state("IN", "Indiana", 9),
    StateInfo::state("IA", "Iowa", 4),
    StateInfo::state("KS", "Kansas", 4),
    StateInfo::state("KY", "Kentucky", 6),
    StateInfo::state("LA", "Louisiana", 6),
    StateInfo::state("ME", "Maine", 2),
    StateInfo::state("MD", "Maryland", 8),
    StateInfo::state("MA", "Massachusetts", 9),
    StateInfo::state("MI", "Michigan", 13),
    StateInfo::state("MN", "Minnesota", 8),
    StateInfo::state("MS", "Mississippi", 4),
    StateInfo::state("MO", "Missouri", 8),
    StateInfo::state("MT", "Montana", 2),
    StateInfo::state("NE", "Nebraska", 3),
    StateInfo::state("NV", "Nevada", 4),
    StateInfo::state("NH", "New Hampshire", 2),
    StateInfo::state("NJ", "New Jersey", 12),
    StateInfo::state("NM", "New Mexico", 3),
    StateInfo::state("NY", "New York", 26),
    StateInfo::state("NC", "North Carolina", 14),
    StateInfo::state("ND", "North Dakota", 1),
    StateInfo::state("OH", "Ohio", 15),
    StateInfo::state("OK", "Oklahoma", 5),
    StateInfo::state("OR", "Oregon", 6),
    StateInfo::state("PA", "Pennsylvania", 17),
    StateInfo::state("RI", "Rhode Island", 2),
    StateInfo::state("SC", "South Carolina", 7),
    StateInfo::state("SD", "South Dakota", 1),
    StateInfo::state("TN", "Tennessee", 9),
    StateInfo::state("TX", "Texas", 38),
    StateInfo::state("UT", "Utah", 4),
    StateInfo::state("VT", "Vermont", 1),
    StateInfo::state("VA", "Virginia", 11),
    StateInfo::state("WA", "Washington", 10),
    StateInfo::state("WV", "West Virginia", 2),
    StateInfo::state("WI", "Wisconsin", 8),
    StateInfo::state("WY", "Wyoming", 1),
    StateInfo::territory("DC", "District of Columbia"),
    StateInfo::territory("PR", "Puerto Rico"),
    StateInfo::territory("GU", "Guam"),
    StateInfo::territory("VI", "Virgin Islands"),
    StateInfo::territory("AS", "American Samoa"),
    StateInfo::territory("MP", "Northern Mariana Islands"),
    StateInfo::historical("DK", "Dakota Territory"),
    StateInfo::historical("OL", "Territory of Orleans"),
    StateInfo::historical("PI", "Philippines Territory/Commonwealth"),
];

/// Look up a two-letter state or territory code.
#[must_use]
pub fn state(code: &str) -> Option<&'static StateInfo> {
    STATES.iter().find(|s| s.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voting_seats_total_435() {
        let total: u32 = STATES
            .iter()
            .filter(|s| s.jurisdiction == Jurisdiction::State)
            .map(|s| s.house_seats)
            .sum();
        assert_eq!(total, VOTING_HOUSE_SEATS);
    }

    #[test]
    fn fifty_states_with_senators() {
        assert_eq!(STATES.iter().filter(|s| s.has_senators()).count(), 50);
    }

    #[test]
    fn at_large_states_use_district_zero() {
        let wy = state("WY").expect("known");
        assert_eq!(wy.house_districts(), vec![0]);
        let dc = state("DC").expect("known");
        assert_eq!(dc.house_districts(), vec![0]);
        assert!(!dc.has_senators());
    }

    #[test]
    fn multi_district_states_start_at_one() {
        let nj = state("NJ").expect("known");
        assert_eq!(nj.house_districts().first(), Some(&1));
        assert_eq!(nj.house_districts().len(), 12);
    }

    #[test]
    fn historical_codes_are_known_but_unapportioned() {
        let dk = state("DK").expect("known");
        assert!(dk.house_districts().is_empty());
        assert!(state("ZZ").is_none());
    }

    #[test]
    fn puerto_rico_serves_two_congresses() {
        assert_eq!(state("PR").expect("known").max_house_term_congresses(), 2);
        assert_eq!(state("GU").expect("known").max_house_term_congresses(), 1);
    }
}
