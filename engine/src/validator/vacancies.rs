use std::collections::{HashMap, HashSet};

use cl_calendar::STATES;

use super::Vacancy;
use crate::model::{Chamber, Legislator, TermType};

/// Apportioned seats with no current term, House districts first.
pub(super) fn find_vacancies(current: &[Legislator]) -> Vec<Vacancy> {
    let mut house: HashSet<(&str, u32)> = HashSet::new();
    let mut senators: HashMap<&str, usize> = HashMap::new();
    for term in current.iter().filter_map(Legislator::current_term) {
        match term.kind {
            TermType::Representative => {
                if let Some(district) = term.district {
                    house.insert((term.state.as_str(), district));
                }
            }
            TermType::Senator => *senators.entry(term.state.as_str()).or_default() += 1,
        }
    }

    let mut vacancies = Vec::new();
    for info in STATES {
        for district in info.house_districts() {
            if !house.contains(&(info.code, district)) {
                vacancies.push(Vacancy {
                    chamber: Chamber::House,
                    state: info.code.to_string(),
                    district: Some(district),
                });
            }
        }
    }
    for info in STATES.iter().filter(|s| s.has_senators()) {
        let filled = senators.get(info.code).copied().unwrap_or(0);
        for _ in filled..2 {
            vacancies.push(Vacancy {
                chamber: Chamber::Senate,
                state: info.code.to_string(),
                district: None,
            });
        }
    }
    vacancies
}
