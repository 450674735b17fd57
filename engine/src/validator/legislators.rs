use std::collections::{BTreeMap, HashSet};

use cl_calendar::{congress_span, Congress, SenateClass};

use super::{ValidationOptions, ValidationReport};
use crate::index::IdentityIndex;
use crate::model::{Legislator, StateRank, Term, TermType};
use crate::store::Collection;

const HOW_VALUES: &[&str] = &["appointment", "special-election", "election"];

/// Longest regular Senate term, in Congresses.
const MAX_SENATE_TERM_CONGRESSES: u32 = 3;

fn is_bioguide(id: &str) -> bool {
    let mut chars = id.chars();
    id.len() == 7
        && chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_digit())
}

pub(super) fn check_legislator(
    report: &mut ValidationReport,
    collection: Collection,
    legislator: &Legislator,
    options: &ValidationOptions,
) {
    let subject = legislator.bioguide();
    let is_current = collection == Collection::LegislatorsCurrent;
    let error = |report: &mut ValidationReport, message: String| {
        report.error(collection, subject, message);
    };

    // ─── Identifiers and name ───

    if !is_bioguide(subject) {
        error(report, format!("bioguide id '{subject}' is not a letter followed by six digits"));
    }
    if legislator.ids.fec.iter().any(|f| f.trim().is_empty()) {
        error(report, "empty fec id".into());
    }
    if legislator.name.first.trim().is_empty() || legislator.name.last.trim().is_empty() {
        error(report, "first and last name are required".into());
    }
    if legislator.name.first_is_initial() && legislator.name.middle.is_none() {
        error(
            report,
            format!("first name '{}' is an initial but no middle name is given", legislator.name.first),
        );
    }

    // ─── Bio ───

    if let (Some(birthday), Some(first)) = (legislator.bio.birthday, legislator.terms.first()) {
        if birthday >= first.start {
            error(report, format!("birthday {birthday} is not before first term start {}", first.start));
        }
    }
    if is_current {
        if options.warn_missing_birthday && legislator.bio.birthday.is_none() {
            report.warning(collection, subject, "missing bio.birthday");
        }
        if legislator.bio.gender.is_none() {
            report.warning(collection, subject, "missing bio.gender");
        }
    }

    for role in &legislator.leadership_roles {
        if let Some(end) = role.end {
            if end <= role.start {
                error(report, format!("leadership role '{}' ends {end} before it starts {}", role.title, role.start));
            }
        }
    }

    // ─── Terms ───

    if legislator.terms.is_empty() {
        error(report, "no terms".into());
        return;
    }
    let last_index = legislator.terms.len() - 1;
    for (i, term) in legislator.terms.iter().enumerate() {
        let is_current_term = is_current && i == last_index;
        for message in check_term(term, is_current_term) {
            error(report, format!("term {}: {message}", i + 1));
        }
        if term.party.is_none() {
            if is_current {
                error(report, format!("term {}: missing party", i + 1));
            } else {
                report.warning(collection, subject, format!("term {}: missing party", i + 1));
            }
        }
        if i > 0 {
            let previous = &legislator.terms[i - 1];
            if term.start < previous.end {
                error(
                    report,
                    format!(
                        "term {} starts {} before the previous term ends {}",
                        i + 1,
                        term.start,
                        previous.end
                    ),
                );
            }
        }
    }

    let Some(last) = legislator.current_term() else {
        return;
    };
    if is_current {
        if last.end <= options.as_of {
            error(report, format!("current term ended {}", last.end));
        }
        if options.warn_missing_url && last.url.is_none() {
            report.warning(collection, subject, "current term has no url");
        }
    } else if last.end > options.as_of {
        report.warning(collection, subject, format!("last term ends {}; should be current", last.end));
    }
}

/// Problems with a single term, independent of its neighbours.
fn check_term(term: &Term, is_current_term: bool) -> Vec<String> {
    let mut problems = Vec::new();

    if term.end <= term.start {
        problems.push(format!("end {} is not after start {}", term.end, term.start));
    }
    if let Some(how) = term.how.as_deref() {
        if !HOW_VALUES.contains(&how) {
            problems.push(format!("invalid how '{how}'"));
        }
    }
    let Some(info) = cl_calendar::state(&term.state) else {
        problems.push(format!("invalid state '{}'", term.state));
        return problems;
    };

    match term.kind {
        TermType::Representative => match term.district {
            None => problems.push("representative term is missing its district".into()),
            Some(district) if is_current_term && !info.house_districts().contains(&district) => {
                problems.push(format!("district {district} is not apportioned in {}", term.state));
            }
            Some(_) => {}
        },
        TermType::Senator => {
            if term.senate_class.is_none() {
                problems.push("senate term is missing its class".into());
            }
            if is_current_term && term.state_rank.is_none() {
                problems.push("current senate term is missing state_rank".into());
            }
        }
    }
    if term.kind == TermType::Representative && term.senate_class.is_some() {
        problems.push("representative term has a senate class".into());
    }
    if term.kind == TermType::Senator && term.district.is_some() {
        problems.push("senate term has a district".into());
    }

    if term.end > term.start {
        match congress_span(term.start, term.end) {
            Ok((first, last)) => {
                let span = last.number() - first.number() + 1;
                let limit = match term.kind {
                    TermType::Representative => info.max_house_term_congresses(),
                    TermType::Senator => MAX_SENATE_TERM_CONGRESSES,
                };
                if span > limit {
                    problems.push(format!(
                        "term date range too long: spans {span} Congresses ({first}-{last})"
                    ));
                }
                if let Some(class) = term.senate_class.filter(|_| term.kind == TermType::Senator) {
                    if let Some(crossed) = crosses_class_election(class, first, last) {
                        problems.push(format!(
                            "senate term crosses the class {class} election opening Congress {crossed}"
                        ));
                    }
                }
            }
            Err(e) => problems.push(e.to_string()),
        }
    }

    problems.extend(check_party_affiliations(term));
    problems
}

/// The first Congress after `first` and up to `last` in which a regular
/// term of `class` begins.
fn crosses_class_election(class: SenateClass, first: Congress, last: Congress) -> Option<Congress> {
    let mut congress = first.next();
    while congress.number() <= last.number() {
        if class.begins_term_in(congress) {
            return Some(congress);
        }
        congress = congress.next();
    }
    None
}

fn check_party_affiliations(term: &Term) -> Vec<String> {
    let mut problems = Vec::new();
    let affiliations = &term.party_affiliations;
    for (i, a) in affiliations.iter().enumerate() {
        if a.start < term.start || a.end > term.end {
            problems.push(format!("party affiliation {} lies outside the term", i + 1));
        }
        if a.end <= a.start {
            problems.push(format!("party affiliation {} ends before it starts", i + 1));
        }
        if i > 0 && affiliations[i - 1].end != a.start {
            problems.push(format!("party affiliation {} does not follow the previous one", i + 1));
        }
    }
    if let Some(last) = affiliations.last() {
        if term.party.as_deref() != Some(last.party.as_str()) {
            problems.push(format!(
                "last party affiliation '{}' differs from term party '{}'",
                last.party,
                term.party.as_deref().unwrap_or("")
            ));
        }
    }
    problems
}

pub(super) fn check_unique_ids(report: &mut ValidationReport, current: &[Legislator], historical: &[Legislator]) {
    let current_ids: HashSet<&str> = current.iter().map(Legislator::bioguide).collect();
    let index = IdentityIndex::build_corpus(current, historical);
    for dup in index.duplicates() {
        let collection = if current_ids.contains(dup.second.as_str()) {
            Collection::LegislatorsCurrent
        } else {
            Collection::LegislatorsHistorical
        };
        report.error(collection, dup.second.clone(), dup.to_string());
    }
}

/// Per state, current senators' ranks must be none, {senior} or
/// {senior, junior}.
pub(super) fn check_senate_ranks(report: &mut ValidationReport, current: &[Legislator]) {
    let mut by_state: BTreeMap<&str, Vec<Option<StateRank>>> = BTreeMap::new();
    for legislator in current {
        if let Some(term) = legislator.current_term().filter(|t| t.kind == TermType::Senator) {
            by_state.entry(term.state.as_str()).or_default().push(term.state_rank);
        }
    }
    for (state, ranks) in by_state {
        let seniors = ranks.iter().filter(|r| **r == Some(StateRank::Senior)).count();
        let juniors = ranks.iter().filter(|r| **r == Some(StateRank::Junior)).count();
        if ranks.len() > 2 {
            report.error(Collection::LegislatorsCurrent, state, format!("{} current senators", ranks.len()));
        }
        if seniors > 1 {
            report.error(Collection::LegislatorsCurrent, state, format!("{seniors} senators with state_rank senior"));
        }
        if juniors > 1 {
            report.error(Collection::LegislatorsCurrent, state, format!("{juniors} senators with state_rank junior"));
        }
        if juniors == 1 && seniors == 0 {
            report.error(Collection::LegislatorsCurrent, state, "junior senator without a senior");
        }
    }
}

/// No two current legislators may hold the same seat.
pub(super) fn check_office_uniqueness(report: &mut ValidationReport, current: &[Legislator]) {
    let mut holders: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for legislator in current {
        if let Some(seat) = legislator.current_term().and_then(Term::seat) {
            holders.entry(seat.to_string()).or_default().push(legislator.bioguide());
        }
    }
    for (seat, bioguides) in holders {
        if bioguides.len() > 1 {
            report.error(
                Collection::LegislatorsCurrent,
                seat.clone(),
                format!("office {seat} is held by {}", bioguides.join(", ")),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Ids, Name, PartyAffiliation};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    fn rep(start: &str, end: &str) -> Term {
        let mut t = Term::new(TermType::Representative, date(start), date(end), "NJ");
        t.district = Some(5);
        t.party = Some("Democrat".into());
        t
    }

    #[test]
    fn bioguide_shape() {
        assert!(is_bioguide("A000370"));
        assert!(!is_bioguide("a000370"));
        assert!(!is_bioguide("A00037"));
        assert!(!is_bioguide("AB00370"));
    }

    #[test]
    fn two_congress_house_term_is_too_long() {
        let problems = check_term(&rep("2023-01-03", "2027-01-03"), false);
        assert!(problems.iter().any(|p| p.starts_with("term date range too long")), "{problems:?}");
        assert!(check_term(&rep("2023-01-03", "2025-01-03"), false).is_empty());
    }

    #[test]
    fn puerto_rico_commissioner_serves_two_congresses() {
        let mut term = rep("2021-01-03", "2025-01-03");
        term.state = "PR".into();
        term.district = Some(0);
        assert!(check_term(&term, true).is_empty());
    }

    #[test]
    fn senate_term_may_not_cross_its_class_election() {
        let mut term = Term::new(TermType::Senator, date("2019-01-03"), date("2025-01-03"), "NJ");
        term.senate_class = Some(SenateClass::One);
        term.party = Some("Democrat".into());
        assert!(check_term(&term, false).is_empty());

        term.senate_class = Some(SenateClass::Two);
        let problems = check_term(&term, false);
        assert!(problems.iter().any(|p| p.contains("crosses the class 2 election")), "{problems:?}");

        term.end = date("2027-01-03");
        term.senate_class = Some(SenateClass::One);
        let problems = check_term(&term, false);
        assert!(problems.iter().any(|p| p.starts_with("term date range too long")));
    }

    #[test]
    fn party_affiliations_must_tile_the_term() {
        let mut term = rep("2023-01-03", "2025-01-03");
        term.party = Some("Independent".into());
        term.party_affiliations = vec![
            PartyAffiliation {
                start: date("2023-01-03"),
                end: date("2024-05-31"),
                party: "Democrat".into(),
            },
            PartyAffiliation {
                start: date("2024-06-01"),
                end: date("2025-01-03"),
                party: "Independent".into(),
            },
        ];
        let problems = check_term(&term, false);
        assert_eq!(problems.len(), 1, "{problems:?}");
        assert!(problems[0].contains("does not follow"));

        term.party_affiliations[1].start = date("2024-05-31");
        term.party = Some("Democrat".into());
        let problems = check_term(&term, false);
        assert_eq!(problems.len(), 1, "{problems:?}");
        assert!(problems[0].contains("differs from term party"));
    }

    #[test]
    fn initial_needs_middle_name() {
        let mut l = Legislator::new(Ids::new("J000001", 1), Name::new("J.", "Doe"));
        l.terms.push(rep("2023-01-03", "2025-01-03"));
        let mut report = ValidationReport::new();
        check_legislator(&mut report, Collection::LegislatorsHistorical, &l, &ValidationOptions::new(date("2025-06-01")));
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].message.contains("initial"));
    }

    #[test]
    fn historical_member_still_serving_is_a_warning() {
        let mut l = Legislator::new(Ids::new("J000001", 1), Name::new("Jo", "Doe"));
        l.terms.push(rep("2023-01-03", "2025-01-03"));
        let mut report = ValidationReport::new();
        check_legislator(&mut report, Collection::LegislatorsHistorical, &l, &ValidationOptions::new(date("2024-06-01")));
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("should be current"));
    }
}
