//! Candidate matching against a realistic small corpus.

mod common;

use cl_calendar::SenateClass;
use common::factories::{LegislatorFactory, TermFactory};
use congress_legislators::matcher::MatchStrategy;
use congress_legislators::model::{Legislator, StateRank, TermType};
use congress_legislators::{match_candidate, IdentityIndex, MatchResult, PartialIdentity};
use proptest::prelude::*;

fn corpus() -> (Vec<Legislator>, Vec<Legislator>) {
    let current = vec![
        LegislatorFactory::new()
            .with_bioguide("H001076")
            .with_name("Margaret", "Hassan")
            .with_nickname("Maggie")
            .with_term(TermFactory::senate("NH", SenateClass::Three).senior().build())
            .build(),
        LegislatorFactory::new()
            .with_bioguide("S000185")
            .with_name("Robert", "Scott")
            .with_middle("C.")
            .with_nickname("Bobby")
            .with_term(TermFactory::house("VA", 3).build())
            .build(),
        LegislatorFactory::new()
            .with_bioguide("S001217")
            .with_name("Rick", "Scott")
            .with_term(TermFactory::senate("FL", SenateClass::One).junior().build())
            .build(),
        LegislatorFactory::new()
            .with_bioguide("S001184")
            .with_name("Tim", "Scott")
            .with_term(TermFactory::senate("SC", SenateClass::Three).junior().build())
            .build(),
        LegislatorFactory::new()
            .with_bioguide("C001070")
            .with_name("Robert", "Casey")
            .with_suffix("Jr.")
            .with_term(TermFactory::senate("PA", SenateClass::One).senior().build())
            .build(),
    ];
    let historical = vec![LegislatorFactory::new()
        .with_bioguide("S000522")
        .with_name("Christopher", "Smith")
        .with_term(TermFactory::house("NJ", 4).congresses(117, 117).build())
        .build()];
    (current, historical)
}

#[test]
fn nickname_in_last_first_order_resolves() {
    let (current, historical) = corpus();
    let index = IdentityIndex::build_corpus(&current, &historical);

    let result = match_candidate(&PartialIdentity::parse_name("Hassan, Maggie"), &index);
    match result {
        MatchResult::Unique {
            legislator,
            strategy,
            swapped,
        } => {
            assert_eq!(legislator.bioguide(), "H001076");
            assert_eq!(strategy, MatchStrategy::Nickname);
            assert!(!swapped);
        }
        other => panic!("expected unique match, got {other}"),
    }
}

#[test]
fn unknown_bioguide_is_not_found() {
    let (current, historical) = corpus();
    let index = IdentityIndex::build_corpus(&current, &historical);

    let candidate = PartialIdentity::parse_name("Maggie Hassan").with_bioguide("Q999999");
    assert_eq!(match_candidate(&candidate, &index), MatchResult::NotFound);
}

#[test]
fn identifier_wins_over_name() {
    let (current, historical) = corpus();
    let index = IdentityIndex::build_corpus(&current, &historical);

    let candidate = PartialIdentity::parse_name("Somebody Else").with_bioguide("S000522");
    let found = match_candidate(&candidate, &index).unique().map(Legislator::bioguide);
    assert_eq!(found, Some("S000522"));
}

#[test]
fn shared_last_name_needs_context() {
    let (current, historical) = corpus();
    let index = IdentityIndex::build_corpus(&current, &historical);

    let bare = PartialIdentity::parse_name("Scott");
    assert!(matches!(match_candidate(&bare, &index), MatchResult::Ambiguous(ref c) if c.len() == 3));

    let in_florida = PartialIdentity::parse_name("Scott")
        .with_state("FL")
        .with_chamber(TermType::Senator);
    let found = match_candidate(&in_florida, &index).unique().map(Legislator::bioguide);
    assert_eq!(found, Some("S001217"));
}

#[test]
fn office_lookup_by_rank() {
    let (current, historical) = corpus();
    let index = IdentityIndex::build_corpus(&current, &historical);

    let candidate = PartialIdentity::parse_name("Tim Scott")
        .with_state("SC")
        .with_state_rank(StateRank::Junior);
    match match_candidate(&candidate, &index) {
        MatchResult::Unique { legislator, strategy, .. } => {
            assert_eq!(legislator.bioguide(), "S001184");
            assert_eq!(strategy, MatchStrategy::Office);
        }
        other => panic!("expected office match, got {other}"),
    }
}

#[test]
fn diminutive_and_swapped_names() {
    let (current, historical) = corpus();
    let index = IdentityIndex::build_corpus(&current, &historical);

    let bob = PartialIdentity::parse_name("Bob Casey").with_state("PA");
    match match_candidate(&bob, &index) {
        MatchResult::Unique { legislator, strategy, .. } => {
            assert_eq!(legislator.bioguide(), "C001070");
            assert_eq!(strategy, MatchStrategy::Diminutive);
        }
        other => panic!("expected diminutive match, got {other}"),
    }

    let swapped = PartialIdentity {
        first: Some("Hassan".into()),
        last: Some("Margaret".into()),
        ..PartialIdentity::default()
    };
    match match_candidate(&swapped, &index) {
        MatchResult::Unique { legislator, swapped, .. } => {
            assert_eq!(legislator.bioguide(), "H001076");
            assert!(swapped);
        }
        other => panic!("expected swapped match, got {other}"),
    }
}

#[test]
fn historical_members_match_by_name() {
    let (current, historical) = corpus();
    let index = IdentityIndex::build_corpus(&current, &historical);

    let chris = PartialIdentity::parse_name("Chris Smith").with_state("NJ");
    let found = match_candidate(&chris, &index).unique().map(Legislator::bioguide);
    assert_eq!(found, Some("S000522"));
}

const NAMES: &[&str] = &[
    "Hassan, Maggie",
    "Scott",
    "Robert \"Bobby\" Scott",
    "Rick Scott",
    "Tim Scott",
    "Bob Casey",
    "Casey, Robert P., Jr.",
    "Chris Smith",
    "Margaret Hassan",
    "Nobody Inparticular",
];

const STATES: &[&str] = &["NH", "VA", "FL", "SC", "PA", "NJ"];

proptest! {
    #[test]
    fn matching_is_deterministic(
        name in prop::sample::select(NAMES),
        state in prop::option::of(prop::sample::select(STATES)),
        senate in any::<bool>(),
    ) {
        let (current, historical) = corpus();
        let index = IdentityIndex::build_corpus(&current, &historical);
        let mut candidate = PartialIdentity::parse_name(name);
        if let Some(state) = state {
            candidate = candidate.with_state(state);
        }
        if senate {
            candidate = candidate.with_chamber(TermType::Senator);
        }

        let first = match_candidate(&candidate, &index);
        let rebuilt = IdentityIndex::build_corpus(&current, &historical);
        let second = match_candidate(&candidate, &rebuilt);
        prop_assert_eq!(first.class(), second.class());
        prop_assert_eq!(
            first.unique().map(Legislator::bioguide),
            second.unique().map(Legislator::bioguide)
        );
    }
}
