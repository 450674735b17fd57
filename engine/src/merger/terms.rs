use chrono::NaiveDate;

use super::{CarryForward, MergeError};
use crate::model::{Legislator, StateRank, Term, TermType};

/// Append `term` to `legislator`'s history.
///
/// The new term must start on or after the previous term's end. Fields the
/// new term leaves empty are filled from the previous term according to
/// `carry`: the reelection list when the seat is unchanged, the continuing
/// list when service in the same chamber is unbroken. A senator continuing
/// in the same state keeps the previous term's rank unless the new term
/// sets one.
///
/// # Errors
/// Returns [`MergeError`] if the term is malformed or overlaps the previous one.
pub fn apply_new_term(
    legislator: &Legislator,
    mut term: Term,
    carry: &CarryForward,
) -> Result<Legislator, MergeError> {
    let bioguide = legislator.bioguide();
    check_term(bioguide, &term)?;

    if let Some(previous) = legislator.current_term() {
        if term.start < previous.end {
            return Err(MergeError::TermOverlap {
                bioguide: bioguide.to_string(),
                start: term.start,
                previous_end: previous.end,
            });
        }
        carry_fields(previous, &mut term, carry);
    }

    tracing::debug!(bioguide, kind = %term.kind, start = %term.start, "appending term");
    let mut updated = legislator.clone();
    updated.terms.push(term);
    Ok(updated)
}

fn check_term(bioguide: &str, term: &Term) -> Result<(), MergeError> {
    if term.end <= term.start {
        return Err(MergeError::InvalidRange {
            bioguide: bioguide.to_string(),
            start: term.start,
            end: term.end,
        });
    }
    if cl_calendar::state(&term.state).is_none() {
        return Err(MergeError::UnknownState {
            bioguide: bioguide.to_string(),
            state: term.state.clone(),
        });
    }
    if term.seat().is_none() {
        return Err(MergeError::MissingSeatField {
            bioguide: bioguide.to_string(),
            kind: term.kind,
            field: match term.kind {
                TermType::Representative => "district",
                TermType::Senator => "class",
            },
        });
    }
    Ok(())
}

fn carry_fields(previous: &Term, term: &mut Term, carry: &CarryForward) {
    let same_seat = previous.seat() == term.seat();
    let continuing = previous.kind == term.kind && previous.end == term.start;

    let mut fields = Vec::new();
    if same_seat {
        fields.extend(carry.reelection.iter().copied());
    }
    if continuing {
        fields.extend(carry.continuing.iter().copied());
    }
    for field in fields {
        let slot = term.field_mut(field);
        if slot.is_none() {
            slot.clone_from(previous.field(field));
        }
    }

    if term.kind == TermType::Senator
        && term.state_rank.is_none()
        && continuing
        && previous.state == term.state
    {
        term.state_rank = previous.state_rank;
    }
}

/// Set the end date of the current term, e.g. after a resignation.
///
/// # Errors
/// Returns [`MergeError::NoTerms`] or [`MergeError::InvalidRange`].
pub fn end_current_term(legislator: &Legislator, end: NaiveDate) -> Result<Legislator, MergeError> {
    let mut updated = legislator.clone();
    let term = updated.terms.last_mut().ok_or_else(|| MergeError::NoTerms {
        bioguide: legislator.bioguide().to_string(),
    })?;
    if end <= term.start {
        return Err(MergeError::InvalidRange {
            bioguide: legislator.bioguide().to_string(),
            start: term.start,
            end,
        });
    }
    term.end = end;
    Ok(updated)
}

/// Fix the state rank of a current Senate term.
///
/// # Errors
/// Returns [`MergeError::NoTerms`] or [`MergeError::NotSenator`].
pub fn set_current_state_rank(
    legislator: &Legislator,
    rank: StateRank,
) -> Result<Legislator, MergeError> {
    let mut updated = legislator.clone();
    let term = updated.terms.last_mut().ok_or_else(|| MergeError::NoTerms {
        bioguide: legislator.bioguide().to_string(),
    })?;
    if term.kind != TermType::Senator {
        return Err(MergeError::NotSenator {
            bioguide: legislator.bioguide().to_string(),
        });
    }
    term.state_rank = Some(rank);
    Ok(updated)
}

/// Close the most recent open leadership role titled `title`.
///
/// # Errors
/// Returns [`MergeError::NoOpenLeadershipRole`] when no such role is open,
/// or [`MergeError::InvalidRange`] when `end` does not follow its start.
pub fn end_leadership_role(
    legislator: &Legislator,
    title: &str,
    end: NaiveDate,
) -> Result<Legislator, MergeError> {
    let mut updated = legislator.clone();
    let role = updated
        .leadership_roles
        .iter_mut()
        .rev()
        .find(|r| r.title == title && r.end.is_none())
        .ok_or_else(|| MergeError::NoOpenLeadershipRole {
            bioguide: legislator.bioguide().to_string(),
            title: title.to_string(),
        })?;
    if end <= role.start {
        return Err(MergeError::InvalidRange {
            bioguide: legislator.bioguide().to_string(),
            start: role.start,
            end,
        });
    }
    role.end = Some(end);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chamber, Ids, LeadershipRole, Name};
    use cl_calendar::SenateClass;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    fn rep(start: &str, end: &str, state: &str, district: u32) -> Term {
        let mut t = Term::new(TermType::Representative, date(start), date(end), state);
        t.district = Some(district);
        t.party = Some("Democrat".into());
        t
    }

    fn with_terms(terms: Vec<Term>) -> Legislator {
        let mut l = Legislator::new(Ids::new("A000001", 1), Name::new("Ann", "Able"));
        l.terms = terms;
        l
    }

    #[test]
    fn reelection_carries_declared_fields() {
        let mut first = rep("2021-01-03", "2023-01-03", "OH", 3);
        first.url = Some("https://able.house.gov".into());
        first.office = Some("1 Cannon".into());
        first.fax = Some("202-555-0100".into());
        let legislator = with_terms(vec![first]);

        let updated = apply_new_term(
            &legislator,
            rep("2023-01-03", "2025-01-03", "OH", 3),
            &CarryForward::default(),
        )
        .expect("merge");
        let term = updated.current_term().expect("term");
        assert_eq!(term.url.as_deref(), Some("https://able.house.gov"));
        assert_eq!(term.office.as_deref(), Some("1 Cannon"));
        assert_eq!(term.fax, None, "fax is not declared");
    }

    #[test]
    fn explicit_fields_win_over_carried_ones() {
        let mut first = rep("2021-01-03", "2023-01-03", "OH", 3);
        first.url = Some("https://old.example".into());
        let legislator = with_terms(vec![first]);
        let mut next = rep("2023-01-03", "2025-01-03", "OH", 3);
        next.url = Some("https://new.example".into());

        let updated = apply_new_term(&legislator, next, &CarryForward::default()).expect("merge");
        assert_eq!(
            updated.current_term().and_then(|t| t.url.as_deref()),
            Some("https://new.example")
        );
    }

    #[test]
    fn gap_in_service_carries_only_reelection_fields() {
        let mut first = rep("2019-01-03", "2021-01-03", "OH", 3);
        first.url = Some("https://able.house.gov".into());
        first.phone = Some("202-225-0000".into());
        let legislator = with_terms(vec![first]);

        let updated = apply_new_term(
            &legislator,
            rep("2023-01-03", "2025-01-03", "OH", 3),
            &CarryForward::default(),
        )
        .expect("merge");
        let term = updated.current_term().expect("term");
        assert!(term.url.is_some());
        assert!(term.phone.is_none());
    }

    #[test]
    fn redistricting_carries_continuing_fields_only() {
        let mut first = rep("2021-01-03", "2023-01-03", "OH", 3);
        first.url = Some("https://able.house.gov".into());
        first.phone = Some("202-225-0000".into());
        let legislator = with_terms(vec![first]);

        let updated = apply_new_term(
            &legislator,
            rep("2023-01-03", "2025-01-03", "OH", 4),
            &CarryForward::default(),
        )
        .expect("merge");
        let term = updated.current_term().expect("term");
        assert!(term.url.is_none());
        assert_eq!(term.phone.as_deref(), Some("202-225-0000"));
    }

    #[test]
    fn overlap_is_refused() {
        let legislator = with_terms(vec![rep("2023-01-03", "2025-01-03", "OH", 3)]);
        let err = apply_new_term(
            &legislator,
            rep("2024-06-01", "2025-01-03", "OH", 3),
            &CarryForward::default(),
        )
        .expect_err("overlap");
        assert!(matches!(err, MergeError::TermOverlap { .. }));
        assert!(err.to_string().contains("A000001"));
    }

    #[test]
    fn malformed_terms_are_refused() {
        let legislator = with_terms(vec![]);
        let backwards = rep("2025-01-03", "2023-01-03", "OH", 3);
        assert!(matches!(
            apply_new_term(&legislator, backwards, &CarryForward::none()),
            Err(MergeError::InvalidRange { .. })
        ));

        let no_class = Term::new(TermType::Senator, date("2025-01-03"), date("2031-01-03"), "OH");
        assert!(matches!(
            apply_new_term(&legislator, no_class, &CarryForward::none()),
            Err(MergeError::MissingSeatField { field: "class", .. })
        ));

        let nowhere = rep("2025-01-03", "2027-01-03", "XX", 1);
        assert!(matches!(
            apply_new_term(&legislator, nowhere, &CarryForward::none()),
            Err(MergeError::UnknownState { .. })
        ));
    }

    #[test]
    fn house_to_senate_does_not_carry_rank_or_office() {
        let mut house = rep("2023-01-03", "2025-01-03", "AZ", 3);
        house.office = Some("1 Longworth".into());
        let legislator = with_terms(vec![house]);
        let mut senate = Term::new(TermType::Senator, date("2025-01-03"), date("2031-01-03"), "AZ");
        senate.senate_class = Some(SenateClass::One);

        let updated = apply_new_term(&legislator, senate, &CarryForward::default()).expect("merge");
        let term = updated.current_term().expect("term");
        assert!(term.office.is_none());
        assert!(term.state_rank.is_none());
    }

    #[test]
    fn end_term_and_rank_fixes() {
        let legislator = with_terms(vec![rep("2023-01-03", "2025-01-03", "OH", 3)]);
        let ended = end_current_term(&legislator, date("2024-03-01")).expect("end");
        assert_eq!(ended.terms[0].end, date("2024-03-01"));
        assert!(end_current_term(&legislator, date("2022-01-01")).is_err());
        assert!(matches!(
            set_current_state_rank(&legislator, StateRank::Junior),
            Err(MergeError::NotSenator { .. })
        ));
    }

    #[test]
    fn leadership_roles_close_once() {
        let mut legislator = with_terms(vec![rep("2023-01-03", "2025-01-03", "OH", 3)]);
        legislator.leadership_roles.push(LeadershipRole {
            title: "Minority Whip".into(),
            chamber: Chamber::House,
            start: date("2023-01-03"),
            end: None,
            extra: crate::model::Extra::new(),
        });
        let closed = end_leadership_role(&legislator, "Minority Whip", date("2024-01-03")).expect("close");
        assert_eq!(closed.leadership_roles[0].end, Some(date("2024-01-03")));
        assert!(matches!(
            end_leadership_role(&closed, "Minority Whip", date("2024-06-01")),
            Err(MergeError::NoOpenLeadershipRole { .. })
        ));
    }
}
