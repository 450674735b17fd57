use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Legislator, StateRank, TermType};

/// A rank decision that was heuristic or impossible and needs a human look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankNote {
    pub state: String,
    pub bioguide: String,
    pub message: String,
}

impl std::fmt::Display for RankNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.state, self.bioguide, self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankAssignment {
    pub legislators: Vec<Legislator>,
    pub notes: Vec<RankNote>,
}

/// Start of the unbroken run of Senate terms for the same state ending with
/// the current term. `None` unless the current term is a Senate term.
#[must_use]
pub fn continuous_service_start(legislator: &Legislator) -> Option<NaiveDate> {
    let mut terms = legislator.terms.iter().rev();
    let current = terms.next().filter(|t| t.kind == TermType::Senator)?;
    let mut start = current.start;
    for earlier in terms {
        if earlier.kind != TermType::Senator || earlier.state != current.state || earlier.end != start {
            break;
        }
        start = earlier.start;
    }
    Some(start)
}

/// Fill in missing state ranks on current Senate terms, state by state.
///
/// Ranks already set are kept. A state left with only a junior senator has
/// that senator promoted. Unranked senators are then ordered by the start
/// of their continuous service (bioguide breaks ties) and take senior, then
/// junior, whichever is free. Promotions, ties, collisions and surplus
/// senators are reported as notes rather than resolved silently.
#[must_use]
pub fn assign_senate_ranks(legislators: &[Legislator]) -> RankAssignment {
    let mut out = legislators.to_vec();
    let mut notes = Vec::new();

    let mut by_state: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (i, legislator) in out.iter().enumerate() {
        if let Some(term) = legislator.current_term().filter(|t| t.kind == TermType::Senator) {
            by_state.entry(term.state.clone()).or_default().push(i);
        }
    }

    for (state, members) in by_state {
        let mut note = |legislator: &Legislator, message: String| {
            notes.push(RankNote {
                state: state.clone(),
                bioguide: legislator.bioguide().to_string(),
                message,
            });
        };

        if members.len() > 2 {
            for &i in &members {
                note(&out[i], format!("{} senators serving at once", members.len()));
            }
        }

        let rank_of = |i: usize| out[i].current_term().and_then(|t| t.state_rank);
        let seniors: Vec<usize> = members
            .iter()
            .copied()
            .filter(|&i| rank_of(i) == Some(StateRank::Senior))
            .collect();
        let juniors: Vec<usize> = members
            .iter()
            .copied()
            .filter(|&i| rank_of(i) == Some(StateRank::Junior))
            .collect();
        let mut unranked: Vec<(NaiveDate, String, usize)> = members
            .iter()
            .copied()
            .filter(|&i| rank_of(i).is_none())
            .filter_map(|i| {
                continuous_service_start(&out[i]).map(|d| (d, out[i].bioguide().to_string(), i))
            })
            .collect();

        if seniors.len() > 1 || juniors.len() > 1 {
            for &i in seniors.iter().skip(1).chain(juniors.iter().skip(1)) {
                note(&out[i], "shares its rank with another senator; left unchanged".into());
            }
            continue;
        }

        let mut has_senior = !seniors.is_empty();
        let mut has_junior = !juniors.is_empty();
        if let (false, Some(&i)) = (has_senior, juniors.first()) {
            set_rank(&mut out[i], StateRank::Senior);
            note(&out[i], "promoted from junior to senior".into());
            has_senior = true;
            has_junior = false;
        }

        unranked.sort();
        for pair in unranked.windows(2) {
            if pair[0].0 == pair[1].0 {
                note(
                    &out[pair[1].2],
                    format!("began service on {} alongside {}; ordered by bioguide", pair[1].0, pair[0].1),
                );
            }
        }

        for (_, _, i) in unranked {
            let rank = if !has_senior {
                has_senior = true;
                StateRank::Senior
            } else if !has_junior {
                has_junior = true;
                StateRank::Junior
            } else {
                note(&out[i], "no rank left to assign".into());
                continue;
            };
            set_rank(&mut out[i], rank);
            tracing::debug!(state = %state, bioguide = out[i].bioguide(), %rank, "assigned state rank");
        }
    }

    RankAssignment {
        legislators: out,
        notes,
    }
}

fn set_rank(legislator: &mut Legislator, rank: StateRank) {
    if let Some(term) = legislator.terms.last_mut() {
        term.state_rank = Some(rank);
    }
}
