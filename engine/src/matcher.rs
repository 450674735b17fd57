//! Resolve a scraped, partially identified person to a canonical legislator.
//!
//! Strategies run in priority order: identifiers, office held, exact name,
//! disambiguation of same-named people, nickname, diminutive. When nothing
//! matches, the whole procedure is retried once with first and last name
//! swapped. `Ambiguous` is final; the matcher never picks between equally
//! good candidates.

use std::fmt;

use cl_calendar::SenateClass;

use crate::index::IdentityIndex;
use crate::model::{Legislator, StateRank, TermType};
use crate::names::{name_variants, normalize, parse_name};

/// Whatever a source knows about a person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialIdentity {
    pub bioguide: Option<String>,
    pub govtrack: Option<u32>,
    pub thomas: Option<String>,
    pub first: Option<String>,
    pub middle: Option<String>,
    pub last: Option<String>,
    pub suffix: Option<String>,
    pub nickname: Option<String>,
    pub state: Option<String>,
    pub district: Option<u32>,
    pub senate_class: Option<SenateClass>,
    pub state_rank: Option<StateRank>,
    pub chamber: Option<TermType>,
}

impl PartialIdentity {
    /// Split a raw name such as `"Hassan, Maggie"` or
    /// `"Robert \"Bobby\" Scott"` into its parts.
    #[must_use]
    pub fn parse_name(raw: &str) -> Self {
        let parsed = parse_name(raw);
        Self {
            first: parsed.first,
            middle: parsed.middle,
            last: parsed.last,
            suffix: parsed.suffix,
            nickname: parsed.nickname,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_bioguide(mut self, bioguide: impl Into<String>) -> Self {
        self.bioguide = Some(bioguide.into());
        self
    }

    #[must_use]
    pub const fn with_govtrack(mut self, govtrack: u32) -> Self {
        self.govtrack = Some(govtrack);
        self
    }

    #[must_use]
    pub fn with_thomas(mut self, thomas: impl Into<String>) -> Self {
        self.thomas = Some(thomas.into());
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Set the House district; implies the House.
    #[must_use]
    pub const fn with_district(mut self, district: u32) -> Self {
        self.district = Some(district);
        self.chamber = Some(TermType::Representative);
        self
    }

    /// Set the Senate class; implies the Senate.
    #[must_use]
    pub const fn with_senate_class(mut self, class: SenateClass) -> Self {
        self.senate_class = Some(class);
        self.chamber = Some(TermType::Senator);
        self
    }

    /// Set the state rank; implies the Senate.
    #[must_use]
    pub const fn with_state_rank(mut self, rank: StateRank) -> Self {
        self.state_rank = Some(rank);
        self.chamber = Some(TermType::Senator);
        self
    }

    #[must_use]
    pub const fn with_chamber(mut self, chamber: TermType) -> Self {
        self.chamber = Some(chamber);
        self
    }

    const fn has_ids(&self) -> bool {
        self.bioguide.is_some() || self.govtrack.is_some() || self.thomas.is_some()
    }

    /// The same candidate with first and last name exchanged.
    fn swapped(&self) -> Option<Self> {
        let (Some(first), Some(last)) = (&self.first, &self.last) else {
            return None;
        };
        Some(Self {
            first: Some(last.clone()),
            last: Some(first.clone()),
            ..self.clone()
        })
    }
}

impl fmt::Display for PartialIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(b) = &self.bioguide {
            parts.push(format!("bioguide={b}"));
        }
        if let Some(g) = self.govtrack {
            parts.push(format!("govtrack={g}"));
        }
        if let Some(t) = &self.thomas {
            parts.push(format!("thomas={t}"));
        }
        let name: Vec<&str> = [&self.first, &self.middle, &self.last, &self.suffix]
            .into_iter()
            .filter_map(Option::as_deref)
            .collect();
        if !name.is_empty() {
            parts.push(format!("name=\"{}\"", name.join(" ")));
        }
        if let Some(n) = &self.nickname {
            parts.push(format!("nickname={n}"));
        }
        match (&self.state, self.district, self.senate_class) {
            (Some(s), Some(d), _) => parts.push(format!("seat={s}-{d}")),
            (Some(s), None, Some(c)) => parts.push(format!("seat={s} class {c}")),
            (Some(s), None, None) => parts.push(format!("state={s}")),
            _ => {}
        }
        f.write_str(&parts.join(" "))
    }
}

/// The strategy that produced a unique match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    Id,
    Office,
    Name,
    Suffix,
    MiddleName,
    NoMiddleName,
    SoleLastName,
    Nickname,
    Diminutive,
}

impl MatchStrategy {
    /// Everything beyond an identifier match is probabilistic and gets
    /// logged for manual review.
    #[must_use]
    pub const fn needs_audit(self) -> bool {
        !matches!(self, Self::Id)
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Id => "id",
            Self::Office => "office",
            Self::Name => "name",
            Self::Suffix => "suffix",
            Self::MiddleName => "middle name",
            Self::NoMiddleName => "no middle name",
            Self::SoleLastName => "sole last name",
            Self::Nickname => "nickname",
            Self::Diminutive => "diminutive",
        })
    }
}

/// Outcome of [`match_candidate`].
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult<'a> {
    Unique {
        legislator: &'a Legislator,
        strategy: MatchStrategy,
        /// The candidate's first and last names had to be exchanged.
        swapped: bool,
    },
    Ambiguous(Vec<&'a Legislator>),
    NotFound,
}

impl<'a> MatchResult<'a> {
    #[must_use]
    pub const fn unique(&self) -> Option<&'a Legislator> {
        match self {
            Self::Unique { legislator, .. } => Some(*legislator),
            _ => None,
        }
    }

    /// Result class name: "unique", "ambiguous" or "not found".
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Unique { .. } => "unique",
            Self::Ambiguous(_) => "ambiguous",
            Self::NotFound => "not found",
        }
    }

    const fn unique_by(legislator: &'a Legislator, strategy: MatchStrategy) -> Self {
        Self::Unique {
            legislator,
            strategy,
            swapped: false,
        }
    }
}

impl fmt::Display for MatchResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unique {
                legislator,
                strategy,
                swapped,
            } => {
                write!(f, "unique: {} by {strategy}", legislator.label())?;
                if *swapped {
                    f.write_str(" (names swapped)")?;
                }
                Ok(())
            }
            Self::Ambiguous(candidates) => {
                let labels: Vec<String> = candidates.iter().map(|l| l.label()).collect();
                write!(f, "ambiguous: {}", labels.join(", "))
            }
            Self::NotFound => f.write_str("not found"),
        }
    }
}

/// Resolve `candidate` against `index`.
///
/// Deterministic for a given candidate and snapshot. Identifiers that are
/// supplied but unknown to the index yield `NotFound` rather than a name
/// match, since any name match would carry a different identifier.
#[must_use]
pub fn match_candidate<'a>(candidate: &PartialIdentity, index: &IdentityIndex<'a>) -> MatchResult<'a> {
    let mut result = match_once(candidate, index);
    if result == MatchResult::NotFound && !candidate.has_ids() {
        if let Some(swapped) = candidate.swapped() {
            tracing::debug!(%candidate, "no match, retrying with first and last swapped");
            result = match match_once(&swapped, index) {
                MatchResult::Unique {
                    legislator,
                    strategy,
                    ..
                } => MatchResult::Unique {
                    legislator,
                    strategy,
                    swapped: true,
                },
                other => other,
            };
        }
    }

    match &result {
        MatchResult::Unique {
            legislator,
            strategy,
            swapped,
        } if strategy.needs_audit() || *swapped => {
            tracing::info!(
                %candidate,
                bioguide = legislator.bioguide(),
                %strategy,
                swapped,
                "matched without an identifier"
            );
        }
        MatchResult::Ambiguous(candidates) => {
            tracing::info!(%candidate, candidates = candidates.len(), "ambiguous match");
        }
        _ => {}
    }
    result
}

fn match_once<'a>(candidate: &PartialIdentity, index: &IdentityIndex<'a>) -> MatchResult<'a> {
    if candidate.has_ids() {
        return match_ids(candidate, index);
    }

    if let Some(result) = match_office(candidate, index) {
        return result;
    }

    match_name(candidate, index)
}

fn match_ids<'a>(candidate: &PartialIdentity, index: &IdentityIndex<'a>) -> MatchResult<'a> {
    let lookups = [
        candidate.bioguide.as_deref().map(|v| ("bioguide", v.to_string())),
        candidate.govtrack.map(|v| ("govtrack", v.to_string())),
        candidate.thomas.as_deref().map(|v| ("thomas", v.to_string())),
    ];
    let mut hits: Vec<&'a Legislator> = Vec::new();
    for (namespace, value) in lookups.into_iter().flatten() {
        match index.by_id(namespace, &value) {
            Some(found) => {
                if !hits.iter().any(|h| h.bioguide() == found.bioguide()) {
                    hits.push(found);
                }
            }
            None => tracing::debug!(namespace, value = %value, "identifier not in index"),
        }
    }
    match hits.len() {
        0 => MatchResult::NotFound,
        1 => MatchResult::unique_by(hits[0], MatchStrategy::Id),
        _ => MatchResult::Ambiguous(hits),
    }
}

/// Seat-based lookup. `None` means the candidate names no seat, or the
/// seat holder's name contradicts the candidate's.
fn match_office<'a>(candidate: &PartialIdentity, index: &IdentityIndex<'a>) -> Option<MatchResult<'a>> {
    let state = candidate.state.as_deref()?;
    let holders = match (candidate.chamber, candidate.district, candidate.senate_class) {
        (Some(TermType::Senator), _, Some(class)) => index.senate_seat(state, class),
        (Some(TermType::Representative) | None, Some(district), _) => index.house_seat(state, district),
        (Some(TermType::Senator), _, None) => {
            let rank = candidate.state_rank?;
            index.senators_by_rank(state, rank)
        }
        _ => return None,
    };

    let holders: Vec<&'a Legislator> = match candidate.last.as_deref() {
        Some(last) => {
            let folded = normalize(last);
            holders
                .into_iter()
                .filter(|l| answers_to_last(l, &folded))
                .collect()
        }
        None => holders,
    };

    match holders.len() {
        0 => {
            tracing::debug!(%candidate, "no seat holder agrees with candidate");
            None
        }
        1 => Some(MatchResult::unique_by(holders[0], MatchStrategy::Office)),
        _ => Some(MatchResult::Ambiguous(holders)),
    }
}

fn answers_to_last(legislator: &Legislator, folded: &str) -> bool {
    normalize(&legislator.name.last) == folded
        || legislator
            .other_names
            .iter()
            .any(|o| normalize(&o.last) == folded)
}

fn match_name<'a>(candidate: &PartialIdentity, index: &IdentityIndex<'a>) -> MatchResult<'a> {
    let Some(last) = candidate.last.as_deref() else {
        return MatchResult::NotFound;
    };
    let bucket: Vec<&'a Legislator> = index
        .last_name(last)
        .into_iter()
        .filter(|l| in_context(l, candidate))
        .collect();
    if bucket.is_empty() {
        return MatchResult::NotFound;
    }

    let Some(first) = candidate.first.as_deref() else {
        return match bucket.as_slice() {
            [only] => MatchResult::unique_by(only, MatchStrategy::SoleLastName),
            _ => MatchResult::Ambiguous(bucket),
        };
    };
    let first = normalize(first);

    let exact: Vec<&'a Legislator> = bucket
        .iter()
        .copied()
        .filter(|l| normalize(&l.name.first) == first)
        .collect();
    if let Some(result) = settle(exact, candidate, MatchStrategy::Name) {
        return result;
    }

    let nicknames: Vec<String> = candidate
        .nickname
        .iter()
        .map(|n| normalize(n))
        .chain(std::iter::once(first.clone()))
        .collect();
    let by_nickname: Vec<&'a Legislator> = bucket
        .iter()
        .copied()
        .filter(|l| {
            let recorded = l.name.nickname.as_deref().map(normalize);
            recorded.is_some_and(|n| nicknames.contains(&n))
                || candidate
                    .nickname
                    .as_deref()
                    .is_some_and(|n| normalize(n) == normalize(&l.name.first))
        })
        .collect();
    if let Some(result) = settle(by_nickname, candidate, MatchStrategy::Nickname) {
        return result;
    }

    let mut variants = name_variants(&first);
    if let Some(nickname) = candidate.nickname.as_deref() {
        variants.extend(name_variants(nickname));
    }
    let by_diminutive: Vec<&'a Legislator> = bucket
        .iter()
        .copied()
        .filter(|l| {
            variants.contains(&normalize(&l.name.first))
                || l.name
                    .nickname
                    .as_deref()
                    .is_some_and(|n| variants.contains(&normalize(n)))
        })
        .collect();
    settle(by_diminutive, candidate, MatchStrategy::Diminutive).unwrap_or(MatchResult::NotFound)
}

/// Whether a legislator's most recent term agrees with the candidate's
/// state and chamber, when given.
fn in_context(legislator: &Legislator, candidate: &PartialIdentity) -> bool {
    let Some(term) = legislator.current_term() else {
        return false;
    };
    candidate.state.as_deref().map_or(true, |s| term.state == s)
        && candidate.chamber.map_or(true, |c| term.kind == c)
}

/// Turn a strategy's hits into a result: one hit is unique, several go
/// through disambiguation, none defers to the next strategy.
fn settle<'a>(
    hits: Vec<&'a Legislator>,
    candidate: &PartialIdentity,
    strategy: MatchStrategy,
) -> Option<MatchResult<'a>> {
    match hits.as_slice() {
        [] => None,
        [only] => Some(MatchResult::unique_by(only, strategy)),
        _ => Some(disambiguate(hits, candidate)),
    }
}

fn disambiguate<'a>(hits: Vec<&'a Legislator>, candidate: &PartialIdentity) -> MatchResult<'a> {
    if let Some(suffix) = candidate.suffix.as_deref() {
        let suffix = normalize(suffix);
        let narrowed: Vec<&'a Legislator> = hits
            .iter()
            .copied()
            .filter(|l| l.name.suffix.as_deref().map(normalize).as_deref() == Some(suffix.as_str()))
            .collect();
        if let [only] = narrowed.as_slice() {
            return MatchResult::unique_by(only, MatchStrategy::Suffix);
        }
    }

    match candidate.middle.as_deref() {
        Some(middle) => {
            let narrowed: Vec<&'a Legislator> = hits
                .iter()
                .copied()
                .filter(|l| l.name.middle.as_deref().is_some_and(|m| middles_agree(m, middle)))
                .collect();
            if let [only] = narrowed.as_slice() {
                return MatchResult::unique_by(only, MatchStrategy::MiddleName);
            }
        }
        None => {
            let narrowed: Vec<&'a Legislator> = hits
                .iter()
                .copied()
                .filter(|l| l.name.middle.is_none())
                .collect();
            if let [only] = narrowed.as_slice() {
                return MatchResult::unique_by(only, MatchStrategy::NoMiddleName);
            }
        }
    }

    MatchResult::Ambiguous(hits)
}

/// Middle names agree when equal, or when either side is an initial of the other.
fn middles_agree(recorded: &str, supplied: &str) -> bool {
    let recorded = normalize(recorded);
    let supplied = normalize(supplied);
    if recorded.chars().count() == 1 || supplied.chars().count() == 1 {
        recorded.chars().next() == supplied.chars().next()
    } else {
        recorded == supplied
    }
}
