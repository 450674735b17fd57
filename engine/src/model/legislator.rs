use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Extra, Layout, Term};

/// Identifiers in other databases.
///
/// `bioguide` and `govtrack` are required; every other namespace is optional.
/// All values must be unique across the whole corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ids {
    pub bioguide: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thomas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lis: Option<String>,
    pub govtrack: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opensecrets: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votesmart: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fec: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cspan: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikipedia: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_history: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ballotpedia: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maplight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icpsr: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikidata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_entity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pictorial: Option<u32>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Ids {
    /// Minimal ID block with only the two required identifiers.
    #[must_use]
    pub fn new(bioguide: impl Into<String>, govtrack: u32) -> Self {
        Self {
            bioguide: bioguide.into(),
            thomas: None,
            lis: None,
            govtrack,
            opensecrets: None,
            votesmart: None,
            fec: Vec::new(),
            cspan: None,
            wikipedia: None,
            house_history: None,
            ballotpedia: None,
            maplight: None,
            icpsr: None,
            wikidata: None,
            google_entity_id: None,
            pictorial: None,
            extra: Extra::new(),
        }
    }

    /// Every `(namespace, value)` pair present, in serialized order.
    ///
    /// Scalar values of unmodelled namespaces are included; list-valued ones
    /// (such as `bioguide_previous`) contribute one pair per element.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut out = vec![("bioguide".to_string(), self.bioguide.clone())];
        let mut push = |ns: &str, value: Option<String>| {
            if let Some(v) = value {
                out.push((ns.to_string(), v));
            }
        };
        push("thomas", self.thomas.clone());
        push("lis", self.lis.clone());
        push("govtrack", Some(self.govtrack.to_string()));
        push("opensecrets", self.opensecrets.clone());
        push("votesmart", self.votesmart.map(|v| v.to_string()));
        for fec in &self.fec {
            push("fec", Some(fec.clone()));
        }
        push("cspan", self.cspan.map(|v| v.to_string()));
        push("wikipedia", self.wikipedia.clone());
        push("house_history", self.house_history.map(|v| v.to_string()));
        push("ballotpedia", self.ballotpedia.clone());
        push("maplight", self.maplight.map(|v| v.to_string()));
        push("icpsr", self.icpsr.map(|v| v.to_string()));
        push("wikidata", self.wikidata.clone());
        push("google_entity_id", self.google_entity_id.clone());
        push("pictorial", self.pictorial.map(|v| v.to_string()));
        for (ns, value) in &self.extra {
            let Some(ns) = ns.as_str() else { continue };
            match value {
                serde_yaml::Value::Sequence(items) => {
                    for item in items {
                        push(ns, scalar_string(item));
                    }
                }
                other => push(ns, scalar_string(other)),
            }
        }
        out
    }
}

fn scalar_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    pub first: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,
    pub last: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_full: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Name {
    #[must_use]
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            middle: None,
            last: last.into(),
            suffix: None,
            nickname: None,
            official_full: None,
            extra: Extra::new(),
        }
    }

    /// `official_full` when recorded, otherwise "First Last".
    #[must_use]
    pub fn display(&self) -> String {
        self.official_full
            .clone()
            .unwrap_or_else(|| format!("{} {}", self.first, self.last))
    }

    /// A first name like "J." is only an initial and needs a middle name beside it.
    #[must_use]
    pub fn first_is_initial(&self) -> bool {
        self.first.chars().count() == 2 && self.first.ends_with('.')
    }
}

/// A name the legislator was previously known by (e.g. before marriage).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,
    pub last: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bio {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Bio {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.birthday.is_none() && self.gender.is_none() && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chamber {
    House,
    Senate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadershipRole {
    pub title: String,
    pub chamber: Chamber,
    pub start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Relationship to another member of Congress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRelation {
    pub name: String,
    pub relation: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One individual who has served in Congress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legislator {
    #[serde(rename = "id")]
    pub ids: Ids,
    pub name: Name,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other_names: Vec<OtherName>,
    #[serde(default, skip_serializing_if = "Bio::is_empty")]
    pub bio: Bio,
    /// Chronological; the last element is the most recent term.
    pub terms: Vec<Term>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leadership_roles: Vec<LeadershipRole>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub family: Vec<FamilyRelation>,
    #[serde(flatten)]
    pub extra: Extra,
    #[serde(skip)]
    pub layout: Layout,
}

impl Legislator {
    /// A legislator with no terms yet; push terms before saving.
    #[must_use]
    pub fn new(ids: Ids, name: Name) -> Self {
        Self {
            ids,
            name,
            other_names: Vec::new(),
            bio: Bio::default(),
            terms: Vec::new(),
            leadership_roles: Vec::new(),
            family: Vec::new(),
            extra: Extra::new(),
            layout: Layout::default(),
        }
    }

    #[must_use]
    pub fn bioguide(&self) -> &str {
        &self.ids.bioguide
    }

    /// The most recent term.
    #[must_use]
    pub fn current_term(&self) -> Option<&Term> {
        self.terms.last()
    }

    /// Whether the most recent term has not ended as of `as_of`.
    #[must_use]
    pub fn is_serving(&self, as_of: NaiveDate) -> bool {
        self.current_term().is_some_and(|t| t.end > as_of)
    }

    /// Human-readable label for transcripts: "Name (BIOGUIDE)".
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name.display(), self.ids.bioguide)
    }
}
