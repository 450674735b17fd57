use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Extra, Layout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitteeType {
    House,
    Senate,
    Joint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcommittee {
    pub name: String,
    pub thomas_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub congresses: Vec<u32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub names: BTreeMap<u32, String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committee {
    #[serde(rename = "type")]
    pub kind: CommitteeType,
    pub name: String,
    pub thomas_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcommittees: Vec<Subcommittee>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub congresses: Vec<u32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub names: BTreeMap<u32, String>,
    #[serde(flatten)]
    pub extra: Extra,
    #[serde(skip)]
    pub layout: Layout,
}

impl Committee {
    /// Membership codes this committee answers to: its own `thomas_id` and
    /// `thomas_id` + subcommittee id for each subcommittee.
    #[must_use]
    pub fn membership_codes(&self) -> Vec<String> {
        std::iter::once(self.thomas_id.clone())
            .chain(
                self.subcommittees
                    .iter()
                    .map(|s| format!("{}{}", self.thomas_id, s.thomas_id)),
            )
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartySide {
    Majority,
    Minority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeMember {
    pub name: String,
    pub party: PartySide,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bioguide: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thomas: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
    #[serde(skip)]
    pub layout: Layout,
}

impl CommitteeMember {
    #[must_use]
    pub fn new(name: impl Into<String>, party: PartySide) -> Self {
        Self {
            name: name.into(),
            party,
            rank: None,
            title: None,
            bioguide: None,
            thomas: None,
            extra: Extra::new(),
            layout: Layout::default(),
        }
    }
}

/// Committee or subcommittee code to its ordered member list, in file order.
pub type Membership = IndexMap<String, Vec<CommitteeMember>>;
