use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use cl_calendar::SenateClass;
use serde::{Deserialize, Serialize};

use super::Extra;

/// Chamber of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermType {
    #[serde(rename = "rep")]
    Representative,
    #[serde(rename = "sen")]
    Senator,
}

impl fmt::Display for TermType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Representative => "rep",
            Self::Senator => "sen",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateRank {
    Junior,
    Senior,
}

impl fmt::Display for StateRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Junior => "junior",
            Self::Senior => "senior",
        })
    }
}

/// A sub-period of party membership within one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyAffiliation {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub party: String,
}

/// One continuous period of service in one chamber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    #[serde(rename = "type")]
    pub kind: TermType,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how: Option<String>,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<u32>,
    #[serde(rename = "class", default, skip_serializing_if = "Option::is_none")]
    pub senate_class: Option<SenateClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_rank: Option<StateRank>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caucus: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub party_affiliations: Vec<PartyAffiliation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_form: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rss_url: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// The office a term occupies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Seat {
    House { state: String, district: u32 },
    Senate { state: String, class: SenateClass },
}

impl Seat {
    #[must_use]
    pub fn state(&self) -> &str {
        match self {
            Self::House { state, .. } | Self::Senate { state, .. } => state,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::House { state, district } => write!(f, "rep {state}-{district}"),
            Self::Senate { state, class } => write!(f, "sen {state} class {class}"),
        }
    }
}

impl Term {
    /// A term with only the fields every term carries.
    #[must_use]
    pub fn new(kind: TermType, start: NaiveDate, end: NaiveDate, state: impl Into<String>) -> Self {
        Self {
            kind,
            start,
            end,
            how: None,
            state: state.into(),
            district: None,
            senate_class: None,
            state_rank: None,
            party: None,
            caucus: None,
            party_affiliations: Vec::new(),
            url: None,
            address: None,
            phone: None,
            fax: None,
            contact_form: None,
            office: None,
            rss_url: None,
            extra: Extra::new(),
        }
    }

    /// The seat this term occupies, or `None` when the chamber's seat field
    /// (`district` for the House, `class` for the Senate) is missing.
    #[must_use]
    pub fn seat(&self) -> Option<Seat> {
        match self.kind {
            TermType::Representative => self.district.map(|district| Seat::House {
                state: self.state.clone(),
                district,
            }),
            TermType::Senator => self.senate_class.map(|class| Seat::Senate {
                state: self.state.clone(),
                class,
            }),
        }
    }

    /// Mutable access to a carry-forward field.
    pub fn field_mut(&mut self, field: TermField) -> &mut Option<String> {
        match field {
            TermField::Url => &mut self.url,
            TermField::RssUrl => &mut self.rss_url,
            TermField::Address => &mut self.address,
            TermField::Phone => &mut self.phone,
            TermField::Fax => &mut self.fax,
            TermField::ContactForm => &mut self.contact_form,
            TermField::Office => &mut self.office,
            TermField::Caucus => &mut self.caucus,
        }
    }

    #[must_use]
    pub const fn field(&self, field: TermField) -> &Option<String> {
        match field {
            TermField::Url => &self.url,
            TermField::RssUrl => &self.rss_url,
            TermField::Address => &self.address,
            TermField::Phone => &self.phone,
            TermField::Fax => &self.fax,
            TermField::ContactForm => &self.contact_form,
            TermField::Office => &self.office,
            TermField::Caucus => &self.caucus,
        }
    }
}

/// Term fields that may be carried forward from one term to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermField {
    Url,
    RssUrl,
    Address,
    Phone,
    Fax,
    ContactForm,
    Office,
    Caucus,
}

impl TermField {
    pub const ALL: [Self; 8] = [
        Self::Url,
        Self::RssUrl,
        Self::Address,
        Self::Phone,
        Self::Fax,
        Self::ContactForm,
        Self::Office,
        Self::Caucus,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::RssUrl => "rss_url",
            Self::Address => "address",
            Self::Phone => "phone",
            Self::Fax => "fax",
            Self::ContactForm => "contact_form",
            Self::Office => "office",
            Self::Caucus => "caucus",
        }
    }
}

/// Error returned when a string does not name a carry-forward field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown term field '{0}'")]
pub struct UnknownTermField(pub String);

impl FromStr for TermField {
    type Err = UnknownTermField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s.trim())
            .ok_or_else(|| UnknownTermField(s.to_string()))
    }
}

impl fmt::Display for TermField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
