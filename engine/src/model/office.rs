use serde::{Deserialize, Serialize};

use super::{Extra, Layout};

/// Identifies the legislator a side-collection entry belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRef {
    pub bioguide: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thomas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub govtrack: Option<u32>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl PersonRef {
    #[must_use]
    pub fn new(bioguide: impl Into<String>) -> Self {
        Self {
            bioguide: bioguide.into(),
            thomas: None,
            govtrack: None,
            extra: Extra::new(),
        }
    }
}

/// One district office. `id`, `city` and `state` are required; the address,
/// zip, phone and coordinates are expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictOffice {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// All district offices of one legislator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficeEntry {
    #[serde(rename = "id")]
    pub person: PersonRef,
    #[serde(default)]
    pub offices: Vec<DistrictOffice>,
    #[serde(flatten)]
    pub extra: Extra,
    #[serde(skip)]
    pub layout: Layout,
}

impl OfficeEntry {
    #[must_use]
    pub fn new(person: PersonRef) -> Self {
        Self {
            person,
            offices: Vec::new(),
            extra: Extra::new(),
            layout: Layout::default(),
        }
    }
}
