use serde::{Deserialize, Serialize};

use super::{Extra, Layout, PersonRef};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialAccounts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_id: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl SocialAccounts {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Social media accounts of one legislator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMediaEntry {
    #[serde(rename = "id")]
    pub person: PersonRef,
    pub social: SocialAccounts,
    #[serde(flatten)]
    pub extra: Extra,
    #[serde(skip)]
    pub layout: Layout,
}

impl SocialMediaEntry {
    #[must_use]
    pub fn new(person: PersonRef, social: SocialAccounts) -> Self {
        Self {
            person,
            social,
            extra: Extra::new(),
            layout: Layout::default(),
        }
    }
}
