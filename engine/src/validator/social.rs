use std::collections::HashSet;

use super::ValidationReport;
use crate::model::{Legislator, SocialMediaEntry};
use crate::store::Collection;

/// Social media entries must belong to current legislators, once each.
#[must_use]
pub fn validate_social_media(entries: &[SocialMediaEntry], current: &[Legislator]) -> ValidationReport {
    let collection = Collection::SocialMedia;
    let mut report = ValidationReport::new();
    let serving: HashSet<&str> = current.iter().map(Legislator::bioguide).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    for entry in entries {
        let bioguide = entry.person.bioguide.as_str();
        if !serving.contains(bioguide) {
            report.error(collection, bioguide, "not a current legislator");
        }
        if !seen.insert(bioguide) {
            report.error(collection, bioguide, "duplicate entry");
        }
        if entry.social.is_empty() {
            report.warning(collection, bioguide, "no accounts listed");
        }
    }
    report
}
