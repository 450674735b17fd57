use std::collections::HashSet;

use crate::model::{Legislator, OfficeEntry, PersonRecord, SocialMediaEntry};

/// Records kept and the bioguides of those dropped, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Swept<R> {
    pub kept: Vec<R>,
    pub dropped: Vec<String>,
}

fn sweep<R: PersonRecord>(records: Vec<R>, current: &[Legislator]) -> Swept<R> {
    let serving: HashSet<&str> = current.iter().map(Legislator::bioguide).collect();
    let (kept, dropped): (Vec<R>, Vec<R>) = records
        .into_iter()
        .partition(|r| serving.contains(r.bioguide()));
    Swept {
        kept,
        dropped: dropped.iter().map(|r| r.bioguide().to_string()).collect(),
    }
}

/// Drop district offices of legislators no longer in the current collection.
#[must_use]
pub fn sweep_offices(entries: Vec<OfficeEntry>, current: &[Legislator]) -> Swept<OfficeEntry> {
    let swept = sweep(entries, current);
    if !swept.dropped.is_empty() {
        tracing::info!(dropped = swept.dropped.len(), "swept district offices");
    }
    swept
}

/// Drop social media entries of legislators no longer in the current collection.
#[must_use]
pub fn sweep_social_media(
    entries: Vec<SocialMediaEntry>,
    current: &[Legislator],
) -> Swept<SocialMediaEntry> {
    let swept = sweep(entries, current);
    if !swept.dropped.is_empty() {
        tracing::info!(dropped = swept.dropped.len(), "swept social media entries");
    }
    swept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Ids, Name, PersonRef, SocialAccounts};

    #[test]
    fn non_current_entries_are_dropped() {
        let current = vec![Legislator::new(Ids::new("A000001", 1), Name::new("Ann", "Able"))];
        let offices = vec![
            OfficeEntry::new(PersonRef::new("A000001")),
            OfficeEntry::new(PersonRef::new("Z000009")),
        ];
        let swept = sweep_offices(offices, &current);
        assert_eq!(swept.kept.len(), 1);
        assert_eq!(swept.dropped, vec!["Z000009"]);

        let social = vec![SocialMediaEntry::new(PersonRef::new("Z000009"), SocialAccounts::default())];
        let swept = sweep_social_media(social, &current);
        assert!(swept.kept.is_empty());
        assert_eq!(swept.dropped, vec!["Z000009"]);
    }
}
