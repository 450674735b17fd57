//! The whole dataset loaded at once.

use serde::de::DeserializeOwned;

use crate::model::{Committee, Legislator, Membership, OfficeEntry, Record, SocialMediaEntry};
use crate::store::{Collection, Document, PartialLoad, RecordError, RecordStore, StoreError};
use crate::validator::{
    self, validate_committees, validate_offices, validate_social_media, ValidationOptions,
    ValidationReport,
};

/// Every canonical collection. The legislator collections are required;
/// the side collections load empty when their file is absent.
///
/// Records that fail typed conversion are set aside in `rejected` so the
/// rest of the corpus can still be checked.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub current: Document<Vec<Legislator>>,
    pub historical: Document<Vec<Legislator>>,
    pub committees: Document<Vec<Committee>>,
    pub membership: Option<Document<Membership>>,
    pub offices: Document<Vec<OfficeEntry>>,
    pub social_media: Document<Vec<SocialMediaEntry>>,
    pub rejected: Vec<(Collection, RecordError)>,
}

fn keep<T>(
    collection: Collection,
    loaded: PartialLoad<T>,
    rejected: &mut Vec<(Collection, RecordError)>,
) -> Document<T> {
    for error in &loaded.rejected {
        tracing::warn!(%collection, record = %error.locator, error = %error.message, "record rejected");
    }
    rejected.extend(loaded.rejected.into_iter().map(|e| (collection, e)));
    loaded.document
}

fn load_side<R: DeserializeOwned + Record>(
    store: &RecordStore,
    collection: Collection,
    rejected: &mut Vec<(Collection, RecordError)>,
) -> Result<Document<Vec<R>>, StoreError> {
    if store.exists(collection) {
        Ok(keep(collection, store.load_partial(collection)?, rejected))
    } else {
        Ok(Document::new(Vec::new()))
    }
}

impl Corpus {
    /// Load all collections from `store`.
    ///
    /// # Errors
    /// The first collection that exists but cannot be read or parsed as
    /// YAML of the right shape. A missing legislator collection is an I/O
    /// error. Individual records that fail conversion do not fail the load.
    pub fn load(store: &RecordStore) -> Result<Self, StoreError> {
        let mut rejected = Vec::new();
        let current = keep(
            Collection::LegislatorsCurrent,
            store.load_partial(Collection::LegislatorsCurrent)?,
            &mut rejected,
        );
        let historical = keep(
            Collection::LegislatorsHistorical,
            store.load_partial(Collection::LegislatorsHistorical)?,
            &mut rejected,
        );
        let membership = if store.exists(Collection::CommitteeMembershipCurrent) {
            Some(keep(
                Collection::CommitteeMembershipCurrent,
                store.load_membership_partial()?,
                &mut rejected,
            ))
        } else {
            None
        };
        let corpus = Self {
            current,
            historical,
            committees: load_side(store, Collection::CommitteesCurrent, &mut rejected)?,
            membership,
            offices: load_side(store, Collection::DistrictOffices, &mut rejected)?,
            social_media: load_side(store, Collection::SocialMedia, &mut rejected)?,
            rejected,
        };
        tracing::info!(
            current = corpus.current.records.len(),
            historical = corpus.historical.records.len(),
            committees = corpus.committees.records.len(),
            offices = corpus.offices.records.len(),
            social_media = corpus.social_media.records.len(),
            rejected = corpus.rejected.len(),
            "loaded corpus"
        );
        Ok(corpus)
    }

    /// Run every check: rejected records first, then legislators, offices,
    /// committees and social media.
    #[must_use]
    pub fn validate(&self, options: &ValidationOptions) -> ValidationReport {
        let mut report = ValidationReport::new();
        for (collection, error) in &self.rejected {
            report.error(
                *collection,
                error.subject(),
                format!("record {} does not load: {}", error.locator, error.message),
            );
        }
        let current = &self.current.records;
        report.merge(validator::validate(current, &self.historical.records, options));
        report.merge(validate_offices(&self.offices.records, current));
        let empty = Membership::new();
        let membership = self.membership.as_ref().map_or(&empty, |d| &d.records);
        report.merge(validate_committees(&self.committees.records, membership, current));
        report.merge(validate_social_media(&self.social_media.records, current));
        report
    }
}
