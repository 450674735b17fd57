//! Move legislators between the current and historical collections.
//!
//! [`partition`] is a pure function over snapshots: it never edits its
//! inputs, and either every legislator lands in exactly one output or the
//! whole call fails.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::model::Legislator;

/// The rebuilt collections and who moved.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub current: Vec<Legislator>,
    pub historical: Vec<Legislator>,
    /// Moved from current to historical.
    pub retired: Vec<String>,
    /// Moved from historical back to current.
    pub returned: Vec<String>,
    /// Newcomers, wherever they were placed.
    pub added: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartitionError {
    #[error("{bioguide} is already in the {location} collection")]
    AlreadyPresent {
        bioguide: String,
        location: &'static str,
    },

    #[error("{bioguide} has no terms")]
    NoTerms { bioguide: String },
}

/// Rebuild the current and historical collections as of `as_of`.
///
/// A legislator is current when their last term ends after `as_of`.
/// Current records keep their order, followed by returning members and
/// then newcomers; historical records keep their order, followed by those
/// who retired.
///
/// # Errors
/// - [`PartitionError::AlreadyPresent`] if a newcomer's bioguide is already
///   in either collection or repeated among the newcomers
/// - [`PartitionError::NoTerms`] if any legislator has no terms
pub fn partition(
    current: &[Legislator],
    historical: &[Legislator],
    newcomers: &[Legislator],
    as_of: NaiveDate,
) -> Result<Partition, PartitionError> {
    let current_ids: HashSet<&str> = current.iter().map(Legislator::bioguide).collect();
    let historical_ids: HashSet<&str> = historical.iter().map(Legislator::bioguide).collect();
    let mut newcomer_ids: HashSet<&str> = HashSet::new();
    for legislator in newcomers {
        let bioguide = legislator.bioguide();
        let location = if current_ids.contains(bioguide) {
            Some("current")
        } else if historical_ids.contains(bioguide) {
            Some("historical")
        } else if !newcomer_ids.insert(bioguide) {
            Some("newcomer")
        } else {
            None
        };
        if let Some(location) = location {
            return Err(PartitionError::AlreadyPresent {
                bioguide: bioguide.to_string(),
                location,
            });
        }
    }
    if let Some(empty) = current
        .iter()
        .chain(historical)
        .chain(newcomers)
        .find(|l| l.terms.is_empty())
    {
        return Err(PartitionError::NoTerms {
            bioguide: empty.bioguide().to_string(),
        });
    }

    let (staying, retiring): (Vec<&Legislator>, Vec<&Legislator>) =
        current.iter().partition(|l| l.is_serving(as_of));
    let (returning, resting): (Vec<&Legislator>, Vec<&Legislator>) =
        historical.iter().partition(|l| l.is_serving(as_of));
    let (new_current, new_historical): (Vec<&Legislator>, Vec<&Legislator>) =
        newcomers.iter().partition(|l| l.is_serving(as_of));

    let ids = |list: &[&Legislator]| -> Vec<String> {
        list.iter().map(|l| l.bioguide().to_string()).collect()
    };
    let result = Partition {
        retired: ids(&retiring),
        returned: ids(&returning),
        added: newcomers.iter().map(|l| l.bioguide().to_string()).collect(),
        current: staying
            .into_iter()
            .chain(returning)
            .chain(new_current)
            .cloned()
            .collect(),
        historical: resting
            .into_iter()
            .chain(retiring)
            .chain(new_historical)
            .cloned()
            .collect(),
    };
    tracing::info!(
        current = result.current.len(),
        historical = result.historical.len(),
        retired = result.retired.len(),
        returned = result.returned.len(),
        added = result.added.len(),
        "partitioned legislators"
    );
    Ok(result)
}
