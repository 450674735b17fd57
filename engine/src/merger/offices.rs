use std::collections::HashMap;

use crate::model::{DistrictOffice, Extra, OfficeEntry};
use crate::names::normalize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OfficeError {
    #[error("{bioguide}: no office with id '{id}'")]
    UnknownOffice { bioguide: String, id: String },

    #[error("{bioguide}: new office is missing required field '{field}'")]
    MissingField {
        bioguide: String,
        field: &'static str,
    },

    #[error("{bioguide}: unknown office state '{state}'")]
    UnknownState { bioguide: String, state: String },
}

/// A scraped statement about one district office. Fields left `None` are
/// not touched on an existing office.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfficeFact {
    /// Target a specific existing office.
    pub id: Option<String>,
    pub address: Option<String>,
    pub suite: Option<String>,
    pub building: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub hours: Option<String>,
}

/// `{bioguide}-{city}` with the city folded to lowercase ASCII letters and
/// digits.
#[must_use]
pub fn office_id_base(bioguide: &str, city: &str) -> String {
    let city: String = normalize(city).chars().filter(|c| c.is_alphanumeric()).collect();
    format!("{bioguide}-{city}")
}

/// Rewrite every office id from its city, numbering repeat cities `-2`,
/// `-3`, … in list order.
pub fn recompute_office_ids(entry: &mut OfficeEntry) {
    let mut seen: HashMap<String, u32> = HashMap::new();
    for office in &mut entry.offices {
        let base = office_id_base(&entry.person.bioguide, &office.city);
        let count = seen.entry(base.clone()).or_insert(0);
        *count += 1;
        office.id = if *count == 1 {
            base
        } else {
            format!("{base}-{count}")
        };
    }
}

fn same_place(office: &DistrictOffice, fact: &OfficeFact) -> bool {
    let (Some(city), Some(address)) = (&fact.city, &fact.address) else {
        return false;
    };
    normalize(&office.city) == normalize(city)
        && office.address.as_deref().map(normalize) == Some(normalize(address))
}

/// Update or add one office.
///
/// The target is the office whose id equals `fact.id`, or else the office
/// in the same city at the same address. With no target a new office is
/// appended, which requires `city` and a recognized `state`. Ids are
/// recomputed afterwards.
///
/// # Errors
/// Returns [`OfficeError`] when `fact.id` names no office or a new office
/// lacks its required fields.
pub fn apply_office_fact(entry: &OfficeEntry, fact: OfficeFact) -> Result<OfficeEntry, OfficeError> {
    let bioguide = entry.person.bioguide.clone();
    if let Some(state) = fact.state.as_deref() {
        if cl_calendar::state(state).is_none() {
            return Err(OfficeError::UnknownState {
                bioguide,
                state: state.to_string(),
            });
        }
    }

    let mut updated = entry.clone();
    let target = match &fact.id {
        Some(id) => Some(
            updated
                .offices
                .iter()
                .position(|o| &o.id == id)
                .ok_or_else(|| OfficeError::UnknownOffice {
                    bioguide: bioguide.clone(),
                    id: id.clone(),
                })?,
        ),
        None => updated.offices.iter().position(|o| same_place(o, &fact)),
    };

    match target {
        Some(i) => merge_into(&mut updated.offices[i], fact),
        None => {
            let city = fact.city.clone().ok_or_else(|| OfficeError::MissingField {
                bioguide: bioguide.clone(),
                field: "city",
            })?;
            let state = fact.state.clone().ok_or_else(|| OfficeError::MissingField {
                bioguide: bioguide.clone(),
                field: "state",
            })?;
            let mut office = DistrictOffice {
                id: String::new(),
                address: None,
                suite: None,
                building: None,
                city,
                state,
                zip: None,
                latitude: None,
                longitude: None,
                phone: None,
                fax: None,
                hours: None,
                extra: Extra::new(),
            };
            merge_into(&mut office, fact);
            tracing::debug!(bioguide = %bioguide, city = %office.city, "adding district office");
            updated.offices.push(office);
        }
    }

    recompute_office_ids(&mut updated);
    Ok(updated)
}

fn merge_into(office: &mut DistrictOffice, fact: OfficeFact) {
    fn set<T>(slot: &mut Option<T>, value: Option<T>) {
        if value.is_some() {
            *slot = value;
        }
    }
    if let Some(city) = fact.city {
        office.city = city;
    }
    if let Some(state) = fact.state {
        office.state = state;
    }
    set(&mut office.address, fact.address);
    set(&mut office.suite, fact.suite);
    set(&mut office.building, fact.building);
    set(&mut office.zip, fact.zip);
    set(&mut office.latitude, fact.latitude);
    set(&mut office.longitude, fact.longitude);
    set(&mut office.phone, fact.phone);
    set(&mut office.fax, fact.fax);
    set(&mut office.hours, fact.hours);
}

/// Remove the office with `id` and renumber the rest.
///
/// # Errors
/// Returns [`OfficeError::UnknownOffice`] when no office has that id.
pub fn remove_office(entry: &OfficeEntry, id: &str) -> Result<OfficeEntry, OfficeError> {
    let mut updated = entry.clone();
    let before = updated.offices.len();
    updated.offices.retain(|o| o.id != id);
    if updated.offices.len() == before {
        return Err(OfficeError::UnknownOffice {
            bioguide: entry.person.bioguide.clone(),
            id: id.to_string(),
        });
    }
    recompute_office_ids(&mut updated);
    Ok(updated)
}
