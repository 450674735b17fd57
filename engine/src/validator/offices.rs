use std::collections::{HashMap, HashSet};

use super::ValidationReport;
use crate::merger::recompute_office_ids;
use crate::model::{DistrictOffice, Legislator, OfficeEntry};
use crate::store::Collection;

/// District office checks: owner is current, required fields present,
/// expected fields present (warning), ids unique and derived from the city.
#[must_use]
pub fn validate_offices(entries: &[OfficeEntry], current: &[Legislator]) -> ValidationReport {
    let collection = Collection::DistrictOffices;
    let mut report = ValidationReport::new();
    let serving: HashMap<&str, &Legislator> = current.iter().map(|l| (l.bioguide(), l)).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    for entry in entries {
        let bioguide = entry.person.bioguide.as_str();
        if !seen.insert(bioguide) {
            report.error(collection, bioguide, "duplicate entry");
        }
        let term_state = match serving.get(bioguide) {
            Some(l) => l.current_term().map(|t| t.state.as_str()),
            None => {
                report.error(collection, bioguide, "not a current legislator");
                None
            }
        };

        let mut derived = entry.clone();
        recompute_office_ids(&mut derived);
        let mut ids: HashSet<&str> = HashSet::new();
        for (office, expected) in entry.offices.iter().zip(&derived.offices) {
            let subject = if office.id.is_empty() { bioguide } else { office.id.as_str() };
            check_fields(&mut report, subject, office);
            if !ids.insert(office.id.as_str()) {
                report.error(collection, subject, "duplicate office id");
            }
            if office.id != expected.id {
                report.error(collection, subject, format!("office id should be '{}'", expected.id));
            }
            if cl_calendar::state(&office.state).is_none() {
                report.error(collection, subject, format!("invalid state '{}'", office.state));
            } else if term_state.is_some_and(|s| s != office.state) {
                report.warning(
                    collection,
                    subject,
                    format!("office state {} differs from current term state", office.state),
                );
            }
        }
    }
    report
}

fn check_fields(report: &mut ValidationReport, subject: &str, office: &DistrictOffice) {
    let collection = Collection::DistrictOffices;
    for (field, value) in [("id", &office.id), ("city", &office.city), ("state", &office.state)] {
        if value.trim().is_empty() {
            report.error(collection, subject, format!("missing required field '{field}'"));
        }
    }
    let expected = [
        ("address", office.address.is_some()),
        ("zip", office.zip.is_some()),
        ("phone", office.phone.is_some()),
        ("latitude", office.latitude.is_some()),
        ("longitude", office.longitude.is_some()),
    ];
    for (field, present) in expected {
        if !present {
            report.warning(collection, subject, format!("missing expected field '{field}'"));
        }
    }
}
