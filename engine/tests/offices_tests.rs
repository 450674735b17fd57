//! District office upkeep from scraped facts through to validation.

mod common;

use common::factories::{LegislatorFactory, TermFactory};
use common::store_with;
use congress_legislators::merger::{apply_office_fact, remove_office, OfficeFact};
use congress_legislators::model::{OfficeEntry, PersonRef};
use congress_legislators::store::Collection;
use congress_legislators::validator::validate_offices;

fn fact(city: &str, address: &str) -> OfficeFact {
    OfficeFact {
        city: Some(city.into()),
        state: Some("TX".into()),
        address: Some(address.into()),
        zip: Some("77002".into()),
        phone: Some("713-555-0100".into()),
        latitude: Some(29.76),
        longitude: Some(-95.37),
        ..OfficeFact::default()
    }
}

#[test]
fn scraped_offices_validate_and_persist() {
    let current = vec![LegislatorFactory::new()
        .with_bioguide("F000468")
        .with_term(TermFactory::house("TX", 7).build())
        .build()];

    let mut entry = OfficeEntry::new(PersonRef::new("F000468"));
    for (city, address) in [
        ("Houston", "1001 Main St"),
        ("Houston", "8 Greenway Plaza"),
        ("Sugar Land", "2 Town Sq"),
    ] {
        entry = apply_office_fact(&entry, fact(city, address)).expect("apply fact");
    }
    let ids: Vec<&str> = entry.offices.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["F000468-houston", "F000468-houston-2", "F000468-sugarland"]);

    let report = validate_offices(std::slice::from_ref(&entry), &current);
    assert!(report.is_clean(), "{report}");
    assert!(report.warnings.is_empty(), "{report}");

    let entry = remove_office(&entry, "F000468-houston").expect("remove");
    assert_eq!(entry.offices[0].id, "F000468-houston");
    assert_eq!(entry.offices[0].address.as_deref(), Some("8 Greenway Plaza"));

    let entries = vec![entry];
    let (_dir, store) = store_with(&[(Collection::DistrictOffices, &entries)]);
    let reloaded = store.load::<OfficeEntry>(Collection::DistrictOffices).expect("reload");
    assert_eq!(reloaded.records, entries);
    assert!(validate_offices(&reloaded.records, &current).is_clean());

    let text = std::fs::read_to_string(store.path(Collection::DistrictOffices)).expect("read");
    let id = text.find("id: F000468-houston").expect("id line");
    let city = text.find("city: Houston").expect("city line");
    assert!(id < city, "office id is written before its city");
}
