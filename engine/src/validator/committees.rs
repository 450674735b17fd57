use std::collections::{HashMap, HashSet};

use super::ValidationReport;
use crate::committees::is_ordered;
use crate::model::{Committee, Legislator, Membership};
use crate::store::Collection;

/// Committee and membership checks: unique codes, known membership codes,
/// current members, and majority/rank ordering.
#[must_use]
pub fn validate_committees(
    committees: &[Committee],
    membership: &Membership,
    current: &[Legislator],
) -> ValidationReport {
    let mut report = ValidationReport::new();
    let mut codes: HashSet<String> = HashSet::new();

    for committee in committees {
        let subject = committee.thomas_id.as_str();
        if committee.name.trim().is_empty() {
            report.error(Collection::CommitteesCurrent, subject, "missing name");
        }
        if !codes.insert(committee.thomas_id.clone()) {
            report.error(Collection::CommitteesCurrent, subject, "duplicate thomas_id");
        }
        let mut subcommittee_ids: HashSet<&str> = HashSet::new();
        for sub in &committee.subcommittees {
            if !subcommittee_ids.insert(sub.thomas_id.as_str()) {
                report.error(
                    Collection::CommitteesCurrent,
                    subject,
                    format!("duplicate subcommittee id '{}'", sub.thomas_id),
                );
            }
        }
        codes.extend(committee.membership_codes().into_iter().skip(1));
    }

    let serving: HashMap<&str, &Legislator> = current.iter().map(|l| (l.bioguide(), l)).collect();
    let collection = Collection::CommitteeMembershipCurrent;
    for (code, members) in membership {
        if !codes.contains(code) {
            report.error(collection, code.as_str(), "unknown committee code");
        }
        for member in members {
            match member.bioguide.as_deref() {
                Some(bioguide) if !serving.contains_key(bioguide) => report.error(
                    collection,
                    code.as_str(),
                    format!("member {} ({bioguide}) is not a current legislator", member.name),
                ),
                Some(_) => {}
                None => report.warning(collection, code.as_str(), format!("member {} has no bioguide", member.name)),
            }
        }
        if !is_ordered(members) {
            report.error(collection, code.as_str(), "members are not ordered majority first by rank");
        }
    }
    report
}
