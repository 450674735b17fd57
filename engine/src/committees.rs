//! Committee membership ordering.

use std::cmp::Ordering;

use crate::model::{CommitteeMember, Membership};

/// Majority before minority, then by rank. Unranked members sort last
/// within their party.
fn member_order(a: &CommitteeMember, b: &CommitteeMember) -> Ordering {
    a.party
        .cmp(&b.party)
        .then_with(|| a.rank.unwrap_or(u32::MAX).cmp(&b.rank.unwrap_or(u32::MAX)))
}

/// Whether `members` already satisfies the membership ordering.
#[must_use]
pub fn is_ordered(members: &[CommitteeMember]) -> bool {
    members
        .windows(2)
        .all(|pair| member_order(&pair[0], &pair[1]) != Ordering::Greater)
}

/// Restore the membership ordering in every committee. The sort is stable,
/// so members that compare equal keep their scraped order.
pub fn sort_membership(membership: &mut Membership) {
    for members in membership.values_mut() {
        members.sort_by(member_order);
    }
}
