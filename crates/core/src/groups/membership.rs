//! Aggregation of "other members" across every group the caller belongs to.

use std::collections::HashSet;

use super::{GroupMember, UserGroup};

/// Every member other than `caller_id`, once per user id.
///
/// Groups are scanned oldest first by `(created_at, id)` and members in their
/// listed order; when a user shares several groups with the caller, the row
/// from the first group scanned wins. `groups` are the caller's own groups, so
/// every one is scanned even when its member list omits the caller. An empty
/// result is not an error; callers decide whether to hide group-only
/// affordances.
pub fn other_members(groups: &[UserGroup], caller_id: &str) -> Vec<GroupMember> {
    let mut ordered: Vec<&UserGroup> = groups.iter().collect();
    ordered.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut seen: HashSet<&str> = HashSet::new();
    let mut members = Vec::new();
    for group in ordered {
        for member in &group.members {
            if member.user_id == caller_id || !seen.insert(member.user_id.as_str()) {
                continue;
            }
            let mut member = member.clone();
            if member.group_id.is_empty() {
                member.group_id = group.id.clone();
            }
            members.push(member);
        }
    }
    members
}
