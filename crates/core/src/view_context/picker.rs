//! Entries offered by the view switcher.

use serde::Serialize;

use super::{ViewContextState, ViewMode};
use crate::groups::{other_members, GroupMember, UserGroup};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModeOption {
    pub mode: ViewMode,
    pub label: String,
    /// Present only for Member entries.
    pub member: Option<GroupMember>,
    pub selected: bool,
}

impl ViewModeOption {
    /// The state a click on this entry transitions to.
    pub fn target_state(&self) -> ViewContextState {
        match (&self.mode, &self.member) {
            (ViewMode::Member, Some(member)) => ViewContextState::member(member),
            (ViewMode::All, _) => ViewContextState::All,
            _ => ViewContextState::Own,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModePicker {
    pub options: Vec<ViewModeOption>,
    pub has_groups: bool,
}

impl ViewModePicker {
    /// Own is always offered. Member entries come from the deduplicated other
    /// members, and All is offered only when there is at least one of them.
    ///
    /// `groups` are the caller's own groups as returned by the backend, so a
    /// group whose member list was not embedded still counts.
    pub fn build(groups: &[UserGroup], caller_id: &str, current: &ViewContextState) -> Self {
        let has_groups = !groups.is_empty();
        let members = other_members(groups, caller_id);
        let has_members = !members.is_empty();
        let mut options = vec![ViewModeOption {
            mode: ViewMode::Own,
            label: ViewMode::Own.label().to_string(),
            member: None,
            selected: current.is_own(),
        }];

        for member in members {
            let selected = current.member_user_id() == Some(member.user_id.as_str());
            options.push(ViewModeOption {
                mode: ViewMode::Member,
                label: member.user_name.clone(),
                member: Some(member),
                selected,
            });
        }

        if has_members {
            options.push(ViewModeOption {
                mode: ViewMode::All,
                label: ViewMode::All.label().to_string(),
                member: None,
                selected: current.is_all(),
            });
        }

        ViewModePicker {
            options,
            has_groups,
        }
    }

    pub fn selected(&self) -> Option<&ViewModeOption> {
        self.options.iter().find(|o| o.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::GroupMemberRole;
    use chrono::{TimeZone, Utc};

    fn group(id: &str, members: &[(&str, &str)]) -> UserGroup {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        UserGroup {
            id: id.to_string(),
            name: format!("Group {}", id),
            description: None,
            invite_code: "ABC123".to_string(),
            created_by_user_id: members[0].0.to_string(),
            created_at,
            members: members
                .iter()
                .enumerate()
                .map(|(i, (user_id, user_name))| GroupMember {
                    group_id: id.to_string(),
                    user_id: user_id.to_string(),
                    user_name: user_name.to_string(),
                    user_email: format!("{}@example.com", user_id),
                    role: if i == 0 {
                        GroupMemberRole::Owner
                    } else {
                        GroupMemberRole::Member
                    },
                    joined_at: created_at,
                })
                .collect(),
        }
    }

    #[test]
    fn test_without_groups_only_own_is_offered() {
        let picker = ViewModePicker::build(&[], "u1", &ViewContextState::Own);
        assert!(!picker.has_groups);
        assert_eq!(picker.options.len(), 1);
        assert_eq!(picker.selected().map(|o| o.mode), Some(ViewMode::Own));
    }

    #[test]
    fn test_members_and_all_are_offered_with_selection() {
        let groups = vec![group("g1", &[("u1", "Me"), ("u2", "Ana"), ("u3", "Bo")])];
        let current = ViewContextState::Member {
            member_user_id: "u3".to_string(),
            member_user_name: "Bo".to_string(),
        };
        let picker = ViewModePicker::build(&groups, "u1", &current);

        let labels: Vec<&str> = picker.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["My data", "Ana", "Bo", "All members"]);
        let selected = picker.selected().unwrap();
        assert_eq!(selected.label, "Bo");
        assert_eq!(selected.target_state(), current);
        assert_eq!(
            picker.options.last().unwrap().target_state(),
            ViewContextState::All
        );
    }

    #[test]
    fn test_group_of_one_offers_only_own() {
        let groups = vec![group("g1", &[("u1", "Me")])];
        let picker = ViewModePicker::build(&groups, "u1", &ViewContextState::All);
        let modes: Vec<ViewMode> = picker.options.iter().map(|o| o.mode).collect();
        assert_eq!(modes, vec![ViewMode::Own]);
        assert!(picker.has_groups);
        // A stale All selection has no entry to highlight.
        assert!(picker.selected().is_none());
    }

    #[test]
    fn test_group_without_embedded_members_still_counts() {
        let mut bare = group("g1", &[("u1", "Me")]);
        bare.members.clear();
        let picker = ViewModePicker::build(&[bare], "u1", &ViewContextState::Own);
        assert!(picker.has_groups);
        assert_eq!(picker.options.len(), 1);
        assert_eq!(picker.selected().map(|o| o.mode), Some(ViewMode::Own));
    }
}
