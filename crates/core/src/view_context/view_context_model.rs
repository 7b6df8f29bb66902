//! View context domain models.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::groups::GroupMember;

/// Whose records the caller is currently looking at.
///
/// Serialized as the backend's integer enum: `1` Own, `2` Member, `3` All.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ViewMode {
    Own,
    Member,
    All,
}

impl ViewMode {
    pub const ALL_MODES: [ViewMode; 3] = [ViewMode::Own, ViewMode::Member, ViewMode::All];

    pub fn code(self) -> u8 {
        match self {
            ViewMode::Own => 1,
            ViewMode::Member => 2,
            ViewMode::All => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Own => "My data",
            ViewMode::Member => "Member",
            ViewMode::All => "All members",
        }
    }
}

impl From<ViewMode> for u8 {
    fn from(mode: ViewMode) -> Self {
        mode.code()
    }
}

impl TryFrom<u8> for ViewMode {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(ViewMode::Own),
            2 => Ok(ViewMode::Member),
            3 => Ok(ViewMode::All),
            other => Err(format!("unknown view mode {}", other)),
        }
    }
}

/// The caller's current viewing mode.
///
/// Member identity is carried only by the `Member` variant, so a member id
/// can never be present in Own or All mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewContextState {
    #[default]
    Own,
    Member {
        member_user_id: String,
        member_user_name: String,
    },
    All,
}

impl ViewContextState {
    pub fn member(member: &GroupMember) -> Self {
        ViewContextState::Member {
            member_user_id: member.user_id.clone(),
            member_user_name: member.user_name.clone(),
        }
    }

    pub fn mode(&self) -> ViewMode {
        match self {
            ViewContextState::Own => ViewMode::Own,
            ViewContextState::Member { .. } => ViewMode::Member,
            ViewContextState::All => ViewMode::All,
        }
    }

    pub fn is_own(&self) -> bool {
        matches!(self, ViewContextState::Own)
    }

    pub fn is_member(&self) -> bool {
        matches!(self, ViewContextState::Member { .. })
    }

    pub fn is_all(&self) -> bool {
        matches!(self, ViewContextState::All)
    }

    pub fn member_user_id(&self) -> Option<&str> {
        match self {
            ViewContextState::Member { member_user_id, .. } => Some(member_user_id),
            _ => None,
        }
    }

    pub fn member_user_name(&self) -> Option<&str> {
        match self {
            ViewContextState::Member {
                member_user_name, ..
            } => Some(member_user_name),
            _ => None,
        }
    }

    /// Label shown on the view switcher button.
    pub fn display_label(&self) -> &str {
        match self {
            ViewContextState::Member {
                member_user_name, ..
            } => member_user_name,
            other => other.mode().label(),
        }
    }
}

/// Persisted shape of the view context: `{ mode, memberUserId?, memberUserName? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewContextRecord {
    // Older clients stored the mode under `type`.
    #[serde(alias = "type")]
    pub mode: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_user_name: Option<String>,
}

impl ViewContextRecord {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| ValidationError::CorruptViewContext(e.to_string()).into())
    }
}

impl From<&ViewContextState> for ViewContextRecord {
    fn from(state: &ViewContextState) -> Self {
        ViewContextRecord {
            mode: state.mode().code(),
            member_user_id: state.member_user_id().map(str::to_string),
            member_user_name: state.member_user_name().map(str::to_string),
        }
    }
}

impl TryFrom<ViewContextRecord> for ViewContextState {
    type Error = ValidationError;

    fn try_from(record: ViewContextRecord) -> std::result::Result<Self, Self::Error> {
        let mode = ViewMode::try_from(record.mode).map_err(ValidationError::CorruptViewContext)?;
        match (mode, record.member_user_id, record.member_user_name) {
            (ViewMode::Own, None, None) => Ok(ViewContextState::Own),
            (ViewMode::All, None, None) => Ok(ViewContextState::All),
            (ViewMode::Member, Some(id), Some(name)) if !id.trim().is_empty() => {
                Ok(ViewContextState::Member {
                    member_user_id: id,
                    member_user_name: name,
                })
            }
            (ViewMode::Member, _, _) => Err(ValidationError::CorruptViewContext(
                "member mode requires memberUserId and memberUserName".to_string(),
            )),
            (mode, _, _) => Err(ValidationError::CorruptViewContext(format!(
                "{:?} mode must not carry member fields",
                mode
            ))),
        }
    }
}

/// Parses a raw persisted record into a state.
pub fn parse_view_context(raw: &str) -> Result<ViewContextState> {
    let record = ViewContextRecord::from_json(raw)?;
    Ok(ViewContextState::try_from(record)?)
}
