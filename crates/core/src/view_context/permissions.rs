//! Edit/add capabilities derived from the current view.

use serde::Serialize;

use super::ViewContextState;
use crate::errors::{Error, Result};

/// Capabilities the presentation layer may offer in a given view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub can_edit: bool,
    pub can_add_own: bool,
}

impl Permissions {
    pub fn for_state(state: &ViewContextState) -> Self {
        Permissions {
            can_edit: can_edit(state),
            can_add_own: can_add_own(state),
        }
    }
}

/// Existing records may only be mutated while viewing one's own data.
pub fn can_edit(state: &ViewContextState) -> bool {
    state.is_own()
}

/// New self-attributed records may be created in Own and All views; Member view is read-only.
pub fn can_add_own(state: &ViewContextState) -> bool {
    state.is_own() || state.is_all()
}

pub fn require_edit(state: &ViewContextState) -> Result<()> {
    if can_edit(state) {
        Ok(())
    } else {
        Err(Error::Authorization(format!(
            "records cannot be edited while viewing '{}'",
            state.display_label()
        )))
    }
}

pub fn require_add_own(state: &ViewContextState) -> Result<()> {
    if can_add_own(state) {
        Ok(())
    } else {
        Err(Error::Authorization(format!(
            "records cannot be added while viewing '{}'",
            state.display_label()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> ViewContextState {
        ViewContextState::Member {
            member_user_id: "u2".to_string(),
            member_user_name: "Ana".to_string(),
        }
    }

    #[test]
    fn test_permissions_for_every_mode() {
        assert_eq!(
            Permissions::for_state(&ViewContextState::Own),
            Permissions {
                can_edit: true,
                can_add_own: true
            }
        );
        assert_eq!(
            Permissions::for_state(&member()),
            Permissions {
                can_edit: false,
                can_add_own: false
            }
        );
        assert_eq!(
            Permissions::for_state(&ViewContextState::All),
            Permissions {
                can_edit: false,
                can_add_own: true
            }
        );
    }

    #[test]
    fn test_require_edit_rejects_member_and_all() {
        assert!(require_edit(&ViewContextState::Own).is_ok());
        assert!(matches!(
            require_edit(&member()),
            Err(Error::Authorization(_))
        ));
        assert!(matches!(
            require_edit(&ViewContextState::All),
            Err(Error::Authorization(_))
        ));
    }

    #[test]
    fn test_require_add_own_only_rejects_member() {
        assert!(require_add_own(&ViewContextState::Own).is_ok());
        assert!(require_add_own(&ViewContextState::All).is_ok());
        let err = require_add_own(&member()).unwrap_err();
        assert!(err.to_string().contains("Ana"));
    }
}
