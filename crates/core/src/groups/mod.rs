//! Groups module - group models, the membership aggregator, and the group API trait.

mod groups_model;
mod groups_service;
mod groups_traits;
mod membership;

pub use groups_model::{GroupMember, GroupMemberRole, UserGroup};
pub use groups_service::GroupMembershipService;
pub use groups_traits::{GroupMembershipServiceTrait, UserGroupApiTrait};
pub use membership::other_members;
