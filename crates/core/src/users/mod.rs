//! Users module - the authenticated caller's identity.

mod users_model;

pub use users_model::User;
