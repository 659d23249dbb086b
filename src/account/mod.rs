//! Profile, confirmation, password and deletion flows of the signed-in user.

pub mod permissions;
pub mod profile;
pub mod services;
pub mod slug;
