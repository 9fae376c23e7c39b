//! Route handlers organized by access level.

pub mod admin;
pub mod api;
pub mod home;
pub mod public;
