//! Sharing and permission management on drive items.

mod models;
mod permissions;

pub use models::{LinkScope, LinkType};
