//! Database repositories.

pub mod member;
