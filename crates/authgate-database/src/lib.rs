//! # authgate-database
//!
//! Postgres persistence for the member store. The auth flows never touch
//! this crate directly; they reach it through the `CredentialVerifier`
//! trait implemented in `authgate-auth`.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use repositories::member::{MemberProfile, MemberRepository, NewMember};
