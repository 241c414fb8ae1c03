//! Password hashing and policy.

mod hasher;
mod policy;

pub use hasher::PasswordHasher;
pub use policy::{PasswordPolicy, PolicyReport};
