//! # authgate-core
//!
//! Core crate for AuthGate. Contains configuration schemas, the narrow
//! traits the auth flows depend on (session registry, credential verifier),
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other AuthGate crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
