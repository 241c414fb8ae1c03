//! Narrow capability traits the auth flows depend on.
//!
//! The orchestrator is constructed against these interfaces, never against
//! a concrete backend, so providers can be swapped (Redis vs. in-memory,
//! database vs. stub directory) without touching the flows.

pub mod credentials;
pub mod registry;

pub use credentials::CredentialVerifier;
pub use registry::SessionRegistry;
