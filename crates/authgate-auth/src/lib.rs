//! # authgate-auth
//!
//! Token issuance/validation and the session lifecycle flows for AuthGate.
//!
//! ## Modules
//!
//! - `token` — signed token creation and validation (the codec)
//! - `password` — Argon2id password hashing
//! - `verify` — repository-backed credential verification
//! - `session` — refresh-token session store over the registry
//! - `orchestrator` — the login, logout, and refresh flows

pub mod orchestrator;
pub mod password;
pub mod session;
pub mod token;
pub mod verify;

pub use orchestrator::AuthService;
pub use password::{PasswordHasher, PasswordPolicy, PolicyReport};
pub use session::SessionStore;
pub use token::{Claims, TokenCodec, TokenKind, TokenPair};
pub use verify::DirectoryVerifier;
