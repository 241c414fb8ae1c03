//! Refresh-token session persistence.

mod store;

pub use store::SessionStore;
