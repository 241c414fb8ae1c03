//! In-memory session registry backend.

mod store;

pub use store::MemorySessionRegistry;
