//! Redis session registry backend.

mod client;
mod operations;

pub use client::RedisClient;
pub use operations::RedisSessionRegistry;
