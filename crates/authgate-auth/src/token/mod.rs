//! Signed token creation and validation.

mod claims;
mod codec;

pub use claims::{Claims, TokenKind};
pub use codec::{TokenCodec, TokenPair};
