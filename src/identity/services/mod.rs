//! Identity services: the signed-token codec.

mod codec;

pub use codec::{Claims, TokenCodec, TokenConfig, TokenError};
