//! Message type, decoding and serialization.

mod decode;
mod serialize;
mod types;

pub use self::decode::{decode, decode_with};
pub use self::types::Message;
