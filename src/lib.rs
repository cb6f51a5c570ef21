//! Binary node tree codec for the WhatsApp Web multi-device transport.
//!
//! The wire format is a compact encoding of a labelled tree: a list-size
//! header, the element tag, flat key/value attribute pairs, then the
//! content (text, opaque bytes, or nested nodes). Frequent strings shrink
//! to one or two bytes through static token dictionaries, and
//! `user@server` addresses get a dedicated two-part form.
//!
//! The codec is pure and synchronous: [`encode`] and [`decode`] own their
//! buffers, touch no shared state, and are safe to call concurrently.
//! Session establishment, payload encryption, and transport framing all
//! live above this crate; they hand byte slices in and take byte vectors
//! out.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod node;
pub mod reader;
pub mod render;
pub mod token;
pub mod unpack;

pub use decoder::{Decoder, decode};
pub use encoder::{encode, encode_node, encode_optional};
pub use error::{BinaryNodeError, UnpackError};
pub use node::{Node, NodeContent};
pub use reader::ByteReader;
pub use render::render;
pub use unpack::{decode_packed, unpack};
