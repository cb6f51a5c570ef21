//! Flag byte handling for received node payloads.
//!
//! Every decrypted payload starts with one flag byte; when the compressed
//! bit is set the node bytes that follow are a zlib stream. Outbound
//! payloads are written uncompressed with a zero flag byte, so this layer
//! only ever inflates.

use std::borrow::Cow;
use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::error::UnpackError;
use crate::node::Node;

/// Flag bit marking a zlib-compressed node payload.
pub const FLAG_COMPRESSED: u8 = 0x02;

/// Strips the flag byte and inflates the payload when its compressed bit
/// is set; uncompressed payloads are borrowed as-is.
pub fn unpack(payload: &[u8]) -> Result<Cow<'_, [u8]>, UnpackError> {
    let (&flags, rest) = payload.split_first().ok_or(UnpackError::MissingFlagByte)?;
    if flags & FLAG_COMPRESSED == 0 {
        return Ok(Cow::Borrowed(rest));
    }
    let mut inflated = Vec::new();
    ZlibDecoder::new(rest).read_to_end(&mut inflated)?;
    Ok(Cow::Owned(inflated))
}

/// Unpacks a flagged payload and decodes the node inside it.
pub fn decode_packed(payload: &[u8]) -> Result<Option<Node>, UnpackError> {
    let raw = unpack(payload)?;
    Ok(crate::decoder::decode(&raw)?)
}
