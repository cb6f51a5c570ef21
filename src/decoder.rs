//! Recursive node decoder and the scalar readers it is built from.

use bytes::Bytes;
use indexmap::IndexMap;

use crate::error::BinaryNodeError;
use crate::node::{Node, NodeContent};
use crate::reader::ByteReader;
use crate::token;

/// Decodes one node from a byte buffer, rejecting trailing bytes.
///
/// Returns `Ok(None)` for the absent form (a lone `LIST_EMPTY` byte).
pub fn decode(input: &[u8]) -> Result<Option<Node>, BinaryNodeError> {
    let mut decoder = Decoder::new(input);
    let node = decoder.decode_node()?;
    if !decoder.is_eof() {
        return Err(BinaryNodeError::TrailingBytes);
    }
    Ok(node)
}

/// Streaming node decoder over a [`ByteReader`].
///
/// [`decode`] wraps this for the single-node case; callers holding a buffer
/// with several consecutive nodes drive it directly.
#[derive(Debug)]
pub struct Decoder<'a> {
    reader: ByteReader<'a>,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            reader: ByteReader::new(input),
        }
    }

    pub fn is_eof(&self) -> bool {
        self.reader.is_eof()
    }

    /// Decodes the next node, or `None` for the absent form.
    pub fn decode_node(&mut self) -> Result<Option<Node>, BinaryNodeError> {
        let list_size = self.read_list_size()?;
        if list_size == 0 {
            return Ok(None);
        }

        let tag = self.read_string()?;

        // Greedy attribute scan against an explicit consumed-item count:
        // a key/value pair is only taken while at least two items of the
        // budget remain, so a trailing string content item is never
        // misread as half an attribute.
        let budget = list_size - 1;
        let mut consumed = 0;
        let mut attrs = IndexMap::new();
        while budget - consumed >= 2 && token::is_string_tag(self.reader.peek_byte()?) {
            let key = self.read_string()?;
            let value = self.read_string()?;
            attrs.insert(key, value);
            consumed += 2;
        }

        let content = match budget - consumed {
            0 => NodeContent::None,
            1 => self.decode_single_content()?,
            count => {
                let mut children = Vec::with_capacity(count);
                for _ in 0..count {
                    if let Some(child) = self.decode_node()? {
                        children.push(child);
                    }
                }
                NodeContent::Nodes(children)
            }
        };

        Ok(Some(Node { tag, attrs, content }))
    }

    /// Classifies a single content item by its peeked tag byte: raw bytes
    /// stay opaque, dictionary/address forms are strings, anything else
    /// must be a nested node.
    fn decode_single_content(&mut self) -> Result<NodeContent, BinaryNodeError> {
        let next = self.reader.peek_byte()?;
        if token::is_blob_tag(next) {
            return Ok(NodeContent::Bytes(self.read_blob()?));
        }
        if token::is_string_tag(next) {
            return Ok(NodeContent::Text(self.read_string()?));
        }
        Ok(match self.decode_node()? {
            Some(child) => NodeContent::Nodes(vec![child]),
            None => NodeContent::None,
        })
    }

    /// Reads a list-size header byte plus its count field.
    pub fn read_list_size(&mut self) -> Result<usize, BinaryNodeError> {
        let tag = self.reader.read_byte()?;
        match tag {
            token::LIST_EMPTY => Ok(0),
            token::LIST_8 => Ok(usize::from(self.reader.read_byte()?)),
            token::LIST_16 => Ok(usize::from(self.reader.read_u16()?)),
            other => Err(BinaryNodeError::MalformedListHeader(other)),
        }
    }

    /// Reads a string scalar: token, dictionary, address pair, or
    /// length-prefixed UTF-8. Unknown dictionary entries decode to the
    /// empty string so newer peer dictionaries stay readable.
    pub fn read_string(&mut self) -> Result<String, BinaryNodeError> {
        let tag = self.reader.read_byte()?;
        match tag {
            0..token::DICTIONARY_0 => Ok(token::single_byte_token(tag).to_owned()),
            token::DICTIONARY_0..=token::DICTIONARY_3 => {
                let index = self.reader.read_byte()?;
                Ok(token::double_byte_token(tag - token::DICTIONARY_0, index).to_owned())
            }
            token::JID_PAIR => {
                let user = self.read_string()?;
                let server = self.read_string()?;
                Ok(format!("{user}@{server}"))
            }
            token::BINARY_8 | token::BINARY_20 | token::BINARY_32 => {
                let len = self.read_length(tag)?;
                let raw = self.reader.read_bytes(len)?;
                String::from_utf8(raw.to_vec()).map_err(|_| BinaryNodeError::InvalidUtf8)
            }
            other => Err(BinaryNodeError::InvalidStringTag(other)),
        }
    }

    /// Reads an opaque length-prefixed payload, copied out of the input.
    pub fn read_blob(&mut self) -> Result<Bytes, BinaryNodeError> {
        let tag = self.reader.read_byte()?;
        if !token::is_blob_tag(tag) {
            return Err(BinaryNodeError::InvalidBlobTag(tag));
        }
        let len = self.read_length(tag)?;
        Ok(Bytes::copy_from_slice(self.reader.read_bytes(len)?))
    }

    /// Reads a hex blob and returns its lowercase hex string form. The
    /// plain blob forms are accepted too, matching the encode-side
    /// fallback for payloads past the one-byte length.
    pub fn read_hex_blob(&mut self) -> Result<String, BinaryNodeError> {
        let tag = self.reader.read_byte()?;
        let len = match tag {
            token::HEX_8 => usize::from(self.reader.read_byte()?),
            _ if token::is_blob_tag(tag) => self.read_length(tag)?,
            other => return Err(BinaryNodeError::InvalidHexTag(other)),
        };
        Ok(hex::encode(self.reader.read_bytes(len)?))
    }

    /// Reads the fixed one-byte nibble scalar.
    pub fn read_nibble(&mut self) -> Result<u8, BinaryNodeError> {
        let tag = self.reader.read_byte()?;
        if tag != token::NIBBLE_8 {
            return Err(BinaryNodeError::InvalidNibbleTag(tag));
        }
        self.reader.read_byte()
    }

    fn read_length(&mut self, tag: u8) -> Result<usize, BinaryNodeError> {
        match tag {
            token::BINARY_8 => Ok(usize::from(self.reader.read_byte()?)),
            token::BINARY_20 => Ok(self.reader.read_u20()? as usize),
            token::BINARY_32 => Ok(self.reader.read_u32()? as usize),
            other => Err(BinaryNodeError::InvalidBlobTag(other)),
        }
    }
}
