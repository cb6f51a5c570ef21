//! Wire tag bytes and the static token dictionaries.
//!
//! The dictionaries shrink frequent protocol strings to one byte (single-byte
//! table, indices 0..=235) or two bytes (four double-byte dictionaries,
//! selector byte + index byte). Tables are generated from `tokens.json` at
//! build time together with perfect-hash reverse maps, so both directions of
//! the lookup come from the same source.

/// Empty list / absent content marker.
pub const LIST_EMPTY: u8 = 0;
/// Stream terminator marker, passed through by transports, never produced by
/// the node codec itself.
pub const STREAM_END: u8 = 2;
/// First double-byte dictionary selector; selectors run through 239.
pub const DICTIONARY_0: u8 = 236;
/// Last double-byte dictionary selector.
pub const DICTIONARY_3: u8 = 239;
/// List header with a one-byte item count.
pub const LIST_8: u8 = 248;
/// List header with a big-endian 16-bit item count.
pub const LIST_16: u8 = 249;
/// Marker for a `user@server` address encoded as two strings.
pub const JID_PAIR: u8 = 250;
/// Hex blob, one-byte length follows.
pub const HEX_8: u8 = 251;
/// Raw bytes, one-byte length follows.
pub const BINARY_8: u8 = 252;
/// Raw bytes, big-endian 20-bit length in three bytes follows.
pub const BINARY_20: u8 = 253;
/// Raw bytes, big-endian 32-bit length follows.
pub const BINARY_32: u8 = 254;
/// Fixed one-byte scalar follows.
pub const NIBBLE_8: u8 = 255;

include!(concat!(env!("OUT_DIR"), "/token_tables.rs"));

/// Looks up a single-byte token by index. Unknown or reserved indices yield
/// the empty string so newer peer dictionaries stay decodable.
pub fn single_byte_token(index: u8) -> &'static str {
    SINGLE_BYTE_TOKENS.get(index as usize).copied().unwrap_or("")
}

/// Looks up a double-byte token by dictionary and index, with the same
/// permissive empty-string fallback as [`single_byte_token`].
pub fn double_byte_token(dictionary: u8, index: u8) -> &'static str {
    DOUBLE_BYTE_TOKENS
        .get(dictionary as usize)
        .and_then(|dict| dict.get(index as usize))
        .copied()
        .unwrap_or("")
}

/// Finds the single-byte index for a token, if the table carries it.
pub fn single_byte_index(token: &str) -> Option<u8> {
    SINGLE_BYTE_INDEX.get(token).copied()
}

/// Finds the (dictionary, index) pair for a token, if any dictionary
/// carries it.
pub fn double_byte_index(token: &str) -> Option<(u8, u8)> {
    DOUBLE_BYTE_INDEX.get(token).copied()
}

/// Whether a peeked tag byte starts a string scalar.
///
/// Only token indices 0 and 2 are excluded: 0 is the absent-child marker
/// and 2 the stream terminator, and treating either as a string would let
/// the greedy attribute loop swallow the content that follows. Index 1 is
/// a plain table slot, so it stays string-like even while the local table
/// leaves it empty — a newer peer dictionary may assign it.
pub fn is_string_tag(tag: u8) -> bool {
    matches!(tag, 1 | 3..=DICTIONARY_3 | JID_PAIR | BINARY_8..=BINARY_32)
}

/// Whether a peeked tag byte starts a raw binary payload.
pub fn is_blob_tag(tag: u8) -> bool {
    matches!(tag, BINARY_8..=BINARY_32)
}
