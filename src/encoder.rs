//! Recursive node encoder and the scalar writers it is built from.
//!
//! Encoding never fails on a well-formed node; the only error paths are the
//! wire length prefixes overflowing, which [`crate::Node::is_well_formed`]
//! rules out up front.

use crate::error::BinaryNodeError;
use crate::node::{Node, NodeContent};
use crate::token;

/// Encodes a node into its wire byte form.
pub fn encode(node: &Node) -> Result<Vec<u8>, BinaryNodeError> {
    let mut output = Vec::new();
    encode_node(node, &mut output)?;
    Ok(output)
}

/// Encodes an optional node; absence is the single `LIST_EMPTY` byte.
pub fn encode_optional(node: Option<&Node>) -> Result<Vec<u8>, BinaryNodeError> {
    match node {
        Some(node) => encode(node),
        None => Ok(vec![token::LIST_EMPTY]),
    }
}

/// Appends the wire form of `node` to `output`.
pub fn encode_node(node: &Node, output: &mut Vec<u8>) -> Result<(), BinaryNodeError> {
    write_list_header(node.list_size(), output)?;
    write_string(&node.tag, output)?;

    for (key, value) in &node.attrs {
        write_string(key, output)?;
        write_string(value, output)?;
    }

    match &node.content {
        NodeContent::None => {}
        NodeContent::Text(text) => write_string(text, output)?,
        NodeContent::Bytes(payload) => write_blob(payload, output)?,
        NodeContent::Nodes(children) => {
            for child in children {
                encode_node(child, output)?;
            }
        }
    }

    Ok(())
}

/// Emits a list-size header: `LIST_EMPTY`, `LIST_8` + count, or `LIST_16` +
/// big-endian count.
pub fn write_list_header(size: usize, output: &mut Vec<u8>) -> Result<(), BinaryNodeError> {
    if size == 0 {
        output.push(token::LIST_EMPTY);
    } else if size < 256 {
        output.push(token::LIST_8);
        output.push(size as u8);
    } else if let Ok(size) = u16::try_from(size) {
        output.push(token::LIST_16);
        output.extend_from_slice(&size.to_be_bytes());
    } else {
        return Err(BinaryNodeError::ListTooLarge(size));
    }
    Ok(())
}

/// Emits a string scalar, splitting `user@server` addresses into the
/// two-part `JID_PAIR` form when both halves are non-empty.
pub fn write_string(value: &str, output: &mut Vec<u8>) -> Result<(), BinaryNodeError> {
    if let Some((user, server)) = split_jid(value) {
        output.push(token::JID_PAIR);
        write_plain_string(user, output)?;
        write_plain_string(server, output)?;
        return Ok(());
    }
    write_plain_string(value, output)
}

fn split_jid(value: &str) -> Option<(&str, &str)> {
    let (user, server) = value.split_once('@')?;
    if user.is_empty() || server.is_empty() || server.contains('@') {
        return None;
    }
    Some((user, server))
}

fn write_plain_string(value: &str, output: &mut Vec<u8>) -> Result<(), BinaryNodeError> {
    if let Some(index) = token::single_byte_index(value) {
        output.push(index);
        return Ok(());
    }
    if let Some((dictionary, index)) = token::double_byte_index(value) {
        output.push(token::DICTIONARY_0 + dictionary);
        output.push(index);
        return Ok(());
    }
    write_blob(value.as_bytes(), output)
}

/// Emits opaque bytes behind the shortest fitting length prefix
/// (`BINARY_8`, `BINARY_20`, or `BINARY_32`).
pub fn write_blob(payload: &[u8], output: &mut Vec<u8>) -> Result<(), BinaryNodeError> {
    let len = payload.len();
    if len < 256 {
        output.push(token::BINARY_8);
        output.push(len as u8);
    } else if len < 1 << 20 {
        output.push(token::BINARY_20);
        output.push((len >> 16) as u8);
        output.push((len >> 8) as u8);
        output.push(len as u8);
    } else if let Ok(len) = u32::try_from(len) {
        output.push(token::BINARY_32);
        output.extend_from_slice(&len.to_be_bytes());
    } else {
        return Err(BinaryNodeError::PayloadTooLarge(len));
    }
    output.extend_from_slice(payload);
    Ok(())
}

/// Emits a hex blob (`HEX_8` + length + bytes); payloads too long for the
/// one-byte length fall back to the plain blob form.
pub fn write_hex_blob(payload: &[u8], output: &mut Vec<u8>) -> Result<(), BinaryNodeError> {
    if payload.len() < 256 {
        output.push(token::HEX_8);
        output.push(payload.len() as u8);
        output.extend_from_slice(payload);
        return Ok(());
    }
    write_blob(payload, output)
}

/// Emits the fixed one-byte nibble scalar.
pub fn write_nibble(value: u8, output: &mut Vec<u8>) {
    output.push(token::NIBBLE_8);
    output.push(value);
}
