use thiserror::Error;

/// Errors for binary node codec operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BinaryNodeError {
    #[error("read past end of payload")]
    BufferUnderrun,
    #[error("malformed list header byte: {0}")]
    MalformedListHeader(u8),
    #[error("invalid string tag byte: {0}")]
    InvalidStringTag(u8),
    #[error("invalid blob tag byte: {0}")]
    InvalidBlobTag(u8),
    #[error("invalid hex blob tag byte: {0}")]
    InvalidHexTag(u8),
    #[error("invalid nibble tag byte: {0}")]
    InvalidNibbleTag(u8),
    #[error("invalid utf-8 in string payload")]
    InvalidUtf8,
    #[error("node list size {0} exceeds 16-bit header")]
    ListTooLarge(usize),
    #[error("payload length {0} exceeds 32-bit length prefix")]
    PayloadTooLarge(usize),
    #[error("trailing bytes after node decode")]
    TrailingBytes,
}

/// Errors for the received-payload unpack layer.
#[derive(Debug, Error)]
pub enum UnpackError {
    #[error("payload is missing the flag byte")]
    MissingFlagByte,
    #[error("zlib inflate failed: {0}")]
    Inflate(#[from] std::io::Error),
    #[error(transparent)]
    Node(#[from] BinaryNodeError),
}
