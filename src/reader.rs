use crate::error::BinaryNodeError;

/// Bounds-checked forward cursor over an immutable byte slice.
///
/// Decoding is strictly forward-only: there is no seeking and no rewind.
#[derive(Debug)]
pub struct ByteReader<'a> {
    input: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, position: 0 }
    }

    /// Returns the byte at the cursor and advances past it.
    pub fn read_byte(&mut self) -> Result<u8, BinaryNodeError> {
        let byte = self
            .input
            .get(self.position)
            .copied()
            .ok_or(BinaryNodeError::BufferUnderrun)?;
        self.position += 1;
        Ok(byte)
    }

    /// Returns the next `len` bytes and advances past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], BinaryNodeError> {
        let end = self
            .position
            .checked_add(len)
            .ok_or(BinaryNodeError::BufferUnderrun)?;
        if end > self.input.len() {
            return Err(BinaryNodeError::BufferUnderrun);
        }
        let bytes = &self.input[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    /// Returns the byte at the cursor without advancing.
    pub fn peek_byte(&self) -> Result<u8, BinaryNodeError> {
        self.input
            .get(self.position)
            .copied()
            .ok_or(BinaryNodeError::BufferUnderrun)
    }

    /// Count of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.input.len() - self.position
    }

    pub fn is_eof(&self) -> bool {
        self.position == self.input.len()
    }

    pub fn read_u16(&mut self) -> Result<u16, BinaryNodeError> {
        let raw = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([raw[0], raw[1]]))
    }

    /// Reads a 20-bit big-endian length packed into three bytes; the top
    /// nibble of the first byte is ignored.
    pub fn read_u20(&mut self) -> Result<u32, BinaryNodeError> {
        let raw = self.read_bytes(3)?;
        Ok((u32::from(raw[0] & 0x0F) << 16) | (u32::from(raw[1]) << 8) | u32::from(raw[2]))
    }

    pub fn read_u32(&mut self) -> Result<u32, BinaryNodeError> {
        let raw = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_reads_and_remaining() {
        let mut reader = ByteReader::new(&[1, 2, 3, 4, 5]);
        assert_eq!(reader.peek_byte(), Ok(1));
        assert_eq!(reader.read_byte(), Ok(1));
        assert_eq!(reader.read_bytes(3), Ok(&[2, 3, 4][..]));
        assert_eq!(reader.remaining(), 1);
        assert_eq!(reader.read_byte(), Ok(5));
        assert!(reader.is_eof());
        assert_eq!(reader.read_byte(), Err(BinaryNodeError::BufferUnderrun));
        assert_eq!(reader.peek_byte(), Err(BinaryNodeError::BufferUnderrun));
    }

    #[test]
    fn read_past_end_fails_without_advancing_partially() {
        let mut reader = ByteReader::new(&[9, 9]);
        assert_eq!(reader.read_bytes(3), Err(BinaryNodeError::BufferUnderrun));
        assert_eq!(reader.remaining(), 2);
        assert_eq!(reader.read_bytes(2), Ok(&[9, 9][..]));
    }

    #[test]
    fn twenty_bit_length_ignores_top_nibble() {
        let mut reader = ByteReader::new(&[0xF1, 0x02, 0x03]);
        assert_eq!(reader.read_u20(), Ok(0x010203));
    }
}
