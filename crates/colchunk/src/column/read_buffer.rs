//! Bounds-checked cursor over a fully-loaded page payload.

use colchunk_error::{DecodeError, Result};

/// Cursor over a page's raw bytes.
///
/// All reads are checked; running past the end of the buffer is a
/// `CorruptData` condition reporting the byte offset where it happened,
/// since the payload itself was already read in full from the stream.
#[derive(Debug)]
pub struct ReadCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ReadCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        ReadCursor { buf, pos: 0 }
    }

    /// Offset of the next unread byte, for error reporting.
    pub fn byte_offset(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.buf.len()
    }

    /// Reads `len` raw bytes, advancing the cursor.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(DecodeError::corrupt("read past end of page buffer")
                .with_field("byte_offset", self.pos)
                .with_field("requested", len)
                .with_field("remaining", self.remaining()));
        }
        let bs = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bs)
    }

    /// Reads the next little-endian value.
    pub fn read_next<T: LeValue>(&mut self) -> Result<T> {
        let bs = self.read_bytes(T::SIZE)?;
        Ok(T::from_le_slice(bs))
    }
}

/// Values readable from the cursor in little-endian byte order.
pub trait LeValue: Copy {
    const SIZE: usize;

    /// Builds Self from exactly `SIZE` little-endian bytes.
    fn from_le_slice(bs: &[u8]) -> Self;
}

macro_rules! impl_le_value {
    ($native:ty) => {
        impl LeValue for $native {
            const SIZE: usize = std::mem::size_of::<$native>();

            fn from_le_slice(bs: &[u8]) -> Self {
                // Length is guaranteed by the checked read.
                Self::from_le_bytes(bs.try_into().unwrap())
            }
        }
    };
}

impl_le_value!(u8);
impl_le_value!(u16);
impl_le_value!(u32);
impl_le_value!(u64);
impl_le_value!(i32);
impl_le_value!(i64);

#[cfg(test)]
mod tests {
    use colchunk_error::DecodeErrorKind;

    use super::*;

    #[test]
    fn read_primitives() {
        let raw = [0x2A, 0x00, 0x00, 0x00, 0xFF];
        let mut cursor = ReadCursor::new(&raw);
        assert_eq!(cursor.read_next::<i32>().unwrap(), 42);
        assert_eq!(cursor.read_next::<u8>().unwrap(), 0xFF);
        assert!(cursor.is_empty());
    }

    #[test]
    fn overrun_reports_offset() {
        let raw = [1, 2];
        let mut cursor = ReadCursor::new(&raw);
        cursor.read_bytes(1).unwrap();
        let err = cursor.read_next::<u32>().unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::CorruptData);
        assert_eq!(err.get_field("byte_offset"), Some("1"));
    }
}
