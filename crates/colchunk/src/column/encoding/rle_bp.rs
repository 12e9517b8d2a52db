//! RLE / bit-packing hybrid decoding.
//!
//! The encoding is a self-describing sequence of runs. Each run starts with
//! an unsigned vlq header: an even header is an RLE run of `header >> 1`
//! copies of a single `ceil(bit_width / 8)`-byte little-endian literal; an
//! odd header is `header >> 1` groups of 8 individually bit-packed values.
//! There is no terminator; decoding stops at the caller's target count or
//! when the buffer runs out.

use colchunk_error::{DecodeError, Result};

use super::super::bitutil::{read_unsigned_vlq, unpack};
use super::super::read_buffer::ReadCursor;

/// A decoded run header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Run {
    /// A single value repeated `len` times.
    Rle { value: u64, len: usize },
    /// `groups` groups of 8 bit-packed values each.
    BitPacked { groups: usize },
}

/// Reads the next run header plus, for RLE runs, the repeated literal.
fn read_run(cursor: &mut ReadCursor, bit_width: u8) -> Result<Run> {
    let header = read_unsigned_vlq(cursor)?;
    if header & 1 == 0 {
        let len = (header >> 1) as usize;
        // The literal is stored in the smallest whole number of bytes that
        // holds `bit_width` bits.
        let literal_bytes = (bit_width as usize).div_ceil(8);
        let mut value = 0u64;
        for (i, byte) in cursor.read_bytes(literal_bytes)?.iter().enumerate() {
            value |= (*byte as u64) << (8 * i);
        }
        Ok(Run::Rle { value, len })
    } else {
        Ok(Run::BitPacked {
            groups: (header >> 1) as usize,
        })
    }
}

/// Decodes hybrid-encoded integers until `target` values are produced or
/// the buffer is exhausted.
///
/// Excess values in the final run or group are discarded. Callers that
/// require exactly `target` values must check the returned length; a short
/// result here is not itself an error (definition levels legally encode
/// nothing at all).
pub fn decode(cursor: &mut ReadCursor, bit_width: u8, target: usize) -> Result<Vec<u64>> {
    let mut out = Vec::with_capacity(target);

    while out.len() < target && !cursor.is_empty() {
        match read_run(cursor, bit_width)? {
            Run::Rle { value, len } => {
                let take = usize::min(len, target - out.len());
                out.resize(out.len() + take, value);
            }
            Run::BitPacked { groups } => {
                if bit_width == 0 {
                    // Zero-width values carry no bits; only the count matters.
                    let take = usize::min(groups.saturating_mul(8), target - out.len());
                    out.resize(out.len() + take, 0);
                    continue;
                }
                // Check the declared size against the buffer before sizing
                // the output; a corrupt header must not drive allocation.
                let needed = groups.checked_mul(bit_width as usize).ok_or_else(|| {
                    DecodeError::corrupt("bit-packed run group count overflows")
                        .with_field("groups", groups)
                })?;
                if needed > cursor.remaining() {
                    return Err(
                        DecodeError::corrupt("bit-packed run larger than remaining buffer")
                            .with_field("needed", needed)
                            .with_field("remaining", cursor.remaining())
                            .with_field("byte_offset", cursor.byte_offset()),
                    );
                }
                // Groups are always unpacked whole so the cursor lands on
                // the byte boundary the encoder padded to.
                let start = out.len();
                out.resize(start + groups * 8, 0);
                unpack(cursor, bit_width, &mut out[start..])?;
                out.truncate(target.max(start));
            }
        }
    }

    out.truncate(target);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use colchunk_error::DecodeErrorKind;

    use super::*;
    use crate::testutil::{encode_bit_packed_run, encode_rle_run};

    #[test]
    fn mixed_runs() {
        // RLE run (value=5, len=3) followed by one bit-packed group of
        // [1, 2, 3, 4, 5, 6, 7, 8] at width 4.
        let mut raw = encode_rle_run(5, 3, 4);
        raw.extend(encode_bit_packed_run(&[1, 2, 3, 4, 5, 6, 7, 8], 4));

        let mut cursor = ReadCursor::new(&raw);
        let out = decode(&mut cursor, 4, 11).unwrap();
        assert_eq!(out, [5, 5, 5, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn bit_packed_excess_discarded() {
        // A group always holds 8 values; only the first 5 are wanted.
        let raw = encode_bit_packed_run(&[1, 2, 3, 4, 5, 6, 7, 8], 3);
        let mut cursor = ReadCursor::new(&raw);
        let out = decode(&mut cursor, 3, 5).unwrap();
        assert_eq!(out, [1, 2, 3, 4, 5]);
        // The whole group's bytes were still consumed.
        assert!(cursor.is_empty());
    }

    #[test]
    fn rle_excess_discarded() {
        let raw = encode_rle_run(1, 100, 1);
        let mut cursor = ReadCursor::new(&raw);
        let out = decode(&mut cursor, 1, 4).unwrap();
        assert_eq!(out, [1, 1, 1, 1]);
    }

    #[test]
    fn empty_buffer_decodes_nothing() {
        let mut cursor = ReadCursor::new(&[]);
        let out = decode(&mut cursor, 1, 10).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn multi_byte_rle_literal() {
        // Width 9 literals occupy 2 bytes.
        let raw = encode_rle_run(0x1AB, 4, 9);
        let mut cursor = ReadCursor::new(&raw);
        let out = decode(&mut cursor, 9, 4).unwrap();
        assert_eq!(out, [0x1AB; 4]);
    }

    #[test]
    fn truncated_group_is_corrupt() {
        // Header declares a group but the packed bytes are missing.
        let mut raw = encode_bit_packed_run(&[1, 2, 3, 4, 5, 6, 7, 8], 4);
        raw.truncate(2);
        let mut cursor = ReadCursor::new(&raw);
        let err = decode(&mut cursor, 4, 8).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::CorruptData);
    }
}
