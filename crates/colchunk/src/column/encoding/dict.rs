//! Dictionary-index decoding and deferred resolution.
//!
//! A dictionary-encoded data page stores hybrid-encoded integer indices
//! into the chunk's dictionary. Indices accumulate across pages and are
//! resolved into materialized values only once the chunk's full index list
//! is known.

use colchunk_error::{DecodeError, Result};

use super::super::bitutil::num_required_bits;
use super::super::read_buffer::ReadCursor;
use super::rle_bp;
use crate::value::ValueSequence;

/// Bit width used for indices into a dictionary of `dict_len` entries.
///
/// A single-entry dictionary needs zero bits; every index is necessarily 0.
pub fn index_bit_width(dict_len: usize) -> u8 {
    num_required_bits(dict_len.saturating_sub(1) as u64)
}

/// Decodes `count` dictionary indices from the cursor.
pub fn read_indices(cursor: &mut ReadCursor, dict_len: usize, count: usize) -> Result<Vec<u64>> {
    let indices = rle_bp::decode(cursor, index_bit_width(dict_len), count)?;
    if indices.len() < count {
        return Err(
            DecodeError::corrupt("data page ended before its declared value count")
                .with_field("expected", count)
                .with_field("decoded", indices.len()),
        );
    }
    Ok(indices)
}

/// Maps every accumulated index through the dictionary.
pub fn resolve(dictionary: &ValueSequence, indices: &[u64]) -> Result<ValueSequence> {
    let dict_len = dictionary.len() as u64;
    for &idx in indices {
        if idx >= dict_len {
            return Err(DecodeError::corrupt("dictionary index out of range")
                .with_field("index", idx)
                .with_field("dictionary_len", dict_len));
        }
    }

    Ok(match dictionary {
        ValueSequence::Bool(dict) => {
            ValueSequence::Bool(indices.iter().map(|&i| dict[i as usize]).collect())
        }
        ValueSequence::Int32(dict) => {
            ValueSequence::Int32(indices.iter().map(|&i| dict[i as usize]).collect())
        }
        ValueSequence::Int64(dict) => {
            ValueSequence::Int64(indices.iter().map(|&i| dict[i as usize]).collect())
        }
        ValueSequence::ByteArray(dict) => {
            ValueSequence::ByteArray(indices.iter().map(|&i| dict[i as usize].clone()).collect())
        }
        ValueSequence::FixedLenByteArray(dict) => ValueSequence::FixedLenByteArray(
            indices.iter().map(|&i| dict[i as usize].clone()).collect(),
        ),
    })
}
