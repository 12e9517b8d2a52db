//! Plain decoding: values laid out directly in the byte stream.
//!
//! Fixed-width types consume a constant byte count per value. Byte arrays
//! are u32 little-endian length prefixed. Booleans are bit-packed eight per
//! byte, least-significant bit first.

use colchunk_error::Result;

use super::super::read_buffer::ReadCursor;
use crate::basic::PhysicalType;
use crate::metadata::ColumnDescriptor;
use crate::value::ValueSequence;

/// Reads exactly `count` plain-encoded values.
///
/// Used for data pages, where the count is known up front (the page's
/// declared value count minus its nulls).
pub fn read_values(
    cursor: &mut ReadCursor,
    descr: &ColumnDescriptor,
    count: usize,
) -> Result<ValueSequence> {
    match descr.physical_type {
        PhysicalType::Boolean => read_bools(cursor, count),
        PhysicalType::Int32 => {
            let mut out = Vec::with_capacity(count);
            for _ in 0..count {
                out.push(cursor.read_next::<i32>()?);
            }
            Ok(ValueSequence::Int32(out))
        }
        PhysicalType::Int64 => {
            let mut out = Vec::with_capacity(count);
            for _ in 0..count {
                out.push(cursor.read_next::<i64>()?);
            }
            Ok(ValueSequence::Int64(out))
        }
        PhysicalType::ByteArray => {
            let mut out = Vec::with_capacity(count);
            for _ in 0..count {
                out.push(read_byte_array(cursor)?);
            }
            Ok(ValueSequence::ByteArray(out))
        }
        PhysicalType::FixedLenByteArray => {
            let len = descr.fixed_len()?;
            let mut out = Vec::with_capacity(count);
            for _ in 0..count {
                out.push(cursor.read_bytes(len)?.to_vec());
            }
            Ok(ValueSequence::FixedLenByteArray(out))
        }
    }
}

/// Reads plain-encoded values until the buffer is exhausted.
///
/// Used for dictionary pages, whose headers carry no value count: the
/// entries themselves fill the payload, in dictionary index order.
pub fn read_to_end(cursor: &mut ReadCursor, descr: &ColumnDescriptor) -> Result<ValueSequence> {
    match descr.physical_type {
        PhysicalType::Boolean => {
            let count = cursor.remaining() * 8;
            read_bools(cursor, count)
        }
        PhysicalType::Int32 => {
            let mut out = Vec::new();
            while !cursor.is_empty() {
                out.push(cursor.read_next::<i32>()?);
            }
            Ok(ValueSequence::Int32(out))
        }
        PhysicalType::Int64 => {
            let mut out = Vec::new();
            while !cursor.is_empty() {
                out.push(cursor.read_next::<i64>()?);
            }
            Ok(ValueSequence::Int64(out))
        }
        PhysicalType::ByteArray => {
            let mut out = Vec::new();
            while !cursor.is_empty() {
                out.push(read_byte_array(cursor)?);
            }
            Ok(ValueSequence::ByteArray(out))
        }
        PhysicalType::FixedLenByteArray => {
            let len = descr.fixed_len()?;
            let mut out = Vec::new();
            while !cursor.is_empty() {
                out.push(cursor.read_bytes(len)?.to_vec());
            }
            Ok(ValueSequence::FixedLenByteArray(out))
        }
    }
}

fn read_bools(cursor: &mut ReadCursor, count: usize) -> Result<ValueSequence> {
    let bytes = cursor.read_bytes(count.div_ceil(8))?;
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        out.push((bytes[i / 8] >> (i % 8)) & 1 != 0);
    }
    Ok(ValueSequence::Bool(out))
}

fn read_byte_array(cursor: &mut ReadCursor) -> Result<Vec<u8>> {
    let len = cursor.read_next::<u32>()? as usize;
    Ok(cursor.read_bytes(len)?.to_vec())
}
