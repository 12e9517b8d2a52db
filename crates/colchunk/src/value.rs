//! Materialized value storage.
//!
//! Decoded values are held in a tagged variant over the closed set of
//! physical types, resolved once from the column descriptor at decode
//! start. Decoders return owned sequences; the chunk assembler concatenates
//! them explicitly.

use colchunk_error::{DecodeError, Result};

use crate::basic::PhysicalType;

/// An ordered sequence of decoded values of a single physical type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSequence {
    Bool(Vec<bool>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    ByteArray(Vec<Vec<u8>>),
    FixedLenByteArray(Vec<Vec<u8>>),
}

impl ValueSequence {
    pub fn empty(physical_type: PhysicalType) -> Self {
        match physical_type {
            PhysicalType::Boolean => Self::Bool(Vec::new()),
            PhysicalType::Int32 => Self::Int32(Vec::new()),
            PhysicalType::Int64 => Self::Int64(Vec::new()),
            PhysicalType::ByteArray => Self::ByteArray(Vec::new()),
            PhysicalType::FixedLenByteArray => Self::FixedLenByteArray(Vec::new()),
        }
    }

    pub fn physical_type(&self) -> PhysicalType {
        match self {
            Self::Bool(_) => PhysicalType::Boolean,
            Self::Int32(_) => PhysicalType::Int32,
            Self::Int64(_) => PhysicalType::Int64,
            Self::ByteArray(_) => PhysicalType::ByteArray,
            Self::FixedLenByteArray(_) => PhysicalType::FixedLenByteArray,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Bool(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::Int64(v) => v.len(),
            Self::ByteArray(v) => v.len(),
            Self::FixedLenByteArray(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends another sequence of the same physical type.
    pub fn append(&mut self, other: ValueSequence) -> Result<()> {
        match (self, other) {
            (Self::Bool(dst), Self::Bool(mut src)) => dst.append(&mut src),
            (Self::Int32(dst), Self::Int32(mut src)) => dst.append(&mut src),
            (Self::Int64(dst), Self::Int64(mut src)) => dst.append(&mut src),
            (Self::ByteArray(dst), Self::ByteArray(mut src)) => dst.append(&mut src),
            (Self::FixedLenByteArray(dst), Self::FixedLenByteArray(mut src)) => {
                dst.append(&mut src)
            }
            (dst, src) => {
                return Err(DecodeError::corrupt("mismatched value sequence types")
                    .with_field("expected", dst.physical_type())
                    .with_field("got", src.physical_type()));
            }
        }
        Ok(())
    }

    /// Builds a sequence from hybrid-decoded integers treated as raw values.
    ///
    /// Only booleans are RLE-encoded in practice; byte array types have no
    /// integer representation at all.
    pub fn from_unsigned(physical_type: PhysicalType, raw: Vec<u64>) -> Result<Self> {
        match physical_type {
            PhysicalType::Boolean => Ok(Self::Bool(raw.into_iter().map(|v| v != 0).collect())),
            PhysicalType::Int32 => Ok(Self::Int32(raw.into_iter().map(|v| v as i32).collect())),
            PhysicalType::Int64 => Ok(Self::Int64(raw.into_iter().map(|v| v as i64).collect())),
            other => Err(DecodeError::unsupported(
                "RLE value encoding is not supported for this physical type",
            )
            .with_field("physical_type", other)),
        }
    }
}

/// Null positions for a decoded chunk, derived from definition levels.
///
/// Values in the chunk output are dense (present values only, in stream
/// order); this mask records which logical positions were null. Produced
/// only when at least one null exists, so absence of a mask means "no null
/// information", not "unknown".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullMask {
    /// Logical length of the column, nulls included.
    pub len: usize,
    /// Sorted logical positions that hold null.
    pub null_positions: Vec<usize>,
}

impl NullMask {
    pub fn null_count(&self) -> usize {
        self.null_positions.len()
    }

    pub fn is_null(&self, idx: usize) -> bool {
        self.null_positions.binary_search(&idx).is_ok()
    }
}
