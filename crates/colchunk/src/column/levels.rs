//! Definition-level decoding and null detection.
//!
//! A level equal to the column's maximum definition level marks a present
//! value; anything lower marks a null at that definition depth. Levels are
//! hybrid-encoded at the front of the data page payload.

use colchunk_error::Result;

use super::bitutil::num_required_bits;
use super::encoding::rle_bp;
use super::read_buffer::ReadCursor;

/// Nullability for one data page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definitions {
    /// No null information: the column cannot hold nulls, or every value in
    /// the page turned out to be present. Levels are discarded in that case
    /// rather than carried around.
    NoNulls,
    /// The page holds nulls at the given page-relative positions.
    HasNulls { null_positions: Vec<usize> },
}

impl Definitions {
    pub fn null_count(&self) -> usize {
        match self {
            Self::NoNulls => 0,
            Self::HasNulls { null_positions } => null_positions.len(),
        }
    }
}

/// Decodes definition levels for a page of `num_values` logical values.
///
/// Skipped entirely when `max_def_level` is zero; the cursor is untouched
/// and no nulls are possible. An empty decode ("no data encoded") likewise
/// means every value is present.
pub fn read_definition_levels(
    cursor: &mut ReadCursor,
    max_def_level: i16,
    num_values: usize,
) -> Result<Definitions> {
    if max_def_level == 0 {
        return Ok(Definitions::NoNulls);
    }

    let bit_width = num_required_bits(max_def_level as u64);
    let levels = rle_bp::decode(cursor, bit_width, num_values)?;
    if levels.is_empty() {
        return Ok(Definitions::NoNulls);
    }

    let max = max_def_level as u64;
    let mut null_positions: Vec<usize> = levels
        .iter()
        .enumerate()
        .filter(|&(_, &level)| level != max)
        .map(|(idx, _)| idx)
        .collect();
    // Positions past the decoded list never reached full definition depth.
    null_positions.extend(levels.len()..num_values);

    if null_positions.is_empty() {
        Ok(Definitions::NoNulls)
    } else {
        Ok(Definitions::HasNulls { null_positions })
    }
}
