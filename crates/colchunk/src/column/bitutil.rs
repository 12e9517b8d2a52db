//! Bit-level primitives: unsigned varints and fixed-width bit unpacking.

use colchunk_error::{DecodeError, Result};

use super::read_buffer::ReadCursor;

/// All possible masks for an 8-byte wide value.
/// BITPACK_MASKS[n] = (1 << n) - 1
pub const BITPACK_MASKS: [u64; 65] = {
    let mut masks = [0; 65];
    let mut i = 0;
    while i < 64 {
        masks[i] = (1u64 << i) - 1;
        i += 1;
    }
    masks[64] = u64::MAX;
    masks
};

/// Smallest bit width such that `max` fits.
pub fn num_required_bits(max: u64) -> u8 {
    (64 - max.leading_zeros()) as u8
}

/// Reads an unsigned vlq from the cursor.
///
/// The most-significant bit acts as a continuation flag; the lower 7 bits
/// are accumulated into the result in little-endian order.
pub fn read_unsigned_vlq(cursor: &mut ReadCursor) -> Result<u64> {
    let mut result = 0u64;
    let mut shift = 0u8;
    loop {
        let byte = cursor.read_next::<u8>()?;
        result |= ((byte & 0x7F) as u64) << shift;
        // If the continuation bit is not set, we're done.
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
        if shift >= 64 {
            return Err(DecodeError::corrupt("VLQ integer too large")
                .with_field("byte_offset", cursor.byte_offset()));
        }
    }
    Ok(result)
}

/// Unpacks `out.len()` fixed-width values from the cursor.
///
/// Consumes exactly `ceil(bit_width * out.len() / 8)` bytes. Values may
/// span byte boundaries; bit width need not be a multiple of 8.
pub fn unpack(cursor: &mut ReadCursor, bit_width: u8, out: &mut [u64]) -> Result<()> {
    let width = bit_width as usize;
    if width > 64 {
        return Err(
            DecodeError::corrupt("bit width exceeds 64").with_field("bit_width", bit_width)
        );
    }
    if out.is_empty() {
        return Ok(());
    }
    if width == 0 {
        out.fill(0);
        return Ok(());
    }

    let total_bytes = (width * out.len()).div_ceil(8);
    let bytes = cursor.read_bytes(total_bytes)?;
    let mask = BITPACK_MASKS[width];

    let mut bit = 0usize;
    for dst in out {
        let byte = bit / 8;
        let shift = bit % 8;
        let mut v = (bytes[byte] as u64) >> shift;
        // Pull in subsequent bytes until the value is complete. Overflowing
        // high bits fall off the top and are cut by the mask.
        let mut filled = 8 - shift;
        let mut next = byte + 1;
        while filled < width {
            v |= (bytes[next] as u64) << filled;
            filled += 8;
            next += 1;
        }
        *dst = v & mask;
        bit += width;
    }

    Ok(())
}
