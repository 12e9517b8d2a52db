//! Raw page payload loading.

use std::io::Read;

use colchunk_error::{DecodeError, Result, ResultExt};

use crate::compression::Codec;
use crate::metadata::PageHeader;

/// Reads one page's payload bytes from the stream.
///
/// Without a codec, a page whose compressed and uncompressed sizes differ is
/// rejected before any payload byte is consumed; this decoder ships no
/// codec, so compression lives behind the [`Codec`] extension point. With a
/// codec, the compressed bytes are read and decompressed to the declared
/// uncompressed size.
pub fn read_page_payload<R: Read>(
    stream: &mut R,
    header: &PageHeader,
    codec: Option<&dyn Codec>,
) -> Result<Vec<u8>> {
    let compressed = usize::try_from(header.compressed_page_size).map_err(|_| {
        DecodeError::corrupt("negative compressed page size")
            .with_field("compressed_page_size", header.compressed_page_size)
    })?;
    let uncompressed = usize::try_from(header.uncompressed_page_size).map_err(|_| {
        DecodeError::corrupt("negative uncompressed page size")
            .with_field("uncompressed_page_size", header.uncompressed_page_size)
    })?;

    if codec.is_none() && compressed != uncompressed {
        return Err(DecodeError::unsupported("compressed pages are not supported")
            .with_field("compressed_page_size", compressed)
            .with_field("uncompressed_page_size", uncompressed));
    }

    let mut raw = vec![0; compressed];
    stream
        .read_exact(&mut raw)
        .context("failed to read page body")?;

    match codec {
        None => Ok(raw),
        Some(codec) => {
            let mut page = vec![0; uncompressed];
            codec
                .decompress(&raw, &mut page)
                .context("failed to decompress page")?;
            Ok(page)
        }
    }
}
