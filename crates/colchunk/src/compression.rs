//! Decompression extension point.
//!
//! The decoder itself only handles uncompressed pages. Callers that need a
//! real codec implement [`Codec`] and hand it to the page loader; nothing
//! in this crate ships one.

use std::fmt::Debug;

use colchunk_error::{DecodeError, Result};

use crate::basic::Compression;

/// Transforms a page's compressed bytes into its uncompressed form.
pub trait Codec: Debug + Sync + Send {
    /// Decompresses `src` into `dest`.
    ///
    /// `dest` is exactly the page's declared uncompressed size and must be
    /// filled completely.
    fn decompress(&self, src: &[u8], dest: &mut [u8]) -> Result<()>;
}

/// Creates the codec for a chunk's declared compression.
///
/// Uncompressed data needs no codec. Every real codec is unsupported here;
/// the error names the codec so callers know which extension to provide.
pub fn create_codec(compression: Compression) -> Result<Option<Box<dyn Codec>>> {
    match compression {
        Compression::Uncompressed => Ok(None),
        other => Err(DecodeError::unsupported("no codec implementation available")
            .with_field("compression", other)),
    }
}
