//! Decoder for a single column chunk of a Parquet-style columnar file.
//!
//! The caller supplies already-deserialized chunk metadata and a byte stream;
//! this crate walks the chunk's pages in file order, decodes values according
//! to each page's encoding (plain, RLE/bit-packing hybrid, or dictionary
//! indices), derives nullability from definition levels, and resolves
//! dictionary indices into materialized values.
//!
//! Wire-format deserialization of the metadata records themselves is out of
//! scope; page headers are read through the [`metadata::PageHeaderReader`]
//! seam. Compression is an extension point (see [`compression`]) with no
//! codecs shipped.

pub mod basic;
pub mod column;
pub mod compression;
pub mod metadata;
pub mod value;

#[cfg(test)]
pub mod testutil;
