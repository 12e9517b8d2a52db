//! Structured metadata records consumed by the decoder.
//!
//! These records arrive already deserialized from the file's compact wire
//! encoding. The decoder never parses the wire format itself; page headers
//! are pulled through the [`PageHeaderReader`] seam as the stream cursor
//! reaches them.

use colchunk_error::{DecodeError, Result};

use crate::basic::{Compression, Encoding, PageKind, PhysicalType};

/// Metadata for a single column chunk, read-only input to the decoder.
#[derive(Debug, Clone)]
pub struct ColumnChunkMetaData {
    /// Dotted path of the column within the schema.
    ///
    /// Only single-segment (flat) paths are supported.
    pub path_in_schema: Vec<String>,
    /// Total number of logical values in the chunk, nulls included.
    pub num_values: i64,
    /// Byte offset of the dictionary page. Zero means no dictionary page;
    /// zero is never a valid page position.
    pub dictionary_page_offset: i64,
    /// Byte offset of the first data page.
    pub data_page_offset: i64,
    /// Codec the chunk's pages are compressed with.
    pub compression: Compression,
}

impl ColumnChunkMetaData {
    /// Column name as materialized in the output: the joined schema path.
    pub fn column_name(&self) -> String {
        self.path_in_schema.join(".")
    }

    /// Offset of the first page in file order.
    ///
    /// The dictionary page, when present, precedes all data pages, so this
    /// is the minimum of the non-zero page offsets.
    pub fn first_page_offset(&self) -> Result<u64> {
        let offset = [self.dictionary_page_offset, self.data_page_offset]
            .into_iter()
            .filter(|&off| off != 0)
            .min()
            .ok_or_else(|| DecodeError::corrupt("chunk metadata contains no page offsets"))?;

        u64::try_from(offset).map_err(|_| {
            DecodeError::corrupt("negative page offset").with_field("offset", offset)
        })
    }
}

/// Schema-derived description of the column being decoded.
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    pub physical_type: PhysicalType,
    /// Declared value length for `FixedLenByteArray` columns.
    pub type_length: Option<i32>,
    /// Maximum definition level; zero for a column with no optional
    /// ancestors, meaning no value can be null.
    pub max_def_level: i16,
    /// Maximum repetition level; anything above zero means a nested,
    /// repeated column, which this decoder does not handle.
    pub max_rep_level: i16,
}

impl ColumnDescriptor {
    pub fn fixed_len(&self) -> Result<usize> {
        let len = self.type_length.ok_or_else(|| {
            DecodeError::corrupt("fixed length byte array column missing type length")
        })?;
        usize::try_from(len).map_err(|_| {
            DecodeError::corrupt("invalid type length for fixed length byte array")
                .with_field("type_length", len)
        })
    }
}

/// Header describing one page, read sequentially in file order.
#[derive(Debug, Clone)]
pub struct PageHeader {
    pub kind: PageKind,
    pub compressed_page_size: i32,
    pub uncompressed_page_size: i32,
    /// Present for data pages only.
    pub data_page_header: Option<DataPageHeader>,
}

impl PageHeader {
    pub fn data_page_header(&self) -> Result<&DataPageHeader> {
        self.data_page_header
            .as_ref()
            .ok_or_else(|| DecodeError::corrupt("data page is missing its data page header"))
    }
}

#[derive(Debug, Clone)]
pub struct DataPageHeader {
    /// Number of logical values in the page, nulls included.
    pub num_values: i32,
    pub encoding: Encoding,
}

/// Collaborator that deserializes page headers from the wire encoding.
///
/// Implementations read the header bytes at the stream's current position
/// and leave the stream positioned at the first byte of the page payload.
pub trait PageHeaderReader<R> {
    fn read_page_header(&mut self, stream: &mut R) -> Result<PageHeader>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(dict: i64, data: i64) -> ColumnChunkMetaData {
        ColumnChunkMetaData {
            path_in_schema: vec!["id".to_string()],
            num_values: 10,
            dictionary_page_offset: dict,
            data_page_offset: data,
            compression: Compression::Uncompressed,
        }
    }

    #[test]
    fn first_page_offset_prefers_dictionary() {
        assert_eq!(meta(4, 128).first_page_offset().unwrap(), 4);
    }

    #[test]
    fn first_page_offset_skips_absent_dictionary() {
        assert_eq!(meta(0, 128).first_page_offset().unwrap(), 128);
    }

    #[test]
    fn first_page_offset_rejects_empty() {
        meta(0, 0).first_page_offset().unwrap_err();
    }

    #[test]
    fn column_name_joins_path() {
        assert_eq!(meta(0, 4).column_name(), "id");
    }
}
