//! Column chunk assembly: drives page iteration for one chunk and produces
//! the final decoded column.

use std::io::{Read, Seek, SeekFrom};

use colchunk_error::{DecodeError, Result, ResultExt, unsupported};
use tracing::debug;

use super::encoding::{dict, plain, rle_bp};
use super::levels::{self, Definitions};
use super::page_reader;
use super::read_buffer::ReadCursor;
use crate::basic::{Encoding, PageKind, PhysicalType};
use crate::compression::{Codec, create_codec};
use crate::metadata::{ColumnChunkMetaData, ColumnDescriptor, PageHeaderReader};
use crate::value::{NullMask, ValueSequence};

/// Fully decoded output of one column chunk.
#[derive(Debug)]
pub struct DecodedColumn {
    /// Column name, the joined schema path.
    pub name: String,
    pub descr: ColumnDescriptor,
    /// Materialized values in stream order. Dense: when nulls are present,
    /// only the present values appear here.
    pub values: ValueSequence,
    /// Null positions derived from definition levels, if any value was null.
    pub nulls: Option<NullMask>,
    /// The chunk's dictionary, when a dictionary page was present.
    pub dictionary: Option<ValueSequence>,
    /// The raw index list `values` was resolved from, exposed for
    /// downstream inspection. Present only for dictionary-encoded chunks.
    pub indices: Option<Vec<u64>>,
}

/// Decodes a single column chunk from a seekable stream.
///
/// All state is chunk-local; a reader is created per chunk-read call and
/// consumed by it. Distinct chunks occupy disjoint byte ranges, so callers
/// may decode them concurrently with one reader each.
#[derive(Debug)]
pub struct ColumnChunkReader<R, H> {
    metadata: ColumnChunkMetaData,
    descr: ColumnDescriptor,
    stream: R,
    header_reader: H,
    codec: Option<Box<dyn Codec>>,
}

impl<R, H> ColumnChunkReader<R, H>
where
    R: Read + Seek,
    H: PageHeaderReader<R>,
{
    /// Creates a reader for the chunk, rejecting unsupported column shapes
    /// before any page is touched.
    pub fn try_new(
        metadata: ColumnChunkMetaData,
        descr: ColumnDescriptor,
        stream: R,
        header_reader: H,
    ) -> Result<Self> {
        if metadata.path_in_schema.len() != 1 {
            return Err(
                DecodeError::unsupported("column path in schema is not flat")
                    .with_field("path", metadata.path_in_schema.join(".")),
            );
        }
        if descr.max_rep_level > 0 {
            return Err(
                DecodeError::unsupported("repeated (nested) columns are not supported")
                    .with_field("max_rep_level", descr.max_rep_level),
            );
        }
        if descr.max_def_level > 1 {
            return Err(DecodeError::unsupported(
                "columns with more than one optional level are not supported",
            )
            .with_field("max_def_level", descr.max_def_level));
        }
        if descr.max_def_level < 0 || metadata.num_values < 0 {
            return Err(DecodeError::corrupt("negative count in chunk metadata")
                .with_field("num_values", metadata.num_values)
                .with_field("max_def_level", descr.max_def_level));
        }

        let codec = create_codec(metadata.compression)?;

        Ok(ColumnChunkReader {
            metadata,
            descr,
            stream,
            header_reader,
            codec,
        })
    }

    /// Decodes the whole chunk: seeks to the first page, walks pages in
    /// file order, and resolves the dictionary once all indices are known.
    pub fn read_chunk(mut self) -> Result<DecodedColumn> {
        let name = self.metadata.column_name();
        let total = self.metadata.num_values as usize;

        let offset = self.metadata.first_page_offset()?;
        self.stream
            .seek(SeekFrom::Start(offset))
            .context("failed to seek to first page")?;

        debug!(column = %name, num_values = total, "decoding column chunk");

        let mut header = self.header_reader.read_page_header(&mut self.stream)?;

        // The dictionary page, if any, comes first: entries in dictionary
        // index order, plain encoded.
        let mut dictionary = None;
        if header.kind == PageKind::DictionaryPage {
            let payload = page_reader::read_page_payload(
                &mut self.stream,
                &header,
                self.codec.as_deref(),
            )?;
            let mut cursor = ReadCursor::new(&payload);
            let entries = plain::read_to_end(&mut cursor, &self.descr)?;
            debug!(entries = entries.len(), "decoded dictionary page");
            dictionary = Some(entries);

            header = self.header_reader.read_page_header(&mut self.stream)?;
        }

        let mut values = ValueSequence::empty(self.descr.physical_type);
        let mut indices: Vec<u64> = Vec::new();
        let mut null_positions: Vec<usize> = Vec::new();
        let mut seen = 0usize;

        while seen < total {
            if header.kind == PageKind::DictionaryPage {
                return Err(DecodeError::corrupt(
                    "dictionary page found after the chunk's first page",
                ));
            }
            let data_header = header.data_page_header()?;
            let encoding = data_header.encoding;
            let num_values = usize::try_from(data_header.num_values).map_err(|_| {
                DecodeError::corrupt("negative value count in data page header")
                    .with_field("num_values", data_header.num_values)
            })?;

            let payload = page_reader::read_page_payload(
                &mut self.stream,
                &header,
                self.codec.as_deref(),
            )?;
            let mut cursor = ReadCursor::new(&payload);

            let defs =
                levels::read_definition_levels(&mut cursor, self.descr.max_def_level, num_values)?;
            let null_count = defs.null_count();
            if let Definitions::HasNulls {
                null_positions: page_nulls,
            } = defs
            {
                null_positions.extend(page_nulls.into_iter().map(|pos| seen + pos));
            }
            // Only present values have a physical representation in the page.
            let present = num_values - null_count;

            match encoding {
                Encoding::Plain => {
                    let page_values = plain::read_values(&mut cursor, &self.descr, present)?;
                    values.append(page_values)?;
                }
                Encoding::Rle => {
                    // RLE value pages carry no bit width of their own; only
                    // booleans (width 1) are encoded this way.
                    if self.descr.physical_type != PhysicalType::Boolean {
                        return Err(DecodeError::unsupported(
                            "RLE value encoding is only supported for boolean columns",
                        )
                        .with_field("physical_type", self.descr.physical_type));
                    }
                    let raw = rle_bp::decode(&mut cursor, 1, present)?;
                    if raw.len() < present {
                        return Err(DecodeError::corrupt(
                            "data page ended before its declared value count",
                        )
                        .with_field("expected", present)
                        .with_field("decoded", raw.len()));
                    }
                    values.append(ValueSequence::from_unsigned(PhysicalType::Boolean, raw)?)?;
                }
                Encoding::PlainDictionary => {
                    let dict_len = match &dictionary {
                        Some(dict) => dict.len(),
                        None => {
                            return Err(DecodeError::corrupt(
                                "dictionary-encoded page in a chunk without a dictionary page",
                            ));
                        }
                    };
                    indices.extend(dict::read_indices(&mut cursor, dict_len, present)?);
                }
                other => {
                    return Err(DecodeError::unsupported("data page encoding is not supported")
                        .with_field("encoding", other));
                }
            }

            seen += num_values;
            debug!(num_values, %encoding, total_seen = seen, "decoded data page");

            if seen > total {
                return Err(
                    DecodeError::corrupt("chunk holds more values than its metadata declares")
                        .with_field("declared", total)
                        .with_field("decoded", seen),
                );
            }
            if seen == total {
                break;
            }

            header = self.header_reader.read_page_header(&mut self.stream)?;
        }

        // Resolve deferred dictionary indices now that all of them are known.
        let (values, indices) = if indices.is_empty() {
            (values, None)
        } else {
            if !values.is_empty() {
                unsupported!("chunk mixes dictionary-encoded and directly-encoded data pages");
            }
            let resolved = match &dictionary {
                Some(dict) => dict::resolve(dict, &indices)?,
                None => {
                    return Err(DecodeError::corrupt(
                        "dictionary indices accumulated without a dictionary",
                    ));
                }
            };
            (resolved, Some(indices))
        };

        let nulls = if null_positions.is_empty() {
            None
        } else {
            Some(NullMask {
                len: total,
                null_positions,
            })
        };

        Ok(DecodedColumn {
            name,
            descr: self.descr,
            values,
            nulls,
            dictionary,
            indices,
        })
    }
}
