//! Helpers for building encoded buffers and fake chunk streams in tests.

use std::collections::VecDeque;
use std::io;

use colchunk_error::{DecodeError, Result};

use crate::basic::{Compression, Encoding, PageKind, PhysicalType};
use crate::metadata::{
    ColumnChunkMetaData,
    ColumnDescriptor,
    DataPageHeader,
    PageHeader,
    PageHeaderReader,
};

/// Flat, required column of the given type.
pub fn descr(physical_type: PhysicalType) -> ColumnDescriptor {
    ColumnDescriptor {
        physical_type,
        type_length: None,
        max_def_level: 0,
        max_rep_level: 0,
    }
}

pub fn encode_vlq(mut v: u64) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        let byte = (v & 0x7F) as u8;
        v >>= 7;
        if v == 0 {
            out.push(byte);
            return out;
        }
        out.push(byte | 0x80);
    }
}

/// Encodes an RLE run: vlq `len << 1` then the literal in `ceil(w / 8)` bytes.
pub fn encode_rle_run(value: u64, len: u64, bit_width: u8) -> Vec<u8> {
    let mut out = encode_vlq(len << 1);
    let literal_bytes = (bit_width as usize).div_ceil(8);
    out.extend(&value.to_le_bytes()[..literal_bytes]);
    out
}

/// Encodes a bit-packed run; `values` must hold whole groups of 8.
pub fn encode_bit_packed_run(values: &[u64], bit_width: u8) -> Vec<u8> {
    assert_eq!(values.len() % 8, 0, "bit-packed runs hold whole groups of 8");
    let groups = values.len() / 8;
    let mut out = encode_vlq(((groups as u64) << 1) | 1);
    let start = out.len();
    out.resize(start + groups * bit_width as usize, 0);
    for (i, &v) in values.iter().enumerate() {
        let bit = i * bit_width as usize;
        for b in 0..bit_width as usize {
            if (v >> b) & 1 != 0 {
                out[start + (bit + b) / 8] |= 1 << ((bit + b) % 8);
            }
        }
    }
    out
}

pub fn encode_plain_i32(values: &[i32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * 4);
    for v in values {
        out.extend(v.to_le_bytes());
    }
    out
}

pub fn dict_page(payload: Vec<u8>) -> (PageHeader, Vec<u8>) {
    let size = payload.len() as i32;
    let header = PageHeader {
        kind: PageKind::DictionaryPage,
        compressed_page_size: size,
        uncompressed_page_size: size,
        data_page_header: None,
    };
    (header, payload)
}

pub fn data_page(num_values: i32, encoding: Encoding, payload: Vec<u8>) -> (PageHeader, Vec<u8>) {
    let size = payload.len() as i32;
    let header = PageHeader {
        kind: PageKind::DataPage,
        compressed_page_size: size,
        uncompressed_page_size: size,
        data_page_header: Some(DataPageHeader {
            num_values,
            encoding,
        }),
    };
    (header, payload)
}

/// Page header source backed by pre-parsed records.
///
/// Headers occupy no stream bytes here; only page payloads live in the
/// stream, which is what lets the fake chunk lay pages out back to back.
#[derive(Debug)]
pub struct VecPageHeaderReader {
    headers: VecDeque<PageHeader>,
}

impl<R> PageHeaderReader<R> for VecPageHeaderReader {
    fn read_page_header(&mut self, _stream: &mut R) -> Result<PageHeader> {
        self.headers
            .pop_front()
            .ok_or_else(|| DecodeError::truncated("stream ended before the next page header"))
    }
}

/// An in-memory column chunk: metadata, payload stream, and header source.
#[derive(Debug)]
pub struct TestChunk {
    pub metadata: ColumnChunkMetaData,
    pub stream: io::Cursor<Vec<u8>>,
    pub headers: VecPageHeaderReader,
}

impl TestChunk {
    /// Lays the pages' payloads out after a 4-byte magic pad, so no real
    /// page ever sits at offset zero (zero means "absent" in metadata).
    pub fn build(pages: Vec<(PageHeader, Vec<u8>)>, num_values: i64) -> Self {
        let mut bytes = b"PAR1".to_vec();
        let mut dictionary_page_offset = 0i64;
        let mut data_page_offset = 0i64;
        let mut headers = VecDeque::new();

        for (header, payload) in pages {
            let offset = bytes.len() as i64;
            match header.kind {
                PageKind::DictionaryPage => {
                    if dictionary_page_offset == 0 {
                        dictionary_page_offset = offset;
                    }
                }
                PageKind::DataPage => {
                    if data_page_offset == 0 {
                        data_page_offset = offset;
                    }
                }
            }
            bytes.extend(payload);
            headers.push_back(header);
        }

        TestChunk {
            metadata: ColumnChunkMetaData {
                path_in_schema: vec!["col".to_string()],
                num_values,
                dictionary_page_offset,
                data_page_offset,
                compression: Compression::Uncompressed,
            },
            stream: io::Cursor::new(bytes),
            headers: VecPageHeaderReader { headers },
        }
    }
}
