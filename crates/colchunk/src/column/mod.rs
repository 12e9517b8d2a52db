//! Page iteration and value decoding for a single column chunk.

pub mod bitutil;
pub mod chunk_reader;
pub mod encoding;
pub mod levels;
pub mod page_reader;
pub mod read_buffer;
