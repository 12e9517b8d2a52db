//! Value decoding strategies.
//!
//! Three interchangeable strategies share one contract: consume a page
//! cursor and return an owned sequence of decoded items. `rle_bp` is the
//! backbone for both dictionary indices and definition levels; `plain`
//! decodes values directly; `dict` defers index resolution until the
//! dictionary is known.

pub mod dict;
pub mod plain;
pub mod rle_bp;
