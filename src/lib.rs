//! Codec for the Ingredient format: a binary document format in which every
//! value is a self-describing record with a one-byte type-marker, an
//! optional inline length, and a payload. Documents are recursive:
//! containers, libraries, integer-keyed maps, string-keyed headers,
//! Snappy-compressed blocks, and opaque byte buffers all nest to arbitrary
//! depth.

pub mod bytes;
pub mod container;
pub mod headers;
pub mod ingredient;
pub mod library;
pub mod map;
pub mod marker;
pub mod ordered;
pub mod recipe;
pub mod scalar;
pub mod stream;
pub mod zip;

pub use bytes::Bytes;
pub use container::Container;
pub use headers::Header;
pub use ingredient::Ingredient;
pub use library::Library;
pub use map::Map;
pub use marker::{header_width, kind_of, length_bytes, make_marker, min_size_class, size_class_of, Kind, SizeClass};
pub use recipe::{Glossary, Recipe};
pub use stream::{read_ingredient, write_ingredient};
pub use zip::{decode_zip, encode_zip};
