//! `Zip` (Compressed): an Ingredient whose payload is the Snappy-compressed
//! full byte image of exactly one other Ingredient.
//!
//! `Encoder::compress_vec` allocates to `snap::raw::max_compress_len` and
//! shrinks to the actual compressed size.

use anyhow::{bail, Context, Result};
use snap::raw::{Decoder, Encoder};

use crate::ingredient::Ingredient;
use crate::marker::{make_marker, min_size_class, Kind};

/// Compress `inner`'s full byte image and wrap it in a Zip Ingredient.
pub fn encode_zip(inner: &Ingredient) -> Result<Ingredient<'static>> {
    let mut encoder = Encoder::new();
    let compressed = encoder
        .compress_vec(inner.bytes())
        .context("snappy compression failed")?;
    let sc = min_size_class(compressed.len() as u64);
    let mut buf = Vec::with_capacity(sc.header_width() + compressed.len());
    buf.push(make_marker(sc, Kind::Zip));
    buf.extend(crate::container::payload_len_bytes(sc, compressed.len() as u64));
    buf.extend_from_slice(&compressed);
    Ingredient::adopt(buf.into_boxed_slice())
}

/// Decompress a Zip Ingredient's payload and adopt the result as the inner
/// Ingredient. Fails if Snappy decompression fails or the decompressed
/// bytes are not a valid Ingredient encoding.
pub fn decode_zip(i: &Ingredient) -> Result<Ingredient<'static>> {
    if i.kind() != Kind::Zip {
        bail!("expected Zip, got {:?}", i.kind());
    }
    let mut decoder = Decoder::new();
    let raw = decoder
        .decompress_vec(i.payload())
        .context("snappy decompression failed")?;
    Ingredient::adopt(raw.into_boxed_slice()).context("zip payload is not a valid Ingredient encoding")
}
