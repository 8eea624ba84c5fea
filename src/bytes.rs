//! `Bytes` (Binary): an opaque blob prefixed by a 32-bit marshal hint.

use std::borrow::Cow;

use anyhow::{bail, Result};

use crate::ingredient::Ingredient;
use crate::marker::{make_marker, min_size_class, Kind};

#[derive(Debug, Clone)]
pub struct Bytes<'a> {
    marshal_hint: u32,
    data: Cow<'a, [u8]>,
}

impl<'a> Bytes<'a> {
    pub fn new(marshal_hint: u32, data: impl Into<Cow<'a, [u8]>>) -> Self {
        Bytes {
            marshal_hint,
            data: data.into(),
        }
    }

    pub fn marshal_hint(&self) -> u32 {
        self.marshal_hint
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The data length, excluding the 4-byte marshal hint.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn to_ingredient(&self) -> Result<Ingredient<'static>> {
        let payload_len = 4 + self.data.len();
        let sc = min_size_class(payload_len as u64);
        let mut buf = Vec::with_capacity(sc.header_width() + payload_len);
        buf.push(make_marker(sc, Kind::Binary));
        buf.extend(crate::container::payload_len_bytes(sc, payload_len as u64));
        buf.extend_from_slice(&self.marshal_hint.to_le_bytes());
        buf.extend_from_slice(&self.data);
        Ingredient::adopt(buf.into_boxed_slice())
    }

    pub fn from_ingredient(i: &Ingredient<'a>) -> Result<Bytes<'static>> {
        if i.kind() != Kind::Binary {
            bail!("expected Binary, got {:?}", i.kind());
        }
        let payload = i.payload();
        if payload.len() < 4 {
            bail!("truncated binary payload: need 4 hint bytes, have {}", payload.len());
        }
        let marshal_hint = u32::from_le_bytes(payload[..4].try_into().unwrap());
        let data = payload[4..].to_vec();
        Ok(Bytes {
            marshal_hint,
            data: Cow::Owned(data),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_round_trip() {
        let b = Bytes::new(0x2A, Cow::Borrowed(&b"payload"[..]));
        let ingr = b.to_ingredient().unwrap();
        let decoded = Bytes::from_ingredient(&ingr).unwrap();
        assert_eq!(decoded.marshal_hint(), 0x2A);
        assert_eq!(decoded.data(), b"payload");
        assert_eq!(decoded.size(), 7);
    }

    #[test]
    fn ingredient_size_includes_header_and_hint() {
        let b = Bytes::new(0, Cow::Borrowed(&b"ab"[..]));
        let ingr = b.to_ingredient().unwrap();
        // header_width(One) + 4-byte hint + 2 data bytes
        assert_eq!(ingr.size(), 2 + 4 + 2);
    }
}
