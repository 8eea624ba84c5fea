//! `Header`: an ordered string-keyed mapping to Ingredients, NUL-terminated
//! keys on the wire.

use anyhow::{bail, Result};

use crate::ingredient::Ingredient;
use crate::marker::{make_marker, min_size_class, Kind};
use crate::ordered::{OrderedMap, StringKeyCodec};

#[derive(Debug, Clone, Default)]
pub struct Header {
    inner: OrderedMap<StringKeyCodec>,
}

impl Header {
    pub fn new() -> Self {
        Header::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Ingredient<'static>) {
        self.inner.insert(key.into(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(&key.to_string())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Ingredient<'static>)> {
        self.inner.iter()
    }

    /// Returns the shared not-found `Null` sentinel rather than erroring on
    /// a missing key.
    pub fn get(&self, key: &str) -> Ingredient<'static> {
        self.inner.get(&key.to_string()).cloned().unwrap_or_else(Ingredient::null)
    }

    /// Encodes keys in ascending sorted order, a deterministic total order
    /// chosen to make output reproducible regardless of insertion order.
    pub fn to_ingredient(&self) -> Result<Ingredient<'static>> {
        let payload = self.inner.encode_payload();
        let sc = min_size_class(payload.len() as u64);
        let mut buf = Vec::with_capacity(sc.header_width() + payload.len());
        buf.push(make_marker(sc, Kind::Header));
        buf.extend(crate::container::payload_len_bytes(sc, payload.len() as u64));
        buf.extend_from_slice(&payload);
        Ingredient::adopt(buf.into_boxed_slice())
    }

    pub fn from_ingredient(i: &Ingredient) -> Result<Self> {
        if i.kind() != Kind::Header {
            bail!("expected Header, got {:?}", i.kind());
        }
        Ok(Header {
            inner: OrderedMap::decode_payload(i.payload())?,
        })
    }
}
