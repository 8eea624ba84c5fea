//! Generic key-codec backing shared by [`crate::map::Map`] (u32 keys) and
//! [`crate::headers::Header`] (NUL-terminated string keys): the two differ
//! only in key framing, so both are `OrderedMap` parameterized over a
//! `KeyCodec`.

use std::collections::BTreeMap;

use anyhow::{bail, Result};

use crate::ingredient::Ingredient;

/// Reads and writes one composite's key framing.
pub trait KeyCodec {
    type Key: Ord + Clone;

    /// Read one key from the front of `buf`, returning the key and the
    /// number of bytes consumed (the key's on-wire framing, not including
    /// the child Ingredient that follows it).
    fn read_key(buf: &[u8]) -> Result<(Self::Key, usize)>;

    /// Append the on-wire framing for `key` to `out`.
    fn write_key(key: &Self::Key, out: &mut Vec<u8>);
}

/// `[ u32 key LE ]` framing, used by [`crate::map::Map`].
#[derive(Debug, Clone, Copy)]
pub struct U32KeyCodec;

impl KeyCodec for U32KeyCodec {
    type Key = u32;

    fn read_key(buf: &[u8]) -> Result<(u32, usize)> {
        if buf.len() < 4 {
            bail!("truncated map entry: need 4 key bytes, have {}", buf.len());
        }
        let key = u32::from_le_bytes(buf[..4].try_into().unwrap());
        Ok((key, 4))
    }

    fn write_key(key: &u32, out: &mut Vec<u8>) {
        out.extend_from_slice(&key.to_le_bytes());
    }
}

/// `[ NUL-terminated UTF-8 key ]` framing, used by [`crate::headers::Header`].
/// The terminating `0x00` is consumed but not part of the key.
#[derive(Debug, Clone, Copy)]
pub struct StringKeyCodec;

impl KeyCodec for StringKeyCodec {
    type Key = String;

    fn read_key(buf: &[u8]) -> Result<(String, usize)> {
        let nul = buf
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| anyhow::anyhow!("truncated header entry: no NUL-terminated key"))?;
        let key = String::from_utf8(buf[..nul].to_vec())?;
        Ok((key, nul + 1))
    }

    fn write_key(key: &String, out: &mut Vec<u8>) {
        out.extend_from_slice(key.as_bytes());
        out.push(0);
    }
}

/// An ordered `Key -> Ingredient` mapping, backing both Map and Header.
///
/// Decode is order-preserving (last key wins on duplicates); encode always
/// emits ascending-key order, since the backing store is a `BTreeMap` — this
/// canonicalizes Map and Header output regardless of insertion order, which
/// keeps round-tripped and freshly-built records byte-identical.
#[derive(Debug, Clone)]
pub struct OrderedMap<C: KeyCodec> {
    entries: BTreeMap<C::Key, Ingredient<'static>>,
}

impl<C: KeyCodec> Default for OrderedMap<C> {
    fn default() -> Self {
        OrderedMap {
            entries: BTreeMap::new(),
        }
    }
}

impl<C: KeyCodec> OrderedMap<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: C::Key, value: Ingredient<'static>) {
        self.entries.insert(key, value);
    }

    pub fn get(&self, key: &C::Key) -> Option<&Ingredient<'static>> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &C::Key) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&C::Key, &Ingredient<'static>)> {
        self.entries.iter()
    }

    /// Decode repeated `[key][child]` entries from `payload`, tiling it
    /// exactly.
    pub fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut entries = BTreeMap::new();
        let mut cursor = 0usize;
        while cursor < payload.len() {
            let (key, key_width) = C::read_key(&payload[cursor..])?;
            cursor += key_width;
            let child = Ingredient::borrow(&payload[cursor..])?;
            let child_size = child.size() as usize;
            if cursor + child_size > payload.len() {
                bail!("composite entry overshoots payload bounds");
            }
            entries.insert(key, child.into_owned());
            cursor += child_size;
        }
        if cursor != payload.len() {
            bail!("composite payload not exactly tiled by its entries");
        }
        Ok(OrderedMap { entries })
    }

    /// Encode in ascending-key order.
    pub fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (key, child) in &self.entries {
            C::write_key(key, &mut out);
            out.extend_from_slice(child.bytes());
        }
        out
    }
}
