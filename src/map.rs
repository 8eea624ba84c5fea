//! `Map`: an ordered u32-keyed mapping to Ingredients.

use anyhow::{bail, Result};

use crate::ingredient::Ingredient;
use crate::marker::{make_marker, min_size_class, Kind};
use crate::ordered::{OrderedMap, U32KeyCodec};

#[derive(Debug, Clone, Default)]
pub struct Map {
    inner: OrderedMap<U32KeyCodec>,
}

impl Map {
    pub fn new() -> Self {
        Map::default()
    }

    pub fn insert(&mut self, key: u32, value: Ingredient<'static>) {
        self.inner.insert(key, value);
    }

    pub fn contains_key(&self, key: u32) -> bool {
        self.inner.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u32, &Ingredient<'static>)> {
        self.inner.iter()
    }

    /// Returns the shared not-found `Null` sentinel rather than erroring on
    /// a missing key.
    pub fn get(&self, key: u32) -> Ingredient<'static> {
        self.inner.get(&key).cloned().unwrap_or_else(Ingredient::null)
    }

    pub fn to_ingredient(&self) -> Result<Ingredient<'static>> {
        let payload = self.inner.encode_payload();
        let sc = min_size_class(payload.len() as u64);
        let mut buf = Vec::with_capacity(sc.header_width() + payload.len());
        buf.push(make_marker(sc, Kind::Map));
        buf.extend(crate::container::payload_len_bytes(sc, payload.len() as u64));
        buf.extend_from_slice(&payload);
        Ingredient::adopt(buf.into_boxed_slice())
    }

    pub fn from_ingredient(i: &Ingredient) -> Result<Self> {
        if i.kind() != Kind::Map {
            bail!("expected Map, got {:?}", i.kind());
        }
        Ok(Map {
            inner: OrderedMap::decode_payload(i.payload())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::{encode_bool, encode_null, encode_string};

    #[test]
    fn map_round_trip_preserves_all_value_kinds() {
        let mut m = Map::new();
        m.insert(0, encode_null());
        m.insert(1, encode_bool(true).unwrap());
        m.insert(2, encode_bool(false).unwrap());
        m.insert(3, encode_string("Testing").unwrap());
        let ingr = m.to_ingredient().unwrap();
        assert_eq!(ingr.marker(), 0x4D);
        assert_eq!(ingr.size(), 0x1E);

        let decoded = Map::from_ingredient(&ingr).unwrap();
        assert!(decoded.get(0).is_null());
        assert!(crate::scalar::to_bool(&decoded.get(1)));
        assert!(!crate::scalar::to_bool(&decoded.get(2)));
        assert_eq!(crate::scalar::to_string(&decoded.get(3)), "Testing");
    }

    #[test]
    fn missing_key_returns_null_sentinel_not_error() {
        let m = Map::new();
        assert!(m.get(7).is_null());
    }

    #[test]
    fn duplicate_keys_are_last_wins_on_decode() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(encode_null().bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(encode_bool(true).unwrap().bytes());
        let decoded = OrderedMapTestHelper::decode(&buf);
        assert!(crate::scalar::to_bool(&decoded.get(0)));
    }

    // Small helper to reuse Map's decode path directly against a hand-built
    // payload for the duplicate-key test above.
    struct OrderedMapTestHelper;
    impl OrderedMapTestHelper {
        fn decode(payload: &[u8]) -> Map {
            Map {
                inner: OrderedMap::decode_payload(payload).unwrap(),
            }
        }
    }
}
