//! `Container`: an ordered sequence of arbitrary Ingredients.

use anyhow::{bail, Result};

use crate::ingredient::Ingredient;
use crate::marker::{make_marker, min_size_class, Kind};

#[derive(Debug, Clone, Default)]
pub struct Container {
    children: Vec<Ingredient<'static>>,
}

impl Container {
    pub fn new() -> Self {
        Container { children: Vec::new() }
    }

    pub fn from_children(children: Vec<Ingredient<'static>>) -> Self {
        Container { children }
    }

    pub fn push(&mut self, child: Ingredient<'static>) {
        self.children.push(child);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Out-of-range index returns `None` — callers that want the spec's
    /// not-found sentinel behavior should fall back to `Ingredient::null()`.
    pub fn get(&self, index: usize) -> Option<&Ingredient<'static>> {
        self.children.get(index)
    }

    pub fn children(&self) -> &[Ingredient<'static>] {
        &self.children
    }

    /// Decode by repeatedly peeking a child's marker, computing its `size()`,
    /// and advancing the cursor until it exactly reaches the payload's end.
    /// Errors if a child would overshoot the remaining payload.
    pub fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut children = Vec::new();
        let mut cursor = 0usize;
        while cursor < payload.len() {
            let child = Ingredient::borrow(&payload[cursor..])?;
            let child_size = child.size() as usize;
            if cursor + child_size > payload.len() {
                bail!("container entry overshoots payload bounds");
            }
            children.push(child.into_owned());
            cursor += child_size;
        }
        Ok(Container { children })
    }

    /// Build a new Container Ingredient: header sized for the sum of child
    /// `size()` values, followed by the children's records verbatim.
    pub fn to_ingredient(&self) -> Result<Ingredient<'static>> {
        let payload: Vec<u8> = self.children.iter().flat_map(|c| c.bytes().to_vec()).collect();
        let sc = min_size_class(payload.len() as u64);
        let mut buf = Vec::with_capacity(sc.header_width() + payload.len());
        buf.push(make_marker(sc, Kind::Container));
        buf.extend(&payload_len_bytes(sc, payload.len() as u64));
        buf.extend_from_slice(&payload);
        Ingredient::adopt(buf.into_boxed_slice())
    }

    pub fn from_ingredient(i: &Ingredient) -> Result<Self> {
        if i.kind() != Kind::Container {
            bail!("expected Container, got {:?}", i.kind());
        }
        Self::decode_payload(i.payload())
    }
}

/// Encode the *total record size* (header + payload) as the little-endian
/// length field for `sc` — the length value is always the total record
/// size including the header, never the payload length alone.
pub(crate) fn payload_len_bytes(sc: crate::marker::SizeClass, payload_len: u64) -> Vec<u8> {
    let w = sc.length_bytes();
    if w == 0 {
        return Vec::new();
    }
    let total = payload_len + 1 + w as u64;
    let bytes = total.to_le_bytes();
    bytes[..w].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::{encode_bool, encode_null, encode_string};

    #[test]
    fn container_round_trip() {
        let mut c = Container::new();
        c.push(encode_string("Testing").unwrap());
        c.push(encode_bool(true).unwrap());
        c.push(encode_null());
        let ingr = c.to_ingredient().unwrap();
        let decoded = Container::from_ingredient(&ingr).unwrap();
        assert_eq!(decoded.len(), 3);
        assert_eq!(crate::scalar::to_string(decoded.get(0).unwrap()), "Testing");
    }

    #[test]
    fn tiling_invariant_holds() {
        let mut c = Container::new();
        c.push(encode_string("a").unwrap());
        c.push(encode_string("bb").unwrap());
        let ingr = c.to_ingredient().unwrap();
        let sum: u64 = c.children().iter().map(|ch| ch.size()).sum();
        assert_eq!(ingr.payload().len() as u64, sum);
    }
}
