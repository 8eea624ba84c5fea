//! `Library`: an ordered sequence of strings — a Container whose elements
//! are all strings, used as a name ↔ index glossary.

use anyhow::{bail, Result};

use crate::container::Container;
use crate::ingredient::Ingredient;
use crate::marker::{make_marker, min_size_class, Kind};
use crate::scalar::{encode_string, to_string};

#[derive(Debug, Clone, Default)]
pub struct Library {
    entries: Vec<String>,
}

impl Library {
    pub fn new() -> Self {
        Library { entries: Vec::new() }
    }

    pub fn from_entries(entries: Vec<String>) -> Self {
        Library { entries }
    }

    pub fn push(&mut self, s: impl Into<String>) {
        self.entries.push(s.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn to_ingredient(&self) -> Result<Ingredient<'static>> {
        let children = self
            .entries
            .iter()
            .map(|s| encode_string(s))
            .collect::<Result<Vec<_>>>()?;
        let payload: Vec<u8> = children.iter().flat_map(|c| c.bytes().to_vec()).collect();
        let sc = min_size_class(payload.len() as u64);
        let mut buf = Vec::with_capacity(sc.header_width() + payload.len());
        buf.push(make_marker(sc, Kind::Library));
        buf.extend(crate::container::payload_len_bytes(sc, payload.len() as u64));
        buf.extend_from_slice(&payload);
        Ingredient::adopt(buf.into_boxed_slice())
    }

    /// Every child must be a String Ingredient; a non-string child is a
    /// structural error.
    pub fn from_ingredient(i: &Ingredient) -> Result<Self> {
        if i.kind() != Kind::Library {
            bail!("expected Library, got {:?}", i.kind());
        }
        let container = Container::decode_payload(i.payload())?;
        let mut entries = Vec::with_capacity(container.len());
        for child in container.children() {
            if child.kind() != Kind::String {
                bail!("Library contains a non-string child of kind {:?}", child.kind());
            }
            entries.push(to_string(child));
        }
        Ok(Library { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_round_trip_preserves_entry_order() {
        let lib = Library::from_entries(vec!["Testing".into(), "Testing.".into(), "Third".into()]);
        let ingr = lib.to_ingredient().unwrap();
        assert_eq!(
            ingr.bytes(),
            &[
                0x4C, 0x1C, 0x73, 0x09, b'T', b'e', b's', b't', b'i', b'n', b'g', 0x73, 0x0A, b'T', b'e', b's', b't',
                b'i', b'n', b'g', b'.', 0x73, 0x07, b'T', b'h', b'i', b'r', b'd'
            ]
        );
        let decoded = Library::from_ingredient(&ingr).unwrap();
        assert_eq!(decoded.entries(), lib.entries());
    }

    #[test]
    fn non_string_child_is_a_structural_error() {
        let mut container = Container::new();
        container.push(crate::scalar::encode_null());
        let ingr = container.to_ingredient().unwrap();
        // Re-tag the marker as Library to synthesize a malformed record.
        let mut bytes = ingr.bytes().to_vec();
        bytes[0] = (bytes[0] & 0xC0) | Kind::Library.code();
        let malformed = Ingredient::adopt(bytes.into_boxed_slice()).unwrap();
        assert!(Library::from_ingredient(&malformed).is_err());
    }
}
