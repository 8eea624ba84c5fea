//! `Ingredient`: the primitive carrier. A borrowed or owned byte region whose
//! first byte is a type-marker.

use std::borrow::Cow;

use anyhow::{bail, Context, Result};

use crate::marker::{header_width, kind_of, make_marker, size_class_of, Kind, SizeClass};

/// A single wire record: marker + optional length + payload.
///
/// Storage is a [`Cow`]: [`Ingredient::borrow`] wraps a caller-owned slice
/// with no allocation (`Cow::Borrowed`); [`Ingredient::clone_from`] and
/// [`Ingredient::adopt`] always allocate (`Cow::Owned`). Composites always
/// store `Ingredient<'static>` children — decoded composites never retain
/// borrowed views into the source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient<'a>(Cow<'a, [u8]>);

impl<'a> Ingredient<'a> {
    /// Wrap `buf` without copying. `buf` must contain at least one complete
    /// record starting at offset 0; only the header is read to determine how
    /// many bytes belong to this record, not the whole buffer.
    pub fn borrow(buf: &'a [u8]) -> Result<Ingredient<'a>> {
        let marker = *buf.first().context("truncated input: no marker byte")?;
        let sc = size_class_of(marker);
        let t = read_size(buf, sc)?;
        let t = t as usize;
        let w = header_width(sc);
        if t < w {
            bail!("record size {} smaller than its own header width {}", t, w);
        }
        if buf.len() < t {
            bail!("truncated input: record claims {} bytes, only {} available", t, buf.len());
        }
        Ok(Ingredient(Cow::Borrowed(&buf[..t])))
    }

    /// Copy `size()` bytes of `buf` into a new owned record.
    pub fn clone_from(buf: &[u8]) -> Result<Ingredient<'static>> {
        Ok(Ingredient::borrow(buf)?.into_owned())
    }

    /// Take ownership of a buffer that already contains a valid encoding.
    pub fn adopt(buf: Box<[u8]>) -> Result<Ingredient<'static>> {
        let vec = buf.into_vec();
        // Validate before adopting: the buffer must be exactly one record.
        let marker = *vec.first().context("truncated input: no marker byte")?;
        let sc = size_class_of(marker);
        let t = read_size(&vec, sc)? as usize;
        if vec.len() != t {
            bail!(
                "adopted buffer length {} does not match record size {}",
                vec.len(),
                t
            );
        }
        Ok(Ingredient(Cow::Owned(vec)))
    }

    /// The 1-byte `Null` value.
    pub fn null() -> Ingredient<'static> {
        Ingredient(Cow::Owned(vec![make_marker(SizeClass::Zero, Kind::Null)]))
    }

    /// Convert to an owned, `'static` record (no-op if already owned).
    pub fn into_owned(self) -> Ingredient<'static> {
        Ingredient(Cow::Owned(self.0.into_owned()))
    }

    pub fn marker(&self) -> u8 {
        self.0[0]
    }

    pub fn size_class(&self) -> SizeClass {
        size_class_of(self.marker())
    }

    pub fn kind(&self) -> Kind {
        kind_of(self.marker())
    }

    /// Full record length including the header.
    pub fn size(&self) -> u64 {
        // Safe to unwrap: construction already validated the length field.
        read_size(&self.0, self.size_class()).expect("Ingredient invariant: header already validated")
    }

    /// The bytes after the header.
    pub fn payload(&self) -> &[u8] {
        let w = header_width(self.size_class());
        &self.0[w..]
    }

    /// The full record (marker + length + payload).
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_null(&self) -> bool {
        self.kind() == Kind::Null
    }
}

/// Read the little-endian length field for `sc` out of `buf`, or `1` for
/// `SizeClass::Zero`. `buf` must contain at least `header_width(sc)` bytes.
fn read_size(buf: &[u8], sc: SizeClass) -> Result<u64> {
    let w = length_bytes_of(sc);
    if w == 0 {
        return Ok(1);
    }
    if buf.len() < 1 + w {
        bail!("truncated input: need {} header bytes, have {}", 1 + w, buf.len());
    }
    let field = &buf[1..1 + w];
    let mut acc: u64 = 0;
    for (i, b) in field.iter().enumerate() {
        acc |= (*b as u64) << (8 * i);
    }
    Ok(acc)
}

fn length_bytes_of(sc: SizeClass) -> usize {
    crate::marker::length_bytes(sc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_one_byte_and_recognized() {
        let n = Ingredient::null();
        assert_eq!(n.size(), 1);
        assert!(n.is_null());
        assert_eq!(n.payload().len(), 0);
    }

    #[test]
    fn borrow_reads_no_more_than_the_record() {
        let buf = [make_marker(SizeClass::Zero, Kind::True), 0xAA, 0xBB];
        let i = Ingredient::borrow(&buf).unwrap();
        assert_eq!(i.size(), 1);
        assert_eq!(i.bytes().to_vec(), vec![make_marker(SizeClass::Zero, Kind::True)]);
    }

    #[test]
    fn borrow_rejects_truncated_length_field() {
        let buf = [make_marker(SizeClass::One, Kind::String)];
        assert!(Ingredient::borrow(&buf).is_err());
    }

    #[test]
    fn clone_from_produces_owned_copy() {
        let buf = [make_marker(SizeClass::Zero, Kind::Null)];
        let owned = Ingredient::clone_from(&buf).unwrap();
        drop(buf);
        assert!(owned.is_null());
    }
}
