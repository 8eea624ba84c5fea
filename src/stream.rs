//! Stream I/O: read-one-ingredient / write-one-ingredient against an
//! arbitrary byte source/sink.

use std::io::{Read, Write};

use anyhow::{bail, Result};

use crate::ingredient::Ingredient;
use crate::marker::{header_width, size_class_of};

/// Read exactly one Ingredient from `r`.
///
/// 1. Read the marker byte, compute its `SizeClass`.
/// 2. Read the length bytes for that class (0/1/2/8), interpret as the
///    total record size `t` (or `t = 1` for `SizeClass::Zero`).
/// 3. Read the remaining `t - header_width` payload bytes.
///
/// `Read::read_exact` already retries until the byte count is satisfied or
/// the stream reports failure; a short stream (fewer than `t` bytes
/// available) is a hard error.
pub fn read_ingredient<R: Read>(r: &mut R) -> Result<Ingredient<'static>> {
    let mut marker_buf = [0u8; 1];
    r.read_exact(&mut marker_buf)?;
    let sc = size_class_of(marker_buf[0]);

    let mut scratch = Vec::with_capacity(9);
    scratch.push(marker_buf[0]);

    let len_width = crate::marker::length_bytes(sc);
    if len_width > 0 {
        let mut len_buf = vec![0u8; len_width];
        r.read_exact(&mut len_buf)?;
        scratch.extend_from_slice(&len_buf);
    }

    let t: u64 = if len_width == 0 {
        1
    } else {
        let mut acc: u64 = 0;
        for (i, b) in scratch[1..].iter().enumerate() {
            acc |= (*b as u64) << (8 * i);
        }
        acc
    };

    let w = header_width(sc);
    if (t as usize) < w {
        bail!("record size {} smaller than its own header width {}", t, w);
    }
    let payload_len = t as usize - w;
    let mut payload = vec![0u8; payload_len];
    r.read_exact(&mut payload)?;

    let mut buf = scratch;
    buf.extend_from_slice(&payload);
    Ingredient::adopt(buf.into_boxed_slice())
}

/// Write `i`'s full byte image in one logical write.
pub fn write_ingredient<W: Write>(w: &mut W, i: &Ingredient) -> Result<()> {
    w.write_all(i.bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Container;
    use crate::scalar::{encode_bool, encode_null, encode_string};

    #[test]
    fn write_then_read_round_trips() {
        let mut c = Container::new();
        c.push(encode_string("Testing").unwrap());
        c.push(encode_bool(false).unwrap());
        c.push(encode_null());
        let original = c.to_ingredient().unwrap();

        let mut buf = Vec::new();
        write_ingredient(&mut buf, &original).unwrap();

        let mut cursor = std::io::Cursor::new(buf);
        let decoded = read_ingredient(&mut cursor).unwrap();
        assert_eq!(decoded.bytes(), original.bytes());
    }

    #[test]
    fn stream_of_two_records_reads_each_in_turn() {
        let a = encode_null();
        let b = encode_bool(true).unwrap();
        let mut buf = Vec::new();
        write_ingredient(&mut buf, &a).unwrap();
        write_ingredient(&mut buf, &b).unwrap();

        let mut cursor = std::io::Cursor::new(buf);
        let first = read_ingredient(&mut cursor).unwrap();
        let second = read_ingredient(&mut cursor).unwrap();
        assert_eq!(first.bytes(), a.bytes());
        assert_eq!(second.bytes(), b.bytes());
    }

    #[test]
    fn short_stream_is_a_hard_error() {
        let full = encode_string("hello").unwrap().bytes().to_vec();
        let truncated = &full[..full.len() - 1];
        let mut cursor = std::io::Cursor::new(truncated.to_vec());
        assert!(read_ingredient(&mut cursor).is_err());
    }
}
