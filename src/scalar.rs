//! Scalar encode/decode pairs and the relaxed coercion helpers.

use anyhow::Result;

use crate::ingredient::Ingredient;
use crate::marker::{make_marker, Kind, SizeClass};

fn scalar(sc: SizeClass, k: Kind, payload: &[u8]) -> Result<Ingredient<'static>> {
    let mut buf = Vec::with_capacity(sc.header_width() + payload.len());
    buf.push(make_marker(sc, k));
    buf.extend(crate::container::payload_len_bytes(sc, payload.len() as u64));
    buf.extend_from_slice(payload);
    Ingredient::adopt(buf.into_boxed_slice())
}

pub fn encode_null() -> Ingredient<'static> {
    Ingredient::null()
}

pub fn encode_bool(v: bool) -> Result<Ingredient<'static>> {
    if v {
        scalar(SizeClass::Zero, Kind::True, &[])
    } else {
        scalar(SizeClass::Zero, Kind::False, &[])
    }
}

pub fn encode_float(v: f64) -> Result<Ingredient<'static>> {
    scalar(SizeClass::One, Kind::Float, &v.to_le_bytes())
}

pub fn encode_int32(v: i32) -> Result<Ingredient<'static>> {
    scalar(SizeClass::One, Kind::Int32, &v.to_le_bytes())
}

pub fn encode_int64(v: i64) -> Result<Ingredient<'static>> {
    scalar(SizeClass::One, Kind::Int64, &v.to_le_bytes())
}

pub fn encode_uint64(v: u64) -> Result<Ingredient<'static>> {
    scalar(SizeClass::One, Kind::UInt64, &v.to_le_bytes())
}

pub fn encode_string(v: &str) -> Result<Ingredient<'static>> {
    let sc = crate::marker::min_size_class(v.len() as u64);
    scalar(sc, Kind::String, v.as_bytes())
}

/// Zero/0.0/empty when asked to decode a wrong-kind Ingredient — these never
/// fail (a coercion mismatch is a benign default, not an error).
pub fn decode_float(i: &Ingredient) -> f64 {
    match i.kind() {
        Kind::Float => le_f64(i.payload()),
        Kind::Int32 => decode_int32(i) as f64,
        Kind::Int64 => decode_int64(i) as f64,
        Kind::UInt64 => decode_uint64(i) as f64,
        _ => 0.0,
    }
}

pub fn decode_int32(i: &Ingredient) -> i32 {
    match i.kind() {
        Kind::Int32 => le_i32(i.payload()),
        Kind::Int64 => decode_int64(i) as i32,
        Kind::UInt64 => decode_uint64(i) as i32,
        Kind::Float => decode_float(i) as i32,
        _ => 0,
    }
}

pub fn decode_int64(i: &Ingredient) -> i64 {
    match i.kind() {
        Kind::Int64 => le_i64(i.payload()),
        Kind::Int32 => decode_int32(i) as i64,
        Kind::UInt64 => decode_uint64(i) as i64,
        Kind::Float => decode_float(i) as i64,
        _ => 0,
    }
}

pub fn decode_uint64(i: &Ingredient) -> u64 {
    match i.kind() {
        Kind::UInt64 => le_u64(i.payload()),
        Kind::Int32 => decode_int32(i) as u64,
        Kind::Int64 => decode_int64(i) as u64,
        Kind::Float => decode_float(i) as u64,
        _ => 0,
    }
}

/// Raw bytes as UTF-8 for `String`; a canonical textual form for other
/// scalar kinds; empty for composites.
pub fn to_string(i: &Ingredient) -> String {
    match i.kind() {
        Kind::String => String::from_utf8_lossy(i.payload()).into_owned(),
        Kind::Null => "null".to_string(),
        Kind::True => "true".to_string(),
        Kind::False => "false".to_string(),
        Kind::Int32 => decode_int32(i).to_string(),
        Kind::Int64 => decode_int64(i).to_string(),
        Kind::UInt64 => decode_uint64(i).to_string(),
        Kind::Float => decode_float(i).to_string(),
        _ => String::new(),
    }
}

/// Relaxed bool coercion: Null/False → false; Int32/Int64/UInt64 → nonzero
/// test; any other kind → true.
pub fn to_bool(i: &Ingredient) -> bool {
    match i.kind() {
        Kind::Null | Kind::False => false,
        Kind::True => true,
        Kind::Int32 => decode_int32(i) != 0,
        Kind::Int64 => decode_int64(i) != 0,
        Kind::UInt64 => decode_uint64(i) != 0,
        _ => true,
    }
}

// ── Flags (bit vector) ──────────────────────────────────────────────────

/// Encode a bit vector. Only the byte count (`ceil(n/8)`) is recoverable
/// from the wire; callers that need the exact bit count `n` must track it
/// out-of-band.
pub fn encode_flags(bits: &[bool]) -> Result<Ingredient<'static>> {
    let nbytes = (bits.len() + 7) / 8;
    let mut payload = vec![0u8; nbytes];
    for (idx, bit) in bits.iter().enumerate() {
        if *bit {
            payload[idx >> 3] |= 1 << (idx & 7);
        }
    }
    let sc = crate::marker::min_size_class(payload.len() as u64);
    scalar(sc, Kind::Flags, &payload)
}

/// Decode the flags payload into `payload().len() * 8` bits (the on-wire
/// granularity; see `encode_flags`).
pub fn decode_flags(i: &Ingredient) -> Vec<bool> {
    let payload = i.payload();
    let mut out = Vec::with_capacity(payload.len() * 8);
    for byte in payload {
        for bit in 0..8 {
            out.push(byte & (1 << bit) != 0);
        }
    }
    out
}

pub fn flag_at(i: &Ingredient, idx: usize) -> bool {
    let payload = i.payload();
    match payload.get(idx >> 3) {
        Some(byte) => byte & (1 << (idx & 7)) != 0,
        None => false,
    }
}

fn le_f64(b: &[u8]) -> f64 {
    b.get(..8).and_then(|s| s.try_into().ok()).map(f64::from_le_bytes).unwrap_or(0.0)
}
fn le_i32(b: &[u8]) -> i32 {
    b.get(..4).and_then(|s| s.try_into().ok()).map(i32::from_le_bytes).unwrap_or(0)
}
fn le_i64(b: &[u8]) -> i64 {
    b.get(..8).and_then(|s| s.try_into().ok()).map(i64::from_le_bytes).unwrap_or(0)
}
fn le_u64(b: &[u8]) -> u64 {
    b.get(..8).and_then(|s| s.try_into().ok()).map(u64::from_le_bytes).unwrap_or(0)
}
