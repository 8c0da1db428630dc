//! # Scalar Wire Codec - Canonical Byte Order Chokepoint
//!
//! ## Purpose
//!
//! The single place where primitive values meet raw bytes. Every payload
//! codec is built from [`WireReader`] / [`WireWriter`]; no other module
//! reads or writes wire bytes directly, so endianness normalization lives
//! exactly once.
//!
//! Canonical order is network byte order (big-endian) for every multi-byte
//! scalar, matching the original marshalling convention of the interface.
//!
//! ## Wire Scalars
//!
//! - 32/64-bit signed and unsigned integers, f32/f64
//! - booleans as an `i32` where only 0/1 decode
//! - fixed-capacity NUL-terminated text
//! - `NssDate` timestamps (tv_sec, tv_usec)
//! - enums as their `i32` discriminant, range-checked via `num_enum`
//! - 4-byte zero alignment padding, written and skipped explicitly

use byteorder::{BigEndian, ByteOrder};
use pdm_types::NssDate;

use crate::error::{WireError, WireResult};

/// Cursor over an incoming payload buffer.
///
/// Decoding never reads past the end: a short buffer yields
/// [`WireError::TruncatedInput`] naming the field that ran dry.
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left in the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, field: &'static str, len: usize) -> WireResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(WireError::TruncatedInput {
                field,
                needed: len,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn read_i32(&mut self, field: &'static str) -> WireResult<i32> {
        Ok(BigEndian::read_i32(self.take(field, 4)?))
    }

    pub fn read_u32(&mut self, field: &'static str) -> WireResult<u32> {
        Ok(BigEndian::read_u32(self.take(field, 4)?))
    }

    pub fn read_i64(&mut self, field: &'static str) -> WireResult<i64> {
        Ok(BigEndian::read_i64(self.take(field, 8)?))
    }

    pub fn read_u64(&mut self, field: &'static str) -> WireResult<u64> {
        Ok(BigEndian::read_u64(self.take(field, 8)?))
    }

    pub fn read_f32(&mut self, field: &'static str) -> WireResult<f32> {
        Ok(BigEndian::read_f32(self.take(field, 4)?))
    }

    pub fn read_f64(&mut self, field: &'static str) -> WireResult<f64> {
        Ok(BigEndian::read_f64(self.take(field, 8)?))
    }

    /// Boolean as i32; anything but 0 or 1 is a protocol violation.
    pub fn read_bool(&mut self, field: &'static str) -> WireResult<bool> {
        match self.read_i32(field)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(WireError::FieldOutOfRange {
                field,
                value: other as i64,
            }),
        }
    }

    /// Enum stored as its i32 discriminant, checked against the declared
    /// range.
    pub fn read_enum<T>(&mut self, field: &'static str) -> WireResult<T>
    where
        T: num_enum::TryFromPrimitive<Primitive = i32>,
    {
        let raw = self.read_i32(field)?;
        T::try_from_primitive(raw).map_err(|_| WireError::FieldOutOfRange {
            field,
            value: raw as i64,
        })
    }

    /// Fixed-capacity NUL-terminated text. A missing terminator within the
    /// capacity is a protocol violation, not a truncation; so is a byte
    /// sequence that is not UTF-8, since a substituted replacement
    /// character could no longer re-encode within the same capacity.
    pub fn read_text(&mut self, field: &'static str, capacity: usize) -> WireResult<String> {
        let raw = self.take(field, capacity)?;
        let nul = raw
            .iter()
            .position(|&b| b == 0)
            .ok_or(WireError::FieldOutOfRange {
                field,
                value: capacity as i64,
            })?;
        let text = std::str::from_utf8(&raw[..nul]).map_err(|e| WireError::FieldOutOfRange {
            field,
            value: raw[e.valid_up_to()] as i64,
        })?;
        Ok(text.to_owned())
    }

    pub fn read_date(&mut self, field: &'static str) -> WireResult<NssDate> {
        Ok(NssDate {
            tv_sec: self.read_i32(field)?,
            tv_usec: self.read_i32(field)?,
        })
    }

    /// Skip a 4-byte alignment padding field. Padding bytes are part of
    /// the wire contract; their value is not interpreted.
    pub fn skip_pad(&mut self, field: &'static str) -> WireResult<()> {
        self.take(field, 4)?;
        Ok(())
    }

    /// Raw byte run (packed coefficient blocks).
    pub fn read_bytes(&mut self, field: &'static str, len: usize) -> WireResult<&'a [u8]> {
        self.take(field, len)
    }
}

/// Growable output buffer for one payload.
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_f32(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_bool(&mut self, v: bool) {
        self.write_i32(v as i32);
    }

    pub fn write_enum<T>(&mut self, v: T)
    where
        T: Into<i32>,
    {
        self.write_i32(v.into());
    }

    /// Fixed-capacity NUL-terminated text, zero filled to capacity. The
    /// value must leave room for the terminator.
    pub fn write_text(
        &mut self,
        field: &'static str,
        value: &str,
        capacity: usize,
    ) -> WireResult<()> {
        let bytes = value.as_bytes();
        if bytes.len() >= capacity {
            return Err(WireError::FieldOutOfRange {
                field,
                value: bytes.len() as i64,
            });
        }
        self.buf.extend_from_slice(bytes);
        self.buf.extend(std::iter::repeat(0u8).take(capacity - bytes.len()));
        Ok(())
    }

    pub fn write_date(&mut self, v: NssDate) {
        self.write_i32(v.tv_sec);
        self.write_i32(v.tv_usec);
    }

    /// Emit a 4-byte zero alignment padding field.
    pub fn write_pad(&mut self) {
        self.buf.extend_from_slice(&[0u8; 4]);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }
}

impl Default for WireWriter {
    fn default() -> Self {
        Self::new()
    }
}
