//! # Wire Data Types
//!
//! Readers and writers for the primitive field encodings used inside packet bodies.
//!
//! All multi-byte integers are big-endian. Variable-length integers use 7 data bits
//! per byte with the high bit as a continuation flag, least significant group first.
//!
//! ## Components
//! - **VarInt / VarLong**: length and identifier encoding
//! - **PacketReader**: cursor over a decoded payload, every short read is a `Decode` error
//! - **PacketWriter**: builder for outbound payloads
//! - **Location**: packed block position (x:26, z:26, y:12)

use crate::error::{constants, ProtocolError, Result};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use uuid::Uuid;

/// Maximum encoded width of a VarInt.
pub const VARINT_MAX_BYTES: usize = 5;

/// Maximum encoded width of a VarLong.
pub const VARLONG_MAX_BYTES: usize = 10;

/// Maximum string length in characters accepted on the wire.
pub const MAX_STRING_CHARS: usize = 32_767;

/// Number of bytes `value` occupies as a VarInt.
pub fn varint_len(value: i32) -> usize {
    let mut v = value as u32;
    let mut n = 1;
    while v >= 0x80 {
        v >>= 7;
        n += 1;
    }
    n
}

/// Append `value` as a VarInt.
pub fn put_varint(buf: &mut impl BufMut, value: i32) {
    let mut v = value as u32;
    loop {
        if v & !0x7F == 0 {
            buf.put_u8(v as u8);
            return;
        }
        buf.put_u8(((v & 0x7F) | 0x80) as u8);
        v >>= 7;
    }
}

/// Encode `value` as a standalone VarInt.
pub fn varint_bytes(value: i32) -> Vec<u8> {
    let mut out = Vec::with_capacity(varint_len(value));
    put_varint(&mut out, value);
    out
}

/// Try to decode a VarInt from the front of `src` without consuming it.
///
/// Returns `Ok(None)` when more bytes are needed and `Ok(Some((value, width)))` otherwise.
pub fn peek_varint(src: &[u8]) -> Result<Option<(i32, usize)>> {
    let mut value: u32 = 0;
    for (i, byte) in src.iter().enumerate() {
        if i >= VARINT_MAX_BYTES {
            return Err(ProtocolError::frame(constants::ERR_VARINT_TOO_LONG, src));
        }
        value |= ((byte & 0x7F) as u32) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(Some((value as i32, i + 1)));
        }
    }
    if src.len() >= VARINT_MAX_BYTES {
        return Err(ProtocolError::frame(constants::ERR_VARINT_TOO_LONG, src));
    }
    Ok(None)
}

/// Packed block coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Location {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Pack into the 64-bit wire representation.
    pub fn to_packed(self) -> i64 {
        (((self.x as i64) & 0x3FF_FFFF) << 38)
            | (((self.z as i64) & 0x3FF_FFFF) << 12)
            | ((self.y as i64) & 0xFFF)
    }

    /// Unpack from the 64-bit wire representation, sign-extending each axis.
    pub fn from_packed(v: i64) -> Self {
        Self {
            x: (v >> 38) as i32,
            y: ((v << 52) >> 52) as i32,
            z: ((v << 26) >> 38) as i32,
        }
    }
}

/// Cursor over a packet payload.
#[derive(Debug, Clone)]
pub struct PacketReader {
    buf: Bytes,
}

impl PacketReader {
    pub fn new(buf: Bytes) -> Self {
        Self { buf }
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub fn is_empty(&self) -> bool {
        !self.buf.has_remaining()
    }

    fn need(&self, n: usize, field: &str) -> Result<()> {
        if self.buf.remaining() < n {
            return Err(ProtocolError::truncated(field));
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.need(1, "u8")?;
        Ok(self.buf.get_u8())
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        self.need(1, "i8")?;
        Ok(self.buf.get_i8())
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        self.need(1, "bool")?;
        Ok(self.buf.get_u8() != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.need(2, "u16")?;
        Ok(self.buf.get_u16())
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.need(2, "i16")?;
        Ok(self.buf.get_i16())
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.need(4, "i32")?;
        Ok(self.buf.get_i32())
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.need(8, "i64")?;
        Ok(self.buf.get_i64())
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.need(8, "u64")?;
        Ok(self.buf.get_u64())
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.need(4, "f32")?;
        Ok(self.buf.get_f32())
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        self.need(8, "f64")?;
        Ok(self.buf.get_f64())
    }

    pub fn read_varint(&mut self) -> Result<i32> {
        let mut value: u32 = 0;
        for i in 0..VARINT_MAX_BYTES {
            let byte = self.read_u8().map_err(|_| ProtocolError::truncated("VarInt"))?;
            value |= ((byte & 0x7F) as u32) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value as i32);
            }
        }
        Err(ProtocolError::Decode(constants::ERR_VARINT_TOO_LONG.into()))
    }

    pub fn read_varlong(&mut self) -> Result<i64> {
        let mut value: u64 = 0;
        for i in 0..VARLONG_MAX_BYTES {
            let byte = self.read_u8().map_err(|_| ProtocolError::truncated("VarLong"))?;
            value |= ((byte & 0x7F) as u64) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value as i64);
            }
        }
        Err(ProtocolError::Decode("VarLong is too long".into()))
    }

    /// Read a VarInt that is used as a length and must not be negative.
    pub fn read_length(&mut self, field: &str) -> Result<usize> {
        let len = self.read_varint()?;
        usize::try_from(len)
            .map_err(|_| ProtocolError::Decode(format!("negative length {len} for {field}")))
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<Bytes> {
        self.need(n, "byte block")?;
        Ok(self.buf.split_to(n))
    }

    pub fn read_byte_array(&mut self) -> Result<Vec<u8>> {
        let len = self.read_length("byte array")?;
        Ok(self.read_bytes(len)?.to_vec())
    }

    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_length("string")?;
        if len > MAX_STRING_CHARS * 4 {
            return Err(ProtocolError::Decode(format!("string too long: {len} bytes")));
        }
        let raw = self.read_bytes(len)?;
        String::from_utf8(raw.to_vec())
            .map_err(|e| ProtocolError::Decode(format!("invalid UTF-8 string: {e}")))
    }

    pub fn read_uuid(&mut self) -> Result<Uuid> {
        self.need(16, "UUID")?;
        let hi = self.buf.get_u64();
        let lo = self.buf.get_u64();
        Ok(Uuid::from_u64_pair(hi, lo))
    }

    pub fn read_location(&mut self) -> Result<Location> {
        Ok(Location::from_packed(self.read_i64()?))
    }

    pub fn read_u64_array(&mut self) -> Result<Vec<u64>> {
        let len = self.read_length("long array")?;
        self.need(len.saturating_mul(8), "long array")?;
        (0..len).map(|_| self.read_u64()).collect()
    }

    /// Read an optional field guarded by a leading boolean.
    pub fn read_optional<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<Option<T>> {
        if self.read_bool()? {
            Ok(Some(read(self)?))
        } else {
            Ok(None)
        }
    }

    /// Skip one NBT value (with its root name) and return its raw bytes.
    pub fn read_nbt_raw(&mut self) -> Result<Bytes> {
        let snapshot = self.buf.clone();
        let tag = self.read_u8()?;
        if tag != 0 {
            let name_len = self.read_u16()? as usize;
            self.read_bytes(name_len)?;
            self.skip_nbt_payload(tag, 0)?;
        }
        let consumed = snapshot.len() - self.buf.len();
        Ok(snapshot.slice(..consumed))
    }

    fn skip_nbt_payload(&mut self, tag: u8, depth: usize) -> Result<()> {
        if depth > 512 {
            return Err(ProtocolError::Decode("NBT nesting too deep".into()));
        }
        match tag {
            1 => self.skip(1, "NBT byte"),
            2 => self.skip(2, "NBT short"),
            3 | 5 => self.skip(4, "NBT int"),
            4 | 6 => self.skip(8, "NBT long"),
            7 => {
                let n = self.read_nbt_len()?;
                self.skip(n, "NBT byte array")
            }
            8 => {
                let n = self.read_u16()? as usize;
                self.skip(n, "NBT string")
            }
            9 => {
                let inner = self.read_u8()?;
                let n = self.read_nbt_len()?;
                for _ in 0..n {
                    self.skip_nbt_payload(inner, depth + 1)?;
                }
                Ok(())
            }
            10 => loop {
                let inner = self.read_u8()?;
                if inner == 0 {
                    return Ok(());
                }
                let name_len = self.read_u16()? as usize;
                self.skip(name_len, "NBT name")?;
                self.skip_nbt_payload(inner, depth + 1)?;
            },
            11 => {
                let n = self.read_nbt_len()?;
                self.skip(n.saturating_mul(4), "NBT int array")
            }
            12 => {
                let n = self.read_nbt_len()?;
                self.skip(n.saturating_mul(8), "NBT long array")
            }
            other => Err(ProtocolError::Decode(format!("unknown NBT tag {other}"))),
        }
    }

    fn read_nbt_len(&mut self) -> Result<usize> {
        let n = self.read_i32()?;
        usize::try_from(n).map_err(|_| ProtocolError::Decode(format!("negative NBT length {n}")))
    }

    fn skip(&mut self, n: usize, field: &str) -> Result<()> {
        self.need(n, field)?;
        self.buf.advance(n);
        Ok(())
    }

    /// Take everything that is left.
    pub fn read_rest(&mut self) -> Bytes {
        let len = self.buf.len();
        self.buf.split_to(len)
    }
}

/// Builder for packet payloads.
#[derive(Debug, Default, Clone)]
pub struct PacketWriter {
    buf: BytesMut,
}

impl PacketWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(cap),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.buf.put_u8(v);
        self
    }

    pub fn i8(&mut self, v: i8) -> &mut Self {
        self.buf.put_i8(v);
        self
    }

    pub fn bool(&mut self, v: bool) -> &mut Self {
        self.buf.put_u8(v as u8);
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.buf.put_u16(v);
        self
    }

    pub fn i16(&mut self, v: i16) -> &mut Self {
        self.buf.put_i16(v);
        self
    }

    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.buf.put_i32(v);
        self
    }

    pub fn i64(&mut self, v: i64) -> &mut Self {
        self.buf.put_i64(v);
        self
    }

    pub fn f32(&mut self, v: f32) -> &mut Self {
        self.buf.put_f32(v);
        self
    }

    pub fn f64(&mut self, v: f64) -> &mut Self {
        self.buf.put_f64(v);
        self
    }

    pub fn varint(&mut self, v: i32) -> &mut Self {
        put_varint(&mut self.buf, v);
        self
    }

    pub fn string(&mut self, s: &str) -> &mut Self {
        put_varint(&mut self.buf, s.len() as i32);
        self.buf.put_slice(s.as_bytes());
        self
    }

    pub fn byte_array(&mut self, data: &[u8]) -> &mut Self {
        put_varint(&mut self.buf, data.len() as i32);
        self.buf.put_slice(data);
        self
    }

    pub fn raw(&mut self, data: &[u8]) -> &mut Self {
        self.buf.put_slice(data);
        self
    }

    pub fn uuid(&mut self, id: Uuid) -> &mut Self {
        let (hi, lo) = id.as_u64_pair();
        self.buf.put_u64(hi);
        self.buf.put_u64(lo);
        self
    }

    pub fn location(&mut self, loc: Location) -> &mut Self {
        self.buf.put_i64(loc.to_packed());
        self
    }

    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_known_encodings() {
        assert_eq!(varint_bytes(0), vec![0x00]);
        assert_eq!(varint_bytes(1), vec![0x01]);
        assert_eq!(varint_bytes(127), vec![0x7F]);
        assert_eq!(varint_bytes(128), vec![0x80, 0x01]);
        assert_eq!(varint_bytes(255), vec![0xFF, 0x01]);
        assert_eq!(varint_bytes(25565), vec![0xDD, 0xC7, 0x01]);
        assert_eq!(varint_bytes(2_147_483_647), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x07]);
        assert_eq!(varint_bytes(-1), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn test_peek_varint_needs_more() {
        assert!(peek_varint(&[0x80]).unwrap().is_none());
        assert_eq!(peek_varint(&[0xDD, 0xC7, 0x01, 0x42]).unwrap(), Some((25565, 3)));
    }

    #[test]
    fn test_peek_varint_too_long() {
        let err = peek_varint(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]).unwrap_err();
        assert!(matches!(err, ProtocolError::FrameDecode { .. }));
    }

    #[test]
    fn test_location_packing() {
        let loc = Location::new(-1, -64, 30_000_000 - 1);
        assert_eq!(Location::from_packed(loc.to_packed()), loc);

        let loc = Location::new(18357644, 831, -20882616);
        assert_eq!(Location::from_packed(loc.to_packed()), loc);
    }

    #[test]
    fn test_reader_reports_field_on_short_read() {
        let mut r = PacketReader::new(Bytes::from_static(&[0x00, 0x01]));
        let err = r.read_i32().unwrap_err();
        assert!(err.to_string().contains("i32"));
    }

    #[test]
    fn test_string_and_optional() {
        let mut w = PacketWriter::new();
        w.string("hello").bool(true).string("world").bool(false);
        let mut r = PacketReader::new(w.finish());
        assert_eq!(r.read_string().unwrap(), "hello");
        assert_eq!(r.read_optional(|r| r.read_string()).unwrap().as_deref(), Some("world"));
        assert_eq!(r.read_optional(|r| r.read_string()).unwrap(), None);
        assert!(r.is_empty());
    }

    #[test]
    fn test_uuid_is_two_big_endian_longs() {
        let id = Uuid::from_u64_pair(0x0102_0304_0506_0708, 0x090A_0B0C_0D0E_0F10);
        let mut w = PacketWriter::new();
        w.uuid(id);
        let bytes = w.finish();
        assert_eq!(&bytes[..], &(1u8..=16).collect::<Vec<_>>()[..]);
        assert_eq!(PacketReader::new(bytes).read_uuid().unwrap(), id);
    }

    #[test]
    fn test_nbt_compound_is_skipped_whole() {
        // compound "" { byte "a" = 1, list "l" of int [7, 8] } then trailing 0x2A
        let mut raw = vec![10u8, 0, 0];
        raw.extend_from_slice(&[1, 0, 1, b'a', 1]);
        raw.extend_from_slice(&[9, 0, 1, b'l', 3, 0, 0, 0, 2, 0, 0, 0, 7, 0, 0, 0, 8]);
        raw.push(0);
        let nbt_len = raw.len();
        raw.push(0x2A);

        let mut r = PacketReader::new(Bytes::from(raw));
        let nbt = r.read_nbt_raw().unwrap();
        assert_eq!(nbt.len(), nbt_len);
        assert_eq!(r.read_u8().unwrap(), 0x2A);
    }

    #[test]
    fn test_empty_nbt() {
        let mut r = PacketReader::new(Bytes::from_static(&[0x00, 0x05]));
        assert_eq!(r.read_nbt_raw().unwrap().len(), 1);
        assert_eq!(r.read_u8().unwrap(), 5);
    }
}
