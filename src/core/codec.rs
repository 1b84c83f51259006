//! # Frame Codec
//!
//! Length-prefixed framing with optional zlib compression.
//!
//! ## Wire Format
//! ```text
//! threshold <= 0 : [VarInt length] [VarInt packetId] [payload]
//! threshold  > 0 : [VarInt length] [VarInt dataLength] [body]
//!                  dataLength == 0 -> body is [VarInt packetId][payload] as-is
//!                  dataLength  > 0 -> body is zlib([VarInt packetId][payload]), inflating to dataLength
//! ```
//!
//! `FrameCodec` implements the tokio-util `Decoder`/`Encoder` pair so it can sit on any
//! plaintext byte buffer; the transport feeds it already-decrypted bytes.

use crate::core::packet::PacketFrame;
use crate::core::types::{peek_varint, put_varint, varint_len, PacketReader};
use crate::error::{constants, ProtocolError, Result};
use crate::utils::compression::{self, MAX_UNCOMPRESSED_SIZE};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

/// Largest frame length a 3-byte VarInt prefix can express.
pub const MAX_FRAME_LENGTH: usize = 2_097_151;

/// Framing state for one direction of a connection.
#[derive(Debug, Clone)]
pub struct FrameCodec {
    threshold: i32,
    negotiated: bool,
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCodec {
    /// Codec with compression disabled.
    pub fn new() -> Self {
        Self {
            threshold: -1,
            negotiated: false,
        }
    }

    /// Codec that starts with a known threshold.
    pub fn with_threshold(threshold: i32) -> Self {
        Self {
            threshold,
            negotiated: true,
        }
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn compression_enabled(&self) -> bool {
        self.threshold > 0
    }

    /// Record the threshold the server announced. Accepted once per connection.
    pub fn set_threshold(&mut self, threshold: i32) -> Result<()> {
        if self.negotiated {
            return Err(ProtocolError::Custom(
                constants::ERR_THRESHOLD_ALREADY_SET.into(),
            ));
        }
        self.threshold = threshold;
        self.negotiated = true;
        Ok(())
    }

    /// Encode one packet into `dst`.
    pub fn encode_frame(&self, id: i32, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
        let mut body = BytesMut::with_capacity(varint_len(id) + payload.len());
        put_varint(&mut body, id);
        body.put_slice(payload);

        if self.compression_enabled() {
            let threshold = self.threshold as usize;
            let (inner, compressed) = compression::maybe_compress(&body, threshold)?;
            let marker = if compressed { body.len() as i32 } else { 0 };
            let total = varint_len(marker) + inner.len();
            check_outbound_len(total)?;
            dst.reserve(varint_len(total as i32) + total);
            put_varint(dst, total as i32);
            put_varint(dst, marker);
            dst.put_slice(&inner);
            trace!(packet_id = id, body_len = body.len(), compressed, "Encoded frame");
        } else {
            check_outbound_len(body.len())?;
            dst.reserve(varint_len(body.len() as i32) + body.len());
            put_varint(dst, body.len() as i32);
            dst.put_slice(&body);
        }
        Ok(())
    }

    /// Decode the body of one frame whose length prefix has already been stripped.
    pub fn decode_body(&self, frame: Bytes) -> Result<PacketFrame> {
        let body = if self.compression_enabled() {
            let mut reader = PacketReader::new(frame.clone());
            let data_len = reader
                .read_varint()
                .map_err(|e| ProtocolError::frame(e.to_string(), &frame))?;
            match data_len {
                0 => reader.read_rest(),
                n if n < 0 => return Err(ProtocolError::frame(constants::ERR_NEGATIVE_LENGTH, &frame)),
                n if n as usize > MAX_UNCOMPRESSED_SIZE => {
                    return Err(ProtocolError::frame(
                        constants::ERR_OVERSIZED_UNCOMPRESSED,
                        &frame,
                    ))
                }
                n => {
                    let compressed = reader.read_rest();
                    let inflated = compression::decompress_exact(&compressed, n as usize)
                        .map_err(|_| ProtocolError::frame(constants::ERR_SIZE_MISMATCH, &frame))?;
                    Bytes::from(inflated)
                }
            }
        } else {
            frame.clone()
        };

        if body.is_empty() {
            return Err(ProtocolError::frame(constants::ERR_EMPTY_FRAME, &frame));
        }
        let mut reader = PacketReader::new(body);
        let id = reader
            .read_varint()
            .map_err(|e| ProtocolError::frame(e.to_string(), &frame))?;
        Ok(PacketFrame {
            id,
            payload: reader.read_rest(),
        })
    }
}

fn check_outbound_len(len: usize) -> Result<()> {
    if len > MAX_FRAME_LENGTH {
        return Err(ProtocolError::Custom(format!(
            "{}: {len} bytes",
            constants::ERR_OVERSIZED_FRAME
        )));
    }
    Ok(())
}

impl Decoder for FrameCodec {
    type Item = PacketFrame;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<PacketFrame>> {
        let Some((len, width)) = peek_varint(src)? else {
            return Ok(None);
        };
        if len < 0 {
            return Err(ProtocolError::frame(constants::ERR_NEGATIVE_LENGTH, src));
        }
        let len = len as usize;
        if len > MAX_FRAME_LENGTH {
            return Err(ProtocolError::frame(constants::ERR_OVERSIZED_FRAME, &src[..width]));
        }
        if src.len() < width + len {
            src.reserve(width + len - src.len());
            return Ok(None);
        }

        src.advance(width);
        let frame = src.split_to(len).freeze();
        self.decode_body(frame).map(Some)
    }
}

impl Encoder<PacketFrame> for FrameCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: PacketFrame, dst: &mut BytesMut) -> Result<()> {
        self.encode_frame(item.id, &item.payload, dst)
    }
}
