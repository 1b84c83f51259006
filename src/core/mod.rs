//! # Core Wire Components
//!
//! Low-level framing, codecs, and binary field encoding.
//!
//! This module is the foundation of the engine: it turns a byte stream into
//! [`packet::PacketFrame`]s and back, independently of protocol version.
//!
//! ## Components
//! - **Types**: VarInt/VarLong, strings, UUIDs, packed locations, raw NBT capture
//! - **Packet**: the `{ id, payload }` frame handed to dispatch
//! - **Codec**: length-prefixed framing with optional zlib compression
//!
//! ## Wire Format
//! ```text
//! compression off: [VarInt length] [VarInt packetId] [payload]
//! compression on:  [VarInt length] [VarInt dataLength] [zlib(packetId + payload) | packetId + payload]
//! ```
//!
//! ## Security
//! - Maximum frame size: 2 097 151 bytes (three-byte VarInt)
//! - Maximum inflated size: 8 MiB (prevents decompression bombs)
//! - Length validation before allocation

pub mod codec;
pub mod packet;
pub mod types;
