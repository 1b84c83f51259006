use crate::core::types::PacketReader;
use bytes::Bytes;

/// One decoded packet: its numeric identifier and the body that follows it.
///
/// The payload is already decrypted and decompressed and never includes the
/// length prefix or the identifier itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketFrame {
    pub id: i32,
    pub payload: Bytes,
}

impl PacketFrame {
    pub fn new(id: i32, payload: impl Into<Bytes>) -> Self {
        Self {
            id,
            payload: payload.into(),
        }
    }

    /// Cursor over the payload, leaving the frame untouched.
    pub fn reader(&self) -> PacketReader {
        PacketReader::new(self.payload.clone())
    }
}
