use crate::error::Result;
use crate::protocol::packet_type::PacketTypeOut;
use crate::protocol::palette::VersionPalette;
use crate::transport::TransportWriter;
use std::sync::Arc;
use tokio::io::AsyncWrite;
use tokio::sync::Mutex;
use tracing::trace;

/// Outbound half of a play connection.
///
/// Resolves semantic packet types through the connection's palette and
/// writes whole frames under a lock, so the processing task's automatic
/// replies and the caller's sends never interleave mid-frame. Callers that
/// need ordering between their own sends serialize them themselves.
pub struct PacketSender<W> {
    writer: Arc<Mutex<TransportWriter<W>>>,
    palette: Arc<VersionPalette>,
}

impl<W> Clone for PacketSender<W> {
    fn clone(&self) -> Self {
        Self {
            writer: Arc::clone(&self.writer),
            palette: Arc::clone(&self.palette),
        }
    }
}

impl<W: AsyncWrite + Unpin> PacketSender<W> {
    pub fn new(writer: TransportWriter<W>, palette: Arc<VersionPalette>) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            palette,
        }
    }

    pub fn palette(&self) -> &VersionPalette {
        &self.palette
    }

    /// Send one play packet. Fails if this version has no id for `packet`.
    pub async fn send(&self, packet: PacketTypeOut, payload: &[u8]) -> Result<()> {
        let id = self.palette.outgoing_id(packet)?;
        let mut writer = self.writer.lock().await;
        writer.write_frame(id, payload).await?;
        trace!(packet = %packet, packet_id = id, len = payload.len(), "Sent packet");
        Ok(())
    }

    pub async fn is_connected(&self) -> bool {
        self.writer.lock().await.is_connected()
    }

    /// Close the write side. Later sends fail with `ConnectionClosed`.
    pub async fn shutdown(&self) -> Result<()> {
        let mut writer = self.writer.lock().await;
        if writer.is_connected() {
            writer.shutdown().await?;
        }
        Ok(())
    }
}
