//! # Stream Transport
//!
//! Owns the raw byte stream to the server and the per-direction cipher state.
//!
//! The transport starts in plaintext. After the encryption response is sent,
//! `switch_to_encrypted` installs AES/CFB8 on both directions at once; from then
//! on every byte read is decrypted as it arrives and every byte written is
//! encrypted on the way out. The switch cannot be undone.
//!
//! Login drives a whole [`Transport`]; once play begins it is split into a
//! [`TransportReader`] owned by the reader task and a [`TransportWriter`] shared
//! by everything that sends.

use crate::core::codec::FrameCodec;
use crate::core::packet::PacketFrame;
use crate::core::types::varint_len;
use crate::error::{constants, ProtocolError, Result};
use crate::utils::crypto::{
    decrypt_in_place, encrypt_in_place, CipherDecryptor, CipherEncryptor, SharedSecret,
};
use crate::utils::metrics::ProtocolMetrics;
use crate::utils::timeout::with_timeout_error;
use bytes::{Bytes, BytesMut};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{split, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::net::TcpStream;
use tokio_util::codec::Decoder;
use tracing::{debug, info, instrument, trace};

const READ_CHUNK: usize = 8 * 1024;

/// Inbound half: buffered, decrypting reader with its own frame codec.
pub struct TransportReader<R> {
    inner: R,
    buf: BytesMut,
    cipher: Option<CipherDecryptor>,
    codec: FrameCodec,
    connected: Arc<AtomicBool>,
    metrics: Arc<ProtocolMetrics>,
}

impl<R: AsyncRead + Unpin> TransportReader<R> {
    fn new(inner: R, connected: Arc<AtomicBool>, metrics: Arc<ProtocolMetrics>) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(READ_CHUNK),
            cipher: None,
            codec: FrameCodec::new(),
            connected,
            metrics,
        }
    }

    /// Whether decrypted bytes are already buffered.
    pub fn has_data_available(&self) -> bool {
        !self.buf.is_empty()
    }

    pub fn is_encrypted(&self) -> bool {
        self.cipher.is_some()
    }

    pub fn codec(&self) -> &FrameCodec {
        &self.codec
    }

    /// Pull more bytes off the stream, decrypting only the newly read region.
    async fn fill(&mut self) -> Result<usize> {
        if !self.connected.load(Ordering::Acquire) {
            return Err(ProtocolError::ConnectionClosed);
        }
        let start = self.buf.len();
        self.buf.reserve(READ_CHUNK);
        let n = self.inner.read_buf(&mut self.buf).await?;
        if n == 0 {
            self.connected.store(false, Ordering::Release);
            debug!("Remote closed the stream");
            return Err(ProtocolError::ConnectionClosed);
        }
        if let Some(cipher) = self.cipher.as_mut() {
            decrypt_in_place(cipher, &mut self.buf[start..]);
        }
        trace!(bytes = n, "Read from stream");
        Ok(n)
    }

    /// Read exactly `n` plaintext bytes.
    pub async fn read_exact(&mut self, n: usize) -> Result<Bytes> {
        while self.buf.len() < n {
            self.fill().await?;
        }
        Ok(self.buf.split_to(n).freeze())
    }

    /// Read and decode the next complete frame.
    pub async fn read_frame(&mut self) -> Result<PacketFrame> {
        loop {
            let before = self.buf.len();
            if let Some(frame) = self.codec.decode(&mut self.buf)? {
                self.metrics.frame_read((before - self.buf.len()) as u64);
                return Ok(frame);
            }
            self.fill().await?;
        }
    }

    fn enable_decryption(&mut self, cipher: CipherDecryptor) {
        let mut cipher = cipher;
        // anything already buffered arrived after the switch point
        if !self.buf.is_empty() {
            decrypt_in_place(&mut cipher, &mut self.buf[..]);
        }
        self.cipher = Some(cipher);
    }
}

/// Outbound half: encrypting writer with its own frame codec.
pub struct TransportWriter<W> {
    inner: W,
    cipher: Option<CipherEncryptor>,
    codec: FrameCodec,
    connected: Arc<AtomicBool>,
    metrics: Arc<ProtocolMetrics>,
}

impl<W: AsyncWrite + Unpin> TransportWriter<W> {
    fn new(inner: W, connected: Arc<AtomicBool>, metrics: Arc<ProtocolMetrics>) -> Self {
        Self {
            inner,
            cipher: None,
            codec: FrameCodec::new(),
            connected,
            metrics,
        }
    }

    pub fn is_encrypted(&self) -> bool {
        self.cipher.is_some()
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn codec(&self) -> &FrameCodec {
        &self.codec
    }

    /// Write bytes as-is, apart from the cipher.
    pub async fn write_raw(&mut self, data: &[u8]) -> Result<()> {
        if !self.is_connected() {
            return Err(ProtocolError::ConnectionClosed);
        }
        let mut out = data.to_vec();
        if let Some(cipher) = self.cipher.as_mut() {
            encrypt_in_place(cipher, &mut out);
        }
        let res = async {
            self.inner.write_all(&out).await?;
            self.inner.flush().await
        }
        .await;
        if let Err(e) = res {
            self.connected.store(false, Ordering::Release);
            return Err(ProtocolError::TransportError(e.to_string()));
        }
        Ok(())
    }

    /// Frame one packet with the current compression settings and send it.
    pub async fn write_frame(&mut self, id: i32, payload: &[u8]) -> Result<()> {
        let mut dst = BytesMut::with_capacity(payload.len() + 8);
        self.codec.encode_frame(id, payload, &mut dst)?;
        if self.codec.compression_enabled()
            && varint_len(id) + payload.len() >= self.codec.threshold() as usize
        {
            self.metrics.frame_compressed();
        }
        self.write_raw(&dst).await?;
        self.metrics.frame_written(dst.len() as u64);
        trace!(packet_id = id, len = dst.len(), "Wrote frame");
        Ok(())
    }

    /// Flush and close the write side. Further writes fail.
    pub async fn shutdown(&mut self) -> Result<()> {
        self.connected.store(false, Ordering::Release);
        self.inner.shutdown().await?;
        Ok(())
    }

    fn enable_encryption(&mut self, cipher: CipherEncryptor) {
        self.cipher = Some(cipher);
    }
}

/// The full-duplex transport used during login.
pub struct Transport<S> {
    reader: TransportReader<ReadHalf<S>>,
    writer: TransportWriter<WriteHalf<S>>,
    connected: Arc<AtomicBool>,
}

impl Transport<TcpStream> {
    /// Open a TCP connection, bounded by `timeout`.
    #[instrument(level = "debug", skip(metrics))]
    pub async fn connect(
        host: &str,
        port: u16,
        timeout: Duration,
        metrics: Arc<ProtocolMetrics>,
    ) -> Result<Self> {
        let stream = with_timeout_error(
            async {
                TcpStream::connect((host, port))
                    .await
                    .map_err(|e| ProtocolError::TransportError(format!("connect {host}:{port}: {e}")))
            },
            timeout,
        )
        .await?;
        stream.set_nodelay(true)?;
        info!(host, port, "Connected to server");
        Ok(Self::from_stream(stream, metrics))
    }
}

impl<S: AsyncRead + AsyncWrite> Transport<S> {
    /// Wrap an already-open stream.
    pub fn from_stream(stream: S, metrics: Arc<ProtocolMetrics>) -> Self {
        let connected = Arc::new(AtomicBool::new(true));
        let (r, w) = split(stream);
        Self {
            reader: TransportReader::new(r, connected.clone(), metrics.clone()),
            writer: TransportWriter::new(w, connected.clone(), metrics),
            connected,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn has_data_available(&self) -> bool {
        self.reader.has_data_available()
    }

    pub fn is_encrypted(&self) -> bool {
        self.writer.is_encrypted()
    }

    pub fn compression_threshold(&self) -> i32 {
        self.writer.codec().threshold()
    }

    pub async fn read_exact(&mut self, n: usize) -> Result<Bytes> {
        self.reader.read_exact(n).await
    }

    pub async fn write_raw(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_raw(data).await
    }

    pub async fn read_frame(&mut self) -> Result<PacketFrame> {
        self.reader.read_frame().await
    }

    pub async fn write_frame(&mut self, id: i32, payload: &[u8]) -> Result<()> {
        self.writer.write_frame(id, payload).await
    }

    /// Apply the server's compression threshold to both directions.
    pub fn set_compression_threshold(&mut self, threshold: i32) -> Result<()> {
        self.reader.codec.set_threshold(threshold)?;
        self.writer.codec.set_threshold(threshold)?;
        debug!(threshold, "Compression threshold set");
        Ok(())
    }

    /// Install the stream cipher in both directions. One-way.
    pub fn switch_to_encrypted(&mut self, secret: &SharedSecret) -> Result<()> {
        if self.is_encrypted() {
            return Err(ProtocolError::Crypto(constants::ERR_ALREADY_ENCRYPTED.into()));
        }
        let (enc, dec) = secret.ciphers()?;
        self.writer.enable_encryption(enc);
        self.reader.enable_decryption(dec);
        debug!("Transport switched to encrypted mode");
        Ok(())
    }

    pub async fn disconnect(&mut self) -> Result<()> {
        if self.is_connected() {
            self.writer.shutdown().await?;
        }
        Ok(())
    }

    /// Hand the two halves to the reader task and the senders.
    pub fn into_split(self) -> (TransportReader<ReadHalf<S>>, TransportWriter<WriteHalf<S>>) {
        (self.reader, self.writer)
    }
}
