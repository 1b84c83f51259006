//! Observability and Metrics
//!
//! Per-connection counters for framing, dispatch and chat verification.
//!
//! Uses atomic counters so the reader task, the processing task and the caller
//! issuing outbound sends can all record without locking.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, info};

/// Metrics collector for one connection
#[derive(Debug)]
pub struct ProtocolMetrics {
    /// Frames decoded from the transport
    pub frames_read: AtomicU64,
    /// Frames written to the transport
    pub frames_written: AtomicU64,
    /// Outbound frames that went out compressed
    pub frames_compressed: AtomicU64,
    /// Raw bytes received (after decryption)
    pub bytes_received: AtomicU64,
    /// Raw bytes sent (before encryption)
    pub bytes_sent: AtomicU64,
    /// Packets a handler consumed
    pub packets_handled: AtomicU64,
    /// Packets logged and skipped
    pub packets_skipped: AtomicU64,
    /// Inbound chat messages that verified
    pub chat_verified: AtomicU64,
    /// Inbound chat messages that did not verify
    pub chat_rejected: AtomicU64,
    /// Message acknowledgments sent to the server
    pub acknowledgments_sent: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

impl ProtocolMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            frames_read: AtomicU64::new(0),
            frames_written: AtomicU64::new(0),
            frames_compressed: AtomicU64::new(0),
            bytes_received: AtomicU64::new(0),
            bytes_sent: AtomicU64::new(0),
            packets_handled: AtomicU64::new(0),
            packets_skipped: AtomicU64::new(0),
            chat_verified: AtomicU64::new(0),
            chat_rejected: AtomicU64::new(0),
            acknowledgments_sent: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn frame_read(&self, byte_count: u64) {
        self.frames_read.fetch_add(1, Ordering::Relaxed);
        self.bytes_received.fetch_add(byte_count, Ordering::Relaxed);
    }

    pub fn frame_written(&self, byte_count: u64) {
        self.frames_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(byte_count, Ordering::Relaxed);
    }

    pub fn frame_compressed(&self) {
        self.frames_compressed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn packet_handled(&self) {
        self.packets_handled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn packet_skipped(&self) {
        self.packets_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of one inbound chat verification
    pub fn chat_checked(&self, verified: bool) {
        if verified {
            self.chat_verified.fetch_add(1, Ordering::Relaxed);
        } else {
            self.chat_rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn acknowledgment_sent(&self) {
        self.acknowledgments_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            frames_read: self.frames_read.load(Ordering::Relaxed),
            frames_written: self.frames_written.load(Ordering::Relaxed),
            frames_compressed: self.frames_compressed.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            packets_handled: self.packets_handled.load(Ordering::Relaxed),
            packets_skipped: self.packets_skipped.load(Ordering::Relaxed),
            chat_verified: self.chat_verified.load(Ordering::Relaxed),
            chat_rejected: self.chat_rejected.load(Ordering::Relaxed),
            acknowledgments_sent: self.acknowledgments_sent.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let s = self.snapshot();
        info!(
            frames_read = s.frames_read,
            frames_written = s.frames_written,
            frames_compressed = s.frames_compressed,
            bytes_received = s.bytes_received,
            bytes_sent = s.bytes_sent,
            packets_handled = s.packets_handled,
            packets_skipped = s.packets_skipped,
            chat_verified = s.chat_verified,
            chat_rejected = s.chat_rejected,
            acknowledgments_sent = s.acknowledgments_sent,
            uptime_seconds = s.uptime_seconds,
            "Connection metrics snapshot"
        );
    }
}

impl Default for ProtocolMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub frames_read: u64,
    pub frames_written: u64,
    pub frames_compressed: u64,
    pub bytes_received: u64,
    pub bytes_sent: u64,
    pub packets_handled: u64,
    pub packets_skipped: u64,
    pub chat_verified: u64,
    pub chat_rejected: u64,
    pub acknowledgments_sent: u64,
    pub uptime_seconds: u64,
}

/// Timer for measuring operation duration
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    /// Start timing an operation
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        debug!(
            operation = self.operation,
            duration_ms = duration.as_millis(),
            "Operation completed"
        );
    }
}
