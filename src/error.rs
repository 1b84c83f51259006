//! # Error Types
//!
//! Error handling for the wire-protocol engine.
//!
//! This module defines every error variant that can occur while talking to a
//! game server, from low-level socket failures to a single packet whose payload
//! could not be decoded.
//!
//! ## Error Categories
//! - **Transport Errors**: socket faults, closed connections, timeouts
//! - **Frame Errors**: malformed length prefixes, truncated or corrupt frames
//! - **Negotiation Errors**: unsupported protocol versions, rejected logins, failed session checks
//! - **Packet Errors**: a specific packet failed to decode, wrapped with its context
//! - **Cryptographic Errors**: key parsing, encryption and signing failures
//!
//! Every fatal error maps onto a [`DisconnectReason`] so the consumer always receives
//! exactly one terminal notification.
//!
//! ## Example Usage
//! ```rust
//! use blockwire::error::{ProtocolError, Result};
//! use tracing::error;
//!
//! fn check_version(version: i32) -> Result<()> {
//!     if version > 760 {
//!         return Err(ProtocolError::UnsupportedVersion(version));
//!     }
//!     Ok(())
//! }
//!
//! if let Err(e) = check_version(9000) {
//!     error!(error = %e, reason = ?e.disconnect_reason(), "Cannot connect");
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Dispatcher-related error messages
    pub const ERR_DISPATCHER_WRITE_LOCK: &str = "Failed to acquire write lock on channel dispatcher";
    pub const ERR_DISPATCHER_READ_LOCK: &str = "Failed to acquire read lock on channel dispatcher";

    /// Frame errors
    pub const ERR_VARINT_TOO_LONG: &str = "VarInt is too long";
    pub const ERR_NEGATIVE_LENGTH: &str = "Negative frame length";
    pub const ERR_OVERSIZED_FRAME: &str = "Frame exceeds maximum length";
    pub const ERR_OVERSIZED_UNCOMPRESSED: &str = "Declared uncompressed size exceeds maximum";
    pub const ERR_SIZE_MISMATCH: &str = "Inflated size does not match declared size";
    pub const ERR_EMPTY_FRAME: &str = "Frame has no packet identifier";

    /// Connection errors
    pub const ERR_CONNECTION_CLOSED: &str = "Connection closed";
    pub const ERR_TIMEOUT: &str = "Operation timed out";
    pub const ERR_ALREADY_ENCRYPTED: &str = "Transport is already encrypted";

    /// Cryptographic errors
    pub const ERR_INVALID_PUBLIC_KEY: &str = "Invalid public key";
    pub const ERR_ENCRYPTION_FAILED: &str = "Encryption failed";
    pub const ERR_SIGNING_FAILED: &str = "Signing failed";

    /// Compression errors
    pub const ERR_COMPRESSION_FAILED: &str = "Compression failed";
    pub const ERR_DECOMPRESSION_FAILED: &str = "Decompression failed";
    pub const ERR_THRESHOLD_ALREADY_SET: &str = "Compression threshold was already negotiated";

    /// Login errors
    pub const ERR_LOGIN_LOOP_LIMIT: &str = "Too many login packets without success";
    pub const ERR_SESSION_REJECTED: &str = "Session service rejected the join request";
    pub const ERR_NOT_IN_PLAY: &str = "Connection is not in the play phase";

    /// Synchronization errors
    pub const ERR_LOCK_POISONED: &str = "Synchronization primitive poisoned";
}

/// Reason code carried by the single terminal notification sent to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisconnectReason {
    /// The server kicked the player during play.
    InGameKick,
    /// The server refused the login.
    LoginRejected,
    /// The socket failed, closed, or the byte stream became untrustworthy.
    ConnectionLost,
    /// External identity validation failed.
    SessionCheckFailed,
    /// The local user asked to disconnect.
    UserLogout,
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InGameKick => "in-game kick",
            Self::LoginRejected => "login rejected",
            Self::ConnectionLost => "connection lost",
            Self::SessionCheckFailed => "session check failed",
            Self::UserLogout => "user logout",
        };
        f.write_str(s)
    }
}

// ProtocolError is the primary error type for all protocol operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Frame decode error: {reason} ({} raw bytes)", raw.len())]
    FrameDecode {
        reason: String,
        /// The offending frame bytes, as far as they could be read.
        raw: Vec<u8>,
    },

    #[error("Unsupported protocol version: {0}")]
    UnsupportedVersion(i32),

    #[error("Login rejected: {0}")]
    LoginRejected(String),

    #[error("Session check failed: {0}")]
    SessionCheckFailed(String),

    #[error("Failed to handle {packet_type} (id 0x{packet_id:02X}, protocol {protocol_version}, login phase {login_phase}): {source}")]
    PacketHandling {
        packet_type: String,
        packet_id: i32,
        protocol_version: i32,
        login_phase: bool,
        #[source]
        source: Box<ProtocolError>,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Compression failed")]
    CompressionFailure,

    #[error("Decompression failed")]
    DecompressionFailure,

    #[error("Timeout occurred")]
    Timeout,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(&'static str),

    #[error("Custom error: {0}")]
    Custom(String),
}

impl ProtocolError {
    /// Build a frame decode error that keeps the raw bytes for diagnostics.
    pub fn frame(reason: impl Into<String>, raw: &[u8]) -> Self {
        Self::FrameDecode {
            reason: reason.into(),
            raw: raw.to_vec(),
        }
    }

    /// Short-read helper used by the packet field readers.
    pub fn truncated(field: &str) -> Self {
        Self::Decode(format!("unexpected end of packet while reading {field}"))
    }

    /// Wrap a handler failure with the packet it was processing.
    pub fn in_packet(
        self,
        packet_type: impl fmt::Debug,
        packet_id: i32,
        protocol_version: i32,
        login_phase: bool,
    ) -> Self {
        Self::PacketHandling {
            packet_type: format!("{packet_type:?}"),
            packet_id,
            protocol_version,
            login_phase,
            source: Box::new(self),
        }
    }

    /// Reason code reported to the consumer when this error ends the connection.
    pub fn disconnect_reason(&self) -> DisconnectReason {
        match self {
            Self::LoginRejected(_) => DisconnectReason::LoginRejected,
            Self::SessionCheckFailed(_) => DisconnectReason::SessionCheckFailed,
            Self::PacketHandling { source, .. } => source.disconnect_reason(),
            _ => DisconnectReason::ConnectionLost,
        }
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
