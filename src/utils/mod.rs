//! # Utility Modules
//!
//! Supporting utilities for cryptography, compression, logging, and timing.
//!
//! This module provides reusable utilities used throughout the protocol implementation.
//!
//! ## Components
//! - **Crypto**: AES/CFB8 stream cipher, RSA key exchange, SHA256withRSA signatures
//! - **Compression**: zlib with a size limit and threshold helper
//! - **Logging**: `tracing-subscriber` installation from [`crate::config::LoggingConfig`]
//! - **Time**: epoch-millisecond helpers for key expiry and chat timestamps
//! - **Timeout**: async timeout wrappers
//! - **Metrics**: thread-safe observability counters
//!
//! ## Security
//! - Cryptographically secure RNG (getrandom)
//! - Decompression bomb protection (8 MiB limit)
//! - Memory zeroing for the shared secret and access token (zeroize crate)

pub mod compression;
pub mod crypto;
pub mod logging;
pub mod metrics;
pub mod time;
pub mod timeout;
