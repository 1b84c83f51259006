//! # Transport Layer
//!
//! Byte-stream ownership and the per-direction stream cipher.
//!
//! ## Components
//! - **Stream**: buffered reader/writer halves over any `AsyncRead + AsyncWrite`,
//!   with the one-way switch to AES/CFB8
//! - **Session Cache**: in-memory store of servers already validated with the
//!   session service

pub mod session_cache;
pub mod stream;

pub use session_cache::SessionCache;
pub use stream::{Transport, TransportReader, TransportWriter};
