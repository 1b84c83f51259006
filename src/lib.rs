//! # blockwire
//!
//! Client-side engine for the Minecraft Java Edition wire protocol,
//! protocol versions 757 through 760 (1.18.1 to 1.19.2).
//!
//! It owns the byte stream and nothing above it: framing and compression,
//! login with encryption and the session check, the version palettes that map
//! packet ids to types, the reader/processor task pair, and the signed chat
//! chain. Rendering, physics and world simulation are left to the consumer,
//! which receives decoded packets through [`service::ProtocolHandler`].
//!
//! ## Layers
//! - [`core`]: VarInt and field codecs, frames, the compressing frame codec
//! - [`transport`]: buffered stream halves with the AES/CFB8 switch
//! - [`protocol`]: versions, palettes, packet bodies, login, status, forge
//! - [`chat`]: last-seen window, signing, per-sender chain state
//! - [`service`]: connection builder, dispatch loop, outbound API
//! - [`utils`]: crypto, compression, logging, metrics, timeouts
//!
//! ## Quick Start
//! ```rust,no_run
//! use blockwire::config::ClientConfig;
//! use blockwire::service::ConnectionBuilder;
//! use blockwire::utils::logging::init_logging;
//!
//! #[tokio::main]
//! async fn main() -> blockwire::error::Result<()> {
//!     let config = ClientConfig::from_env()?;
//!     init_logging(&config.logging)?;
//!
//!     // offline account named by BLOCKWIRE_USERNAME
//!     let mut conn = ConnectionBuilder::from_config(config)
//!         .with_session_cache()
//!         .connect()
//!         .await?;
//!     conn.send_chat("hello").await?;
//!     conn.closed().await;
//!     Ok(())
//! }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod chat;
pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod service;
pub mod transport;
pub mod utils;

pub use error::{DisconnectReason, ProtocolError, Result};
