//! # Service Layer
//!
//! The play-phase runtime built on top of the protocol layer.
//!
//! ## Components
//! - **Connection**: builder, login, task startup and the outbound API
//! - **Dispatch**: reader task, 20 Hz processor task and the one-shot terminator
//! - **Play**: per-packet-type handling and automatic replies
//! - **Handler**: the consumer callback trait
//! - **Sender**: palette-aware, frame-atomic outbound writes
//! - **State**: per-connection state shared between tasks
//!
//! ## Task Model
//! ```text
//! socket ─▶ reader task ─▶ mpsc (FIFO) ─▶ processor task ─▶ ProtocolHandler
//!                                              │
//! caller ─▶ Connection::send_* ────────────────┴─▶ PacketSender ─▶ socket
//! ```

pub mod connection;
pub mod dispatch;
pub mod handler;
pub mod play;
pub mod sender;
pub mod state;

pub use connection::{Connection, ConnectionBuilder};
pub use dispatch::Terminator;
pub use handler::{NoopHandler, PacketOutcome, ProtocolHandler};
pub use play::PlayHandler;
pub use sender::PacketSender;
pub use state::ConnectionState;
