//! # Protocol Layer
//!
//! Everything that depends on the protocol version or the connection phase.
//!
//! ## Components
//! - **Version**: supported protocol numbers and the per-version [`version::WireLayout`]
//! - **Palette**: per-version packet id tables, resolved once per connection
//! - **Packets**: typed payload decoders and encoders
//! - **Handshake**: the login state machine, encryption and session check
//! - **Forge**: pluggable mod-loader negotiation during login
//! - **Session**: account credentials and the external identity collaborators
//! - **Status**: server list ping
//! - **Dispatcher**: plugin-message routing by channel

pub mod dispatcher;
pub mod forge;
pub mod handshake;
pub mod packet_type;
pub mod packets;
pub mod palette;
pub mod session;
pub mod status;
pub mod version;

pub use dispatcher::ChannelDispatcher;
pub use handshake::{login, LoginContext, LoginSuccess};
pub use packet_type::{PacketTypeIn, PacketTypeOut};
pub use palette::{resolve, VersionPalette};
pub use version::WireLayout;
