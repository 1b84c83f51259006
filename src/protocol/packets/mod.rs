//! # Packet Bodies
//!
//! Typed views of the payloads this crate reads and writes. Decoders take a
//! [`PacketReader`] positioned after the packet id plus the connection's
//! [`WireLayout`](crate::protocol::version::WireLayout); encoders return the
//! payload bytes and leave id lookup and framing to the sender.
//!
//! - [`login`]: handshake, status and login-phase packets (fixed ids)
//! - [`inbound`]: play-phase packets from the server
//! - [`outbound`]: play-phase packets to the server

pub mod inbound;
pub mod login;
pub mod outbound;

use crate::core::types::{PacketReader, PacketWriter};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Signed profile property (skins, capes) attached to a game profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileProperty {
    pub name: String,
    pub value: String,
    pub signature: Option<String>,
}

impl ProfileProperty {
    pub fn read(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            name: r.read_string()?,
            value: r.read_string()?,
            signature: r.read_optional(|r| r.read_string())?,
        })
    }

    pub fn write(&self, w: &mut PacketWriter) {
        w.string(&self.name).string(&self.value);
        match &self.signature {
            Some(sig) => w.bool(true).string(sig),
            None => w.bool(false),
        };
    }
}

/// VarInt-counted list of properties.
pub(crate) fn read_properties(r: &mut PacketReader) -> Result<Vec<ProfileProperty>> {
    let count = r.read_length("property count")?;
    (0..count).map(|_| ProfileProperty::read(r)).collect()
}
