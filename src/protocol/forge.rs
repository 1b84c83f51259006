//! # Mod-Loader Handshake
//!
//! Servers running a mod loader negotiate over login plugin requests before
//! Login Success. The engine talks to that negotiation through
//! [`ModLoaderHandshake`]:
//!
//! - `server_address` may tag the host sent in the handshake so the server
//!   knows a modded client is connecting;
//! - `handle_login_plugin_request` answers (or declines) each request;
//! - `complete` runs once Login Success has arrived.
//!
//! [`ForgeHandshake`] implements the FML2 flavour used by 1.18 and 1.19
//! Forge servers. Every FML2 packet is wrapped:
//!
//! ```text
//! fml:loginwrapper payload = String inner_channel | VarInt length | inner packet
//! inner packet             = VarInt packet_id | body
//! ```

use crate::core::types::{PacketReader, PacketWriter};
use crate::error::{ProtocolError, Result};
use crate::protocol::packets::login::LoginPluginRequest;
use bytes::Bytes;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Marker appended to the handshake host by FML2 clients.
pub const FML2_MARKER: &str = "\0FML2\0";
pub const LOGIN_WRAPPER_CHANNEL: &str = "fml:loginwrapper";
pub const HANDSHAKE_CHANNEL: &str = "fml:handshake";

const MOD_LIST: i32 = 1;
const MOD_LIST_REPLY: i32 = 2;
const ACKNOWLEDGEMENT: i32 = 99;

pub trait ModLoaderHandshake: Send + Sync {
    fn name(&self) -> &'static str;

    /// Host string to put in the handshake packet.
    fn server_address(&self, host: &str) -> String {
        host.to_string()
    }

    /// Response body for a login plugin request, or `None` when the channel is
    /// not understood.
    fn handle_login_plugin_request(&self, request: &LoginPluginRequest) -> Result<Option<Bytes>>;

    /// Called after Login Success, before play begins.
    fn complete(&self) -> Result<()> {
        Ok(())
    }
}

/// Unmodded client: every plugin request is declined.
#[derive(Debug, Default, Clone, Copy)]
pub struct VanillaHandshake;

impl ModLoaderHandshake for VanillaHandshake {
    fn name(&self) -> &'static str {
        "vanilla"
    }

    fn handle_login_plugin_request(&self, request: &LoginPluginRequest) -> Result<Option<Bytes>> {
        trace!(channel = %request.channel, id = request.message_id, "Declining login plugin request");
        Ok(None)
    }
}

/// Mod list announced by an FML2 server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModList {
    pub mods: Vec<String>,
    pub channels: Vec<(String, String)>,
    pub registries: Vec<String>,
}

impl ModList {
    fn read(r: &mut PacketReader) -> Result<Self> {
        let mod_count = r.read_length("mod count")?;
        let mods = (0..mod_count)
            .map(|_| r.read_string())
            .collect::<Result<Vec<_>>>()?;
        let channel_count = r.read_length("channel count")?;
        let channels = (0..channel_count)
            .map(|_| Ok((r.read_string()?, r.read_string()?)))
            .collect::<Result<Vec<_>>>()?;
        let registry_count = r.read_length("registry count")?;
        let registries = (0..registry_count)
            .map(|_| r.read_string())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            mods,
            channels,
            registries,
        })
    }

    /// Mod List Reply body: the client claims exactly what the server has.
    fn write_reply(&self, w: &mut PacketWriter) {
        w.varint(MOD_LIST_REPLY);
        w.varint(self.mods.len() as i32);
        for m in &self.mods {
            w.string(m);
        }
        w.varint(self.channels.len() as i32);
        for (name, version) in &self.channels {
            w.string(name).string(version);
        }
        w.varint(self.registries.len() as i32);
        for registry in &self.registries {
            w.string(registry).string("");
        }
    }
}

/// FML2 client handshake.
#[derive(Debug, Default)]
pub struct ForgeHandshake {
    answered: AtomicU32,
    announced_mods: AtomicU32,
}

impl ForgeHandshake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests answered so far.
    pub fn answered(&self) -> u32 {
        self.answered.load(Ordering::Relaxed)
    }

    fn wrap(inner: &[u8]) -> Bytes {
        let mut w = PacketWriter::with_capacity(inner.len() + HANDSHAKE_CHANNEL.len() + 8);
        w.string(HANDSHAKE_CHANNEL)
            .varint(inner.len() as i32)
            .raw(inner);
        w.finish()
    }
}

impl ModLoaderHandshake for ForgeHandshake {
    fn name(&self) -> &'static str {
        "forge"
    }

    fn server_address(&self, host: &str) -> String {
        format!("{host}{FML2_MARKER}")
    }

    fn handle_login_plugin_request(&self, request: &LoginPluginRequest) -> Result<Option<Bytes>> {
        if request.channel != LOGIN_WRAPPER_CHANNEL {
            trace!(channel = %request.channel, "Not an FML2 request");
            return Ok(None);
        }

        let mut r = PacketReader::new(request.data.clone());
        let inner_channel = r.read_string()?;
        if inner_channel != HANDSHAKE_CHANNEL {
            debug!(channel = %inner_channel, "Unknown FML2 inner channel");
            return Ok(None);
        }
        let length = r.read_length("fml packet length")?;
        let mut inner = PacketReader::new(r.read_bytes(length)?);
        let packet_id = inner.read_varint()?;

        let mut reply = PacketWriter::new();
        match packet_id {
            MOD_LIST => {
                let list = ModList::read(&mut inner)?;
                info!(
                    mods = list.mods.len(),
                    channels = list.channels.len(),
                    registries = list.registries.len(),
                    "Server mod list received"
                );
                self.announced_mods
                    .store(list.mods.len() as u32, Ordering::Relaxed);
                list.write_reply(&mut reply);
            }
            id if id < 0 => {
                return Err(ProtocolError::Decode(format!(
                    "invalid FML2 packet id {id}"
                )))
            }
            other => {
                trace!(packet_id = other, "Acknowledging FML2 packet");
                reply.varint(ACKNOWLEDGEMENT);
            }
        }

        self.answered.fetch_add(1, Ordering::Relaxed);
        Ok(Some(Self::wrap(&reply.finish())))
    }

    fn complete(&self) -> Result<()> {
        if self.answered() == 0 {
            warn!("Forge handshake requested but the server sent no FML2 packets");
        } else {
            info!(
                answered = self.answered(),
                mods = self.announced_mods.load(Ordering::Relaxed),
                "Forge handshake complete"
            );
        }
        Ok(())
    }
}

/// Handshake strategy for a connection.
pub fn for_palette(forge: bool) -> Arc<dyn ModLoaderHandshake> {
    if forge {
        Arc::new(ForgeHandshake::new())
    } else {
        Arc::new(VanillaHandshake)
    }
}
