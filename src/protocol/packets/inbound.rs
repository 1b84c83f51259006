//! Play-phase packets sent by the server.
//!
//! Each type decodes itself from a payload cursor and the connection's
//! [`WireLayout`]. Bulky sub-structures the engine does not interpret (chunk
//! columns, slot data, registry NBT) are kept as raw bytes for the consumer.

use super::{read_properties, ProfileProperty};
use crate::core::types::{Location, PacketReader, PacketWriter};
use crate::error::{ProtocolError, Result};
use crate::protocol::version::{
    ChatLayout, DimensionEncoding, ServerDataLayout, SystemChatLayout, WireLayout,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed-point scale of relative entity movement.
const DELTA_SCALE: f64 = 4096.0;

/// Dimension type as sent in Join Game and Respawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimensionType {
    /// Full dimension type compound (1.18).
    Nbt(Bytes),
    /// Registry key into the dimension codec (1.19+).
    Named(String),
}

impl DimensionType {
    fn read(r: &mut PacketReader, layout: &WireLayout) -> Result<Self> {
        Ok(match layout.dimension {
            DimensionEncoding::Nbt => Self::Nbt(r.read_nbt_raw()?),
            DimensionEncoding::Identifier => Self::Named(r.read_string()?),
        })
    }
}

/// Where the player last died.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeathLocation {
    pub dimension: String,
    pub location: Location,
}

fn read_death_location(r: &mut PacketReader, layout: &WireLayout) -> Result<Option<DeathLocation>> {
    if !layout.death_location {
        return Ok(None);
    }
    r.read_optional(|r| {
        Ok(DeathLocation {
            dimension: r.read_string()?,
            location: r.read_location()?,
        })
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinGame {
    pub entity_id: i32,
    pub hardcore: bool,
    pub gamemode: u8,
    pub previous_gamemode: i8,
    pub worlds: Vec<String>,
    pub registry_codec: Bytes,
    pub dimension_type: DimensionType,
    pub dimension_name: String,
    pub hashed_seed: i64,
    pub max_players: i32,
    pub view_distance: i32,
    pub simulation_distance: i32,
    pub reduced_debug_info: bool,
    pub enable_respawn_screen: bool,
    pub is_debug: bool,
    pub is_flat: bool,
    pub death_location: Option<DeathLocation>,
}

impl JoinGame {
    pub fn decode(r: &mut PacketReader, layout: &WireLayout) -> Result<Self> {
        let entity_id = r.read_i32()?;
        let hardcore = r.read_bool()?;
        let gamemode = r.read_u8()?;
        let previous_gamemode = r.read_i8()?;
        let world_count = r.read_length("world count")?;
        let worlds = (0..world_count)
            .map(|_| r.read_string())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            entity_id,
            hardcore,
            gamemode,
            previous_gamemode,
            worlds,
            registry_codec: r.read_nbt_raw()?,
            dimension_type: DimensionType::read(r, layout)?,
            dimension_name: r.read_string()?,
            hashed_seed: r.read_i64()?,
            max_players: r.read_varint()?,
            view_distance: r.read_varint()?,
            simulation_distance: r.read_varint()?,
            reduced_debug_info: r.read_bool()?,
            enable_respawn_screen: r.read_bool()?,
            is_debug: r.read_bool()?,
            is_flat: r.read_bool()?,
            death_location: read_death_location(r, layout)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Respawn {
    pub dimension_type: DimensionType,
    pub dimension_name: String,
    pub hashed_seed: i64,
    pub gamemode: u8,
    pub previous_gamemode: i8,
    pub is_debug: bool,
    pub is_flat: bool,
    pub copy_metadata: bool,
    pub death_location: Option<DeathLocation>,
}

impl Respawn {
    pub fn decode(r: &mut PacketReader, layout: &WireLayout) -> Result<Self> {
        Ok(Self {
            dimension_type: DimensionType::read(r, layout)?,
            dimension_name: r.read_string()?,
            hashed_seed: r.read_i64()?,
            gamemode: r.read_u8()?,
            previous_gamemode: r.read_i8()?,
            is_debug: r.read_bool()?,
            is_flat: r.read_bool()?,
            copy_metadata: r.read_bool()?,
            death_location: read_death_location(r, layout)?,
        })
    }
}

/// Server-driven teleport. Must be confirmed with its `teleport_id`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPositionAndLook {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
    /// Bit set: which of x, y, z, yaw, pitch are relative.
    pub flags: u8,
    pub teleport_id: i32,
    pub dismount_vehicle: bool,
}

impl PlayerPositionAndLook {
    pub fn decode(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            x: r.read_f64()?,
            y: r.read_f64()?,
            z: r.read_f64()?,
            yaw: r.read_f32()?,
            pitch: r.read_f32()?,
            flags: r.read_u8()?,
            teleport_id: r.read_varint()?,
            dismount_vehicle: r.read_bool()?,
        })
    }

    pub fn is_relative(&self, bit: u8) -> bool {
        self.flags & (1 << bit) != 0
    }
}

/// 1.18 chat: JSON text with a position byte. No signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyChat {
    pub json: String,
    pub position: u8,
    pub sender: Uuid,
}

/// 1.19 individually signed chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedChat {
    pub signed_content: String,
    pub unsigned_content: Option<String>,
    pub chat_type: i32,
    pub sender: Uuid,
    pub sender_name: String,
    pub team_name: Option<String>,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub salt: i64,
    pub signature: Vec<u8>,
}

/// One `(sender, signature)` reference in a last-seen list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LastSeenEntry {
    pub profile: Uuid,
    pub signature: Vec<u8>,
}

impl LastSeenEntry {
    pub fn read(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            profile: r.read_uuid()?,
            signature: r.read_byte_array()?,
        })
    }

    pub fn write(&self, w: &mut PacketWriter) {
        w.uuid(self.profile).byte_array(&self.signature);
    }
}

/// Server-side filtering applied to a chained message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterMask {
    PassThrough,
    FullyFiltered,
    /// Bit set over characters of the plain content.
    Partial(Vec<u64>),
}

/// 1.19.1+ header-chained chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainedChat {
    pub preceding_signature: Option<Vec<u8>>,
    pub sender: Uuid,
    pub header_signature: Vec<u8>,
    pub plain_content: String,
    pub decorated_content: Option<String>,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub salt: i64,
    pub last_seen: Vec<LastSeenEntry>,
    pub unsigned_content: Option<String>,
    pub filter: FilterMask,
    pub chat_type: i32,
    pub sender_name: String,
    pub target_name: Option<String>,
}

/// Player chat in whichever layout the connection speaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerChat {
    Legacy(LegacyChat),
    Signed(SignedChat),
    Chained(ChainedChat),
}

impl PlayerChat {
    pub fn decode(r: &mut PacketReader, layout: &WireLayout) -> Result<Self> {
        match layout.chat {
            ChatLayout::Legacy => Ok(Self::Legacy(LegacyChat {
                json: r.read_string()?,
                position: r.read_u8()?,
                sender: r.read_uuid()?,
            })),
            ChatLayout::Signed => Ok(Self::Signed(SignedChat {
                signed_content: r.read_string()?,
                unsigned_content: r.read_optional(|r| r.read_string())?,
                chat_type: r.read_varint()?,
                sender: r.read_uuid()?,
                sender_name: r.read_string()?,
                team_name: r.read_optional(|r| r.read_string())?,
                timestamp: r.read_i64()?,
                salt: r.read_i64()?,
                signature: r.read_byte_array()?,
            })),
            ChatLayout::Chained => Ok(Self::Chained(ChainedChat::decode(r)?)),
        }
    }

    pub fn sender(&self) -> Uuid {
        match self {
            Self::Legacy(m) => m.sender,
            Self::Signed(m) => m.sender,
            Self::Chained(m) => m.sender,
        }
    }

    /// Text to show: unsigned override first, then the signed/plain content.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Legacy(m) => &m.json,
            Self::Signed(m) => m.unsigned_content.as_deref().unwrap_or(&m.signed_content),
            Self::Chained(m) => m
                .unsigned_content
                .as_deref()
                .or(m.decorated_content.as_deref())
                .unwrap_or(&m.plain_content),
        }
    }
}

impl ChainedChat {
    pub fn decode(r: &mut PacketReader) -> Result<Self> {
        let preceding_signature = r.read_optional(|r| r.read_byte_array())?;
        let sender = r.read_uuid()?;
        let header_signature = r.read_byte_array()?;
        let plain_content = r.read_string()?;
        let decorated_content = r.read_optional(|r| r.read_string())?;
        let timestamp = r.read_i64()?;
        let salt = r.read_i64()?;
        let seen = r.read_length("last seen count")?;
        let last_seen = (0..seen)
            .map(|_| LastSeenEntry::read(r))
            .collect::<Result<Vec<_>>>()?;
        let unsigned_content = r.read_optional(|r| r.read_string())?;
        let filter = match r.read_varint()? {
            0 => FilterMask::PassThrough,
            1 => FilterMask::FullyFiltered,
            2 => FilterMask::Partial(r.read_u64_array()?),
            other => return Err(ProtocolError::Decode(format!("unknown filter type {other}"))),
        };
        Ok(Self {
            preceding_signature,
            sender,
            header_signature,
            plain_content,
            decorated_content,
            timestamp,
            salt,
            last_seen,
            unsigned_content,
            filter,
            chat_type: r.read_varint()?,
            sender_name: r.read_string()?,
            target_name: r.read_optional(|r| r.read_string())?,
        })
    }

    /// Server-side encoding, for tests and proxies.
    pub fn encode(&self) -> Bytes {
        let mut w = PacketWriter::new();
        write_optional_bytes(&mut w, self.preceding_signature.as_deref());
        w.uuid(self.sender)
            .byte_array(&self.header_signature)
            .string(&self.plain_content);
        write_optional_str(&mut w, self.decorated_content.as_deref());
        w.i64(self.timestamp)
            .i64(self.salt)
            .varint(self.last_seen.len() as i32);
        for entry in &self.last_seen {
            entry.write(&mut w);
        }
        write_optional_str(&mut w, self.unsigned_content.as_deref());
        match &self.filter {
            FilterMask::PassThrough => w.varint(0),
            FilterMask::FullyFiltered => w.varint(1),
            FilterMask::Partial(bits) => {
                w.varint(2).varint(bits.len() as i32);
                for b in bits {
                    w.i64(*b as i64);
                }
                &mut w
            }
        };
        w.varint(self.chat_type).string(&self.sender_name);
        write_optional_str(&mut w, self.target_name.as_deref());
        w.finish()
    }
}

/// Chain link for a message the client is not shown (1.19.1+).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    pub preceding_signature: Option<Vec<u8>>,
    pub sender: Uuid,
    pub header_signature: Vec<u8>,
    pub body_digest: Vec<u8>,
}

impl MessageHeader {
    pub fn decode(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            preceding_signature: r.read_optional(|r| r.read_byte_array())?,
            sender: r.read_uuid()?,
            header_signature: r.read_byte_array()?,
            body_digest: r.read_byte_array()?,
        })
    }

    pub fn encode(&self) -> Bytes {
        let mut w = PacketWriter::new();
        write_optional_bytes(&mut w, self.preceding_signature.as_deref());
        w.uuid(self.sender)
            .byte_array(&self.header_signature)
            .byte_array(&self.body_digest);
        w.finish()
    }
}

/// Server-originated chat (1.19+).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemChat {
    pub json: String,
    /// Shown above the hotbar instead of in the chat box.
    pub overlay: bool,
}

impl SystemChat {
    /// Message type id of "game info" on 1.19.
    const GAME_INFO: i32 = 2;

    pub fn decode(r: &mut PacketReader, layout: &WireLayout) -> Result<Self> {
        let json = r.read_string()?;
        let overlay = match layout.system_chat {
            SystemChatLayout::Overlay => r.read_bool()?,
            SystemChatLayout::TypeId | SystemChatLayout::Absent => {
                r.read_varint()? == Self::GAME_INFO
            }
        };
        Ok(Self { json, overlay })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerData {
    pub motd: Option<String>,
    pub icon: Option<String>,
    pub previews_chat: bool,
    pub enforces_secure_chat: bool,
}

impl ServerData {
    pub fn decode(r: &mut PacketReader, layout: &WireLayout) -> Result<Self> {
        let motd = r.read_optional(|r| r.read_string())?;
        let icon = r.read_optional(|r| r.read_string())?;
        let previews_chat = r.read_bool()?;
        let enforces_secure_chat = match layout.server_data {
            ServerDataLayout::WithSecureChat => r.read_bool()?,
            ServerDataLayout::WithPreview | ServerDataLayout::Absent => false,
        };
        Ok(Self {
            motd,
            icon,
            previews_chat,
            enforces_secure_chat,
        })
    }
}

/// Profile public key announced for a player (1.19+).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePublicKey {
    /// Epoch milliseconds.
    pub expires_at: i64,
    /// DER SubjectPublicKeyInfo.
    pub key: Vec<u8>,
    pub signature: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerListEntry {
    pub uuid: Uuid,
    pub name: String,
    pub properties: Vec<ProfileProperty>,
    pub gamemode: i32,
    pub latency: i32,
    pub display_name: Option<String>,
    pub public_key: Option<ProfilePublicKey>,
}

/// Tab-list update, one action applied to many players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInfo {
    Add(Vec<PlayerListEntry>),
    UpdateGamemode(Vec<(Uuid, i32)>),
    UpdateLatency(Vec<(Uuid, i32)>),
    UpdateDisplayName(Vec<(Uuid, Option<String>)>),
    Remove(Vec<Uuid>),
}

impl PlayerInfo {
    pub fn decode(r: &mut PacketReader, layout: &WireLayout) -> Result<Self> {
        let action = r.read_varint()?;
        let count = r.read_length("player count")?;
        let keyed = layout.chat != ChatLayout::Legacy;
        match action {
            0 => (0..count)
                .map(|_| {
                    Ok(PlayerListEntry {
                        uuid: r.read_uuid()?,
                        name: r.read_string()?,
                        properties: read_properties(r)?,
                        gamemode: r.read_varint()?,
                        latency: r.read_varint()?,
                        display_name: r.read_optional(|r| r.read_string())?,
                        public_key: if keyed {
                            r.read_optional(|r| {
                                Ok(ProfilePublicKey {
                                    expires_at: r.read_i64()?,
                                    key: r.read_byte_array()?,
                                    signature: r.read_byte_array()?,
                                })
                            })?
                        } else {
                            None
                        },
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Add),
            1 => (0..count)
                .map(|_| Ok((r.read_uuid()?, r.read_varint()?)))
                .collect::<Result<Vec<_>>>()
                .map(Self::UpdateGamemode),
            2 => (0..count)
                .map(|_| Ok((r.read_uuid()?, r.read_varint()?)))
                .collect::<Result<Vec<_>>>()
                .map(Self::UpdateLatency),
            3 => (0..count)
                .map(|_| Ok((r.read_uuid()?, r.read_optional(|r| r.read_string())?)))
                .collect::<Result<Vec<_>>>()
                .map(Self::UpdateDisplayName),
            4 => (0..count)
                .map(|_| r.read_uuid())
                .collect::<Result<Vec<_>>>()
                .map(Self::Remove),
            other => Err(ProtocolError::Decode(format!("unknown player info action {other}"))),
        }
    }

    /// Server-side encoding, for tests and proxies.
    pub fn encode(&self, layout: &WireLayout) -> Bytes {
        let keyed = layout.chat != ChatLayout::Legacy;
        let mut w = PacketWriter::new();
        match self {
            Self::Add(entries) => {
                w.varint(0).varint(entries.len() as i32);
                for e in entries {
                    w.uuid(e.uuid).string(&e.name).varint(e.properties.len() as i32);
                    for p in &e.properties {
                        p.write(&mut w);
                    }
                    w.varint(e.gamemode).varint(e.latency);
                    write_optional_str(&mut w, e.display_name.as_deref());
                    if keyed {
                        match &e.public_key {
                            Some(k) => {
                                w.bool(true).i64(k.expires_at).byte_array(&k.key).byte_array(&k.signature);
                            }
                            None => {
                                w.bool(false);
                            }
                        }
                    }
                }
            }
            Self::UpdateGamemode(list) | Self::UpdateLatency(list) => {
                let action = if matches!(self, Self::UpdateGamemode(_)) { 1 } else { 2 };
                w.varint(action).varint(list.len() as i32);
                for (id, v) in list {
                    w.uuid(*id).varint(*v);
                }
            }
            Self::UpdateDisplayName(list) => {
                w.varint(3).varint(list.len() as i32);
                for (id, name) in list {
                    w.uuid(*id);
                    write_optional_str(&mut w, name.as_deref());
                }
            }
            Self::Remove(ids) => {
                w.varint(4).varint(ids.len() as i32);
                for id in ids {
                    w.uuid(*id);
                }
            }
        }
        w.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkData {
    pub x: i32,
    pub z: i32,
    /// Heightmaps, section data, block entities and light, undecoded.
    pub data: Bytes,
}

impl ChunkData {
    pub fn decode(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            x: r.read_i32()?,
            z: r.read_i32()?,
            data: r.read_rest(),
        })
    }
}

/// Spawn of a non-player entity. 1.18 living entities arrive through a
/// separate packet and are folded into this shape with `living` set.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnEntity {
    pub entity_id: i32,
    pub uuid: Uuid,
    pub entity_type: i32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: u8,
    pub pitch: u8,
    pub head_yaw: u8,
    pub data: i32,
    pub velocity: [i16; 3],
    pub living: bool,
}

impl SpawnEntity {
    pub fn decode(r: &mut PacketReader, layout: &WireLayout) -> Result<Self> {
        let entity_id = r.read_varint()?;
        let uuid = r.read_uuid()?;
        let entity_type = r.read_varint()?;
        let (x, y, z) = (r.read_f64()?, r.read_f64()?, r.read_f64()?);
        let pitch = r.read_u8()?;
        let yaw = r.read_u8()?;
        let (head_yaw, data) = if layout.unified_entity_spawn {
            (r.read_u8()?, r.read_varint()?)
        } else {
            (yaw, r.read_i32()?)
        };
        Ok(Self {
            entity_id,
            uuid,
            entity_type,
            x,
            y,
            z,
            yaw,
            pitch,
            head_yaw,
            data,
            velocity: read_velocity(r)?,
            living: false,
        })
    }

    /// 1.18 Spawn Living Entity.
    pub fn decode_living(r: &mut PacketReader) -> Result<Self> {
        let entity_id = r.read_varint()?;
        let uuid = r.read_uuid()?;
        let entity_type = r.read_varint()?;
        let (x, y, z) = (r.read_f64()?, r.read_f64()?, r.read_f64()?);
        Ok(Self {
            entity_id,
            uuid,
            entity_type,
            x,
            y,
            z,
            yaw: r.read_u8()?,
            pitch: r.read_u8()?,
            head_yaw: r.read_u8()?,
            data: 0,
            velocity: read_velocity(r)?,
            living: true,
        })
    }
}

fn read_velocity(r: &mut PacketReader) -> Result<[i16; 3]> {
    Ok([r.read_i16()?, r.read_i16()?, r.read_i16()?])
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPlayer {
    pub entity_id: i32,
    pub uuid: Uuid,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: u8,
    pub pitch: u8,
}

impl SpawnPlayer {
    pub fn decode(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            entity_id: r.read_varint()?,
            uuid: r.read_uuid()?,
            x: r.read_f64()?,
            y: r.read_f64()?,
            z: r.read_f64()?,
            yaw: r.read_u8()?,
            pitch: r.read_u8()?,
        })
    }
}

pub fn decode_destroy_entities(r: &mut PacketReader) -> Result<Vec<i32>> {
    let count = r.read_length("entity count")?;
    (0..count).map(|_| r.read_varint()).collect()
}

/// Relative move, optionally with a new look.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityMove {
    pub entity_id: i32,
    /// Blocks moved along each axis.
    pub delta: [f64; 3],
    pub rotation: Option<(u8, u8)>,
    pub on_ground: bool,
}

impl EntityMove {
    pub fn decode(r: &mut PacketReader, with_rotation: bool) -> Result<Self> {
        let entity_id = r.read_varint()?;
        let delta = [
            r.read_i16()? as f64 / DELTA_SCALE,
            r.read_i16()? as f64 / DELTA_SCALE,
            r.read_i16()? as f64 / DELTA_SCALE,
        ];
        let rotation = if with_rotation {
            Some((r.read_u8()?, r.read_u8()?))
        } else {
            None
        };
        Ok(Self {
            entity_id,
            delta,
            rotation,
            on_ground: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityTeleport {
    pub entity_id: i32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: u8,
    pub pitch: u8,
    pub on_ground: bool,
}

impl EntityTeleport {
    pub fn decode(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            entity_id: r.read_varint()?,
            x: r.read_f64()?,
            y: r.read_f64()?,
            z: r.read_f64()?,
            yaw: r.read_u8()?,
            pitch: r.read_u8()?,
            on_ground: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenWindow {
    pub window_id: i32,
    pub window_type: i32,
    pub title: String,
}

impl OpenWindow {
    pub fn decode(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            window_id: r.read_varint()?,
            window_type: r.read_varint()?,
            title: r.read_string()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowItems {
    pub window_id: u8,
    pub state_id: i32,
    /// Slot array and carried item, undecoded.
    pub slots: Bytes,
}

impl WindowItems {
    pub fn decode(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            window_id: r.read_u8()?,
            state_id: r.read_varint()?,
            slots: r.read_rest(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSlot {
    pub window_id: i8,
    pub state_id: i32,
    pub slot: i16,
    pub item: Bytes,
}

impl SetSlot {
    pub fn decode(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            window_id: r.read_i8()?,
            state_id: r.read_varint()?,
            slot: r.read_i16()?,
            item: r.read_rest(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUpdate {
    pub world_age: i64,
    pub time_of_day: i64,
}

impl TimeUpdate {
    pub fn decode(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            world_age: r.read_i64()?,
            time_of_day: r.read_i64()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateHealth {
    pub health: f32,
    pub food: i32,
    pub saturation: f32,
}

impl UpdateHealth {
    pub fn decode(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            health: r.read_f32()?,
            food: r.read_varint()?,
            saturation: r.read_f32()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetExperience {
    pub bar: f32,
    pub level: i32,
    pub total: i32,
}

impl SetExperience {
    pub fn decode(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            bar: r.read_f32()?,
            level: r.read_varint()?,
            total: r.read_varint()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeGameState {
    pub reason: u8,
    pub value: f32,
}

impl ChangeGameState {
    pub const END_RAIN: u8 = 1;
    pub const BEGIN_RAIN: u8 = 2;

    pub fn decode(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            reason: r.read_u8()?,
            value: r.read_f32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMessage {
    pub channel: String,
    pub data: Bytes,
}

impl PluginMessage {
    pub fn decode(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            channel: r.read_string()?,
            data: r.read_rest(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePackSend {
    pub url: String,
    pub hash: String,
    pub forced: bool,
    pub prompt: Option<String>,
}

impl ResourcePackSend {
    pub fn decode(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            url: r.read_string()?,
            hash: r.read_string()?,
            forced: r.read_bool()?,
            prompt: r.read_optional(|r| r.read_string())?,
        })
    }

    /// Some servers probe clients with packs that are neither a web URL nor
    /// carry a SHA-1 hash; those are not answered.
    pub fn is_probe(&self) -> bool {
        !self.url.starts_with("http") && self.hash.len() != 40
    }
}

fn write_optional_bytes(w: &mut PacketWriter, v: Option<&[u8]>) {
    match v {
        Some(b) => w.bool(true).byte_array(b),
        None => w.bool(false),
    };
}

fn write_optional_str(w: &mut PacketWriter, v: Option<&str>) {
    match v {
        Some(s) => w.bool(true).string(s),
        None => w.bool(false),
    };
}
