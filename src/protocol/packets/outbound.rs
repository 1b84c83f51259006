//! Play-phase packets sent by the client.
//!
//! Every function returns the payload only; the sender resolves the id through
//! the active palette and frames it.

use crate::chat::last_seen::Acknowledgment;
use crate::core::types::{Location, PacketWriter};
use crate::protocol::version::{ChatLayout, WireLayout};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Hand {
    #[default]
    Main,
    Off,
}

impl Hand {
    fn id(self) -> i32 {
        match self {
            Self::Main => 0,
            Self::Off => 1,
        }
    }
}

/// Dominant arm announced in Client Settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MainHand {
    Left,
    #[default]
    Right,
}

/// Answers to Resource Pack Send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourcePackStatus {
    SuccessfullyLoaded = 0,
    Declined = 1,
    FailedDownload = 2,
    Accepted = 3,
}

/// A chat line ready to encode. `signature` is `None` for unsigned chat.
#[derive(Debug, Clone, Copy)]
pub struct ChatPayload<'a> {
    pub message: &'a str,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub salt: i64,
    pub signature: Option<&'a [u8]>,
    pub acknowledgment: Option<&'a Acknowledgment>,
}

pub fn chat_message(layout: &WireLayout, chat: &ChatPayload<'_>) -> Bytes {
    let mut w = PacketWriter::new();
    w.string(chat.message);
    if layout.chat != ChatLayout::Legacy {
        w.i64(chat.timestamp)
            .i64(chat.salt)
            .byte_array(chat.signature.unwrap_or_default())
            .bool(false);
        write_acknowledgment(&mut w, layout, chat.acknowledgment);
    }
    w.finish()
}

/// Signature over one command argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSignature {
    pub name: String,
    pub signature: Vec<u8>,
}

/// Chat Command body (1.19+). `command` has no leading slash.
pub fn chat_command(
    layout: &WireLayout,
    command: &str,
    timestamp: i64,
    salt: i64,
    arguments: &[ArgumentSignature],
    acknowledgment: Option<&Acknowledgment>,
) -> Bytes {
    let mut w = PacketWriter::new();
    w.string(command)
        .i64(timestamp)
        .i64(salt)
        .varint(arguments.len() as i32);
    for arg in arguments {
        w.string(&arg.name).byte_array(&arg.signature);
    }
    w.bool(false);
    write_acknowledgment(&mut w, layout, acknowledgment);
    w.finish()
}

fn write_acknowledgment(w: &mut PacketWriter, layout: &WireLayout, ack: Option<&Acknowledgment>) {
    if !layout.has_acknowledgments() {
        return;
    }
    match ack {
        Some(ack) => ack.write(w),
        None => Acknowledgment::default().write(w),
    }
}

pub fn message_acknowledgment(ack: &Acknowledgment) -> Bytes {
    let mut w = PacketWriter::new();
    ack.write(&mut w);
    w.finish()
}

pub fn keep_alive(id: i64) -> Bytes {
    let mut w = PacketWriter::with_capacity(8);
    w.i64(id);
    w.finish()
}

pub fn pong(id: i32) -> Bytes {
    let mut w = PacketWriter::with_capacity(4);
    w.i32(id);
    w.finish()
}

pub fn teleport_confirm(teleport_id: i32) -> Bytes {
    let mut w = PacketWriter::new();
    w.varint(teleport_id);
    w.finish()
}

pub fn resource_pack_status(status: ResourcePackStatus) -> Bytes {
    let mut w = PacketWriter::new();
    w.varint(status as i32);
    w.finish()
}

pub fn entity_action(entity_id: i32, action: i32) -> Bytes {
    let mut w = PacketWriter::new();
    w.varint(entity_id).varint(action).varint(0);
    w.finish()
}

/// Client Status action 0: perform respawn.
pub fn client_status_respawn() -> Bytes {
    let mut w = PacketWriter::new();
    w.varint(0);
    w.finish()
}

pub fn plugin_message(channel: &str, data: &[u8]) -> Bytes {
    let mut w = PacketWriter::with_capacity(channel.len() + data.len() + 2);
    w.string(channel).raw(data);
    w.finish()
}

/// Client Settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub locale: String,
    pub view_distance: u8,
    /// 0 enabled, 1 commands only, 2 hidden.
    pub chat_mode: i32,
    pub chat_colors: bool,
    /// Displayed skin parts bit mask.
    pub skin_parts: u8,
    pub main_hand: MainHand,
    pub text_filtering: bool,
    pub allow_server_listing: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            locale: "en_us".into(),
            view_distance: 10,
            chat_mode: 0,
            chat_colors: true,
            skin_parts: 0x7F,
            main_hand: MainHand::Right,
            text_filtering: false,
            allow_server_listing: true,
        }
    }
}

impl ClientSettings {
    pub fn encode(&self) -> Bytes {
        let mut w = PacketWriter::new();
        w.string(&self.locale)
            .u8(self.view_distance)
            .varint(self.chat_mode)
            .bool(self.chat_colors)
            .u8(self.skin_parts)
            .varint(self.main_hand as i32)
            .bool(self.text_filtering)
            .bool(self.allow_server_listing);
        w.finish()
    }
}

pub fn player_position(x: f64, y: f64, z: f64, on_ground: bool) -> Bytes {
    let mut w = PacketWriter::with_capacity(25);
    w.f64(x).f64(y).f64(z).bool(on_ground);
    w.finish()
}

pub fn player_position_and_rotation(
    x: f64,
    y: f64,
    z: f64,
    yaw: f32,
    pitch: f32,
    on_ground: bool,
) -> Bytes {
    let mut w = PacketWriter::with_capacity(33);
    w.f64(x).f64(y).f64(z).f32(yaw).f32(pitch).bool(on_ground);
    w.finish()
}

fn write_sequence(w: &mut PacketWriter, layout: &WireLayout, sequence: i32) {
    if layout.block_sequence {
        w.varint(sequence);
    }
}

pub fn use_item(layout: &WireLayout, hand: Hand, sequence: i32) -> Bytes {
    let mut w = PacketWriter::new();
    w.varint(hand.id());
    write_sequence(&mut w, layout, sequence);
    w.finish()
}

/// Player Digging (a.k.a. Player Action). `status` 0 starts digging, 2 finishes.
pub fn player_digging(
    layout: &WireLayout,
    status: i32,
    location: Location,
    face: u8,
    sequence: i32,
) -> Bytes {
    let mut w = PacketWriter::new();
    w.varint(status).location(location).u8(face);
    write_sequence(&mut w, layout, sequence);
    w.finish()
}

/// Place a block against `face` of `location`, cursor at the face center.
pub fn player_block_placement(
    layout: &WireLayout,
    hand: Hand,
    location: Location,
    face: i32,
    sequence: i32,
) -> Bytes {
    let mut w = PacketWriter::new();
    w.varint(hand.id())
        .location(location)
        .varint(face)
        .f32(0.5)
        .f32(0.5)
        .f32(0.5)
        .bool(false);
    write_sequence(&mut w, layout, sequence);
    w.finish()
}

pub fn held_item_change(slot: i16) -> Bytes {
    let mut w = PacketWriter::with_capacity(2);
    w.i16(slot);
    w.finish()
}

pub fn animation(hand: Hand) -> Bytes {
    let mut w = PacketWriter::new();
    w.varint(hand.id());
    w.finish()
}

pub fn close_window(window_id: u8) -> Bytes {
    let mut w = PacketWriter::with_capacity(1);
    w.u8(window_id);
    w.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::core::types::PacketReader;
    use crate::protocol::packets::inbound::LastSeenEntry;
    use uuid::Uuid;

    fn layout(v: i32) -> WireLayout {
        WireLayout::for_version(v).unwrap()
    }

    #[test]
    fn test_legacy_chat_is_text_only() {
        let chat = ChatPayload {
            message: "hello",
            timestamp: 1,
            salt: 2,
            signature: Some(&[3]),
            acknowledgment: None,
        };
        assert_eq!(&chat_message(&layout(758), &chat)[..], &[5, b'h', b'e', b'l', b'l', b'o']);
    }

    #[test]
    fn test_unsigned_chat_has_empty_signature() {
        let chat = ChatPayload {
            message: "hi",
            timestamp: 1000,
            salt: 0,
            signature: None,
            acknowledgment: None,
        };
        let mut r = PacketReader::new(chat_message(&layout(759), &chat));
        assert_eq!(r.read_string().unwrap(), "hi");
        assert_eq!(r.read_i64().unwrap(), 1000);
        assert_eq!(r.read_i64().unwrap(), 0);
        assert!(r.read_byte_array().unwrap().is_empty());
        assert!(!r.read_bool().unwrap());
        assert!(r.is_empty());
    }

    #[test]
    fn test_chained_chat_carries_acknowledgment() {
        let ack = Acknowledgment {
            last_seen: vec![LastSeenEntry {
                profile: Uuid::from_u128(1),
                signature: vec![7, 7],
            }],
            last_received: None,
        };
        let chat = ChatPayload {
            message: "hi",
            timestamp: 1000,
            salt: 5,
            signature: Some(&[1, 2]),
            acknowledgment: Some(&ack),
        };
        let mut r = PacketReader::new(chat_message(&layout(760), &chat));
        r.read_string().unwrap();
        r.read_i64().unwrap();
        r.read_i64().unwrap();
        assert_eq!(r.read_byte_array().unwrap(), vec![1, 2]);
        r.read_bool().unwrap();
        assert_eq!(Acknowledgment::read(&mut r).unwrap(), ack);
        assert!(r.is_empty());
    }

    #[test]
    fn test_command_arguments() {
        let args = [ArgumentSignature {
            name: "message".into(),
            signature: vec![9; 3],
        }];
        let mut r = PacketReader::new(chat_command(&layout(759), "say hi", 10, 11, &args, None));
        assert_eq!(r.read_string().unwrap(), "say hi");
        assert_eq!(r.read_i64().unwrap(), 10);
        assert_eq!(r.read_i64().unwrap(), 11);
        assert_eq!(r.read_varint().unwrap(), 1);
        assert_eq!(r.read_string().unwrap(), "message");
        assert_eq!(r.read_byte_array().unwrap(), vec![9; 3]);
        assert!(!r.read_bool().unwrap());
        assert!(r.is_empty());
    }

    #[test]
    fn test_block_sequence_only_on_new_versions() {
        assert_eq!(&use_item(&layout(758), Hand::Off, 9)[..], &[1]);
        assert_eq!(&use_item(&layout(759), Hand::Off, 9)[..], &[1, 9]);
        let loc = Location::new(1, 2, 3);
        assert_eq!(player_digging(&layout(758), 0, loc, 1, 4).len(), 1 + 8 + 1);
        assert_eq!(player_digging(&layout(760), 0, loc, 1, 4).len(), 1 + 8 + 1 + 1);
        assert_eq!(player_block_placement(&layout(759), Hand::Main, loc, 1, 4).len(), 1 + 8 + 1 + 12 + 1 + 1);
    }

    #[test]
    fn test_client_settings_layout() {
        let body = ClientSettings::default().encode();
        let mut r = PacketReader::new(body);
        assert_eq!(r.read_string().unwrap(), "en_us");
        assert_eq!(r.read_u8().unwrap(), 10);
        assert_eq!(r.read_varint().unwrap(), 0);
        assert!(r.read_bool().unwrap());
        assert_eq!(r.read_u8().unwrap(), 0x7F);
        assert_eq!(r.read_varint().unwrap(), 1);
        assert!(!r.read_bool().unwrap());
        assert!(r.read_bool().unwrap());
        assert!(r.is_empty());
    }

    #[test]
    fn test_entity_action_trailing_jump_boost() {
        assert_eq!(&entity_action(300, 1)[..], &[0xAC, 0x02, 1, 0]);
    }
}
