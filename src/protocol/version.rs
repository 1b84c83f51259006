//! Protocol numbers and the per-version wire layout.
//!
//! Every field whose presence or encoding differs between supported versions is
//! captured once in a [`WireLayout`], selected from the negotiated protocol
//! number when the connection is set up. Decoders and encoders branch on the
//! layout's small enums instead of comparing version numbers inline.

use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};

/// 1.18 and 1.18.1
pub const MC_1_18_1_VERSION: i32 = 757;
/// 1.18.2
pub const MC_1_18_2_VERSION: i32 = 758;
/// 1.19
pub const MC_1_19_VERSION: i32 = 759;
/// 1.19.1 and 1.19.2
pub const MC_1_19_2_VERSION: i32 = 760;

pub const MIN_SUPPORTED_VERSION: i32 = MC_1_18_1_VERSION;
pub const MAX_SUPPORTED_VERSION: i32 = MC_1_19_2_VERSION;

/// Human-readable game version for a protocol number.
pub fn version_name(protocol: i32) -> Option<&'static str> {
    match protocol {
        MC_1_18_1_VERSION => Some("1.18.1"),
        MC_1_18_2_VERSION => Some("1.18.2"),
        MC_1_19_VERSION => Some("1.19"),
        MC_1_19_2_VERSION => Some("1.19.2"),
        _ => None,
    }
}

pub fn is_supported(protocol: i32) -> bool {
    (MIN_SUPPORTED_VERSION..=MAX_SUPPORTED_VERSION).contains(&protocol)
}

/// Login Start payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginStartLayout {
    /// Username only.
    NameOnly,
    /// Username plus optional signed key announcement (v1 signature).
    SignedKey,
    /// Username, optional key announcement (v2 signature), optional UUID.
    SignedKeyAndUuid,
}

/// Encryption Response payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncryptionResponseLayout {
    /// Encrypted secret and encrypted verify token.
    Token,
    /// Encrypted secret, then either the token or a salt and signature.
    TokenOrSaltSignature,
}

/// Inbound player chat layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatLayout {
    /// JSON text, position byte, sender UUID. No signatures.
    Legacy,
    /// Individually signed messages.
    Signed,
    /// Header-chained messages with last-seen acknowledgments.
    Chained,
}

/// Encoding of the dimension type in Join Game and Respawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DimensionEncoding {
    Nbt,
    Identifier,
}

/// Server Data payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerDataLayout {
    Absent,
    /// motd, icon, previews-chat.
    WithPreview,
    /// As above plus enforces-secure-chat.
    WithSecureChat,
}

/// System Chat payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemChatLayout {
    Absent,
    /// JSON text and a VarInt message type.
    TypeId,
    /// JSON text and an overlay flag.
    Overlay,
}

/// All version-dependent choices for one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireLayout {
    pub protocol: i32,
    pub login_start: LoginStartLayout,
    pub encryption_response: EncryptionResponseLayout,
    /// Login Success carries a property array.
    pub login_success_properties: bool,
    pub chat: ChatLayout,
    pub dimension: DimensionEncoding,
    /// Join Game and Respawn carry an optional death location.
    pub death_location: bool,
    /// Digging, placement and use-item carry a block-change sequence id.
    pub block_sequence: bool,
    pub server_data: ServerDataLayout,
    pub system_chat: SystemChatLayout,
    /// Living entities and paintings spawn through Spawn Entity, which gains a
    /// head yaw and a VarInt data field.
    pub unified_entity_spawn: bool,
}

impl WireLayout {
    /// Pick the layout for a protocol number, rejecting unsupported versions.
    pub fn for_version(protocol: i32) -> Result<Self> {
        if !is_supported(protocol) {
            return Err(ProtocolError::UnsupportedVersion(protocol));
        }
        let signed = protocol >= MC_1_19_VERSION;
        let chained = protocol >= MC_1_19_2_VERSION;
        Ok(Self {
            protocol,
            login_start: match (signed, chained) {
                (_, true) => LoginStartLayout::SignedKeyAndUuid,
                (true, false) => LoginStartLayout::SignedKey,
                _ => LoginStartLayout::NameOnly,
            },
            encryption_response: if signed {
                EncryptionResponseLayout::TokenOrSaltSignature
            } else {
                EncryptionResponseLayout::Token
            },
            login_success_properties: signed,
            chat: match (signed, chained) {
                (_, true) => ChatLayout::Chained,
                (true, false) => ChatLayout::Signed,
                _ => ChatLayout::Legacy,
            },
            dimension: if signed {
                DimensionEncoding::Identifier
            } else {
                DimensionEncoding::Nbt
            },
            death_location: signed,
            block_sequence: signed,
            server_data: match (signed, chained) {
                (_, true) => ServerDataLayout::WithSecureChat,
                (true, false) => ServerDataLayout::WithPreview,
                _ => ServerDataLayout::Absent,
            },
            system_chat: match (signed, chained) {
                (_, true) => SystemChatLayout::Overlay,
                (true, false) => SystemChatLayout::TypeId,
                _ => SystemChatLayout::Absent,
            },
            unified_entity_spawn: signed,
        })
    }

    /// Chat and commands are sent as separate, signable packets.
    pub fn has_chat_commands(&self) -> bool {
        self.chat != ChatLayout::Legacy
    }

    /// Outbound chat carries a last-seen acknowledgment.
    pub fn has_acknowledgments(&self) -> bool {
        self.chat == ChatLayout::Chained
    }
}
