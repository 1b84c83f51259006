//! Handshake, status and login-phase packets.
//!
//! These ids are fixed (see [`crate::protocol::packet_type::login`]); only the
//! field layouts depend on the protocol version.

use super::{read_properties, ProfileProperty};
use crate::core::types::{PacketReader, PacketWriter};
use crate::error::Result;
use crate::protocol::session::PlayerKeyPair;
use crate::protocol::version::{EncryptionResponseLayout, LoginStartLayout, WireLayout};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Handshake body. `next_state` is 1 for status, 2 for login.
pub fn encode_handshake(protocol: i32, host: &str, port: u16, next_state: i32) -> Bytes {
    let mut w = PacketWriter::with_capacity(host.len() + 8);
    w.varint(protocol).string(host).u16(port).varint(next_state);
    w.finish()
}

/// Login Start body.
///
/// The key announcement is only written on versions with signed login and only
/// when `key` is present; the UUID is written on 1.19.1+.
pub fn encode_login_start(
    layout: &WireLayout,
    username: &str,
    key: Option<&PlayerKeyPair>,
    uuid: Uuid,
) -> Bytes {
    let mut w = PacketWriter::new();
    w.string(username);
    match layout.login_start {
        LoginStartLayout::NameOnly => {}
        LoginStartLayout::SignedKey | LoginStartLayout::SignedKeyAndUuid => {
            let v2 = layout.login_start == LoginStartLayout::SignedKeyAndUuid;
            match key {
                Some(key) => {
                    let signature = if v2 { &key.signature_v2 } else { &key.signature_v1 };
                    w.bool(true)
                        .i64(key.expires_at)
                        .byte_array(&key.public_key_der)
                        .byte_array(signature);
                }
                None => {
                    w.bool(false);
                }
            }
            if v2 {
                w.bool(true).uuid(uuid);
            }
        }
    }
    w.finish()
}

/// Encryption Request from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionRequest {
    /// Usually empty on vanilla servers; `"-"` means "no session check".
    pub server_id: String,
    /// DER SubjectPublicKeyInfo.
    pub public_key: Vec<u8>,
    pub verify_token: Vec<u8>,
}

impl EncryptionRequest {
    pub fn decode(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            server_id: r.read_string()?,
            public_key: r.read_byte_array()?,
            verify_token: r.read_byte_array()?,
        })
    }

    pub fn encode(&self) -> Bytes {
        let mut w = PacketWriter::new();
        w.string(&self.server_id)
            .byte_array(&self.public_key)
            .byte_array(&self.verify_token);
        w.finish()
    }
}

/// How the client proves it decrypted the verify token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyProof {
    /// RSA-encrypted verify token.
    Token(Vec<u8>),
    /// Salt plus a signature over `token || salt` made with the profile key.
    Signature { salt: i64, signature: Vec<u8> },
}

/// Encryption Response body.
pub fn encode_encryption_response(
    layout: &WireLayout,
    encrypted_secret: &[u8],
    proof: &VerifyProof,
) -> Bytes {
    let mut w = PacketWriter::new();
    w.byte_array(encrypted_secret);
    match (layout.encryption_response, proof) {
        (EncryptionResponseLayout::Token, VerifyProof::Token(token)) => {
            w.byte_array(token);
        }
        (EncryptionResponseLayout::TokenOrSaltSignature, VerifyProof::Token(token)) => {
            w.bool(true).byte_array(token);
        }
        (EncryptionResponseLayout::TokenOrSaltSignature, VerifyProof::Signature { salt, signature }) => {
            w.bool(false).i64(*salt).byte_array(signature);
        }
        // Older servers cannot accept a signature; callers never build one for them.
        (EncryptionResponseLayout::Token, VerifyProof::Signature { .. }) => {
            w.byte_array(&[]);
        }
    }
    w.finish()
}

/// Result of a successful login, reported to the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginOutcome {
    pub uuid: Uuid,
    pub username: String,
    pub properties: Vec<ProfileProperty>,
}

impl LoginOutcome {
    pub fn decode(r: &mut PacketReader, layout: &WireLayout) -> Result<Self> {
        let uuid = r.read_uuid()?;
        let username = r.read_string()?;
        let properties = if layout.login_success_properties {
            read_properties(r)?
        } else {
            Vec::new()
        };
        Ok(Self {
            uuid,
            username,
            properties,
        })
    }

    pub fn encode(&self, layout: &WireLayout) -> Bytes {
        let mut w = PacketWriter::new();
        w.uuid(self.uuid).string(&self.username);
        if layout.login_success_properties {
            w.varint(self.properties.len() as i32);
            for p in &self.properties {
                p.write(&mut w);
            }
        }
        w.finish()
    }
}

/// Login Plugin Request: mod-loader negotiation during login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPluginRequest {
    pub message_id: i32,
    pub channel: String,
    pub data: Bytes,
}

impl LoginPluginRequest {
    pub fn decode(r: &mut PacketReader) -> Result<Self> {
        Ok(Self {
            message_id: r.read_varint()?,
            channel: r.read_string()?,
            data: r.read_rest(),
        })
    }
}

/// Login Plugin Response. `None` tells the server the channel is not understood.
pub fn encode_plugin_response(message_id: i32, response: Option<&[u8]>) -> Bytes {
    let mut w = PacketWriter::new();
    w.varint(message_id);
    match response {
        Some(data) => w.bool(true).raw(data),
        None => w.bool(false),
    };
    w.finish()
}

/// Login Disconnect reason (JSON text).
pub fn decode_disconnect(r: &mut PacketReader) -> Result<String> {
    r.read_string()
}

pub fn decode_set_compression(r: &mut PacketReader) -> Result<i32> {
    r.read_varint()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::protocol::version::{MC_1_18_2_VERSION, MC_1_19_2_VERSION, MC_1_19_VERSION};
    use crate::utils::crypto;

    fn layout(v: i32) -> WireLayout {
        WireLayout::for_version(v).unwrap()
    }

    #[test]
    fn test_handshake_layout() {
        let body = encode_handshake(758, "play.example.com", 25565, 2);
        let mut r = PacketReader::new(body);
        assert_eq!(r.read_varint().unwrap(), 758);
        assert_eq!(r.read_string().unwrap(), "play.example.com");
        assert_eq!(r.read_u16().unwrap(), 25565);
        assert_eq!(r.read_varint().unwrap(), 2);
        assert!(r.is_empty());
    }

    #[test]
    fn test_login_start_name_only() {
        let body = encode_login_start(&layout(MC_1_18_2_VERSION), "OfflinePlayer", None, Uuid::nil());
        let mut r = PacketReader::new(body);
        assert_eq!(r.read_string().unwrap(), "OfflinePlayer");
        assert!(r.is_empty());
    }

    #[test]
    fn test_login_start_signed_variants() {
        let key = crypto::tests::test_key().clone();
        let pair = PlayerKeyPair::new(key, 1_700_000_000_000, vec![1; 4], vec![2; 8]).unwrap();
        let id = Uuid::from_u128(7);

        let mut r = PacketReader::new(encode_login_start(&layout(MC_1_19_VERSION), "Alex", Some(&pair), id));
        assert_eq!(r.read_string().unwrap(), "Alex");
        assert!(r.read_bool().unwrap());
        assert_eq!(r.read_i64().unwrap(), 1_700_000_000_000);
        assert_eq!(r.read_byte_array().unwrap(), pair.public_key_der);
        assert_eq!(r.read_byte_array().unwrap(), vec![1; 4]);
        assert!(r.is_empty());

        let mut r = PacketReader::new(encode_login_start(&layout(MC_1_19_2_VERSION), "Alex", None, id));
        assert_eq!(r.read_string().unwrap(), "Alex");
        assert!(!r.read_bool().unwrap());
        assert!(r.read_bool().unwrap());
        assert_eq!(r.read_uuid().unwrap(), id);
    }

    #[test]
    fn test_encryption_response_shapes() {
        let old = encode_encryption_response(&layout(MC_1_18_2_VERSION), &[9; 3], &VerifyProof::Token(vec![4; 2]));
        assert_eq!(&old[..], &[3, 9, 9, 9, 2, 4, 4]);

        let signed = encode_encryption_response(
            &layout(MC_1_19_VERSION),
            &[9],
            &VerifyProof::Signature {
                salt: 1,
                signature: vec![5],
            },
        );
        assert_eq!(&signed[..], &[1, 9, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 5]);

        let token = encode_encryption_response(&layout(MC_1_19_VERSION), &[9], &VerifyProof::Token(vec![4]));
        assert_eq!(&token[..], &[1, 9, 1, 1, 4]);
    }

    #[test]
    fn test_login_success_properties_by_version() {
        let outcome = LoginOutcome {
            uuid: Uuid::from_u128(42),
            username: "Steve".into(),
            properties: vec![ProfileProperty {
                name: "textures".into(),
                value: "abc".into(),
                signature: Some("sig".into()),
            }],
        };
        let l = layout(MC_1_19_VERSION);
        let decoded = LoginOutcome::decode(&mut PacketReader::new(outcome.encode(&l)), &l).unwrap();
        assert_eq!(decoded, outcome);

        let l = layout(MC_1_18_2_VERSION);
        let decoded = LoginOutcome::decode(&mut PacketReader::new(outcome.encode(&l)), &l).unwrap();
        assert!(decoded.properties.is_empty());
    }

    #[test]
    fn test_plugin_response() {
        assert_eq!(&encode_plugin_response(5, None)[..], &[5, 0]);
        assert_eq!(&encode_plugin_response(5, Some(&[7, 8]))[..], &[5, 1, 7, 8]);
    }
}
