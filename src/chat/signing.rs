//! # Message Signatures
//!
//! Byte layouts covered by chat signatures and the sign/verify pairs for both
//! signed-chat generations.
//!
//! ## 1.19 (individually signed)
//! ```text
//! salt:i64 | sender:uuid | timestamp_seconds:i64 | content_json:utf8
//! ```
//!
//! ## 1.19.1+ (header chained)
//! ```text
//! body digest = SHA-256(salt:i64 | timestamp_seconds:i64 | content:utf8 | 0x46
//!                       | for each last seen: 0x46 | uuid | signature)
//! header      = [preceding_signature] | sender:uuid | body_digest
//! ```
//! The header is what gets signed; each sender's headers form a chain through
//! `preceding_signature`.

use crate::error::Result;
use crate::protocol::packets::inbound::{ChainedChat, LastSeenEntry, MessageHeader, SignedChat};
use crate::utils::crypto;
use rsa::{RsaPrivateKey, RsaPublicKey};
use uuid::Uuid;

/// Separator byte used in the body digest.
const DIGEST_SEPARATOR: u8 = 0x46;

/// Literal text component, the form chat content is signed in on 1.19.
pub fn text_component(text: &str) -> String {
    serde_json::json!({ "text": text }).to_string()
}

/// Signatures cover whole seconds; the millisecond remainder is not signed.
fn epoch_seconds(timestamp_ms: i64) -> i64 {
    timestamp_ms.div_euclid(1000)
}

fn push_uuid(out: &mut Vec<u8>, id: Uuid) {
    out.extend_from_slice(id.as_bytes());
}

/// Bytes covered by a 1.19 message signature.
pub fn signed_payload(salt: i64, sender: Uuid, timestamp_ms: i64, content_json: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(32 + content_json.len());
    out.extend_from_slice(&salt.to_be_bytes());
    push_uuid(&mut out, sender);
    out.extend_from_slice(&epoch_seconds(timestamp_ms).to_be_bytes());
    out.extend_from_slice(content_json.as_bytes());
    out
}

/// Sign plain `text` the 1.19 way.
pub fn sign_v1(
    key: &RsaPrivateKey,
    salt: i64,
    sender: Uuid,
    timestamp_ms: i64,
    text: &str,
) -> Result<Vec<u8>> {
    let payload = signed_payload(salt, sender, timestamp_ms, &text_component(text));
    crypto::sign_sha256(key, &payload)
}

pub fn verify_v1(key: &RsaPublicKey, msg: &SignedChat) -> bool {
    let payload = signed_payload(msg.salt, msg.sender, msg.timestamp, &msg.signed_content);
    crypto::verify_sha256(key, &payload, &msg.signature)
}

/// SHA-256 of a message body.
pub fn body_digest(
    salt: i64,
    timestamp_ms: i64,
    content: &str,
    last_seen: &[LastSeenEntry],
) -> [u8; 32] {
    let mut out = Vec::with_capacity(17 + content.len() + last_seen.len() * 300);
    out.extend_from_slice(&salt.to_be_bytes());
    out.extend_from_slice(&epoch_seconds(timestamp_ms).to_be_bytes());
    out.extend_from_slice(content.as_bytes());
    out.push(DIGEST_SEPARATOR);
    for entry in last_seen {
        out.push(DIGEST_SEPARATOR);
        push_uuid(&mut out, entry.profile);
        out.extend_from_slice(&entry.signature);
    }
    crypto::sha256(&out)
}

/// Bytes covered by a 1.19.1+ header signature.
pub fn header_payload(preceding: Option<&[u8]>, sender: Uuid, body_digest: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(preceding.map_or(0, <[u8]>::len) + 16 + body_digest.len());
    if let Some(prev) = preceding {
        out.extend_from_slice(prev);
    }
    push_uuid(&mut out, sender);
    out.extend_from_slice(body_digest);
    out
}

pub fn sign_v2(
    key: &RsaPrivateKey,
    preceding: Option<&[u8]>,
    sender: Uuid,
    body_digest: &[u8],
) -> Result<Vec<u8>> {
    crypto::sign_sha256(key, &header_payload(preceding, sender, body_digest))
}

pub fn verify_v2(key: &RsaPublicKey, msg: &ChainedChat) -> bool {
    let digest = body_digest(msg.salt, msg.timestamp, &msg.plain_content, &msg.last_seen);
    let payload = header_payload(msg.preceding_signature.as_deref(), msg.sender, &digest);
    crypto::verify_sha256(key, &payload, &msg.header_signature)
}

pub fn verify_header(key: &RsaPublicKey, header: &MessageHeader) -> bool {
    let payload = header_payload(
        header.preceding_signature.as_deref(),
        header.sender,
        &header.body_digest,
    );
    crypto::verify_sha256(key, &payload, &header.header_signature)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::protocol::packets::inbound::FilterMask;
    use crate::utils::crypto::tests::test_key;

    fn signed(text: &str) -> SignedChat {
        let key = test_key();
        let sender = Uuid::from_u128(11);
        SignedChat {
            signed_content: text_component(text),
            unsigned_content: None,
            chat_type: 0,
            sender,
            sender_name: "Alex".into(),
            team_name: None,
            timestamp: 1_655_000_000_123,
            salt: 0x1234_5678,
            signature: sign_v1(key, 0x1234_5678, sender, 1_655_000_000_123, text).unwrap(),
        }
    }

    fn chained(preceding: Option<Vec<u8>>) -> ChainedChat {
        let key = test_key();
        let sender = Uuid::from_u128(12);
        let last_seen = vec![LastSeenEntry {
            profile: Uuid::from_u128(13),
            signature: vec![5; 8],
        }];
        let digest = body_digest(99, 1_660_000_000_000, "hello", &last_seen);
        ChainedChat {
            header_signature: sign_v2(key, preceding.as_deref(), sender, &digest).unwrap(),
            preceding_signature: preceding,
            sender,
            plain_content: "hello".into(),
            decorated_content: None,
            timestamp: 1_660_000_000_000,
            salt: 99,
            last_seen,
            unsigned_content: None,
            filter: FilterMask::PassThrough,
            chat_type: 0,
            sender_name: "Steve".into(),
            target_name: None,
        }
    }

    #[test]
    fn test_text_component_escapes() {
        assert_eq!(text_component("hi"), r#"{"text":"hi"}"#);
        assert_eq!(text_component("a\"b"), r#"{"text":"a\"b"}"#);
    }

    #[test]
    fn test_signed_payload_layout() {
        let p = signed_payload(1, Uuid::from_u128(2), 3_999, "x");
        assert_eq!(p.len(), 8 + 16 + 8 + 1);
        assert_eq!(&p[..8], &1i64.to_be_bytes());
        assert_eq!(&p[24..32], &3i64.to_be_bytes());
    }

    #[test]
    fn test_v1_sign_verify_and_tamper() {
        let public = test_key().to_public_key();
        let msg = signed("good morning");
        assert!(verify_v1(&public, &msg));

        let mut bad = msg.clone();
        bad.signature[0] ^= 0x01;
        assert!(!verify_v1(&public, &bad));

        let mut bad = msg.clone();
        bad.signed_content = text_component("good mourning");
        assert!(!verify_v1(&public, &bad));

        let mut bad = msg.clone();
        bad.salt += 1;
        assert!(!verify_v1(&public, &bad));

        let mut bad = msg;
        bad.timestamp += 1000;
        assert!(!verify_v1(&public, &bad));
    }

    #[test]
    fn test_v2_chain_link_is_covered() {
        let public = test_key().to_public_key();
        let first = chained(None);
        assert!(verify_v2(&public, &first));

        let second = chained(Some(first.header_signature.clone()));
        assert!(verify_v2(&public, &second));

        let mut relinked = second.clone();
        relinked.preceding_signature = Some(vec![0; 4]);
        assert!(!verify_v2(&public, &relinked));

        let mut edited = second;
        edited.last_seen.clear();
        assert!(!verify_v2(&public, &edited));
    }

    #[test]
    fn test_header_matches_full_message() {
        let public = test_key().to_public_key();
        let msg = chained(None);
        let header = MessageHeader {
            preceding_signature: None,
            sender: msg.sender,
            header_signature: msg.header_signature.clone(),
            body_digest: body_digest(msg.salt, msg.timestamp, &msg.plain_content, &msg.last_seen).to_vec(),
        };
        assert!(verify_header(&public, &header));
    }
}
