//! Signed chat: what one client signs, another client's chain state accepts,
//! and any tampering is caught.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use blockwire::chat::{signing, Acknowledgment, ChatChain, PlayerIdentity, ACKNOWLEDGMENT_THRESHOLD};
use blockwire::protocol::packets::inbound::{
    ChainedChat, FilterMask, LastSeenEntry, ProfilePublicKey, SignedChat,
};
use blockwire::protocol::session::PlayerKeyPair;
use blockwire::protocol::version::WireLayout;
use blockwire::utils::time;
use rand_core::OsRng;
use rsa::RsaPrivateKey;
use std::sync::OnceLock;
use uuid::Uuid;

const ALICE: Uuid = Uuid::from_u128(0xA11CE);
const BOB: Uuid = Uuid::from_u128(0xB0B);
const TIMESTAMP: i64 = 1_662_000_000_000;

fn alice_keys() -> &'static PlayerKeyPair {
    static KEYS: OnceLock<PlayerKeyPair> = OnceLock::new();
    KEYS.get_or_init(|| {
        let private = RsaPrivateKey::new(&mut OsRng, 1024).unwrap();
        PlayerKeyPair::new(private, time::now_millis() + 3_600_000, vec![], vec![]).unwrap()
    })
}

fn alice_profile_key() -> ProfilePublicKey {
    let keys = alice_keys();
    ProfilePublicKey {
        expires_at: keys.expires_at,
        key: keys.public_key_der.clone(),
        signature: vec![],
    }
}

/// Bob's view of a server where Alice is on the tab list.
fn bob_view() -> ChatChain {
    let mut chain = ChatChain::new(true, BOB, None);
    chain
        .players_mut()
        .add(PlayerIdentity::new(ALICE, "Alice", Some(&alice_profile_key())));
    chain
}

fn alice() -> ChatChain {
    ChatChain::new(true, ALICE, Some(alice_keys().clone()))
}

/// What the server relays to Bob after Alice sent `text` with `signature`.
fn relayed(text: &str, salt: i64, preceding: Option<Vec<u8>>, signature: Vec<u8>) -> ChainedChat {
    ChainedChat {
        preceding_signature: preceding,
        sender: ALICE,
        header_signature: signature,
        plain_content: text.into(),
        decorated_content: None,
        timestamp: TIMESTAMP,
        salt,
        last_seen: vec![],
        unsigned_content: None,
        filter: FilterMask::PassThrough,
        chat_type: 0,
        sender_name: "Alice".into(),
        target_name: None,
    }
}

fn chained_layout() -> WireLayout {
    WireLayout::for_version(760).unwrap()
}

#[test]
fn test_chained_messages_verify_across_clients() {
    let layout = chained_layout();
    let mut sender = alice();
    let mut receiver = bob_view();
    let ack = Acknowledgment::default();

    let mut preceding = None;
    for (n, text) in ["first", "second", "third"].into_iter().enumerate() {
        let salt = n as i64 + 100;
        let signature = sender
            .sign_chat(&layout, text, TIMESTAMP, salt, &ack)
            .unwrap()
            .expect("alice has keys");
        let msg = relayed(text, salt, preceding.take(), signature.clone());
        let (verified, due) = receiver.verify_chained(&msg);
        assert!(verified, "message {n} should verify");
        assert!(!due);
        preceding = Some(signature);
    }
    assert_eq!(receiver.pending(), 3);
}

#[test]
fn test_single_byte_tampering_fails() {
    let layout = chained_layout();
    let signature = alice()
        .sign_chat(&layout, "pay 10 coins", TIMESTAMP, 7, &Acknowledgment::default())
        .unwrap()
        .unwrap();
    let original = relayed("pay 10 coins", 7, None, signature);
    assert!(bob_view().verify_chained(&original).0);

    let mut bad_signature = original.clone();
    bad_signature.header_signature[0] ^= 0x01;

    let mut bad_content = original.clone();
    bad_content.plain_content = "pay 90 coins".into();

    // signatures cover whole seconds
    let mut bad_timestamp = original.clone();
    bad_timestamp.timestamp += 1000;

    let mut bad_salt = original.clone();
    bad_salt.salt ^= 1 << 8;

    for (what, msg) in [
        ("signature", bad_signature),
        ("content", bad_content),
        ("timestamp", bad_timestamp),
        ("salt", bad_salt),
    ] {
        assert!(!bob_view().verify_chained(&msg).0, "tampered {what} verified");
    }
}

#[test]
fn test_timestamp_signed_at_second_granularity() {
    let layout = chained_layout();
    let signature = alice()
        .sign_chat(&layout, "tick", TIMESTAMP, 5, &Acknowledgment::default())
        .unwrap()
        .unwrap();
    let original = relayed("tick", 5, None, signature);

    for delta in [1, 2, 999] {
        let mut msg = original.clone();
        msg.timestamp = TIMESTAMP + delta;
        assert!(bob_view().verify_chained(&msg).0, "+{delta} ms is the same second");
    }
    for delta in [-1, 1000, 1_000_000] {
        let mut msg = original.clone();
        msg.timestamp = TIMESTAMP + delta;
        assert!(!bob_view().verify_chained(&msg).0, "{delta:+} ms changes the second");
    }
}

#[test]
fn test_broken_chain_stays_broken() {
    let layout = chained_layout();
    let mut sender = alice();
    let mut receiver = bob_view();
    let ack = Acknowledgment::default();

    let first = sender.sign_chat(&layout, "a", TIMESTAMP, 1, &ack).unwrap().unwrap();
    let mut forged = relayed("a", 1, None, first.clone());
    forged.plain_content = "b".into();
    assert!(!receiver.verify_chained(&forged).0);
    assert!(!receiver.players().get(&ALICE).unwrap().chain_legal);

    // genuine messages from now on are still refused
    assert!(!receiver.verify_chained(&relayed("a", 1, None, first.clone())).0);
    let second = sender.sign_chat(&layout, "c", TIMESTAMP, 2, &ack).unwrap().unwrap();
    assert!(!receiver.verify_chained(&relayed("c", 2, Some(first), second)).0);
    assert_eq!(receiver.pending(), 0);
}

#[test]
fn test_acknowledgment_threshold_and_manual_reset() {
    let mut chain = ChatChain::new(true, BOB, None);
    for n in 0..ACKNOWLEDGMENT_THRESHOLD {
        let due = chain.record_seen(LastSeenEntry {
            profile: ALICE,
            signature: vec![n as u8],
        });
        assert!(!due, "no acknowledgment due after {} messages", n + 1);
    }
    assert!(chain.record_seen(LastSeenEntry {
        profile: ALICE,
        signature: vec![0xFF],
    }));

    let ack = chain.consume_acknowledgment();
    assert_eq!(chain.pending(), 0);
    assert_eq!(ack.last_received.unwrap().signature, vec![0xFF]);
    assert!(ack.last_seen.len() <= blockwire::chat::LAST_SEEN_CAPACITY);
}

#[test]
fn test_signed_layout_roundtrip() {
    let layout = WireLayout::for_version(759).unwrap();
    let signature = alice()
        .sign_chat(&layout, "hi bob", TIMESTAMP, 42, &Acknowledgment::default())
        .unwrap()
        .unwrap();
    let mut msg = SignedChat {
        signed_content: signing::text_component("hi bob"),
        unsigned_content: None,
        chat_type: 0,
        sender: ALICE,
        sender_name: "Alice".into(),
        team_name: None,
        timestamp: TIMESTAMP,
        salt: 42,
        signature,
    };
    assert!(bob_view().verify_signed(&msg));

    msg.timestamp += 999;
    assert!(bob_view().verify_signed(&msg));

    msg.timestamp += 1;
    assert!(!bob_view().verify_signed(&msg));

    msg.timestamp -= 1000;
    msg.salt = 43;
    assert!(!bob_view().verify_signed(&msg));
}

#[test]
fn test_offline_connection_never_verifies() {
    let layout = chained_layout();
    let signature = alice()
        .sign_chat(&layout, "x", TIMESTAMP, 1, &Acknowledgment::default())
        .unwrap()
        .unwrap();
    let mut offline = ChatChain::new(false, BOB, None);
    offline
        .players_mut()
        .add(PlayerIdentity::new(ALICE, "Alice", Some(&alice_profile_key())));
    assert_eq!(offline.verify_chained(&relayed("x", 1, None, signature)), (false, false));
}

#[test]
fn test_expired_sender_key_rejected() {
    let layout = chained_layout();
    let signature = alice()
        .sign_chat(&layout, "late", TIMESTAMP, 1, &Acknowledgment::default())
        .unwrap()
        .unwrap();
    let mut receiver = ChatChain::new(true, BOB, None);
    let mut key = alice_profile_key();
    key.expires_at = time::now_millis() - 1;
    receiver
        .players_mut()
        .add(PlayerIdentity::new(ALICE, "Alice", Some(&key)));
    assert!(!receiver.verify_chained(&relayed("late", 1, None, signature)).0);
}
