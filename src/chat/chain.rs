//! # Chat Chain State
//!
//! Per-connection bookkeeping for signed chat:
//!
//! - which remote senders still have a legal chain, and the last header
//!   signature each one produced;
//! - the last-seen window and the pending counter that decides when an
//!   acknowledgment must go out unprompted;
//! - the local signing chain for outbound messages.
//!
//! The processing loop is the only writer of the inbound half. Outbound sends
//! take the same lock briefly to sign and snapshot the window.

use super::last_seen::{Acknowledgment, LastSeenWindow, ACKNOWLEDGMENT_THRESHOLD};
use super::players::{PlayerIdentity, PlayerRegistry};
use super::signing;
use crate::error::Result;
use crate::protocol::packets::inbound::{ChainedChat, LastSeenEntry, MessageHeader, SignedChat};
use crate::protocol::packets::outbound::ArgumentSignature;
use crate::protocol::session::PlayerKeyPair;
use crate::protocol::version::{ChatLayout, WireLayout};
use rsa::RsaPublicKey;
use tracing::{debug, trace, warn};
use uuid::Uuid;

pub struct ChatChain {
    online: bool,
    local: Uuid,
    keys: Option<PlayerKeyPair>,
    players: PlayerRegistry,
    window: LastSeenWindow,
    last_received: Option<LastSeenEntry>,
    pending: u32,
    last_sent_signature: Option<Vec<u8>>,
}

impl ChatChain {
    /// `online` is whether the connection authenticated with the session
    /// service; offline connections never report a message as verified.
    pub fn new(online: bool, local: Uuid, keys: Option<PlayerKeyPair>) -> Self {
        Self {
            online,
            local,
            keys,
            players: PlayerRegistry::new(),
            window: LastSeenWindow::default(),
            last_received: None,
            pending: 0,
            last_sent_signature: None,
        }
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut PlayerRegistry {
        &mut self.players
    }

    /// Check a 1.19 message.
    pub fn verify_signed(&mut self, msg: &SignedChat) -> bool {
        self.check(msg.sender, None, |key| signing::verify_v1(key, msg))
            .is_some()
    }

    /// Check a 1.19.1+ message. A verified message advances the sender's chain
    /// and is recorded as seen.
    ///
    /// Returns `(verified, acknowledgment_due)`.
    pub fn verify_chained(&mut self, msg: &ChainedChat) -> (bool, bool) {
        let verified = self
            .check(
                msg.sender,
                msg.preceding_signature.as_deref(),
                |key| signing::verify_v2(key, msg),
            )
            .is_some();
        if verified {
            self.remember(msg.sender, &msg.header_signature);
        }
        if !verified || msg.sender.is_nil() {
            return (verified, false);
        }
        let due = self.record_seen(LastSeenEntry {
            profile: msg.sender,
            signature: msg.header_signature.clone(),
        });
        (verified, due)
    }

    /// Advance a sender's chain from a header whose body was withheld.
    pub fn observe_header(&mut self, header: &MessageHeader) -> bool {
        let verified = self
            .check(
                header.sender,
                header.preceding_signature.as_deref(),
                |key| signing::verify_header(key, header),
            )
            .is_some();
        if verified {
            self.remember(header.sender, &header.header_signature);
        }
        verified
    }

    /// Shared acceptance rules. `Some(())` means verified.
    fn check(
        &mut self,
        sender: Uuid,
        preceding: Option<&[u8]>,
        verify: impl FnOnce(&RsaPublicKey) -> bool,
    ) -> Option<()> {
        if !self.online {
            return None;
        }
        if sender == self.local {
            return Some(());
        }
        let player = self.players.get_mut(&sender)?;
        if !player.chain_legal {
            trace!(player = %player.name, "Message from sender with broken chain");
            return None;
        }

        let linked = match (preceding, player.last_signature.as_deref()) {
            (Some(claimed), Some(stored)) => claimed == stored,
            _ => true,
        };
        let verified = linked && player.verifying_key().is_some_and(verify);
        if verified {
            Some(())
        } else {
            break_chain(player, linked);
            None
        }
    }

    fn remember(&mut self, sender: Uuid, header_signature: &[u8]) {
        if let Some(player) = self.players.get_mut(&sender) {
            player.last_signature = Some(header_signature.to_vec());
        }
    }

    /// Note a verified message. Returns true when the pending count has passed
    /// the threshold and an acknowledgment must be sent now.
    pub fn record_seen(&mut self, entry: LastSeenEntry) -> bool {
        self.window.push(entry.clone());
        self.last_received = Some(entry);
        self.pending += 1;
        self.pending > ACKNOWLEDGMENT_THRESHOLD
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Current acknowledgment, leaving the pending count alone.
    pub fn acknowledgment(&self) -> Acknowledgment {
        Acknowledgment {
            last_seen: self.window.to_vec(),
            last_received: self.last_received.clone(),
        }
    }

    /// Take the acknowledgment to attach to an outgoing packet, resetting the
    /// pending count.
    pub fn consume_acknowledgment(&mut self) -> Acknowledgment {
        self.pending = 0;
        self.acknowledgment()
    }

    /// Acknowledgment for an outgoing packet without consuming it. The
    /// returned advance resets the pending count once committed. Versions
    /// without acknowledgments get an empty one that commits to nothing.
    pub fn outgoing_acknowledgment(&self, layout: &WireLayout) -> (Acknowledgment, OutboundAdvance) {
        if !layout.has_acknowledgments() {
            return (Acknowledgment::default(), OutboundAdvance::default());
        }
        let advance = OutboundAdvance {
            acknowledged: self.pending,
            ..OutboundAdvance::default()
        };
        (self.acknowledgment(), advance)
    }

    /// Apply what a sent packet moved forward. Messages recorded after the
    /// acknowledgment was taken stay pending.
    pub fn commit(&mut self, advance: OutboundAdvance) {
        self.pending = self.pending.saturating_sub(advance.acknowledged);
        if let Some(signature) = advance.last_signature {
            self.last_sent_signature = Some(signature);
        }
    }

    fn active_keys(&self) -> Option<&PlayerKeyPair> {
        self.keys.as_ref().filter(|k| !k.is_expired())
    }

    pub fn can_sign(&self) -> bool {
        self.active_keys().is_some()
    }

    /// Signature for an outgoing chat line, or `None` when the message goes
    /// out unsigned (legacy versions or no usable key pair). The local chain
    /// only moves once `advance` is committed.
    pub fn prepare_chat(
        &self,
        layout: &WireLayout,
        text: &str,
        timestamp: i64,
        salt: i64,
        ack: &Acknowledgment,
        advance: &mut OutboundAdvance,
    ) -> Result<Option<Vec<u8>>> {
        let Some(keys) = self.active_keys() else {
            return Ok(None);
        };
        match layout.chat {
            ChatLayout::Legacy => Ok(None),
            ChatLayout::Signed => {
                signing::sign_v1(&keys.private_key, salt, self.local, timestamp, text).map(Some)
            }
            ChatLayout::Chained => {
                let preceding = advance
                    .last_signature
                    .as_deref()
                    .or(self.last_sent_signature.as_deref());
                let digest = signing::body_digest(salt, timestamp, text, &ack.last_seen);
                let signature = signing::sign_v2(&keys.private_key, preceding, self.local, &digest)?;
                advance.last_signature = Some(signature.clone());
                Ok(Some(signature))
            }
        }
    }

    /// Signatures for the signable arguments of a command. Every argument is
    /// signed as its own message, so on chained versions each one links to
    /// the one before it.
    pub fn prepare_command_arguments(
        &self,
        layout: &WireLayout,
        arguments: &[(&'static str, String)],
        timestamp: i64,
        salt: i64,
        ack: &Acknowledgment,
        advance: &mut OutboundAdvance,
    ) -> Result<Vec<ArgumentSignature>> {
        let mut signatures = Vec::with_capacity(arguments.len());
        for (name, value) in arguments {
            if let Some(signature) = self.prepare_chat(layout, value, timestamp, salt, ack, advance)? {
                signatures.push(ArgumentSignature {
                    name: (*name).to_string(),
                    signature,
                });
            }
        }
        debug!(count = signatures.len(), "Signed command arguments");
        Ok(signatures)
    }

    /// [`Self::prepare_chat`] committed immediately.
    pub fn sign_chat(
        &mut self,
        layout: &WireLayout,
        text: &str,
        timestamp: i64,
        salt: i64,
        ack: &Acknowledgment,
    ) -> Result<Option<Vec<u8>>> {
        let mut advance = OutboundAdvance::default();
        let signature = self.prepare_chat(layout, text, timestamp, salt, ack, &mut advance)?;
        self.commit(advance);
        Ok(signature)
    }

    /// [`Self::prepare_command_arguments`] committed immediately.
    pub fn sign_command_arguments(
        &mut self,
        layout: &WireLayout,
        arguments: &[(&'static str, String)],
        timestamp: i64,
        salt: i64,
        ack: &Acknowledgment,
    ) -> Result<Vec<ArgumentSignature>> {
        let mut advance = OutboundAdvance::default();
        let signatures =
            self.prepare_command_arguments(layout, arguments, timestamp, salt, ack, &mut advance)?;
        self.commit(advance);
        Ok(signatures)
    }
}

/// Chain state an outgoing packet moves forward: the last signature it
/// carries and how many pending messages its acknowledgment covers. Applied
/// with [`ChatChain::commit`] once the packet was written.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[must_use]
pub struct OutboundAdvance {
    last_signature: Option<Vec<u8>>,
    acknowledged: u32,
}

fn break_chain(player: &mut PlayerIdentity, linked: bool) {
    player.chain_legal = false;
    warn!(
        player = %player.name,
        uuid = %player.uuid,
        linked,
        "Message chain broken"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::protocol::packets::inbound::{FilterMask, ProfilePublicKey};
    use crate::utils::crypto::{self, tests::test_key};
    use crate::utils::time;

    const SENDER: Uuid = Uuid::from_u128(0xAB);
    const LOCAL: Uuid = Uuid::from_u128(0x01);

    fn chain(online: bool) -> ChatChain {
        let mut chain = ChatChain::new(online, LOCAL, None);
        let key = ProfilePublicKey {
            expires_at: time::now_millis() + 3_600_000,
            key: crypto::public_key_der(&test_key().to_public_key()).unwrap(),
            signature: vec![],
        };
        chain
            .players_mut()
            .add(PlayerIdentity::new(SENDER, "Steve", Some(&key)));
        chain
    }

    fn message(preceding: Option<Vec<u8>>, text: &str) -> ChainedChat {
        let digest = signing::body_digest(7, 1_660_000_000_000, text, &[]);
        ChainedChat {
            header_signature: signing::sign_v2(test_key(), preceding.as_deref(), SENDER, &digest)
                .unwrap(),
            preceding_signature: preceding,
            sender: SENDER,
            plain_content: text.into(),
            decorated_content: None,
            timestamp: 1_660_000_000_000,
            salt: 7,
            last_seen: vec![],
            unsigned_content: None,
            filter: FilterMask::PassThrough,
            chat_type: 0,
            sender_name: "Steve".into(),
            target_name: None,
        }
    }

    #[test]
    fn test_offline_never_verifies() {
        let mut chain = chain(false);
        assert!(!chain.verify_chained(&message(None, "hi")).0);
        assert_eq!(chain.pending(), 0);
    }

    #[test]
    fn test_unknown_sender_rejected() {
        let mut chain = chain(true);
        let mut msg = message(None, "hi");
        msg.sender = Uuid::from_u128(0xCD);
        assert!(!chain.verify_chained(&msg).0);
    }

    #[test]
    fn test_local_sender_trusted() {
        let mut chain = chain(true);
        let mut msg = message(None, "hi");
        msg.sender = LOCAL;
        msg.header_signature = vec![0; 4];
        assert!(chain.verify_chained(&msg).0);
    }

    #[test]
    fn test_chain_advances_then_breaks_for_good() {
        let mut chain = chain(true);
        let first = message(None, "one");
        assert!(chain.verify_chained(&first).0);

        let second = message(Some(first.header_signature.clone()), "two");
        assert!(chain.verify_chained(&second).0);

        let mut forged = message(Some(second.header_signature.clone()), "three");
        forged.plain_content = "four".into();
        assert!(!chain.verify_chained(&forged).0);
        assert!(!chain.players().get(&SENDER).unwrap().chain_legal);

        let honest = message(Some(second.header_signature.clone()), "five");
        assert!(!chain.verify_chained(&honest).0);
    }

    #[test]
    fn test_wrong_link_breaks_chain() {
        let mut chain = chain(true);
        let first = message(None, "one");
        assert!(chain.verify_chained(&first).0);
        let skipped = message(Some(vec![1, 2, 3]), "two");
        assert!(!chain.verify_chained(&skipped).0);
    }

    #[test]
    fn test_acknowledgment_due_after_threshold() {
        let mut chain = chain(true);
        let mut previous = None;
        for n in 0..ACKNOWLEDGMENT_THRESHOLD {
            let msg = message(previous.take(), &format!("m{n}"));
            let (verified, due) = chain.verify_chained(&msg);
            assert!(verified);
            assert!(!due);
            previous = Some(msg.header_signature);
        }
        assert_eq!(chain.pending(), ACKNOWLEDGMENT_THRESHOLD);
        let msg = message(previous, "last");
        assert_eq!(chain.verify_chained(&msg), (true, true));

        let ack = chain.consume_acknowledgment();
        assert_eq!(chain.pending(), 0);
        assert_eq!(ack.last_seen.len(), 1);
        assert_eq!(ack.last_received.unwrap().signature, msg.header_signature);
    }

    #[test]
    fn test_unsigned_without_keys() {
        let mut chain = chain(true);
        let layout = WireLayout::for_version(760).unwrap();
        let sig = chain
            .sign_chat(&layout, "hi", 0, 0, &Acknowledgment::default())
            .unwrap();
        assert!(sig.is_none());
    }

    #[test]
    fn test_outbound_chain_links() {
        let keys = PlayerKeyPair::new(test_key().clone(), i64::MAX, vec![], vec![]).unwrap();
        let mut chain = ChatChain::new(true, LOCAL, Some(keys));
        let layout = WireLayout::for_version(760).unwrap();
        let ack = Acknowledgment::default();
        let public = test_key().to_public_key();

        let first = chain.sign_chat(&layout, "a", 1000, 1, &ack).unwrap().unwrap();
        let second = chain.sign_chat(&layout, "b", 2000, 2, &ack).unwrap().unwrap();
        let digest = signing::body_digest(2, 2000, "b", &[]);
        let header = MessageHeader {
            preceding_signature: Some(first),
            sender: LOCAL,
            header_signature: second,
            body_digest: digest.to_vec(),
        };
        assert!(signing::verify_header(&public, &header));

        let args = chain
            .sign_command_arguments(
                &layout,
                &[("message", "x".into()), ("reason", "y".into())],
                3000,
                3,
                &ack,
            )
            .unwrap();
        assert_eq!(args.len(), 2);
        assert_eq!(args[1].name, "reason");
    }

    #[test]
    fn test_prepared_send_moves_nothing_until_committed() {
        let keys = PlayerKeyPair::new(test_key().clone(), i64::MAX, vec![], vec![]).unwrap();
        let mut chain = ChatChain::new(true, LOCAL, Some(keys));
        let layout = WireLayout::for_version(760).unwrap();
        let public = test_key().to_public_key();
        for n in 0..3u8 {
            chain.record_seen(LastSeenEntry {
                profile: SENDER,
                signature: vec![n],
            });
        }

        let (ack, mut advance) = chain.outgoing_acknowledgment(&layout);
        let dropped = chain
            .prepare_chat(&layout, "lost", 1000, 1, &ack, &mut advance)
            .unwrap()
            .unwrap();
        assert_eq!(chain.pending(), 3);
        drop(advance);

        // the dropped send must not become the preceding signature
        let (ack, mut advance) = chain.outgoing_acknowledgment(&layout);
        let sent = chain
            .prepare_chat(&layout, "kept", 2000, 2, &ack, &mut advance)
            .unwrap()
            .unwrap();
        let unlinked = MessageHeader {
            preceding_signature: None,
            sender: LOCAL,
            header_signature: sent.clone(),
            body_digest: signing::body_digest(2, 2000, "kept", &ack.last_seen).to_vec(),
        };
        assert!(signing::verify_header(&public, &unlinked));
        assert_ne!(dropped, sent);

        chain.record_seen(LastSeenEntry {
            profile: SENDER,
            signature: vec![9],
        });
        chain.commit(advance);
        assert_eq!(chain.pending(), 1, "messages seen after the snapshot stay pending");

        let next = chain
            .sign_chat(&layout, "after", 3000, 3, &Acknowledgment::default())
            .unwrap()
            .unwrap();
        let linked = MessageHeader {
            preceding_signature: Some(sent),
            sender: LOCAL,
            header_signature: next,
            body_digest: signing::body_digest(3, 3000, "after", &[]).to_vec(),
        };
        assert!(signing::verify_header(&public, &linked));
    }

    #[test]
    fn test_legacy_acknowledgment_is_empty() {
        let mut chain = chain(true);
        chain.record_seen(LastSeenEntry {
            profile: SENDER,
            signature: vec![1],
        });
        let (ack, advance) = chain.outgoing_acknowledgment(&WireLayout::for_version(759).unwrap());
        assert!(ack.last_seen.is_empty());
        chain.commit(advance);
        assert_eq!(chain.pending(), 1);
    }

    #[test]
    fn test_legacy_never_signs() {
        let keys = PlayerKeyPair::new(test_key().clone(), i64::MAX, vec![], vec![]).unwrap();
        let mut chain = ChatChain::new(true, LOCAL, Some(keys));
        let layout = WireLayout::for_version(758).unwrap();
        assert!(chain
            .sign_chat(&layout, "hi", 0, 0, &Acknowledgment::default())
            .unwrap()
            .is_none());
    }
}
