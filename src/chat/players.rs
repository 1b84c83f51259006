//! Remote players known to the connection, tracked for signature checks.

use crate::protocol::packets::inbound::{PlayerListEntry, ProfilePublicKey};
use crate::utils::{crypto, time};
use rsa::RsaPublicKey;
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

/// What the chain needs to know about one remote player.
#[derive(Debug, Clone)]
pub struct PlayerIdentity {
    pub uuid: Uuid,
    pub name: String,
    pub public_key: Option<RsaPublicKey>,
    /// Epoch milliseconds; zero when no key was announced.
    pub key_expires_at: i64,
    /// Cleared on the first failed verification and never set again.
    pub chain_legal: bool,
    /// Header signature of the last verified message.
    pub last_signature: Option<Vec<u8>>,
}

impl PlayerIdentity {
    pub fn new(uuid: Uuid, name: impl Into<String>, key: Option<&ProfilePublicKey>) -> Self {
        let name = name.into();
        let (public_key, key_expires_at) = match key {
            Some(k) => match crypto::parse_public_key(&k.key) {
                Ok(parsed) => (Some(parsed), k.expires_at),
                Err(e) => {
                    warn!(player = %name, error = %e, "Ignoring unparsable profile key");
                    (None, 0)
                }
            },
            None => (None, 0),
        };
        Self {
            uuid,
            name,
            public_key,
            key_expires_at,
            chain_legal: true,
            last_signature: None,
        }
    }

    pub fn from_entry(entry: &PlayerListEntry) -> Self {
        Self::new(entry.uuid, entry.name.clone(), entry.public_key.as_ref())
    }

    /// Key usable for verification right now.
    pub fn verifying_key(&self) -> Option<&RsaPublicKey> {
        self.public_key
            .as_ref()
            .filter(|_| !time::is_expired(self.key_expires_at))
    }
}

/// Players currently on the tab list.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: HashMap<Uuid, PlayerIdentity>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a player. A repeated add keeps the existing chain state.
    pub fn add(&mut self, identity: PlayerIdentity) {
        debug!(player = %identity.name, uuid = %identity.uuid, keyed = identity.public_key.is_some(), "Player added");
        self.players.entry(identity.uuid).or_insert(identity);
    }

    pub fn remove(&mut self, uuid: &Uuid) -> Option<PlayerIdentity> {
        self.players.remove(uuid)
    }

    pub fn get(&self, uuid: &Uuid) -> Option<&PlayerIdentity> {
        self.players.get(uuid)
    }

    pub fn get_mut(&mut self, uuid: &Uuid) -> Option<&mut PlayerIdentity> {
        self.players.get_mut(uuid)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }
}
