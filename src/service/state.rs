//! Per-connection state shared by the processing task and outbound senders.
//!
//! Everything fixed by login is stored plainly. The few fields that change
//! during play (dimension, brand, entity id) are written only by the
//! processing task; the chat chain is behind a mutex that outbound sends take
//! briefly to sign.

use crate::chat::ChatChain;
use crate::error::{constants, ProtocolError, Result};
use crate::protocol::handshake::LoginSuccess;
use crate::protocol::packets::login::LoginOutcome;
use crate::protocol::version::WireLayout;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

pub struct ConnectionState {
    layout: WireLayout,
    outcome: LoginOutcome,
    online: bool,
    encrypted: bool,
    compression_threshold: i32,
    entity_id: AtomicI32,
    dimension: RwLock<Option<String>>,
    brand: RwLock<Option<String>>,
    chat: Mutex<ChatChain>,
}

impl ConnectionState {
    pub fn new(layout: WireLayout, login: LoginSuccess, encrypted: bool, chat: ChatChain) -> Self {
        Self {
            layout,
            outcome: login.outcome,
            online: login.online,
            encrypted,
            compression_threshold: login.compression_threshold,
            entity_id: AtomicI32::new(0),
            dimension: RwLock::new(None),
            brand: RwLock::new(None),
            chat: Mutex::new(chat),
        }
    }

    pub fn layout(&self) -> &WireLayout {
        &self.layout
    }

    /// Profile the server logged us in as.
    pub fn profile(&self) -> &LoginOutcome {
        &self.outcome
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    /// Negotiated threshold, or -1 when compression is off.
    pub fn compression_threshold(&self) -> i32 {
        self.compression_threshold
    }

    pub fn entity_id(&self) -> i32 {
        self.entity_id.load(Ordering::Acquire)
    }

    pub(crate) fn set_entity_id(&self, id: i32) {
        self.entity_id.store(id, Ordering::Release);
    }

    pub fn dimension(&self) -> Option<String> {
        self.dimension
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn set_dimension(&self, name: String) {
        *self.dimension.write().unwrap_or_else(PoisonError::into_inner) = Some(name);
    }

    /// Server brand from `minecraft:brand`, once announced.
    pub fn brand(&self) -> Option<String> {
        self.brand.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(crate) fn set_brand(&self, brand: String) {
        *self.brand.write().unwrap_or_else(PoisonError::into_inner) = Some(brand);
    }

    /// Lock the chat chain. Never hold the guard across an await.
    pub fn chat(&self) -> Result<MutexGuard<'_, ChatChain>> {
        self.chat
            .lock()
            .map_err(|_| ProtocolError::LockPoisoned(constants::ERR_LOCK_POISONED))
    }
}
