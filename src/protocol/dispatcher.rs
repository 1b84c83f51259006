use crate::error::{constants, ProtocolError, Result};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::trace;

type HandlerFn = dyn Fn(&[u8]) -> Result<()> + Send + Sync + 'static;

/// Channel every vanilla server announces its brand on.
pub const BRAND_CHANNEL: &str = "minecraft:brand";

/// Plugin-message router keyed by channel identifier.
/// Well-known channels are registered with borrowed names; cloning the
/// dispatcher shares the handler table.
#[derive(Clone)]
pub struct ChannelDispatcher {
    handlers: Arc<RwLock<HashMap<Cow<'static, str>, Box<HandlerFn>>>>,
}

impl Default for ChannelDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn register<F>(&self, channel: impl Into<Cow<'static, str>>, handler: F) -> Result<()>
    where
        F: Fn(&[u8]) -> Result<()> + Send + Sync + 'static,
    {
        let mut handlers = self
            .handlers
            .write()
            .map_err(|_| ProtocolError::LockPoisoned(constants::ERR_DISPATCHER_WRITE_LOCK))?;

        handlers.insert(channel.into(), Box::new(handler));
        Ok(())
    }

    pub fn unregister(&self, channel: &str) -> Result<bool> {
        let mut handlers = self
            .handlers
            .write()
            .map_err(|_| ProtocolError::LockPoisoned(constants::ERR_DISPATCHER_WRITE_LOCK))?;
        Ok(handlers.remove(channel).is_some())
    }

    /// Route `data` to the channel's handler. `Ok(false)` when nobody listens.
    pub fn dispatch(&self, channel: &str, data: &[u8]) -> Result<bool> {
        let handlers = self
            .handlers
            .read()
            .map_err(|_| ProtocolError::LockPoisoned(constants::ERR_DISPATCHER_READ_LOCK))?;

        match handlers.get(channel) {
            Some(handler) => handler(data).map(|()| true),
            None => {
                trace!(channel, len = data.len(), "No listener for plugin channel");
                Ok(false)
            }
        }
    }

    pub fn is_registered(&self, channel: &str) -> bool {
        self.handlers
            .read()
            .map(|h| h.contains_key(channel))
            .unwrap_or(false)
    }
}
