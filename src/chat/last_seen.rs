//! Rolling window of recently seen message signatures and the acknowledgment
//! built from it.

use crate::core::types::{PacketReader, PacketWriter};
use crate::error::Result;
use crate::protocol::packets::inbound::LastSeenEntry;
use std::collections::VecDeque;

/// Entries kept in the window.
pub const LAST_SEEN_CAPACITY: usize = 5;

/// Pending messages tolerated before an acknowledgment is sent unprompted.
pub const ACKNOWLEDGMENT_THRESHOLD: u32 = 64;

/// Newest-last window of `(sender, signature)` pairs.
///
/// A sender appears at most once; a newer message from the same sender
/// replaces the older reference.
#[derive(Debug, Clone)]
pub struct LastSeenWindow {
    entries: VecDeque<LastSeenEntry>,
    capacity: usize,
}

impl Default for LastSeenWindow {
    fn default() -> Self {
        Self::new(LAST_SEEN_CAPACITY)
    }
}

impl LastSeenWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, entry: LastSeenEntry) {
        self.entries.retain(|e| e.profile != entry.profile);
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &LastSeenEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<LastSeenEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What the client tells the server it has seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acknowledgment {
    pub last_seen: Vec<LastSeenEntry>,
    pub last_received: Option<LastSeenEntry>,
}

impl Acknowledgment {
    pub fn write(&self, w: &mut PacketWriter) {
        w.varint(self.last_seen.len() as i32);
        for entry in &self.last_seen {
            entry.write(w);
        }
        match &self.last_received {
            Some(entry) => {
                w.bool(true);
                entry.write(w);
            }
            None => {
                w.bool(false);
            }
        }
    }

    pub fn read(r: &mut PacketReader) -> Result<Self> {
        let count = r.read_length("last seen count")?;
        let last_seen = (0..count)
            .map(|_| LastSeenEntry::read(r))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            last_seen,
            last_received: r.read_optional(LastSeenEntry::read)?,
        })
    }
}
