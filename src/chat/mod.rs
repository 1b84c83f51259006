//! Signed chat: message signatures, per-sender chains, the last-seen window
//! and the commands whose arguments are signed.

pub mod chain;
pub mod command;
pub mod last_seen;
pub mod players;
pub mod signing;

pub use chain::{ChatChain, OutboundAdvance};
pub use last_seen::{Acknowledgment, LastSeenWindow, ACKNOWLEDGMENT_THRESHOLD, LAST_SEEN_CAPACITY};
pub use players::{PlayerIdentity, PlayerRegistry};
