//! # Version Palettes
//!
//! Play-phase packet ids move around between game versions. A [`VersionPalette`]
//! is the bidirectional id table for one version bracket, built from the static
//! tables in the per-version submodules when a connection is set up and never
//! mutated afterwards.
//!
//! ## Selection
//! Brackets are checked in ascending order by their highest protocol; the
//! first bracket whose upper bound is not below the requested protocol wins.
//! Only a protocol above the last bracket is
//! [`ProtocolError::UnsupportedVersion`]. Older protocols get the oldest
//! palette; whether their field layouts can be spoken is decided separately by
//! [`WireLayout::for_version`](crate::protocol::version::WireLayout::for_version).
//!
//! | Protocol   | Palette  |
//! |------------|----------|
//! | ..=758     | 1.18     |
//! | 759        | 1.19     |
//! | 760        | 1.19.2   |

mod v1_18;
mod v1_19;
mod v1_19_2;

use crate::error::{ProtocolError, Result};
use crate::protocol::packet_type::{PacketTypeIn, PacketTypeOut};
use crate::protocol::version::{MC_1_18_2_VERSION, MC_1_19_2_VERSION, MC_1_19_VERSION};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Static id data for one bracket.
pub(crate) struct PaletteTables {
    pub name: &'static str,
    pub inbound: &'static [(i32, PacketTypeIn)],
    pub outbound: &'static [(i32, PacketTypeOut)],
}

/// Upper protocol bound of each bracket, ascending.
static BRACKETS: &[(i32, &PaletteTables)] = &[
    (MC_1_18_2_VERSION, &v1_18::PALETTE_1_18),
    (MC_1_19_VERSION, &v1_19::PALETTE_1_19),
    (MC_1_19_2_VERSION, &v1_19_2::PALETTE_1_19_2),
];

/// Id table bound to one connection.
#[derive(Debug, Clone)]
pub struct VersionPalette {
    name: &'static str,
    protocol: i32,
    forge: bool,
    inbound: HashMap<i32, PacketTypeIn>,
    inbound_ids: HashMap<PacketTypeIn, i32>,
    outbound: HashMap<PacketTypeOut, i32>,
    outbound_types: HashMap<i32, PacketTypeOut>,
}

impl VersionPalette {
    fn from_tables(tables: &PaletteTables, protocol: i32, forge: bool) -> Self {
        Self {
            name: tables.name,
            protocol,
            forge,
            inbound: tables.inbound.iter().copied().collect(),
            inbound_ids: tables.inbound.iter().map(|&(id, ty)| (ty, id)).collect(),
            outbound: tables.outbound.iter().map(|&(id, ty)| (ty, id)).collect(),
            outbound_types: tables.outbound.iter().copied().collect(),
        }
    }

    /// Bracket name, e.g. `"1.19.2"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn protocol(&self) -> i32 {
        self.protocol
    }

    pub fn forge_enabled(&self) -> bool {
        self.forge
    }

    /// Semantic type of an inbound id. Ids outside the table map to
    /// [`PacketTypeIn::Unknown`].
    pub fn incoming_type(&self, id: i32) -> PacketTypeIn {
        self.inbound.get(&id).copied().unwrap_or(PacketTypeIn::Unknown)
    }

    /// Numeric id of an outbound type, if this version has it.
    pub fn outgoing_id(&self, packet: PacketTypeOut) -> Result<i32> {
        self.outbound.get(&packet).copied().ok_or_else(|| {
            ProtocolError::Custom(format!("{packet} does not exist in palette {}", self.name))
        })
    }

    /// Reverse lookup used when playing the server side (tests, proxies).
    pub fn incoming_id(&self, packet: PacketTypeIn) -> Option<i32> {
        self.inbound_ids.get(&packet).copied()
    }

    pub fn outgoing_type(&self, id: i32) -> Option<PacketTypeOut> {
        self.outbound_types.get(&id).copied()
    }

    pub fn inbound_len(&self) -> usize {
        self.inbound.len()
    }

    pub fn outbound_len(&self) -> usize {
        self.outbound.len()
    }
}

/// Build the palette for `protocol`.
pub fn resolve(protocol: i32, forge: bool) -> Result<Arc<VersionPalette>> {
    let tables = BRACKETS
        .iter()
        .find(|(upper, _)| protocol <= *upper)
        .map(|(_, tables)| *tables)
        .ok_or(ProtocolError::UnsupportedVersion(protocol))?;
    debug!(protocol, palette = tables.name, forge, "Resolved version palette");
    Ok(Arc::new(VersionPalette::from_tables(tables, protocol, forge)))
}
