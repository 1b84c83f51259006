//! Consumer-facing callback surface.
//!
//! The engine never renders or simulates anything itself. Every decoded
//! play packet ends up as one of these callbacks, invoked from the processing
//! task in arrival order. All methods default to no-ops so a consumer only
//! implements what it cares about.

use crate::error::DisconnectReason;
use crate::protocol::packets::inbound::{
    ChunkData, EntityMove, EntityTeleport, JoinGame, OpenWindow, PlayerChat, PlayerInfo,
    PlayerListEntry, PlayerPositionAndLook, PluginMessage, ResourcePackSend, Respawn, ServerData,
    SetExperience, SetSlot, SpawnEntity, SpawnPlayer, TimeUpdate, UpdateHealth, WindowItems,
};
use crate::protocol::packets::login::LoginOutcome;
use uuid::Uuid;

/// Result of handling one play packet. Fatal conditions are `Err`, never an
/// outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketOutcome {
    Handled,
    /// Unknown id or a recognised type this engine does not decode.
    Skipped,
}

#[allow(unused_variables)]
pub trait ProtocolHandler: Send + Sync {
    fn on_login_success(&self, outcome: &LoginOutcome) {}

    fn on_game_joined(&self, join: &JoinGame) {}

    fn on_respawn(&self, respawn: &Respawn) {}

    fn on_server_data(&self, data: &ServerData) {}

    /// Called after the keep-alive was echoed.
    fn on_keep_alive(&self, id: i64) {}

    /// Called after the teleport was confirmed.
    fn on_position(&self, position: &PlayerPositionAndLook) {}

    /// Periodic upkeep, at least once per processing cycle and again whenever
    /// draining a backlog outlasts the cadence.
    fn on_update(&self) {}

    /// Terminal notification. Delivered exactly once per connection.
    fn on_connection_lost(&self, reason: DisconnectReason, detail: &str) {}

    /// Player chat. `verified` is only ever true for signed layouts on an
    /// online connection.
    fn on_text_received(&self, message: &PlayerChat, verified: bool) {}

    fn on_system_message(&self, json: &str) {}

    fn on_action_bar(&self, json: &str) {}

    fn on_player_joined(&self, entry: &PlayerListEntry) {}

    fn on_player_left(&self, uuid: Uuid) {}

    /// Gamemode, latency and display-name updates.
    fn on_player_info(&self, info: &PlayerInfo) {}

    fn on_chunk_data(&self, chunk: &ChunkData) {}

    fn on_chunk_unload(&self, x: i32, z: i32) {}

    fn on_entity_spawn(&self, entity: &SpawnEntity) {}

    fn on_player_spawn(&self, player: &SpawnPlayer) {}

    fn on_entities_destroyed(&self, entity_ids: &[i32]) {}

    fn on_entity_move(&self, movement: &EntityMove) {}

    fn on_entity_teleport(&self, teleport: &EntityTeleport) {}

    fn on_inventory_open(&self, window: &OpenWindow) {}

    fn on_inventory_close(&self, window_id: u8) {}

    fn on_window_items(&self, items: &WindowItems) {}

    fn on_set_slot(&self, slot: &SetSlot) {}

    fn on_held_item_change(&self, slot: i8) {}

    fn on_time_update(&self, time: &TimeUpdate) {}

    fn on_health_update(&self, health: &UpdateHealth) {}

    fn on_experience(&self, experience: &SetExperience) {}

    fn on_rain_change(&self, raining: bool) {}

    /// Every plugin message, after channel listeners ran.
    fn on_plugin_message(&self, message: &PluginMessage) {}

    fn on_resource_pack(&self, pack: &ResourcePackSend) {}
}

/// Handler that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandler;

impl ProtocolHandler for NoopHandler {}
