//! Play-phase packet handling.
//!
//! Resolves each frame's id through the palette, decodes it with the
//! connection's wire layout, sends whatever the protocol requires in reply
//! (keep-alive echo, pong, teleport confirm, resource pack status,
//! acknowledgments), updates connection and chat state, and finally reports
//! to the consumer.

use super::dispatch::Terminator;
use super::handler::{PacketOutcome, ProtocolHandler};
use super::sender::PacketSender;
use super::state::ConnectionState;
use crate::chat::PlayerIdentity;
use crate::core::packet::PacketFrame;
use crate::core::types::PacketReader;
use crate::error::{DisconnectReason, Result};
use crate::protocol::dispatcher::ChannelDispatcher;
use crate::protocol::packet_type::{PacketTypeIn, PacketTypeOut};
use crate::protocol::packets::inbound::{
    decode_destroy_entities, ChangeGameState, ChunkData, EntityMove, EntityTeleport, JoinGame,
    MessageHeader, OpenWindow, PlayerChat, PlayerInfo, PlayerPositionAndLook, PluginMessage,
    ResourcePackSend, Respawn, ServerData, SetExperience, SetSlot, SpawnEntity, SpawnPlayer,
    SystemChat, TimeUpdate, UpdateHealth, WindowItems,
};
use crate::protocol::packets::outbound::{self, ResourcePackStatus};
use crate::protocol::status::plain_text;
use crate::protocol::version::{ChatLayout, ServerDataLayout, SystemChatLayout};
use crate::utils::metrics::ProtocolMetrics;
use std::sync::Arc;
use tokio::io::AsyncWrite;
use tracing::{debug, trace};

/// Legacy chat position shown above the hotbar.
const ACTION_BAR_POSITION: u8 = 2;

pub struct PlayHandler<W> {
    state: Arc<ConnectionState>,
    sender: PacketSender<W>,
    handler: Arc<dyn ProtocolHandler>,
    dispatcher: ChannelDispatcher,
    terminator: Arc<Terminator>,
    metrics: Arc<ProtocolMetrics>,
}

impl<W: AsyncWrite + Unpin> PlayHandler<W> {
    pub fn new(
        state: Arc<ConnectionState>,
        sender: PacketSender<W>,
        handler: Arc<dyn ProtocolHandler>,
        dispatcher: ChannelDispatcher,
        terminator: Arc<Terminator>,
        metrics: Arc<ProtocolMetrics>,
    ) -> Self {
        Self {
            state,
            sender,
            handler,
            dispatcher,
            terminator,
            metrics,
        }
    }

    pub fn sender(&self) -> &PacketSender<W> {
        &self.sender
    }

    /// Handle one frame. Any error is fatal for the connection and carries
    /// the packet's type, id and protocol.
    pub async fn handle(&self, frame: &PacketFrame) -> Result<PacketOutcome> {
        let packet = self.sender.palette().incoming_type(frame.id);
        let outcome = self
            .dispatch(packet, frame)
            .await
            .map_err(|e| e.in_packet(packet, frame.id, self.state.layout().protocol, false))?;
        match outcome {
            PacketOutcome::Handled => self.metrics.packet_handled(),
            PacketOutcome::Skipped => {
                trace!(%packet, packet_id = frame.id, len = frame.payload.len(), "Skipped packet");
                self.metrics.packet_skipped();
            }
        }
        Ok(outcome)
    }

    async fn dispatch(&self, packet: PacketTypeIn, frame: &PacketFrame) -> Result<PacketOutcome> {
        let layout = *self.state.layout();
        let h = &*self.handler;
        let mut r = frame.reader();

        match packet {
            PacketTypeIn::KeepAlive => {
                let id = r.read_i64()?;
                self.sender
                    .send(PacketTypeOut::KeepAlive, &outbound::keep_alive(id))
                    .await?;
                h.on_keep_alive(id);
            }
            PacketTypeIn::Ping => {
                let id = r.read_i32()?;
                self.sender.send(PacketTypeOut::Pong, &outbound::pong(id)).await?;
            }
            PacketTypeIn::JoinGame => {
                let join = JoinGame::decode(&mut r, &layout)?;
                self.state.set_entity_id(join.entity_id);
                self.state.set_dimension(join.dimension_name.clone());
                debug!(entity_id = join.entity_id, dimension = %join.dimension_name, "Joined game");
                h.on_game_joined(&join);
            }
            PacketTypeIn::Respawn => {
                let respawn = Respawn::decode(&mut r, &layout)?;
                self.state.set_dimension(respawn.dimension_name.clone());
                h.on_respawn(&respawn);
            }
            PacketTypeIn::PlayerPositionAndLook => {
                let position = PlayerPositionAndLook::decode(&mut r)?;
                self.sender
                    .send(
                        PacketTypeOut::TeleportConfirm,
                        &outbound::teleport_confirm(position.teleport_id),
                    )
                    .await?;
                h.on_position(&position);
            }
            PacketTypeIn::ChatMessage => self.handle_chat(&mut r).await?,
            PacketTypeIn::MessageHeader if layout.chat == ChatLayout::Chained => {
                let header = MessageHeader::decode(&mut r)?;
                let verified = {
                    let mut chat = self.state.chat()?;
                    chat.observe_header(&header)
                };
                trace!(sender = %header.sender, verified, "Message header");
            }
            PacketTypeIn::SystemChat if layout.system_chat != SystemChatLayout::Absent => {
                let message = SystemChat::decode(&mut r, &layout)?;
                if message.overlay {
                    h.on_action_bar(&message.json);
                } else {
                    h.on_system_message(&message.json);
                }
            }
            PacketTypeIn::ActionBar => h.on_action_bar(&r.read_string()?),
            PacketTypeIn::ServerData if layout.server_data != ServerDataLayout::Absent => {
                h.on_server_data(&ServerData::decode(&mut r, &layout)?);
            }
            PacketTypeIn::PlayerInfo => self.handle_player_info(&mut r)?,
            PacketTypeIn::Disconnect => {
                let json = r.read_string()?;
                let detail = serde_json::from_str(&json)
                    .map(|v| plain_text(&v))
                    .unwrap_or(json);
                self.terminator.terminate(DisconnectReason::InGameKick, &detail);
            }
            PacketTypeIn::ChunkData => h.on_chunk_data(&ChunkData::decode(&mut r)?),
            PacketTypeIn::UnloadChunk => {
                let (x, z) = (r.read_i32()?, r.read_i32()?);
                h.on_chunk_unload(x, z);
            }
            PacketTypeIn::SpawnEntity => h.on_entity_spawn(&SpawnEntity::decode(&mut r, &layout)?),
            PacketTypeIn::SpawnLivingEntity => h.on_entity_spawn(&SpawnEntity::decode_living(&mut r)?),
            PacketTypeIn::SpawnPlayer => h.on_player_spawn(&SpawnPlayer::decode(&mut r)?),
            PacketTypeIn::DestroyEntities => h.on_entities_destroyed(&decode_destroy_entities(&mut r)?),
            PacketTypeIn::EntityPosition => h.on_entity_move(&EntityMove::decode(&mut r, false)?),
            PacketTypeIn::EntityPositionAndRotation => {
                h.on_entity_move(&EntityMove::decode(&mut r, true)?);
            }
            PacketTypeIn::EntityTeleport => h.on_entity_teleport(&EntityTeleport::decode(&mut r)?),
            PacketTypeIn::OpenWindow => h.on_inventory_open(&OpenWindow::decode(&mut r)?),
            PacketTypeIn::CloseWindow => h.on_inventory_close(r.read_u8()?),
            PacketTypeIn::WindowItems => h.on_window_items(&WindowItems::decode(&mut r)?),
            PacketTypeIn::SetSlot => h.on_set_slot(&SetSlot::decode(&mut r)?),
            PacketTypeIn::HeldItemChange => h.on_held_item_change(r.read_i8()?),
            PacketTypeIn::TimeUpdate => h.on_time_update(&TimeUpdate::decode(&mut r)?),
            PacketTypeIn::UpdateHealth => h.on_health_update(&UpdateHealth::decode(&mut r)?),
            PacketTypeIn::SetExperience => h.on_experience(&SetExperience::decode(&mut r)?),
            PacketTypeIn::ChangeGameState => {
                let change = ChangeGameState::decode(&mut r)?;
                match change.reason {
                    ChangeGameState::BEGIN_RAIN => h.on_rain_change(true),
                    ChangeGameState::END_RAIN => h.on_rain_change(false),
                    _ => return Ok(PacketOutcome::Skipped),
                }
            }
            PacketTypeIn::PluginMessage => {
                let message = PluginMessage::decode(&mut r)?;
                let routed = self.dispatcher.dispatch(&message.channel, &message.data)?;
                trace!(channel = %message.channel, routed, "Plugin message");
                h.on_plugin_message(&message);
            }
            PacketTypeIn::ResourcePackSend => {
                let pack = ResourcePackSend::decode(&mut r)?;
                if pack.is_probe() {
                    debug!(url = %pack.url, "Ignoring resource pack probe");
                    return Ok(PacketOutcome::Handled);
                }
                for status in [ResourcePackStatus::Accepted, ResourcePackStatus::SuccessfullyLoaded] {
                    self.sender
                        .send(
                            PacketTypeOut::ResourcePackStatus,
                            &outbound::resource_pack_status(status),
                        )
                        .await?;
                }
                h.on_resource_pack(&pack);
            }
            _ => return Ok(PacketOutcome::Skipped),
        }
        Ok(PacketOutcome::Handled)
    }

    async fn handle_chat(&self, r: &mut PacketReader) -> Result<()> {
        let layout = self.state.layout();
        let message = PlayerChat::decode(r, layout)?;

        let (verified, acknowledgment_due) = {
            let mut chat = self.state.chat()?;
            match &message {
                PlayerChat::Legacy(_) => (false, false),
                PlayerChat::Signed(m) => (chat.verify_signed(m), false),
                PlayerChat::Chained(m) => chat.verify_chained(m),
            }
        };

        match &message {
            PlayerChat::Legacy(m) if m.position == ACTION_BAR_POSITION => {
                self.handler.on_action_bar(&m.json);
            }
            PlayerChat::Legacy(_) => self.handler.on_text_received(&message, false),
            _ => {
                self.metrics.chat_checked(verified);
                self.handler.on_text_received(&message, verified);
            }
        }

        if acknowledgment_due {
            send_acknowledgment(&self.state, &self.sender, &self.metrics).await?;
        }
        Ok(())
    }

    fn handle_player_info(&self, r: &mut PacketReader) -> Result<()> {
        let info = PlayerInfo::decode(r, self.state.layout())?;
        {
            let mut chat = self.state.chat()?;
            let players = chat.players_mut();
            match &info {
                PlayerInfo::Add(entries) => entries
                    .iter()
                    .for_each(|e| players.add(PlayerIdentity::from_entry(e))),
                PlayerInfo::Remove(ids) => ids.iter().for_each(|id| {
                    players.remove(id);
                }),
                _ => {}
            }
        }
        match &info {
            PlayerInfo::Add(entries) => entries.iter().for_each(|e| self.handler.on_player_joined(e)),
            PlayerInfo::Remove(ids) => ids.iter().for_each(|id| self.handler.on_player_left(*id)),
            other => self.handler.on_player_info(other),
        }
        Ok(())
    }
}

/// Send the current last-seen acknowledgment and reset the pending count.
/// No-op on versions without acknowledgments.
pub(crate) async fn send_acknowledgment<W: AsyncWrite + Unpin>(
    state: &ConnectionState,
    sender: &PacketSender<W>,
    metrics: &ProtocolMetrics,
) -> Result<()> {
    if !state.layout().has_acknowledgments() {
        return Ok(());
    }
    let (body, advance) = {
        let chat = state.chat()?;
        let (ack, advance) = chat.outgoing_acknowledgment(state.layout());
        (outbound::message_acknowledgment(&ack), advance)
    };
    sender.send(PacketTypeOut::MessageAcknowledgment, &body).await?;
    state.chat()?.commit(advance);
    metrics.acknowledgment_sent();
    debug!("Message acknowledgment sent");
    Ok(())
}
