//! Packet ids for 1.19. Living-entity and painting spawns fold into Spawn Entity; signed chat arrives.

use super::PaletteTables;
use crate::protocol::packet_type::{PacketTypeIn, PacketTypeOut};

pub(super) static PALETTE_1_19: PaletteTables = PaletteTables {
    name: "1.19",
    inbound: INBOUND,
    outbound: OUTBOUND,
};

const INBOUND: &[(i32, PacketTypeIn)] = &[
    (0x00, PacketTypeIn::SpawnEntity),
    (0x01, PacketTypeIn::SpawnExperienceOrb),
    (0x02, PacketTypeIn::SpawnPlayer),
    (0x03, PacketTypeIn::EntityAnimation),
    (0x04, PacketTypeIn::Statistics),
    (0x05, PacketTypeIn::BlockChangedAck),
    (0x06, PacketTypeIn::BlockBreakAnimation),
    (0x07, PacketTypeIn::BlockEntityData),
    (0x08, PacketTypeIn::BlockAction),
    (0x09, PacketTypeIn::BlockChange),
    (0x0A, PacketTypeIn::BossBar),
    (0x0B, PacketTypeIn::ServerDifficulty),
    (0x0C, PacketTypeIn::ChatPreview),
    (0x0D, PacketTypeIn::ClearTiles),
    (0x0E, PacketTypeIn::TabComplete),
    (0x0F, PacketTypeIn::DeclareCommands),
    (0x10, PacketTypeIn::CloseWindow),
    (0x11, PacketTypeIn::WindowItems),
    (0x12, PacketTypeIn::WindowProperty),
    (0x13, PacketTypeIn::SetSlot),
    (0x14, PacketTypeIn::SetCooldown),
    (0x15, PacketTypeIn::PluginMessage),
    (0x16, PacketTypeIn::NamedSoundEffect),
    (0x17, PacketTypeIn::Disconnect),
    (0x18, PacketTypeIn::EntityStatus),
    (0x19, PacketTypeIn::Explosion),
    (0x1A, PacketTypeIn::UnloadChunk),
    (0x1B, PacketTypeIn::ChangeGameState),
    (0x1C, PacketTypeIn::OpenHorseWindow),
    (0x1D, PacketTypeIn::InitializeWorldBorder),
    (0x1E, PacketTypeIn::KeepAlive),
    (0x1F, PacketTypeIn::ChunkData),
    (0x20, PacketTypeIn::Effect),
    (0x21, PacketTypeIn::Particle),
    (0x22, PacketTypeIn::UpdateLight),
    (0x23, PacketTypeIn::JoinGame),
    (0x24, PacketTypeIn::MapData),
    (0x25, PacketTypeIn::TradeList),
    (0x26, PacketTypeIn::EntityPosition),
    (0x27, PacketTypeIn::EntityPositionAndRotation),
    (0x28, PacketTypeIn::EntityRotation),
    (0x29, PacketTypeIn::VehicleMove),
    (0x2A, PacketTypeIn::OpenBook),
    (0x2B, PacketTypeIn::OpenWindow),
    (0x2C, PacketTypeIn::OpenSignEditor),
    (0x2D, PacketTypeIn::Ping),
    (0x2E, PacketTypeIn::CraftRecipeResponse),
    (0x2F, PacketTypeIn::PlayerAbilities),
    (0x30, PacketTypeIn::ChatMessage),
    (0x31, PacketTypeIn::EndCombatEvent),
    (0x32, PacketTypeIn::EnterCombatEvent),
    (0x33, PacketTypeIn::DeathCombatEvent),
    (0x34, PacketTypeIn::PlayerInfo),
    (0x35, PacketTypeIn::FacePlayer),
    (0x36, PacketTypeIn::PlayerPositionAndLook),
    (0x37, PacketTypeIn::UnlockRecipes),
    (0x38, PacketTypeIn::DestroyEntities),
    (0x39, PacketTypeIn::RemoveEntityEffect),
    (0x3A, PacketTypeIn::ResourcePackSend),
    (0x3B, PacketTypeIn::Respawn),
    (0x3C, PacketTypeIn::EntityHeadLook),
    (0x3D, PacketTypeIn::MultiBlockChange),
    (0x3E, PacketTypeIn::SelectAdvancementTab),
    (0x3F, PacketTypeIn::ServerData),
    (0x40, PacketTypeIn::ActionBar),
    (0x41, PacketTypeIn::WorldBorderCenter),
    (0x42, PacketTypeIn::WorldBorderLerpSize),
    (0x43, PacketTypeIn::WorldBorderSize),
    (0x44, PacketTypeIn::WorldBorderWarningDelay),
    (0x45, PacketTypeIn::WorldBorderWarningReach),
    (0x46, PacketTypeIn::Camera),
    (0x47, PacketTypeIn::HeldItemChange),
    (0x48, PacketTypeIn::UpdateViewPosition),
    (0x49, PacketTypeIn::UpdateViewDistance),
    (0x4A, PacketTypeIn::SpawnPosition),
    (0x4B, PacketTypeIn::SetDisplayChatPreview),
    (0x4C, PacketTypeIn::DisplayScoreboard),
    (0x4D, PacketTypeIn::EntityMetadata),
    (0x4E, PacketTypeIn::AttachEntity),
    (0x4F, PacketTypeIn::EntityVelocity),
    (0x50, PacketTypeIn::EntityEquipment),
    (0x51, PacketTypeIn::SetExperience),
    (0x52, PacketTypeIn::UpdateHealth),
    (0x53, PacketTypeIn::ScoreboardObjective),
    (0x54, PacketTypeIn::SetPassengers),
    (0x55, PacketTypeIn::Teams),
    (0x56, PacketTypeIn::UpdateScore),
    (0x57, PacketTypeIn::UpdateSimulationDistance),
    (0x58, PacketTypeIn::SetTitleSubTitle),
    (0x59, PacketTypeIn::TimeUpdate),
    (0x5A, PacketTypeIn::SetTitleText),
    (0x5B, PacketTypeIn::SetTitleTime),
    (0x5C, PacketTypeIn::EntitySoundEffect),
    (0x5D, PacketTypeIn::SoundEffect),
    (0x5E, PacketTypeIn::StopSound),
    (0x5F, PacketTypeIn::SystemChat),
    (0x60, PacketTypeIn::PlayerListHeaderAndFooter),
    (0x61, PacketTypeIn::NbtQueryResponse),
    (0x62, PacketTypeIn::CollectItem),
    (0x63, PacketTypeIn::EntityTeleport),
    (0x64, PacketTypeIn::Advancements),
    (0x65, PacketTypeIn::EntityProperties),
    (0x66, PacketTypeIn::EntityEffect),
    (0x67, PacketTypeIn::DeclareRecipes),
    (0x68, PacketTypeIn::Tags),
];

const OUTBOUND: &[(i32, PacketTypeOut)] = &[
    (0x00, PacketTypeOut::TeleportConfirm),
    (0x01, PacketTypeOut::QueryBlockNbt),
    (0x02, PacketTypeOut::SetDifficulty),
    (0x03, PacketTypeOut::ChatCommand),
    (0x04, PacketTypeOut::ChatMessage),
    (0x05, PacketTypeOut::ChatPreview),
    (0x06, PacketTypeOut::ClientStatus),
    (0x07, PacketTypeOut::ClientSettings),
    (0x08, PacketTypeOut::TabComplete),
    (0x09, PacketTypeOut::ClickWindowButton),
    (0x0A, PacketTypeOut::ClickWindow),
    (0x0B, PacketTypeOut::CloseWindow),
    (0x0C, PacketTypeOut::PluginMessage),
    (0x0D, PacketTypeOut::EditBook),
    (0x0E, PacketTypeOut::EntityNbtRequest),
    (0x0F, PacketTypeOut::InteractEntity),
    (0x10, PacketTypeOut::GenerateStructure),
    (0x11, PacketTypeOut::KeepAlive),
    (0x12, PacketTypeOut::LockDifficulty),
    (0x13, PacketTypeOut::PlayerPosition),
    (0x14, PacketTypeOut::PlayerPositionAndRotation),
    (0x15, PacketTypeOut::PlayerRotation),
    (0x16, PacketTypeOut::PlayerMovement),
    (0x17, PacketTypeOut::VehicleMove),
    (0x18, PacketTypeOut::SteerBoat),
    (0x19, PacketTypeOut::PickItem),
    (0x1A, PacketTypeOut::CraftRecipeRequest),
    (0x1B, PacketTypeOut::PlayerAbilities),
    (0x1C, PacketTypeOut::PlayerDigging),
    (0x1D, PacketTypeOut::EntityAction),
    (0x1E, PacketTypeOut::SteerVehicle),
    (0x1F, PacketTypeOut::Pong),
    (0x20, PacketTypeOut::SetRecipeBookState),
    (0x21, PacketTypeOut::SetDisplayedRecipe),
    (0x22, PacketTypeOut::NameItem),
    (0x23, PacketTypeOut::ResourcePackStatus),
    (0x24, PacketTypeOut::AdvancementTab),
    (0x25, PacketTypeOut::SelectTrade),
    (0x26, PacketTypeOut::SetBeaconEffect),
    (0x27, PacketTypeOut::HeldItemChange),
    (0x28, PacketTypeOut::UpdateCommandBlock),
    (0x29, PacketTypeOut::UpdateCommandBlockMinecart),
    (0x2A, PacketTypeOut::CreativeInventoryAction),
    (0x2B, PacketTypeOut::UpdateJigsawBlock),
    (0x2C, PacketTypeOut::UpdateStructureBlock),
    (0x2D, PacketTypeOut::UpdateSign),
    (0x2E, PacketTypeOut::Animation),
    (0x2F, PacketTypeOut::Spectate),
    (0x30, PacketTypeOut::PlayerBlockPlacement),
    (0x31, PacketTypeOut::UseItem),
];
