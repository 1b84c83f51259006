//! Packet ids for 1.18 through 1.18.2.

use super::PaletteTables;
use crate::protocol::packet_type::{PacketTypeIn, PacketTypeOut};

pub(super) static PALETTE_1_18: PaletteTables = PaletteTables {
    name: "1.18",
    inbound: INBOUND,
    outbound: OUTBOUND,
};

const INBOUND: &[(i32, PacketTypeIn)] = &[
    (0x00, PacketTypeIn::SpawnEntity),
    (0x01, PacketTypeIn::SpawnExperienceOrb),
    (0x02, PacketTypeIn::SpawnLivingEntity),
    (0x03, PacketTypeIn::SpawnPainting),
    (0x04, PacketTypeIn::SpawnPlayer),
    (0x05, PacketTypeIn::SkulkVibrationSignal),
    (0x06, PacketTypeIn::EntityAnimation),
    (0x07, PacketTypeIn::Statistics),
    (0x08, PacketTypeIn::AcknowledgePlayerDigging),
    (0x09, PacketTypeIn::BlockBreakAnimation),
    (0x0A, PacketTypeIn::BlockEntityData),
    (0x0B, PacketTypeIn::BlockAction),
    (0x0C, PacketTypeIn::BlockChange),
    (0x0D, PacketTypeIn::BossBar),
    (0x0E, PacketTypeIn::ServerDifficulty),
    (0x0F, PacketTypeIn::ChatMessage),
    (0x10, PacketTypeIn::ClearTiles),
    (0x11, PacketTypeIn::TabComplete),
    (0x12, PacketTypeIn::DeclareCommands),
    (0x13, PacketTypeIn::CloseWindow),
    (0x14, PacketTypeIn::WindowItems),
    (0x15, PacketTypeIn::WindowProperty),
    (0x16, PacketTypeIn::SetSlot),
    (0x17, PacketTypeIn::SetCooldown),
    (0x18, PacketTypeIn::PluginMessage),
    (0x19, PacketTypeIn::NamedSoundEffect),
    (0x1A, PacketTypeIn::Disconnect),
    (0x1B, PacketTypeIn::EntityStatus),
    (0x1C, PacketTypeIn::Explosion),
    (0x1D, PacketTypeIn::UnloadChunk),
    (0x1E, PacketTypeIn::ChangeGameState),
    (0x1F, PacketTypeIn::OpenHorseWindow),
    (0x20, PacketTypeIn::InitializeWorldBorder),
    (0x21, PacketTypeIn::KeepAlive),
    (0x22, PacketTypeIn::ChunkData),
    (0x23, PacketTypeIn::Effect),
    (0x24, PacketTypeIn::Particle),
    (0x25, PacketTypeIn::UpdateLight),
    (0x26, PacketTypeIn::JoinGame),
    (0x27, PacketTypeIn::MapData),
    (0x28, PacketTypeIn::TradeList),
    (0x29, PacketTypeIn::EntityPosition),
    (0x2A, PacketTypeIn::EntityPositionAndRotation),
    (0x2B, PacketTypeIn::EntityRotation),
    (0x2C, PacketTypeIn::VehicleMove),
    (0x2D, PacketTypeIn::OpenBook),
    (0x2E, PacketTypeIn::OpenWindow),
    (0x2F, PacketTypeIn::OpenSignEditor),
    (0x30, PacketTypeIn::Ping),
    (0x31, PacketTypeIn::CraftRecipeResponse),
    (0x32, PacketTypeIn::PlayerAbilities),
    (0x33, PacketTypeIn::EndCombatEvent),
    (0x34, PacketTypeIn::EnterCombatEvent),
    (0x35, PacketTypeIn::DeathCombatEvent),
    (0x36, PacketTypeIn::PlayerInfo),
    (0x37, PacketTypeIn::FacePlayer),
    (0x38, PacketTypeIn::PlayerPositionAndLook),
    (0x39, PacketTypeIn::UnlockRecipes),
    (0x3A, PacketTypeIn::DestroyEntities),
    (0x3B, PacketTypeIn::RemoveEntityEffect),
    (0x3C, PacketTypeIn::ResourcePackSend),
    (0x3D, PacketTypeIn::Respawn),
    (0x3E, PacketTypeIn::EntityHeadLook),
    (0x3F, PacketTypeIn::MultiBlockChange),
    (0x40, PacketTypeIn::SelectAdvancementTab),
    (0x41, PacketTypeIn::ActionBar),
    (0x42, PacketTypeIn::WorldBorderCenter),
    (0x43, PacketTypeIn::WorldBorderLerpSize),
    (0x44, PacketTypeIn::WorldBorderSize),
    (0x45, PacketTypeIn::WorldBorderWarningDelay),
    (0x46, PacketTypeIn::WorldBorderWarningReach),
    (0x47, PacketTypeIn::Camera),
    (0x48, PacketTypeIn::HeldItemChange),
    (0x49, PacketTypeIn::UpdateViewPosition),
    (0x4A, PacketTypeIn::UpdateViewDistance),
    (0x4B, PacketTypeIn::SpawnPosition),
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
    (0x5F, PacketTypeIn::PlayerListHeaderAndFooter),
    (0x60, PacketTypeIn::NbtQueryResponse),
    (0x61, PacketTypeIn::CollectItem),
    (0x62, PacketTypeIn::EntityTeleport),
    (0x63, PacketTypeIn::Advancements),
    (0x64, PacketTypeIn::EntityProperties),
    (0x65, PacketTypeIn::EntityEffect),
    (0x66, PacketTypeIn::DeclareRecipes),
    (0x67, PacketTypeIn::Tags),
];

const OUTBOUND: &[(i32, PacketTypeOut)] = &[
    (0x00, PacketTypeOut::TeleportConfirm),
    (0x01, PacketTypeOut::QueryBlockNbt),
    (0x02, PacketTypeOut::SetDifficulty),
    (0x03, PacketTypeOut::ChatMessage),
    (0x04, PacketTypeOut::ClientStatus),
    (0x05, PacketTypeOut::ClientSettings),
    (0x06, PacketTypeOut::TabComplete),
    (0x07, PacketTypeOut::ClickWindowButton),
    (0x08, PacketTypeOut::ClickWindow),
    (0x09, PacketTypeOut::CloseWindow),
    (0x0A, PacketTypeOut::PluginMessage),
    (0x0B, PacketTypeOut::EditBook),
    (0x0C, PacketTypeOut::EntityNbtRequest),
    (0x0D, PacketTypeOut::InteractEntity),
    (0x0E, PacketTypeOut::GenerateStructure),
    (0x0F, PacketTypeOut::KeepAlive),
    (0x10, PacketTypeOut::LockDifficulty),
    (0x11, PacketTypeOut::PlayerPosition),
    (0x12, PacketTypeOut::PlayerPositionAndRotation),
    (0x13, PacketTypeOut::PlayerRotation),
    (0x14, PacketTypeOut::PlayerMovement),
    (0x15, PacketTypeOut::VehicleMove),
    (0x16, PacketTypeOut::SteerBoat),
    (0x17, PacketTypeOut::PickItem),
    (0x18, PacketTypeOut::CraftRecipeRequest),
    (0x19, PacketTypeOut::PlayerAbilities),
    (0x1A, PacketTypeOut::PlayerDigging),
    (0x1B, PacketTypeOut::EntityAction),
    (0x1C, PacketTypeOut::SteerVehicle),
    (0x1D, PacketTypeOut::Pong),
    (0x1E, PacketTypeOut::SetDisplayedRecipe),
    (0x1F, PacketTypeOut::SetRecipeBookState),
    (0x20, PacketTypeOut::NameItem),
    (0x21, PacketTypeOut::ResourcePackStatus),
    (0x22, PacketTypeOut::AdvancementTab),
    (0x23, PacketTypeOut::SelectTrade),
    (0x24, PacketTypeOut::SetBeaconEffect),
    (0x25, PacketTypeOut::HeldItemChange),
    (0x26, PacketTypeOut::UpdateCommandBlock),
    (0x27, PacketTypeOut::UpdateCommandBlockMinecart),
    (0x28, PacketTypeOut::CreativeInventoryAction),
    (0x29, PacketTypeOut::UpdateJigsawBlock),
    (0x2A, PacketTypeOut::UpdateStructureBlock),
    (0x2B, PacketTypeOut::UpdateSign),
    (0x2C, PacketTypeOut::Animation),
    (0x2D, PacketTypeOut::Spectate),
    (0x2E, PacketTypeOut::PlayerBlockPlacement),
    (0x2F, PacketTypeOut::UseItem),
];
