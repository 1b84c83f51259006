//! Packet ids for 1.19.1 and 1.19.2: message headers, hidden messages and acknowledgments.

use super::PaletteTables;
use crate::protocol::packet_type::{PacketTypeIn, PacketTypeOut};

pub(super) static PALETTE_1_19_2: PaletteTables = PaletteTables {
    name: "1.19.2",
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
    (0x15, PacketTypeIn::ChatSuggestions),
    (0x16, PacketTypeIn::PluginMessage),
    (0x17, PacketTypeIn::NamedSoundEffect),
    (0x18, PacketTypeIn::HideMessage),
    (0x19, PacketTypeIn::Disconnect),
    (0x1A, PacketTypeIn::EntityStatus),
    (0x1B, PacketTypeIn::Explosion),
    (0x1C, PacketTypeIn::UnloadChunk),
    (0x1D, PacketTypeIn::ChangeGameState),
    (0x1E, PacketTypeIn::OpenHorseWindow),
    (0x1F, PacketTypeIn::InitializeWorldBorder),
    (0x20, PacketTypeIn::KeepAlive),
    (0x21, PacketTypeIn::ChunkData),
    (0x22, PacketTypeIn::Effect),
    (0x23, PacketTypeIn::Particle),
    (0x24, PacketTypeIn::UpdateLight),
    (0x25, PacketTypeIn::JoinGame),
    (0x26, PacketTypeIn::MapData),
    (0x27, PacketTypeIn::TradeList),
    (0x28, PacketTypeIn::EntityPosition),
    (0x29, PacketTypeIn::EntityPositionAndRotation),
    (0x2A, PacketTypeIn::EntityRotation),
    (0x2B, PacketTypeIn::VehicleMove),
    (0x2C, PacketTypeIn::OpenBook),
    (0x2D, PacketTypeIn::OpenWindow),
    (0x2E, PacketTypeIn::OpenSignEditor),
    (0x2F, PacketTypeIn::Ping),
    (0x30, PacketTypeIn::CraftRecipeResponse),
    (0x31, PacketTypeIn::PlayerAbilities),
    (0x32, PacketTypeIn::MessageHeader),
    (0x33, PacketTypeIn::ChatMessage),
    (0x34, PacketTypeIn::EndCombatEvent),
    (0x35, PacketTypeIn::EnterCombatEvent),
    (0x36, PacketTypeIn::DeathCombatEvent),
    (0x37, PacketTypeIn::PlayerInfo),
    (0x38, PacketTypeIn::FacePlayer),
    (0x39, PacketTypeIn::PlayerPositionAndLook),
    (0x3A, PacketTypeIn::UnlockRecipes),
    (0x3B, PacketTypeIn::DestroyEntities),
    (0x3C, PacketTypeIn::RemoveEntityEffect),
    (0x3D, PacketTypeIn::ResourcePackSend),
    (0x3E, PacketTypeIn::Respawn),
    (0x3F, PacketTypeIn::EntityHeadLook),
    (0x40, PacketTypeIn::MultiBlockChange),
    (0x41, PacketTypeIn::SelectAdvancementTab),
    (0x42, PacketTypeIn::ServerData),
    (0x43, PacketTypeIn::ActionBar),
    (0x44, PacketTypeIn::WorldBorderCenter),
    (0x45, PacketTypeIn::WorldBorderLerpSize),
    (0x46, PacketTypeIn::WorldBorderSize),
    (0x47, PacketTypeIn::WorldBorderWarningDelay),
    (0x48, PacketTypeIn::WorldBorderWarningReach),
    (0x49, PacketTypeIn::Camera),
    (0x4A, PacketTypeIn::HeldItemChange),
    (0x4B, PacketTypeIn::UpdateViewPosition),
    (0x4C, PacketTypeIn::UpdateViewDistance),
    (0x4D, PacketTypeIn::SpawnPosition),
    (0x4E, PacketTypeIn::SetDisplayChatPreview),
    (0x4F, PacketTypeIn::DisplayScoreboard),
    (0x50, PacketTypeIn::EntityMetadata),
    (0x51, PacketTypeIn::AttachEntity),
    (0x52, PacketTypeIn::EntityVelocity),
    (0x53, PacketTypeIn::EntityEquipment),
    (0x54, PacketTypeIn::SetExperience),
    (0x55, PacketTypeIn::UpdateHealth),
    (0x56, PacketTypeIn::ScoreboardObjective),
    (0x57, PacketTypeIn::SetPassengers),
    (0x58, PacketTypeIn::Teams),
    (0x59, PacketTypeIn::UpdateScore),
    (0x5A, PacketTypeIn::UpdateSimulationDistance),
    (0x5B, PacketTypeIn::SetTitleSubTitle),
    (0x5C, PacketTypeIn::TimeUpdate),
    (0x5D, PacketTypeIn::SetTitleText),
    (0x5E, PacketTypeIn::SetTitleTime),
    (0x5F, PacketTypeIn::EntitySoundEffect),
    (0x60, PacketTypeIn::SoundEffect),
    (0x61, PacketTypeIn::StopSound),
    (0x62, PacketTypeIn::SystemChat),
    (0x63, PacketTypeIn::PlayerListHeaderAndFooter),
    (0x64, PacketTypeIn::NbtQueryResponse),
    (0x65, PacketTypeIn::CollectItem),
    (0x66, PacketTypeIn::EntityTeleport),
    (0x67, PacketTypeIn::Advancements),
    (0x68, PacketTypeIn::EntityProperties),
    (0x69, PacketTypeIn::EntityEffect),
    (0x6A, PacketTypeIn::DeclareRecipes),
    (0x6B, PacketTypeIn::Tags),
];

const OUTBOUND: &[(i32, PacketTypeOut)] = &[
    (0x00, PacketTypeOut::TeleportConfirm),
    (0x01, PacketTypeOut::QueryBlockNbt),
    (0x02, PacketTypeOut::SetDifficulty),
    (0x03, PacketTypeOut::MessageAcknowledgment),
    (0x04, PacketTypeOut::ChatCommand),
    (0x05, PacketTypeOut::ChatMessage),
    (0x06, PacketTypeOut::ChatPreview),
    (0x07, PacketTypeOut::ClientStatus),
    (0x08, PacketTypeOut::ClientSettings),
    (0x09, PacketTypeOut::TabComplete),
    (0x0A, PacketTypeOut::ClickWindowButton),
    (0x0B, PacketTypeOut::ClickWindow),
    (0x0C, PacketTypeOut::CloseWindow),
    (0x0D, PacketTypeOut::PluginMessage),
    (0x0E, PacketTypeOut::EditBook),
    (0x0F, PacketTypeOut::EntityNbtRequest),
    (0x10, PacketTypeOut::InteractEntity),
    (0x11, PacketTypeOut::GenerateStructure),
    (0x12, PacketTypeOut::KeepAlive),
    (0x13, PacketTypeOut::LockDifficulty),
    (0x14, PacketTypeOut::PlayerPosition),
    (0x15, PacketTypeOut::PlayerPositionAndRotation),
    (0x16, PacketTypeOut::PlayerRotation),
    (0x17, PacketTypeOut::PlayerMovement),
    (0x18, PacketTypeOut::VehicleMove),
    (0x19, PacketTypeOut::SteerBoat),
    (0x1A, PacketTypeOut::PickItem),
    (0x1B, PacketTypeOut::CraftRecipeRequest),
    (0x1C, PacketTypeOut::PlayerAbilities),
    (0x1D, PacketTypeOut::PlayerDigging),
    (0x1E, PacketTypeOut::EntityAction),
    (0x1F, PacketTypeOut::SteerVehicle),
    (0x20, PacketTypeOut::Pong),
    (0x21, PacketTypeOut::SetRecipeBookState),
    (0x22, PacketTypeOut::SetDisplayedRecipe),
    (0x23, PacketTypeOut::NameItem),
    (0x24, PacketTypeOut::ResourcePackStatus),
    (0x25, PacketTypeOut::AdvancementTab),
    (0x26, PacketTypeOut::SelectTrade),
    (0x27, PacketTypeOut::SetBeaconEffect),
    (0x28, PacketTypeOut::HeldItemChange),
    (0x29, PacketTypeOut::UpdateCommandBlock),
    (0x2A, PacketTypeOut::UpdateCommandBlockMinecart),
    (0x2B, PacketTypeOut::CreativeInventoryAction),
    (0x2C, PacketTypeOut::UpdateJigsawBlock),
    (0x2D, PacketTypeOut::UpdateStructureBlock),
    (0x2E, PacketTypeOut::UpdateSign),
    (0x2F, PacketTypeOut::Animation),
    (0x30, PacketTypeOut::Spectate),
    (0x31, PacketTypeOut::PlayerBlockPlacement),
    (0x32, PacketTypeOut::UseItem),
];
