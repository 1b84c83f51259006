//! Semantic packet types for the play phase.
//!
//! Numeric ids differ per version; these enums are what the rest of the crate
//! talks about. A version palette maps between the two.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-to-client play packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PacketTypeIn {
    AcknowledgePlayerDigging,
    ActionBar,
    Advancements,
    AttachEntity,
    BlockAction,
    BlockBreakAnimation,
    BlockChange,
    BlockChangedAck,
    BlockEntityData,
    BossBar,
    Camera,
    ChangeGameState,
    ChatMessage,
    ChatPreview,
    ChatSuggestions,
    ChunkData,
    ClearTiles,
    CloseWindow,
    CollectItem,
    CraftRecipeResponse,
    DeathCombatEvent,
    DeclareCommands,
    DeclareRecipes,
    DestroyEntities,
    Disconnect,
    DisplayScoreboard,
    Effect,
    EndCombatEvent,
    EnterCombatEvent,
    EntityAnimation,
    EntityEffect,
    EntityEquipment,
    EntityHeadLook,
    EntityMetadata,
    EntityPosition,
    EntityPositionAndRotation,
    EntityProperties,
    EntityRotation,
    EntitySoundEffect,
    EntityStatus,
    EntityTeleport,
    EntityVelocity,
    Explosion,
    FacePlayer,
    HeldItemChange,
    HideMessage,
    InitializeWorldBorder,
    JoinGame,
    KeepAlive,
    MapData,
    MessageHeader,
    MultiBlockChange,
    NamedSoundEffect,
    NbtQueryResponse,
    OpenBook,
    OpenHorseWindow,
    OpenSignEditor,
    OpenWindow,
    Particle,
    Ping,
    PlayerAbilities,
    PlayerInfo,
    PlayerListHeaderAndFooter,
    PlayerPositionAndLook,
    PluginMessage,
    RemoveEntityEffect,
    ResourcePackSend,
    Respawn,
    ScoreboardObjective,
    SelectAdvancementTab,
    ServerData,
    ServerDifficulty,
    SetCooldown,
    SetDisplayChatPreview,
    SetExperience,
    SetPassengers,
    SetSlot,
    SetTitleSubTitle,
    SetTitleText,
    SetTitleTime,
    SkulkVibrationSignal,
    SoundEffect,
    SpawnEntity,
    SpawnExperienceOrb,
    SpawnLivingEntity,
    SpawnPainting,
    SpawnPlayer,
    SpawnPosition,
    Statistics,
    StopSound,
    SystemChat,
    TabComplete,
    Tags,
    Teams,
    TimeUpdate,
    TradeList,
    UnloadChunk,
    UnlockRecipes,
    UpdateHealth,
    UpdateLight,
    UpdateScore,
    UpdateSimulationDistance,
    UpdateViewDistance,
    UpdateViewPosition,
    VehicleMove,
    WindowItems,
    WindowProperty,
    WorldBorderCenter,
    WorldBorderLerpSize,
    WorldBorderSize,
    WorldBorderWarningDelay,
    WorldBorderWarningReach,
    /// Id not present in the active palette.
    Unknown,
}

/// Client-to-server play packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PacketTypeOut {
    AdvancementTab,
    Animation,
    ChatCommand,
    ChatMessage,
    ChatPreview,
    ClickWindow,
    ClickWindowButton,
    ClientSettings,
    ClientStatus,
    CloseWindow,
    CraftRecipeRequest,
    CreativeInventoryAction,
    EditBook,
    EntityAction,
    EntityNbtRequest,
    GenerateStructure,
    HeldItemChange,
    InteractEntity,
    KeepAlive,
    LockDifficulty,
    MessageAcknowledgment,
    NameItem,
    PickItem,
    PlayerAbilities,
    PlayerBlockPlacement,
    PlayerDigging,
    PlayerMovement,
    PlayerPosition,
    PlayerPositionAndRotation,
    PlayerRotation,
    PluginMessage,
    Pong,
    QueryBlockNbt,
    ResourcePackStatus,
    SelectTrade,
    SetBeaconEffect,
    SetDifficulty,
    SetDisplayedRecipe,
    SetRecipeBookState,
    Spectate,
    SteerBoat,
    SteerVehicle,
    TabComplete,
    TeleportConfirm,
    UpdateCommandBlock,
    UpdateCommandBlockMinecart,
    UpdateJigsawBlock,
    UpdateSign,
    UpdateStructureBlock,
    UseItem,
    VehicleMove,
}

impl fmt::Display for PacketTypeIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for PacketTypeOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Fixed ids used before the play phase. These never change between the
/// supported versions and are not part of any palette.
pub mod login {
    pub const HANDSHAKE: i32 = 0x00;

    pub const IN_DISCONNECT: i32 = 0x00;
    pub const IN_ENCRYPTION_REQUEST: i32 = 0x01;
    pub const IN_LOGIN_SUCCESS: i32 = 0x02;
    pub const IN_SET_COMPRESSION: i32 = 0x03;
    pub const IN_PLUGIN_REQUEST: i32 = 0x04;

    pub const OUT_LOGIN_START: i32 = 0x00;
    pub const OUT_ENCRYPTION_RESPONSE: i32 = 0x01;
    pub const OUT_PLUGIN_RESPONSE: i32 = 0x02;

    pub const STATUS_REQUEST: i32 = 0x00;
    pub const STATUS_RESPONSE: i32 = 0x00;

    /// Handshake next-state values.
    pub const NEXT_STATE_STATUS: i32 = 1;
    pub const NEXT_STATE_LOGIN: i32 = 2;
}
