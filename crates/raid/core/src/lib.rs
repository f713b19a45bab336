//! Deterministic Tera raid reconstruction.
//!
//! `raid-core` decodes the game's raid data (encounter, reward and priority
//! tables, the encrypted save blocks holding spawn records and trainer state)
//! and re-derives every raid in a block from its 32-bit seed. It performs no
//! I/O: callers hand in byte buffers, or a [`save::BlockMemory`] for live
//! snapshots, and receive plain values back. All derivation flows through
//! [`derive::RaidEngine`].
pub mod config;
pub mod derive;
pub mod env;
pub mod error;
pub mod rng;
pub mod save;
pub mod table;
pub mod tables;
pub mod types;

pub use config::{EngineConfig, UnusableGroupPolicy};
pub use derive::{
    BossAttributes, DeriveError, DerivedRaid, Invariant, RaidEngine, RaidTables, Spawn,
};
pub use env::{GenderPolicy, PersonalInfo, SpeciesOracle, SpeciesTable};
pub use error::{ErrorSeverity, RaidError, RaidFault};
pub use rng::{ByteStreamCipher32, GeneratorFormula, RandomSource, StreamGen64};
pub use save::{
    BlockKey, BlockMemory, BlockSource, BlockValue, InMemorySnapshot, LiveSnapshot, SaveError,
    SaveImage,
};
pub use table::DecodeError;
pub use tables::{
    DeliveryPriority, EncounterEntry, EncounterTable, FixedRewardTable, LotteryRewardTable,
    RaidBlock, RawSlotRecord, RewardCatalog, TrainerIdentity,
};
pub use types::{
    AbilityId, AbilityIndex, Gender, GameVersion, Nature, SpeciesId, StarLevel, StoryProgress,
    TeraType, VersionFilter,
};
