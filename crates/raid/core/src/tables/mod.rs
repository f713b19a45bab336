//! Structured decoders for the game's tables and fixed save structs.
mod encounter;
mod priority;
mod reward;
mod spawn_list;
mod trainer;

pub use encounter::{
    AbilityDirective, BossSpec, EncounterEntry, EncounterTable, GenderDirective, IvDirective,
    MoveSlot, NatureDirective, ShinyDirective, SizeDirective, SizeSpec, TeraDirective,
};
pub use priority::{DeliveryPriority, GROUP_COUNT};
pub use reward::{
    FixedReward, FixedRewardTable, LotteryReward, LotteryRewardTable, MAX_FIXED_REWARDS,
    MAX_LOTTERY_REWARDS, RewardCatalog, RewardCategory, RewardSubject,
};
pub use spawn_list::{RAID_BLOCK_SIZE, RAID_COUNT, RaidBlock, RawSlotRecord};
pub use trainer::{TRAINER_STATUS_SIZE, TrainerIdentity};
