//! Well-known block keys.

/// A block key plus, for blocks read from a live snapshot, the directory
/// offset where the entry is expected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockKey {
    pub key: u32,
    pub hint: Option<usize>,
}

impl BlockKey {
    pub const fn new(key: u32, hint: usize) -> Self {
        Self {
            key,
            hint: Some(hint),
        }
    }

    /// A key only reachable by scanning a save image.
    pub const fn unhinted(key: u32) -> Self {
        Self { key, hint: None }
    }

    /// Difficulty unlock flags for 3★, 4★, 5★ and 6★, in that order.
    pub const STORY_FLAGS: [BlockKey; 4] = [
        BlockKey::new(0xEC95_D8EF, 0x2BF20),
        BlockKey::new(0xA942_8DFE, 0x1F400),
        BlockKey::new(0x9535_F471, 0x1B640),
        BlockKey::new(0x6E7F_8220, 0x13EC0),
    ];

    pub const TRAINER_STATUS: BlockKey = BlockKey::new(0xE3E8_9BD1, 0x29F40);
    pub const EVENT_ENCOUNTERS: BlockKey = BlockKey::new(0x0520_A1B0, 0x1040);
    pub const EVENT_PRIORITY: BlockKey = BlockKey::new(0x0954_51E4, 0x1860);
    pub const EVENT_FIXED_REWARDS: BlockKey = BlockKey::new(0x7D6C_2B82, 0x16D40);
    pub const EVENT_LOTTERY_REWARDS: BlockKey = BlockKey::new(0xA52B_4811, 0x1E6A0);

    /// The 72-slot raid spawn list. Live snapshots expose it outside the
    /// block directory, so it carries no hint.
    pub const RAID_SPAWNS: BlockKey = BlockKey::unhinted(0xCAAC_8800);
}
