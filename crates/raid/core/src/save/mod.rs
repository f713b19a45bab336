//! Encrypted save-block container.
//!
//! Every block is addressed by a 32-bit key. Its payload starts with a
//! keystream-masked tag byte that selects the value shape, followed (for
//! sized shapes) by a masked length and then the masked payload. The
//! keystream is a [`ByteStreamCipher32`](crate::rng::ByteStreamCipher32)
//! seeded from the key.
//!
//! Blocks are found in one of two ways:
//!
//! - [`SaveImage`]: a decrypted save file, scanned for the key's bytes.
//! - [`LiveSnapshot`]: a block directory in process memory, where each entry
//!   is a key followed by a pointer to the payload. Entry offsets drift across
//!   game revisions, so a mismatching hint triggers a bounded neighborhood scan.
//!
//! Both implement [`BlockSource`], which the typed readers in this module
//! build on.
mod image;
mod keys;
mod live;
mod value;

pub use image::SaveImage;
pub use keys::BlockKey;
pub use live::{BlockMemory, InMemorySnapshot, LiveSnapshot};
pub use value::{BlockValue, ScalarValue, TypeCode};

use crate::error::{ErrorSeverity, RaidFault};
use crate::table::DecodeError;
use crate::tables::{RaidBlock, TrainerIdentity};
use crate::types::StoryProgress;

/// Errors raised while locating or decoding save blocks.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SaveError {
    /// No block with this key was found, including after the bounded scan.
    #[error("save block {key:#010x} not found (hint {hint:?})")]
    BlockNotFound { key: u32, hint: Option<usize> },

    /// The decrypted tag byte is outside the recognized type codes.
    #[error("save block {key:#010x} has unsupported type tag {tag}")]
    UnsupportedTag { key: u32, tag: u8 },

    /// The block's declared size runs past the available bytes.
    #[error("save block {key:#010x} needs {needed:#x} bytes, only {available:#x} available")]
    Truncated {
        key: u32,
        needed: usize,
        available: usize,
    },

    /// The block holds a different shape than the caller asked for.
    #[error("save block {key:#010x} holds {found}, expected {expected}")]
    UnexpectedType {
        key: u32,
        expected: &'static str,
        found: &'static str,
    },

    /// The snapshot reader could not serve a read.
    #[error("memory read of {len:#x} bytes at {address:#x} failed")]
    MemoryRead { address: u64, len: usize },

    /// The decrypted payload did not decode into its fixed struct.
    #[error(transparent)]
    Payload(#[from] DecodeError),
}

impl RaidFault for SaveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SaveError::Payload(inner) => inner.severity(),
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use SaveError::*;
        match self {
            BlockNotFound { .. } => "SAVE_BLOCK_NOT_FOUND",
            UnsupportedTag { .. } => "SAVE_UNSUPPORTED_TAG",
            Truncated { .. } => "SAVE_TRUNCATED",
            UnexpectedType { .. } => "SAVE_UNEXPECTED_TYPE",
            MemoryRead { .. } => "SAVE_MEMORY_READ",
            Payload(inner) => inner.error_code(),
        }
    }
}

/// Anything that can hand out decoded save blocks by key.
pub trait BlockSource {
    fn read_block(&self, key: BlockKey) -> Result<BlockValue, SaveError>;

    /// Read a sized-object block and return its decrypted payload.
    fn read_object(&self, key: BlockKey) -> Result<Vec<u8>, SaveError> {
        self.read_block(key)?.into_object(key.key)
    }

    fn read_bool(&self, key: BlockKey) -> Result<bool, SaveError> {
        self.read_block(key)?.as_bool(key.key)
    }
}

/// Derive the story unlock tier from the four difficulty flags.
///
/// Flags are checked from the highest tier down; the first set flag wins.
pub fn read_story_progress(source: &impl BlockSource) -> Result<StoryProgress, SaveError> {
    let tiers = [
        StoryProgress::ThreeStar,
        StoryProgress::FourStar,
        StoryProgress::FiveStar,
        StoryProgress::SixStar,
    ];
    for (flag, tier) in BlockKey::STORY_FLAGS.iter().zip(tiers).rev() {
        if source.read_bool(*flag)? {
            tracing::debug!(key = format_args!("{:#010x}", flag.key), %tier, "story flag set");
            return Ok(tier);
        }
    }
    Ok(StoryProgress::Default)
}

/// Decode the trainer status block.
pub fn read_trainer(source: &impl BlockSource) -> Result<TrainerIdentity, SaveError> {
    let payload = source.read_object(BlockKey::TRAINER_STATUS)?;
    Ok(TrainerIdentity::decode(&payload)?)
}

/// Decode the raid spawn list.
pub fn read_raid_block(source: &impl BlockSource) -> Result<RaidBlock, SaveError> {
    let payload = source.read_object(BlockKey::RAID_SPAWNS)?;
    Ok(RaidBlock::decode(&payload)?)
}

/// Raw event tables delivered into the save. Each buffer is a table root,
/// ready for the decoders in [`crate::tables`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventBuffers {
    pub encounters: Vec<u8>,
    pub priority: Vec<u8>,
    pub fixed_rewards: Vec<u8>,
    pub lottery_rewards: Vec<u8>,
}

pub fn read_event_buffers(source: &impl BlockSource) -> Result<EventBuffers, SaveError> {
    Ok(EventBuffers {
        encounters: source.read_object(BlockKey::EVENT_ENCOUNTERS)?,
        priority: source.read_object(BlockKey::EVENT_PRIORITY)?,
        fixed_rewards: source.read_object(BlockKey::EVENT_FIXED_REWARDS)?,
        lottery_rewards: source.read_object(BlockKey::EVENT_LOTTERY_REWARDS)?,
    })
}
