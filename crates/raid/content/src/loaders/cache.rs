//! On-disk cache of raw table buffers.
//!
//! Buffers are stored exactly as they were read from the game, so loading
//! from the cache and reading live hand the engine identical bytes.

use std::path::{Path, PathBuf};

use anyhow::Context;
use raid_core::save::EventBuffers;
use raid_core::{RaidBlock, RaidTables, StarLevel};

use crate::loaders::{LoadResult, read_bytes};

pub const EVENT_ENCOUNTERS: &str = "event.bin";
pub const EVENT_PRIORITY: &str = "priority.bin";
pub const EVENT_FIXED_REWARDS: &str = "event_fixed_rewards.bin";
pub const EVENT_LOTTERY_REWARDS: &str = "event_lottery_rewards.bin";
pub const FIXED_REWARDS: &str = "fixed_rewards.bin";
pub const LOTTERY_REWARDS: &str = "lottery_rewards.bin";
pub const RAID_BLOCK: &str = "raid_block.bin";

/// Directory of dumped buffers.
///
/// # Directory Structure
///
/// ```text
/// cache_dir/
/// ├── difficulty_1.bin … difficulty_6.bin
/// ├── event.bin
/// ├── priority.bin
/// ├── fixed_rewards.bin          (optional)
/// ├── lottery_rewards.bin        (optional)
/// ├── event_fixed_rewards.bin    (optional)
/// ├── event_lottery_rewards.bin  (optional)
/// └── raid_block.bin             (optional)
/// ```
#[derive(Clone, Debug)]
pub struct BufferCache {
    dir: PathBuf,
}

impl BufferCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name of the encounter table for a difficulty, e.g. `difficulty_3.bin`.
    pub fn difficulty_file(level: StarLevel) -> Option<String> {
        level
            .table_index()
            .and_then(|_| level.stars())
            .map(|stars| format!("difficulty_{stars}.bin"))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.dir.join(name).is_file()
    }

    /// Write one buffer verbatim, creating the directory if needed.
    pub fn store(&self, name: &str, bytes: &[u8]) -> LoadResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create cache dir {}", self.dir.display()))?;
        let path = self.dir.join(name);
        std::fs::write(&path, bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(file = name, bytes = bytes.len(), "buffer cached");
        Ok(())
    }

    pub fn load(&self, name: &str) -> LoadResult<Vec<u8>> {
        read_bytes(&self.dir.join(name))
    }

    fn load_optional(&self, name: &str) -> LoadResult<Option<Vec<u8>>> {
        if self.contains(name) {
            self.load(name).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn store_difficulty(&self, level: StarLevel, bytes: &[u8]) -> LoadResult<()> {
        let name = Self::difficulty_file(level)
            .ok_or_else(|| anyhow::anyhow!("{} has no encounter table of its own", level))?;
        self.store(&name, bytes)
    }

    /// Store the event buffers read from a save.
    pub fn store_event_buffers(&self, buffers: &EventBuffers) -> LoadResult<()> {
        self.store(EVENT_ENCOUNTERS, &buffers.encounters)?;
        self.store(EVENT_PRIORITY, &buffers.priority)?;
        self.store(EVENT_FIXED_REWARDS, &buffers.fixed_rewards)?;
        self.store(EVENT_LOTTERY_REWARDS, &buffers.lottery_rewards)
    }

    /// Decode every cached table into [`RaidTables`].
    ///
    /// Encounter and priority buffers are required. Reward buffers are merged
    /// when present, base tables first so event tables win on name clashes.
    pub fn load_tables(&self) -> LoadResult<RaidTables> {
        let difficulty = StarLevel::TABLED
            .iter()
            .filter_map(|&level| Self::difficulty_file(level))
            .map(|name| self.load(&name))
            .collect::<LoadResult<Vec<_>>>()?;
        let event = self.load(EVENT_ENCOUNTERS)?;
        let priority = self.load(EVENT_PRIORITY)?;

        let mut tables = RaidTables::decode(difficulty.as_slice(), &event, &priority)
            .context("Failed to decode cached encounter tables")?;

        for (fixed, lottery) in [
            (FIXED_REWARDS, LOTTERY_REWARDS),
            (EVENT_FIXED_REWARDS, EVENT_LOTTERY_REWARDS),
        ] {
            let (Some(fixed_buf), Some(lottery_buf)) =
                (self.load_optional(fixed)?, self.load_optional(lottery)?)
            else {
                tracing::debug!(fixed, lottery, "reward buffers not cached");
                continue;
            };
            tables
                .rewards
                .load(&fixed_buf, &lottery_buf)
                .with_context(|| format!("Failed to decode {fixed} / {lottery}"))?;
        }

        tracing::info!(
            dir = %self.dir.display(),
            events = tables.event.len(),
            "cached tables loaded"
        );
        Ok(tables)
    }

    pub fn store_raid_block(&self, block: &RaidBlock) -> LoadResult<()> {
        self.store(RAID_BLOCK, &block.encode())
    }

    pub fn load_raid_block(&self) -> LoadResult<RaidBlock> {
        let bytes = self.load(RAID_BLOCK)?;
        RaidBlock::decode(&bytes).context("Failed to decode cached raid block")
    }
}
