//! Block-level driver tying the derivation stages together.

use super::attributes::{self, BossAttributes};
use super::select::{self, Selector};
use super::{DeriveError, Invariant, difficulty, groups};
use crate::config::EngineConfig;
use crate::error::RaidFault;
use crate::env::SpeciesOracle;
use crate::rng::StreamGen64;
use crate::table::DecodeError;
use crate::tables::{
    DeliveryPriority, EncounterEntry, EncounterTable, FixedRewardTable, LotteryRewardTable,
    RaidBlock, RawSlotRecord, RewardCatalog, TrainerIdentity,
};
use crate::types::{StarLevel, StoryProgress};

/// Decoded static data for one snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RaidTables {
    /// One table per difficulty, 1★ through 6★.
    pub by_difficulty: Vec<EncounterTable>,
    pub event: EncounterTable,
    pub priority: DeliveryPriority,
    pub rewards: RewardCatalog,
}

impl RaidTables {
    /// Decode the per-difficulty buffers, the event table and the event
    /// priority table. Rewards start empty; load them through
    /// [`RewardCatalog::load`].
    pub fn decode<B: AsRef<[u8]>>(
        difficulty_buffers: &[B],
        event: &[u8],
        priority: &[u8],
    ) -> Result<Self, DecodeError> {
        let by_difficulty = difficulty_buffers
            .iter()
            .map(|buf| EncounterTable::decode(buf.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            by_difficulty,
            event: EncounterTable::decode(event)?,
            priority: DeliveryPriority::decode(priority)?,
            rewards: RewardCatalog::default(),
        })
    }

    pub fn table(&self, level: StarLevel) -> Option<&EncounterTable> {
        self.by_difficulty.get(level.table_index()?)
    }
}

/// A resolved spawn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spawn {
    /// Rolled difficulty, or for event raids the matched entry's difficulty.
    pub difficulty: StarLevel,
    pub is_event: bool,
    pub delivery_group: Option<u8>,
    /// Position of the matched entry in its table.
    pub entry_index: usize,
    pub entry: EncounterEntry,
    pub species_name: String,
    pub attributes: BossAttributes,
}

/// One slot of a derived block. Disabled slots carry only raw fields.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedRaid {
    pub slot: usize,
    pub raw: RawSlotRecord,
    pub spawn: Option<Spawn>,
}

/// Derivation engine over borrowed tables and species metadata.
#[derive(Debug)]
pub struct RaidEngine<'a, S: ?Sized> {
    config: EngineConfig,
    tables: &'a RaidTables,
    species: &'a S,
}

impl<'a, S: SpeciesOracle + ?Sized> RaidEngine<'a, S> {
    pub fn new(config: EngineConfig, tables: &'a RaidTables, species: &'a S) -> Self {
        Self {
            config,
            tables,
            species,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Delivery-group prepass over a whole block.
    pub fn assign_groups(&self, slots: &[RawSlotRecord], progress: StoryProgress) -> Vec<Option<u8>> {
        groups::assign(
            slots,
            &self.tables.priority,
            &self.tables.event,
            self.config.game_version,
            progress,
            self.config.group_policy,
        )
    }

    /// Derive one slot. `group` is the slot's delivery group from
    /// [`Self::assign_groups`]; regular slots ignore it.
    pub fn derive_slot(
        &self,
        index: usize,
        slot: &RawSlotRecord,
        progress: StoryProgress,
        trainer: &TrainerIdentity,
        group: Option<u8>,
    ) -> Result<DerivedRaid, DeriveError> {
        if !slot.enabled() {
            return Ok(DerivedRaid {
                slot: index,
                raw: *slot,
                spawn: None,
            });
        }
        let violation = |invariant| DeriveError::InvariantViolation {
            slot: index,
            invariant,
        };

        let mut rng = StreamGen64::new(self.config.formula, slot.seed);
        let rolled = difficulty::resolve(slot.content, &mut rng, progress);
        let is_event = rolled == StarLevel::Event;

        let (table, selector, group) = if is_event {
            let group = group.ok_or_else(|| violation(Invariant::UnassignedEventSlot))?;
            (
                &self.tables.event,
                Selector::event(self.config.game_version, group, progress),
                Some(group),
            )
        } else {
            let table = self
                .tables
                .table(rolled)
                .ok_or_else(|| violation(Invariant::MissingTable { difficulty: rolled }))?;
            (table, Selector::regular(self.config.game_version), None)
        };

        let (entry_index, entry) = select::draw(&mut rng, &table.entries, &selector)
            .ok_or_else(|| {
                violation(Invariant::ZeroTotalRate {
                    difficulty: rolled,
                    group,
                })
            })?;

        let attributes = attributes::generate(
            self.config.formula,
            slot.seed,
            &entry.boss,
            trainer.full_id(),
            self.species,
        )?;
        let species_name = self
            .species
            .personal(entry.boss.species, entry.boss.form)
            .map(|info| info.name.clone())
            .unwrap_or_default();

        let difficulty = if is_event {
            entry.difficulty.unwrap_or(StarLevel::Event)
        } else {
            rolled
        };
        tracing::debug!(
            slot = index,
            seed = format_args!("{:#010x}", slot.seed),
            %difficulty,
            species = %entry.boss.species,
            shiny = attributes.is_shiny,
            "derived raid"
        );

        Ok(DerivedRaid {
            slot: index,
            raw: *slot,
            spawn: Some(Spawn {
                difficulty,
                is_event,
                delivery_group: group,
                entry_index,
                entry: entry.clone(),
                species_name,
                attributes,
            }),
        })
    }

    /// Derive every slot of a block.
    ///
    /// The result always holds one entry per slot, in slot order. Slots are
    /// independent once delivery groups are assigned, so a slot that fails
    /// carries its own error and the rest still derive.
    pub fn derive_block(
        &self,
        block: &RaidBlock,
        progress: StoryProgress,
        trainer: &TrainerIdentity,
    ) -> Vec<Result<DerivedRaid, DeriveError>> {
        let groups = self.assign_groups(&block.slots, progress);
        let raids: Vec<_> = block
            .slots
            .iter()
            .zip(groups)
            .enumerate()
            .map(|(index, (slot, group))| {
                self.derive_slot(index, slot, progress, trainer, group)
                    .inspect_err(|err| {
                        tracing::warn!(
                            slot = index,
                            code = err.error_code(),
                            severity = err.severity().as_str(),
                            "{err}"
                        );
                    })
            })
            .collect();

        let spawns = || raids.iter().filter_map(|raid| raid.as_ref().ok()?.spawn.as_ref());
        let enabled = spawns().count();
        let shiny = spawns().filter(|spawn| spawn.attributes.is_shiny).count();
        let failed = raids.iter().filter(|raid| raid.is_err()).count();
        tracing::info!(enabled, shiny, failed, %progress, "derived raid block");
        raids
    }

    /// Guaranteed and lottery drop tables for a spawn, when known.
    pub fn rewards(
        &self,
        spawn: &Spawn,
    ) -> (Option<&'a FixedRewardTable>, Option<&'a LotteryRewardTable>) {
        (
            self.tables.rewards.fixed(spawn.entry.drop_table_fix),
            self.tables.rewards.lottery(spawn.entry.drop_table_random),
        )
    }
}
