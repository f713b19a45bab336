//! Raid reward tables and the catalog that indexes them by name.

use std::collections::HashMap;

use arrayvec::ArrayVec;

use crate::table::{DecodeError, FieldCursor, TableView};

pub const MAX_FIXED_REWARDS: usize = 15;
pub const MAX_LOTTERY_REWARDS: usize = 30;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum RewardCategory {
    #[default]
    Item = 0,
    Pokemon = 1,
    /// Tera shards matching the boss's tera type.
    Gem = 2,
}

/// Who receives a guaranteed drop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum RewardSubject {
    #[default]
    All = 0,
    Host = 1,
    Client = 2,
    Once = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedReward {
    pub category: RewardCategory,
    pub subject: RewardSubject,
    pub item_id: i32,
    pub count: i8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LotteryReward {
    pub category: RewardCategory,
    pub item_id: i32,
    pub count: i8,
    pub rate: i32,
    pub rare: bool,
}

/// Guaranteed drops, up to fifteen per table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedRewardTable {
    pub name: u64,
    pub rewards: ArrayVec<FixedReward, MAX_FIXED_REWARDS>,
}

/// Weighted drops, up to thirty per table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LotteryRewardTable {
    pub name: u64,
    pub rewards: ArrayVec<LotteryReward, MAX_LOTTERY_REWARDS>,
}

impl LotteryRewardTable {
    pub fn total_rate(&self) -> i64 {
        self.rewards.iter().map(|r| i64::from(r.rate)).sum()
    }
}

impl FixedRewardTable {
    /// Decode every table in a fixed-reward buffer.
    pub fn decode_all(buf: &[u8]) -> Result<Vec<Self>, DecodeError> {
        decode_root(buf, |mut c| {
            let name = c.scalar::<u64>(0)?;
            let mut rewards = ArrayVec::new();
            for _ in 0..MAX_FIXED_REWARDS {
                if let Some(reward) = c.nested(decode_fixed)? {
                    rewards.push(reward);
                }
            }
            Ok(Self { name, rewards })
        })
    }
}

impl LotteryRewardTable {
    /// Decode every table in a lottery-reward buffer.
    pub fn decode_all(buf: &[u8]) -> Result<Vec<Self>, DecodeError> {
        decode_root(buf, |mut c| {
            let name = c.scalar::<u64>(0)?;
            let mut rewards = ArrayVec::new();
            for _ in 0..MAX_LOTTERY_REWARDS {
                if let Some(reward) = c.nested(decode_lottery)? {
                    rewards.push(reward);
                }
            }
            Ok(Self { name, rewards })
        })
    }
}

fn decode_root<T>(
    buf: &[u8],
    mut decode: impl FnMut(FieldCursor<'_>) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    let tables = FieldCursor::new(TableView::root(buf)?).vector()?;
    tables
        .iter()
        .map(|view| view.and_then(|view| decode(FieldCursor::new(view))))
        .collect()
}

fn decode_fixed(mut c: FieldCursor<'_>) -> Result<FixedReward, DecodeError> {
    Ok(FixedReward {
        category: c.mapped("category", RewardCategory::Item, RewardCategory::from_repr)?,
        subject: c.mapped("subject_type", RewardSubject::All, RewardSubject::from_repr)?,
        item_id: c.scalar(0)?,
        count: c.scalar(0)?,
    })
}

fn decode_lottery(mut c: FieldCursor<'_>) -> Result<LotteryReward, DecodeError> {
    Ok(LotteryReward {
        category: c.mapped("category", RewardCategory::Item, RewardCategory::from_repr)?,
        item_id: c.scalar(0)?,
        count: c.scalar(0)?,
        rate: c.scalar(0)?,
        rare: c.mapped("rare_item_flag", false, |flag: i8| match flag {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        })?,
    })
}

/// Reward tables indexed by table name.
///
/// Base-game and event tables share one namespace; a later insert replaces
/// an earlier table with the same name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RewardCatalog {
    fixed: HashMap<u64, FixedRewardTable>,
    lottery: HashMap<u64, LotteryRewardTable>,
}

impl RewardCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend_fixed(&mut self, tables: impl IntoIterator<Item = FixedRewardTable>) {
        self.fixed
            .extend(tables.into_iter().map(|table| (table.name, table)));
    }

    pub fn extend_lottery(&mut self, tables: impl IntoIterator<Item = LotteryRewardTable>) {
        self.lottery
            .extend(tables.into_iter().map(|table| (table.name, table)));
    }

    /// Decode and add one fixed and one lottery buffer.
    pub fn load(&mut self, fixed: &[u8], lottery: &[u8]) -> Result<(), DecodeError> {
        self.extend_fixed(FixedRewardTable::decode_all(fixed)?);
        self.extend_lottery(LotteryRewardTable::decode_all(lottery)?);
        tracing::debug!(
            fixed = self.fixed.len(),
            lottery = self.lottery.len(),
            "reward catalog loaded"
        );
        Ok(())
    }

    pub fn fixed(&self, name: u64) -> Option<&FixedRewardTable> {
        self.fixed.get(&name)
    }

    pub fn lottery(&self, name: u64) -> Option<&LotteryRewardTable> {
        self.lottery.get(&name)
    }

    pub fn is_empty(&self) -> bool {
        self.fixed.is_empty() && self.lottery.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_later_tables_replace_earlier() {
        let mut catalog = RewardCatalog::new();
        let reward = FixedReward {
            category: RewardCategory::Item,
            subject: RewardSubject::Host,
            item_id: 1,
            count: 1,
        };
        let mut rewards = ArrayVec::new();
        rewards.push(reward);
        catalog.extend_fixed([FixedRewardTable {
            name: 7,
            rewards: rewards.clone(),
        }]);
        rewards.push(FixedReward { item_id: 2, ..reward });
        catalog.extend_fixed([FixedRewardTable { name: 7, rewards }]);
        assert_eq!(catalog.fixed(7).map(|t| t.rewards.len()), Some(2));
        assert!(catalog.lottery(7).is_none());
    }
}
