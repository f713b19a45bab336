//! The 72-slot raid spawn list.

use crate::table::{DecodeError, FixedReader};

pub const RAID_COUNT: usize = 72;
const SLOT_SIZE: usize = 0x20;
/// Two seed words followed by the slots. Live reads fetch more; the tail is
/// ignored.
pub const RAID_BLOCK_SIZE: usize = 0x10 + RAID_COUNT * SLOT_SIZE;

/// One raw raid slot, exactly as stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawSlotRecord {
    pub is_enabled: u32,
    pub area_id: u32,
    pub display_type: u32,
    pub den_id: u32,
    pub seed: u32,
    pub reserved: u32,
    pub content: u32,
    pub league_points: u32,
}

impl RawSlotRecord {
    pub fn enabled(&self) -> bool {
        self.is_enabled != 0
    }

    /// Event raids draw from the delivery tables.
    pub fn is_event(&self) -> bool {
        self.content >= 2
    }
}

/// Decoded spawn list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaidBlock {
    pub current_seed: u64,
    pub tomorrow_seed: u64,
    pub slots: Vec<RawSlotRecord>,
}

impl RaidBlock {
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut r = FixedReader::new("raid block", buf, RAID_BLOCK_SIZE)?;
        let current_seed = r.read()?;
        let tomorrow_seed = r.read()?;
        let mut slots = Vec::with_capacity(RAID_COUNT);
        for _ in 0..RAID_COUNT {
            slots.push(RawSlotRecord {
                is_enabled: r.read()?,
                area_id: r.read()?,
                display_type: r.read()?,
                den_id: r.read()?,
                seed: r.read()?,
                reserved: r.read()?,
                content: r.read()?,
                league_points: r.read()?,
            });
        }
        Ok(Self {
            current_seed,
            tomorrow_seed,
            slots,
        })
    }

    /// Encode back into the stored layout.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(RAID_BLOCK_SIZE);
        out.extend(self.current_seed.to_le_bytes());
        out.extend(self.tomorrow_seed.to_le_bytes());
        for slot in &self.slots {
            for word in [
                slot.is_enabled,
                slot.area_id,
                slot.display_type,
                slot.den_id,
                slot.seed,
                slot.reserved,
                slot.content,
                slot.league_points,
            ] {
                out.extend(word.to_le_bytes());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_size_matches_layout() {
        assert_eq!(RAID_BLOCK_SIZE, 0x910);
    }

    #[test]
    fn accepts_live_sized_reads() {
        let mut buf = vec![0u8; 0xC98];
        buf[0x10..0x14].copy_from_slice(&1u32.to_le_bytes());
        buf[0x20..0x24].copy_from_slice(&0x1122_3344u32.to_le_bytes());
        let block = RaidBlock::decode(&buf).unwrap();
        assert_eq!(block.slots.len(), RAID_COUNT);
        assert!(block.slots[0].enabled());
        assert_eq!(block.slots[0].seed, 0x1122_3344);
        assert!(!block.slots[1].enabled());
    }

    #[test]
    fn short_block_is_a_decode_error() {
        assert!(matches!(
            RaidBlock::decode(&[0u8; 0x900]),
            Err(DecodeError::WrongSize { expected: 0x910, .. })
        ));
    }
}
