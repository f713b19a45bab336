//! Trainer status block.

use crate::table::{DecodeError, FixedReader};
use crate::types::GameVersion;

/// Minimum payload length of the trainer status block.
pub const TRAINER_STATUS_SIZE: usize = 0x5C;

/// The trainer whose id decides real shininess.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainerIdentity {
    pub tid: u16,
    pub sid: u16,
    /// Raw game id; see [`TrainerIdentity::game`].
    pub game_id: u8,
    pub gender: u16,
    pub language: u8,
    pub name: String,
    pub birth_month: u8,
    pub birth_day: u8,
}

impl TrainerIdentity {
    /// Identity with only ids set, for callers without a save.
    pub fn from_ids(tid: u16, sid: u16) -> Self {
        Self {
            tid,
            sid,
            ..Self::default()
        }
    }

    /// Decode the fixed little-endian status struct.
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let mut r = FixedReader::new("trainer status", payload, TRAINER_STATUS_SIZE)?;
        let tid = r.read()?;
        let sid = r.read()?;
        let game_id = r.read()?;
        let gender = r.read()?;
        let language = r.read()?;
        r.skip(8)?;
        let name = r.utf16("original_trainer", 20)?;
        r.skip(0x36)?;
        let birth_month = r.read()?;
        let birth_day = r.read()?;
        Ok(Self {
            tid,
            sid,
            game_id,
            gender,
            language,
            name,
            birth_month,
            birth_day,
        })
    }

    /// `sid << 16 | tid`, the value shininess is checked against.
    pub fn full_id(&self) -> u32 {
        (u32::from(self.sid) << 16) | u32::from(self.tid)
    }

    /// Six-digit trainer id shown in game.
    pub fn display_tid(&self) -> u32 {
        self.full_id() % 1_000_000
    }

    /// Secret id in the same display scheme.
    pub fn display_sid(&self) -> u32 {
        self.full_id() / 1_000_000
    }

    pub fn game(&self) -> Option<GameVersion> {
        GameVersion::from_save_id(self.game_id)
    }
}

impl core::fmt::Display for TrainerIdentity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "OT: {} TID: {:06} SID: {:04}",
            self.name,
            self.display_tid(),
            self.display_sid()
        )
    }
}
