//! Domain value types shared by the decoders and the derivation engine.

/// Raid difficulty, zero-based the way the game indexes its tables.
///
/// The game stores difficulty as 1..=7 inside encounter entries; use
/// [`StarLevel::from_game`] for that encoding. `Event` marks raids whose
/// difficulty comes from the event table rather than a roll.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(i8)]
pub enum StarLevel {
    Event = -1,
    OneStar = 0,
    TwoStar = 1,
    ThreeStar = 2,
    FourStar = 3,
    FiveStar = 4,
    SixStar = 5,
    SevenStar = 6,
}

impl StarLevel {
    /// Difficulties with their own encounter table, in table order.
    pub const TABLED: [StarLevel; 6] = [
        StarLevel::OneStar,
        StarLevel::TwoStar,
        StarLevel::ThreeStar,
        StarLevel::FourStar,
        StarLevel::FiveStar,
        StarLevel::SixStar,
    ];

    /// Decode the 1-based difficulty stored in encounter entries.
    pub fn from_game(value: i32) -> Option<Self> {
        let zero_based = i8::try_from(value.checked_sub(1)?).ok()?;
        match Self::from_repr(zero_based)? {
            Self::Event => None,
            level => Some(level),
        }
    }

    /// Number of stars, or `None` for the event sentinel.
    pub fn stars(self) -> Option<u8> {
        match self {
            Self::Event => None,
            level => Some(level as i8 as u8 + 1),
        }
    }

    /// Index into the per-difficulty table array.
    pub fn table_index(self) -> Option<usize> {
        match self {
            Self::Event | Self::SevenStar => None,
            level => Some(level as i8 as usize),
        }
    }

    /// Whether a raid of this difficulty can appear at `progress`.
    ///
    /// Reaching five stars retires the 1★ and 2★ raids, and 7★ raids only
    /// appear once six stars are unlocked.
    pub fn is_unlocked(self, progress: StoryProgress) -> bool {
        match self {
            Self::Event => true,
            Self::OneStar | Self::TwoStar => progress < StoryProgress::FiveStar,
            Self::SevenStar => progress >= StoryProgress::SixStar,
            level => level <= progress.highest_star_level(),
        }
    }
}

/// Story unlock tier.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum StoryProgress {
    #[default]
    Default = 0,
    ThreeStar = 1,
    FourStar = 2,
    FiveStar = 3,
    SixStar = 4,
}

impl StoryProgress {
    /// Highest table difficulty this tier unlocks (7★ excluded).
    pub fn highest_star_level(self) -> StarLevel {
        match self {
            Self::Default => StarLevel::TwoStar,
            Self::ThreeStar => StarLevel::ThreeStar,
            Self::FourStar => StarLevel::FourStar,
            Self::FiveStar => StarLevel::FiveStar,
            Self::SixStar => StarLevel::SixStar,
        }
    }
}

/// Game build the save or snapshot came from.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GameVersion {
    Scarlet,
    Violet,
}

impl GameVersion {
    /// Map the game id stored in the trainer status block (50/51).
    pub fn from_save_id(id: u8) -> Option<Self> {
        match id {
            50 => Some(Self::Scarlet),
            51 => Some(Self::Violet),
            _ => None,
        }
    }
}

/// Version filter attached to an encounter entry.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(i16)]
pub enum VersionFilter {
    #[default]
    Both = 0,
    Scarlet = 1,
    Violet = 2,
}

impl VersionFilter {
    pub fn accepts(self, version: GameVersion) -> bool {
        match self {
            Self::Both => true,
            Self::Scarlet => version == GameVersion::Scarlet,
            Self::Violet => version == GameVersion::Violet,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::FromRepr,
    strum::VariantArray,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum TeraType {
    Normal = 0,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::FromRepr,
    strum::VariantArray,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum Nature {
    Hardy = 0,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum Gender {
    Male = 0,
    Female = 1,
    Genderless = 2,
}

/// Which of a species' three ability slots a raid boss uses.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::FromRepr,
    strum::VariantArray,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum AbilityIndex {
    First = 0,
    Second = 1,
    Hidden = 2,
}

impl AbilityIndex {
    /// 1-based slot number as shown in game data tools.
    pub fn slot(self) -> u8 {
        self as u8 + 1
    }
}

/// National dex number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpeciesId(pub u16);

impl SpeciesId {
    pub const TOXTRICITY: SpeciesId = SpeciesId(849);
}

impl core::fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{:04}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AbilityId(pub u16);

/// Six stats in the game's order: HP, Atk, Def, SpA, SpD, Spe.
pub type StatSpread = [u8; 6];
