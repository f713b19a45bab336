//! Encounter tables: which bosses a raid slot can draw, and how.

use crate::table::{DecodeError, FieldCursor, TableView};
use crate::types::{
    AbilityIndex, Nature, SpeciesId, StarLevel, StatSpread, TeraType, VersionFilter,
};

/// Sex directive of a boss.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum GenderDirective {
    /// Use the species ratio.
    #[default]
    Random = 0,
    Male = 1,
    Female = 2,
    Genderless = 3,
}

/// Tera type directive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TeraDirective {
    /// No explicit setting; the game rolls it like `Random`.
    #[default]
    Default,
    Random,
    Fixed(TeraType),
}

impl TeraDirective {
    fn from_game(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Default),
            1 => Some(Self::Random),
            n => u8::try_from(n - 2)
                .ok()
                .and_then(TeraType::from_repr)
                .map(Self::Fixed),
        }
    }

    pub fn fixed(self) -> Option<TeraType> {
        match self {
            Self::Fixed(tera) => Some(tera),
            Self::Default | Self::Random => None,
        }
    }
}

/// Nature directive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NatureDirective {
    #[default]
    Random,
    Fixed(Nature),
}

impl NatureDirective {
    fn from_game(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Random),
            n => u8::try_from(n - 1)
                .ok()
                .and_then(Nature::from_repr)
                .map(Self::Fixed),
        }
    }
}

/// Ability directive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityDirective {
    /// First or second ability, `rand(2)`.
    #[default]
    RandomTwo,
    /// Any of the three, `rand(3)`.
    RandomThree,
    Fixed(AbilityIndex),
}

impl AbilityDirective {
    fn from_game(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::RandomTwo),
            1 => Some(Self::RandomThree),
            n => u8::try_from(n - 2)
                .ok()
                .and_then(AbilityIndex::from_repr)
                .map(Self::Fixed),
        }
    }
}

/// IV directive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IvDirective {
    #[default]
    Random,
    /// This many stats are forced to 31; the rest are random.
    Guaranteed(u8),
    Fixed(StatSpread),
}

impl IvDirective {
    /// Stats forced to 31 before the random fill.
    pub fn guaranteed_count(self) -> u8 {
        match self {
            Self::Random | Self::Fixed(_) => 0,
            Self::Guaranteed(count) => count,
        }
    }
}

/// Shiny directive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum ShinyDirective {
    /// Natural odds against the rolled trainer id.
    #[default]
    Random = 0,
    Locked = 1,
    Forced = 2,
}

/// Size directive for one of height, weight or scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeDirective {
    #[default]
    Random,
    ExtraSmall,
    Small,
    Medium,
    Large,
    ExtraLarge,
    Fixed(u8),
}

impl SizeDirective {
    fn from_game(kind: i32, value: i16) -> Option<Self> {
        Some(match kind {
            0 => Self::Random,
            1 => Self::ExtraSmall,
            2 => Self::Small,
            3 => Self::Medium,
            4 => Self::Large,
            5 => Self::ExtraLarge,
            6 => Self::Fixed(u8::try_from(value).ok()?),
            _ => return None,
        })
    }
}

/// Height, weight and scale directives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeSpec {
    pub height: SizeDirective,
    pub weight: SizeDirective,
    pub scale: SizeDirective,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveSlot {
    pub move_id: u16,
    pub pp_ups: i8,
}

/// The boss a matched entry spawns, with per-attribute directives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossSpec {
    pub species: SpeciesId,
    pub form: i16,
    pub gender: GenderDirective,
    pub held_item: i32,
    pub level: i32,
    pub ball: i32,
    pub moveset_kind: i32,
    pub moves: [MoveSlot; 4],
    pub tera: TeraDirective,
    pub nature: NatureDirective,
    pub ability: AbilityDirective,
    pub ivs: IvDirective,
    pub evs: [i32; 6],
    pub shiny: ShinyDirective,
    pub size: SizeSpec,
}

/// One weighted row of an encounter table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterEntry {
    pub version: VersionFilter,
    pub number: i32,
    pub delivery_group_id: i8,
    /// `None` when the table omits it, which base tables sometimes do.
    pub difficulty: Option<StarLevel>,
    pub rate: u8,
    pub drop_table_fix: u64,
    pub drop_table_random: u64,
    pub capture_rate: i8,
    pub capture_level: i8,
    pub boss: BossSpec,
}

/// Decoded encounter table, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterTable {
    pub entries: Vec<EncounterEntry>,
}

impl EncounterTable {
    /// Decode a root table holding a vector of single-entry wrappers.
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let root = TableView::root(buf)?;
        let wrappers = FieldCursor::new(root).vector()?;
        let mut entries = Vec::with_capacity(wrappers.len());
        for wrapper in wrappers.iter() {
            let mut cursor = FieldCursor::new(wrapper?);
            if let Some(entry) = cursor.nested(decode_entry)? {
                entries.push(entry);
            }
        }
        tracing::debug!(entries = entries.len(), bytes = buf.len(), "decoded encounter table");
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn decode_entry(mut c: FieldCursor<'_>) -> Result<EncounterEntry, DecodeError> {
    let version = c.mapped("rom_ver", VersionFilter::Both, VersionFilter::from_repr)?;
    let number = c.scalar::<i32>(0)?;
    let delivery_group_id = c.scalar::<i8>(0)?;
    let difficulty = c.mapped("difficulty", None, |v: i32| StarLevel::from_game(v).map(Some))?;
    let rate = c.scalar::<u8>(0)?;
    let drop_table_fix = c.scalar::<u64>(0)?;
    let drop_table_random = c.scalar::<u64>(0)?;
    let capture_rate = c.scalar::<i8>(0)?;
    let capture_level = c.scalar::<i8>(0)?;
    let boss = c.nested(decode_boss)?.unwrap_or_default();
    let size = c.nested(decode_size)?.unwrap_or_default();
    // boss_desc and raid_time_data are not needed
    c.skip();
    c.skip();
    Ok(EncounterEntry {
        version,
        number,
        delivery_group_id,
        difficulty,
        rate,
        drop_table_fix,
        drop_table_random,
        capture_rate,
        capture_level,
        boss: BossSpec { size, ..boss },
    })
}

fn decode_boss(mut c: FieldCursor<'_>) -> Result<BossSpec, DecodeError> {
    let species = SpeciesId(c.scalar::<u16>(0)?);
    let form = c.scalar::<i16>(0)?;
    let gender = c.mapped("sex", GenderDirective::Random, GenderDirective::from_repr)?;
    let held_item = c.scalar::<i32>(0)?;
    let level = c.scalar::<i32>(0)?;
    let ball = c.scalar::<i32>(0)?;
    let moveset_kind = c.scalar::<i32>(0)?;
    let mut moves = [MoveSlot::default(); 4];
    for slot in &mut moves {
        *slot = c.nested(decode_move)?.unwrap_or_default();
    }
    let tera = c.mapped("gem_type", TeraDirective::Default, TeraDirective::from_game)?;
    let nature = c.mapped("seikaku", NatureDirective::Random, NatureDirective::from_game)?;
    let ability = c.mapped("tokusei", AbilityDirective::RandomTwo, AbilityDirective::from_game)?;
    let iv_kind = c.scalar::<i32>(0)?;
    let iv_values = c.nested(decode_param_set)?.unwrap_or_default();
    let iv_count = c.scalar::<i8>(0)?;
    let evs = c.nested(decode_param_set)?.unwrap_or_default();
    let shiny = c.mapped("rare_type", ShinyDirective::Random, ShinyDirective::from_repr)?;
    // scale_type / scale_value duplicate the size table
    c.skip();
    c.skip();

    let ivs = match iv_kind {
        0 => IvDirective::Random,
        1 => IvDirective::Guaranteed(u8::try_from(iv_count).ok().filter(|&n| n <= 6).ok_or(
            DecodeError::InvalidValue {
                field: "talent_vnum",
                value: i64::from(iv_count),
            },
        )?),
        2 => {
            let mut spread = [0u8; 6];
            for (iv, raw) in spread.iter_mut().zip(iv_values) {
                *iv = u8::try_from(raw).ok().filter(|&v| v <= 31).ok_or(
                    DecodeError::InvalidValue {
                        field: "talent_value",
                        value: i64::from(raw),
                    },
                )?;
            }
            IvDirective::Fixed(spread)
        }
        other => {
            return Err(DecodeError::InvalidValue {
                field: "talent_type",
                value: i64::from(other),
            });
        }
    };

    Ok(BossSpec {
        species,
        form,
        gender,
        held_item,
        level,
        ball,
        moveset_kind,
        moves,
        tera,
        nature,
        ability,
        ivs,
        evs,
        shiny,
        size: SizeSpec::default(),
    })
}

fn decode_move(mut c: FieldCursor<'_>) -> Result<MoveSlot, DecodeError> {
    Ok(MoveSlot {
        move_id: c.scalar(0)?,
        pp_ups: c.scalar(0)?,
    })
}

fn decode_param_set(mut c: FieldCursor<'_>) -> Result<[i32; 6], DecodeError> {
    let mut stats = [0i32; 6];
    for stat in &mut stats {
        *stat = c.scalar(0)?;
    }
    Ok(stats)
}

fn decode_size(mut c: FieldCursor<'_>) -> Result<SizeSpec, DecodeError> {
    let mut next = |field: &'static str| -> Result<SizeDirective, DecodeError> {
        let kind = c.scalar::<i32>(0)?;
        let value = c.scalar::<i16>(0)?;
        SizeDirective::from_game(kind, value).ok_or(DecodeError::InvalidValue {
            field,
            value: i64::from(kind),
        })
    };
    Ok(SizeSpec {
        height: next("height_type")?,
        weight: next("weight_type")?,
        scale: next("scale_type")?,
    })
}
