//! Shared fixtures for the integration tests.
//!
//! [`Table`] writes the indirection-table layout the decoders read: a root
//! offset at the head, then for every table its field-offset record followed
//! by the table itself. Nested tables and vectors are written after their
//! parent so every reference is a forward offset.
#![allow(dead_code)]

use raid_core::env::{GenderPolicy, PersonalInfo};
use raid_core::tables::{
    AbilityDirective, BossSpec, EncounterEntry, GenderDirective, IvDirective, NatureDirective,
    ShinyDirective, SizeDirective, TeraDirective,
};
use raid_core::{AbilityId, AbilityIndex, SpeciesId, SpeciesTable, StarLevel, TrainerIdentity};

pub enum Field {
    Absent,
    Bytes(Vec<u8>),
    Table(Table),
    Vector(Vec<Table>),
}

#[derive(Default)]
pub struct Table {
    fields: Vec<Field>,
}

macro_rules! scalar_field {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $name(mut self, value: $ty) -> Self {
                self.fields.push(Field::Bytes(value.to_le_bytes().to_vec()));
                self
            }
        )*
    };
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    scalar_field!(u8: u8, i8: i8, u16: u16, i16: i16, i32: i32, u32: u32, u64: u64);

    pub fn absent(mut self) -> Self {
        self.fields.push(Field::Absent);
        self
    }

    pub fn table(mut self, table: Table) -> Self {
        self.fields.push(Field::Table(table));
        self
    }

    pub fn vector(mut self, tables: Vec<Table>) -> Self {
        self.fields.push(Field::Vector(tables));
        self
    }

    /// Serialize with `self` as the root table.
    pub fn finish(&self) -> Vec<u8> {
        let mut buf = vec![0u8; 4];
        let root = self.write(&mut buf);
        patch(&mut buf, 0, root as u32);
        buf
    }

    fn write(&self, buf: &mut Vec<u8>) -> usize {
        let inline: Vec<usize> = self
            .fields
            .iter()
            .map(|field| match field {
                Field::Absent => 0,
                Field::Bytes(bytes) => bytes.len(),
                Field::Table(_) | Field::Vector(_) => 4,
            })
            .collect();

        let vtable = buf.len();
        let vtable_size = 4 + 2 * self.fields.len();
        let object_size = 4 + inline.iter().sum::<usize>();
        buf.extend_from_slice(&(vtable_size as u16).to_le_bytes());
        buf.extend_from_slice(&(object_size as u16).to_le_bytes());
        let mut offset = 4;
        for len in &inline {
            let value = if *len == 0 { 0 } else { offset };
            buf.extend_from_slice(&(value as u16).to_le_bytes());
            offset += len;
        }

        let pos = buf.len();
        buf.extend_from_slice(&((pos - vtable) as i32).to_le_bytes());
        let mut pending = Vec::new();
        for field in &self.fields {
            match field {
                Field::Absent => {}
                Field::Bytes(bytes) => buf.extend_from_slice(bytes),
                Field::Table(_) | Field::Vector(_) => {
                    pending.push((buf.len(), field));
                    buf.extend_from_slice(&[0; 4]);
                }
            }
        }

        for (at, field) in pending {
            let target = match field {
                Field::Table(table) => table.write(buf),
                Field::Vector(tables) => write_vector(buf, tables),
                Field::Absent | Field::Bytes(_) => unreachable!(),
            };
            patch(buf, at, (target - at) as u32);
        }
        pos
    }
}

fn write_vector(buf: &mut Vec<u8>, tables: &[Table]) -> usize {
    let start = buf.len();
    buf.extend_from_slice(&(tables.len() as u32).to_le_bytes());
    let slots: Vec<usize> = tables
        .iter()
        .map(|_| {
            let at = buf.len();
            buf.extend_from_slice(&[0; 4]);
            at
        })
        .collect();
    for (table, at) in tables.iter().zip(slots) {
        let pos = table.write(buf);
        patch(buf, at, (pos - at) as u32);
    }
    start
}

fn patch(buf: &mut [u8], at: usize, value: u32) {
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

// ---------------------------------------------------------------------------
// Encounter tables
// ---------------------------------------------------------------------------

/// Serialize entries as an encounter table.
pub fn encounter_table(entries: &[EncounterEntry]) -> Vec<u8> {
    let wrappers = entries
        .iter()
        .map(|entry| Table::new().table(encounter_entry(entry)))
        .collect();
    Table::new().vector(wrappers).finish()
}

fn encounter_entry(entry: &EncounterEntry) -> Table {
    let table = Table::new()
        .i16(entry.version as i16)
        .i32(entry.number)
        .i8(entry.delivery_group_id);
    let table = match entry.difficulty.and_then(StarLevel::stars) {
        Some(stars) => table.i32(i32::from(stars)),
        None => table.absent(),
    };
    let size = &entry.boss.size;
    table
        .u8(entry.rate)
        .u64(entry.drop_table_fix)
        .u64(entry.drop_table_random)
        .i8(entry.capture_rate)
        .i8(entry.capture_level)
        .table(boss_spec(&entry.boss))
        .table(
            Table::new()
                .i32(size_code(size.height).0)
                .i16(size_code(size.height).1)
                .i32(size_code(size.weight).0)
                .i16(size_code(size.weight).1)
                .i32(size_code(size.scale).0)
                .i16(size_code(size.scale).1),
        )
}

fn boss_spec(boss: &BossSpec) -> Table {
    let mut table = Table::new()
        .u16(boss.species.0)
        .i16(boss.form)
        .i32(boss.gender as i32)
        .i32(boss.held_item)
        .i32(boss.level)
        .i32(boss.ball)
        .i32(boss.moveset_kind);
    for slot in boss.moves {
        table = table.table(Table::new().u16(slot.move_id).i8(slot.pp_ups));
    }
    let (iv_kind, iv_values, iv_count) = match boss.ivs {
        IvDirective::Random => (0, [0; 6], 0),
        IvDirective::Guaranteed(count) => (1, [0; 6], count as i8),
        IvDirective::Fixed(spread) => (2, spread.map(i32::from), 0),
    };
    table
        .i32(tera_code(boss.tera))
        .i32(match boss.nature {
            NatureDirective::Random => 0,
            NatureDirective::Fixed(nature) => nature as i32 + 1,
        })
        .i32(match boss.ability {
            AbilityDirective::RandomTwo => 0,
            AbilityDirective::RandomThree => 1,
            AbilityDirective::Fixed(index) => index as i32 + 2,
        })
        .i32(iv_kind)
        .table(param_set(iv_values))
        .i8(iv_count)
        .table(param_set(boss.evs))
        .i32(boss.shiny as i32)
}

fn param_set(values: [i32; 6]) -> Table {
    values.iter().fold(Table::new(), |table, &v| table.i32(v))
}

fn tera_code(tera: TeraDirective) -> i32 {
    match tera {
        TeraDirective::Default => 0,
        TeraDirective::Random => 1,
        TeraDirective::Fixed(tera) => tera as i32 + 2,
    }
}

fn size_code(size: SizeDirective) -> (i32, i16) {
    match size {
        SizeDirective::Random => (0, 0),
        SizeDirective::ExtraSmall => (1, 0),
        SizeDirective::Small => (2, 0),
        SizeDirective::Medium => (3, 0),
        SizeDirective::Large => (4, 0),
        SizeDirective::ExtraLarge => (5, 0),
        SizeDirective::Fixed(value) => (6, i16::from(value)),
    }
}

// ---------------------------------------------------------------------------
// Domain fixtures
// ---------------------------------------------------------------------------

pub const PIKACHU: SpeciesId = SpeciesId(25);
pub const CHARIZARD: SpeciesId = SpeciesId(6);
pub const MAUSHOLD: SpeciesId = SpeciesId(925);

/// Metadata for every species the tests spawn.
pub fn species() -> SpeciesTable {
    let info = |species, form, name: &str, gender, abilities: [u16; 3]| PersonalInfo {
        species,
        form,
        name: name.into(),
        gender,
        abilities: abilities.map(AbilityId),
    };
    let even = GenderPolicy::Ratio {
        female_threshold: 50,
    };
    [
        info(PIKACHU, 0, "Pikachu", even, [9, 9, 31]),
        info(
            CHARIZARD,
            0,
            "Charizard",
            GenderPolicy::Ratio {
                female_threshold: 12,
            },
            [66, 66, 94],
        ),
        info(MAUSHOLD, 0, "Maushold", GenderPolicy::Genderless, [132, 167, 101]),
        info(SpeciesId::TOXTRICITY, 0, "Toxtricity", even, [244, 57, 101]),
        info(SpeciesId::TOXTRICITY, 1, "Toxtricity", even, [244, 58, 101]),
    ]
    .into_iter()
    .collect()
}

pub fn boss(species: SpeciesId, form: i16) -> BossSpec {
    BossSpec {
        species,
        form,
        level: 35,
        tera: TeraDirective::Random,
        ..BossSpec::default()
    }
}

/// The shiny-locked, fully fixed Charizard used by the forced vector.
pub fn locked_charizard() -> BossSpec {
    BossSpec {
        gender: GenderDirective::Male,
        tera: TeraDirective::Fixed(raid_core::TeraType::Dragon),
        nature: NatureDirective::Fixed(raid_core::Nature::Modest),
        ability: AbilityDirective::Fixed(AbilityIndex::Hidden),
        ivs: IvDirective::Fixed([31; 6]),
        shiny: ShinyDirective::Locked,
        level: 100,
        ..boss(CHARIZARD, 0)
    }
}

pub fn entry(difficulty: Option<StarLevel>, rate: u8, boss: BossSpec) -> EncounterEntry {
    EncounterEntry {
        version: raid_core::VersionFilter::Both,
        number: 0,
        delivery_group_id: 0,
        difficulty,
        rate,
        drop_table_fix: 0,
        drop_table_random: 0,
        capture_rate: 2,
        capture_level: 0,
        boss,
    }
}

pub fn trainer(tid: u16, sid: u16) -> TrainerIdentity {
    TrainerIdentity::from_ids(tid, sid)
}
