//! Per-boss attribute generation from a slot seed.

use strum::VariantArray;

use super::DeriveError;
use super::shiny::{correct_pid, is_shiny};
use crate::env::{GenderPolicy, PersonalInfo, SpeciesOracle};
use crate::rng::{GeneratorFormula, RandomSource, StreamGen64};
use crate::tables::{
    AbilityDirective, BossSpec, GenderDirective, IvDirective, NatureDirective, SizeDirective,
};
use crate::types::{AbilityId, AbilityIndex, Gender, Nature, SpeciesId, StatSpread, TeraType};

/// Upper bound passed to `rand` for 32-bit draws.
///
/// The game draws `rand(0xFFFFFFFF)`, so `0xFFFFFFFF` itself never appears.
const U32_DRAW: u64 = 0xFFFF_FFFF;

/// Natures available to the first Toxtricity form.
const TOXTRICITY_AMPED: [Nature; 13] = [
    Nature::Adamant,
    Nature::Naughty,
    Nature::Brave,
    Nature::Impish,
    Nature::Lax,
    Nature::Rash,
    Nature::Sassy,
    Nature::Hasty,
    Nature::Jolly,
    Nature::Naive,
    Nature::Hardy,
    Nature::Docile,
    Nature::Quirky,
];

/// Natures available to the second Toxtricity form.
const TOXTRICITY_LOW_KEY: [Nature; 12] = [
    Nature::Lonely,
    Nature::Bold,
    Nature::Relaxed,
    Nature::Timid,
    Nature::Serious,
    Nature::Modest,
    Nature::Mild,
    Nature::Quiet,
    Nature::Bashful,
    Nature::Calm,
    Nature::Gentle,
    Nature::Careful,
];

/// Everything derived from the seed for one boss.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossAttributes {
    pub tera_type: TeraType,
    pub encryption_constant: u32,
    pub pid: u32,
    /// Fake trainer id the PID was rolled against.
    pub sidtid: u32,
    pub is_shiny: bool,
    pub ivs: StatSpread,
    pub ability_index: AbilityIndex,
    pub ability: AbilityId,
    pub gender: Gender,
    pub nature: Nature,
    pub height: u8,
    pub weight: u8,
    pub scale: u8,
}

/// Generate a boss's attributes.
///
/// The draw order is fixed: tera type from its own stream, then on the main
/// stream encryption constant, fake id, PID, IVs, ability, gender, nature and
/// the three sizes.
pub fn generate(
    formula: GeneratorFormula,
    seed: u32,
    boss: &BossSpec,
    real_id: u32,
    species: &(impl SpeciesOracle + ?Sized),
) -> Result<BossAttributes, DeriveError> {
    let personal = species
        .personal(boss.species, boss.form)
        .ok_or(DeriveError::UnknownSpecies {
            species: boss.species,
            form: boss.form,
        })?;

    let tera_type = match boss.tera.fixed() {
        Some(fixed) => fixed,
        None => pick(&mut StreamGen64::new(formula, seed), TeraType::VARIANTS),
    };

    let mut rng = StreamGen64::new(formula, seed);
    let encryption_constant = rng.rand(U32_DRAW) as u32;
    let sidtid = rng.rand(U32_DRAW) as u32;
    let raw_pid = rng.rand(U32_DRAW) as u32;
    let pid = correct_pid(raw_pid, sidtid, real_id, boss.shiny);

    let ivs = roll_ivs(&mut rng, boss.ivs);

    let ability_index = match boss.ability {
        AbilityDirective::RandomTwo => pick(&mut rng, &AbilityIndex::VARIANTS[..2]),
        AbilityDirective::RandomThree => pick(&mut rng, AbilityIndex::VARIANTS),
        AbilityDirective::Fixed(index) => index,
    };

    let gender = roll_gender(&mut rng, boss.gender, personal);
    let nature = roll_nature(&mut rng, boss.nature, boss.species, boss.form);

    let height = roll_size(&mut rng, boss.size.height);
    let weight = roll_size(&mut rng, boss.size.weight);
    let scale = roll_size(&mut rng, boss.size.scale);

    Ok(BossAttributes {
        tera_type,
        encryption_constant,
        pid,
        sidtid,
        is_shiny: is_shiny(pid, real_id),
        ivs,
        ability_index,
        ability: personal.ability(ability_index),
        gender,
        nature,
        height,
        weight,
        scale,
    })
}

/// Uniform draw from a non-empty list; ordinals follow list order.
fn pick<T: Copy>(rng: &mut impl RandomSource, pool: &[T]) -> T {
    pool[rng.rand(pool.len() as u64) as usize]
}

fn roll_ivs(rng: &mut impl RandomSource, directive: IvDirective) -> StatSpread {
    if let IvDirective::Fixed(spread) = directive {
        return spread;
    }
    let mut ivs: [Option<u8>; 6] = [None; 6];
    for _ in 0..directive.guaranteed_count().min(6) {
        loop {
            let index = rng.rand(6) as usize;
            if ivs[index].is_none() {
                ivs[index] = Some(31);
                break;
            }
        }
    }
    ivs.map(|iv| iv.unwrap_or_else(|| rng.rand(32) as u8))
}

fn roll_gender(
    rng: &mut impl RandomSource,
    directive: GenderDirective,
    personal: &PersonalInfo,
) -> Gender {
    match directive {
        GenderDirective::Male => return Gender::Male,
        GenderDirective::Female => return Gender::Female,
        GenderDirective::Genderless => return Gender::Genderless,
        GenderDirective::Random => {}
    }
    let female_threshold = match personal.gender {
        GenderPolicy::Ratio { female_threshold } => female_threshold,
        GenderPolicy::Male => return Gender::Male,
        GenderPolicy::Female => return Gender::Female,
        GenderPolicy::Genderless => return Gender::Genderless,
    };
    if rng.rand(100) < u64::from(female_threshold) {
        Gender::Female
    } else {
        Gender::Male
    }
}

fn roll_nature(
    rng: &mut impl RandomSource,
    directive: NatureDirective,
    species: SpeciesId,
    form: i16,
) -> Nature {
    if let NatureDirective::Fixed(nature) = directive {
        return nature;
    }
    let pool: &[Nature] = match (species, form) {
        (SpeciesId::TOXTRICITY, 0) => &TOXTRICITY_AMPED,
        (SpeciesId::TOXTRICITY, 1) => &TOXTRICITY_LOW_KEY,
        _ => Nature::VARIANTS,
    };
    pick(rng, pool)
}

fn roll_size(rng: &mut impl RandomSource, directive: SizeDirective) -> u8 {
    let value = match directive {
        SizeDirective::Random => rng.rand(0x81) + rng.rand(0x80),
        SizeDirective::ExtraSmall => rng.rand(0x10),
        SizeDirective::Small => rng.rand(0x20) + 0x10,
        SizeDirective::Medium => rng.rand(0xA0) + 0x30,
        SizeDirective::Large => rng.rand(0x20) + 0xD0,
        SizeDirective::ExtraLarge => rng.rand(0x10) + 0xF0,
        SizeDirective::Fixed(value) => return value,
    };
    value as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nature_pools_are_disjoint_and_cover_everything() {
        let mut seen: Vec<u8> = TOXTRICITY_AMPED
            .iter()
            .chain(TOXTRICITY_LOW_KEY.iter())
            .map(|n| *n as u8)
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..Nature::VARIANTS.len() as u8).collect::<Vec<_>>());
    }

    #[test]
    fn size_bands_stay_in_range() {
        let mut rng = StreamGen64::new(GeneratorFormula::Rotate24_37, 0xABCD);
        for _ in 0..200 {
            assert!(roll_size(&mut rng, SizeDirective::ExtraSmall) < 0x10);
            assert!((0x10..0x30).contains(&roll_size(&mut rng, SizeDirective::Small)));
            assert!((0x30..0xD0).contains(&roll_size(&mut rng, SizeDirective::Medium)));
            assert!((0xD0..0xF0).contains(&roll_size(&mut rng, SizeDirective::Large)));
            assert!(roll_size(&mut rng, SizeDirective::ExtraLarge) >= 0xF0);
        }
        let before = rng.clone();
        assert_eq!(roll_size(&mut rng, SizeDirective::Fixed(77)), 77);
        assert_eq!(rng, before);
    }

    #[test]
    fn guaranteed_ivs_force_exactly_that_many_perfect_stats() {
        for seed in 0..50u32 {
            let mut rng = StreamGen64::new(GeneratorFormula::Rotate24_37, seed);
            let ivs = roll_ivs(&mut rng, IvDirective::Guaranteed(4));

            // replay the placement walk to learn which stats were forced
            let mut replay = StreamGen64::new(GeneratorFormula::Rotate24_37, seed);
            let mut forced = [false; 6];
            let mut placed = 0;
            while placed < 4 {
                let index = replay.rand(6) as usize;
                if !forced[index] {
                    forced[index] = true;
                    placed += 1;
                }
            }
            assert_eq!(forced.iter().filter(|&&f| f).count(), 4);
            for (iv, forced) in ivs.iter().zip(forced) {
                if forced {
                    assert_eq!(*iv, 31);
                } else {
                    // free stats are filled in order from the same stream
                    assert_eq!(u64::from(*iv), replay.rand(32));
                }
            }
        }
    }

    #[test]
    fn pick_follows_list_order() {
        let mut a = StreamGen64::new(GeneratorFormula::Rotate24_37, 0x1122_3344);
        let mut b = a.clone();
        // Pikachu's tera roll lands on Rock, ordinal 5
        assert_eq!(pick(&mut a, TeraType::VARIANTS), TeraType::Rock);
        assert_eq!(b.rand(18), 5);
        assert_eq!(a, b);
    }
}
