//! Loader tests against files on disk.

use raid_content::{BufferCache, ConfigLoader, ContentFactory, SpeciesLoader};
use raid_core::save::EventBuffers;
use raid_core::{
    AbilityId, AbilityIndex, GameVersion, GeneratorFormula, GenderPolicy, RaidBlock,
    RawSlotRecord, SpeciesId, SpeciesOracle, StarLevel, UnusableGroupPolicy,
};

/// Smallest valid table buffer: a root table with an empty vector.
fn empty_table() -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend(10u32.to_le_bytes()); // root offset
    buf.extend(6u16.to_le_bytes()); // field record size
    buf.extend(8u16.to_le_bytes()); // table size
    buf.extend(4u16.to_le_bytes()); // field 0 at +4
    buf.extend(6i32.to_le_bytes()); // table at 10, record at 4
    buf.extend(4u32.to_le_bytes()); // vector at 14 + 4
    buf.extend(0u32.to_le_bytes()); // zero elements
    buf
}

#[test]
fn test_bundled_data_loads() {
    let factory = ContentFactory::new(ContentFactory::bundled_data_dir());

    let config = factory.load_config().expect("bundled engine.toml should parse");
    assert_eq!(config.formula, GeneratorFormula::Rotate24_37);
    assert_eq!(config.group_policy, UnusableGroupPolicy::RollOver);
    assert_eq!(config.game_version, GameVersion::Scarlet);

    let species = factory.load_species().expect("bundled species.ron should parse");
    let low_key = species
        .personal(SpeciesId::TOXTRICITY, 1)
        .expect("both Toxtricity forms are listed");
    assert_eq!(low_key.ability(AbilityIndex::Second), AbilityId(58));
    let maushold = species
        .personal(SpeciesId(925), 0)
        .expect("Maushold is listed");
    assert_eq!(maushold.gender, GenderPolicy::Genderless);
}

#[test]
fn test_config_requires_every_field() {
    let err = ConfigLoader::parse("formula = \"rotate27_40\"\ngame_version = \"violet\"\n")
        .expect_err("group_policy has no default");
    assert!(err.to_string().contains("engine config"));

    let config = ConfigLoader::parse(
        "formula = \"rotate27_40\"\ngroup_policy = \"consume_allowance\"\ngame_version = \"violet\"\n",
    )
    .expect("complete config parses");
    assert_eq!(config.formula, GeneratorFormula::Rotate27_40);
    assert_eq!(config.group_policy, UnusableGroupPolicy::ConsumeAllowance);
}

#[test]
fn test_duplicate_species_form_is_rejected() {
    let ron = r#"[
        (species: 25, form: 0, name: "Pikachu", gender: ratio(female_threshold: 50), abilities: (9, 9, 31)),
        (species: 25, form: 0, name: "Pikachu", gender: male, abilities: (9, 9, 31)),
    ]"#;
    let err = SpeciesLoader::parse(ron).expect_err("form 0 appears twice");
    assert!(err.to_string().contains("Duplicate"));
}

#[test]
fn test_cache_round_trips_buffers_verbatim() {
    let dir = tempfile::tempdir().expect("temp dir");
    let cache = BufferCache::new(dir.path().join("cache"));

    for level in StarLevel::TABLED {
        cache
            .store_difficulty(level, &empty_table())
            .expect("difficulty buffer stored");
    }
    cache
        .store_event_buffers(&EventBuffers {
            encounters: empty_table(),
            priority: empty_table(),
            fixed_rewards: empty_table(),
            lottery_rewards: empty_table(),
        })
        .expect("event buffers stored");

    assert_eq!(
        cache.load("difficulty_4.bin").expect("cached file reads"),
        empty_table()
    );
    let tables = cache.load_tables().expect("cached tables decode");
    assert_eq!(tables.by_difficulty.len(), 6);
    assert!(tables.event.is_empty());
    assert!(tables.rewards.is_empty());
    assert_eq!(tables.priority.total_reserved(), 0);
}

#[test]
fn test_cache_reports_missing_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let cache = BufferCache::new(dir.path());

    let err = cache.load_tables().expect_err("nothing was cached");
    assert!(err.to_string().contains("difficulty_1.bin"));
    assert!(cache.store_difficulty(StarLevel::SevenStar, &[]).is_err());
}

#[test]
fn test_cache_keeps_the_raid_block() {
    let dir = tempfile::tempdir().expect("temp dir");
    let cache = BufferCache::new(dir.path());
    let mut slots = vec![RawSlotRecord::default(); 72];
    slots[0].is_enabled = 1;
    slots[0].seed = 0xDEAD_BEEF;
    let block = RaidBlock {
        current_seed: 7,
        tomorrow_seed: 8,
        slots,
    };

    cache.store_raid_block(&block).expect("raid block stored");
    assert_eq!(cache.load_raid_block().expect("raid block loads"), block);
}
