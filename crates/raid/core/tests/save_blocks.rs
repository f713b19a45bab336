//! Save-block location and decoding through both block sources.

use raid_core::save::{self, ScalarValue};
use raid_core::tables::{RAID_BLOCK_SIZE, RawSlotRecord};
use raid_core::{
    BlockKey, BlockSource, BlockValue, GameVersion, InMemorySnapshot, LiveSnapshot, RaidBlock,
    RaidFault, SaveError, SaveImage, StoryProgress,
};

fn trainer_status() -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend(17328u16.to_le_bytes());
    buf.extend(4753u16.to_le_bytes());
    buf.push(50);
    buf.extend(0u16.to_le_bytes());
    buf.push(2);
    buf.extend([0u8; 8]);
    let mut name = [0u8; 20];
    for (i, unit) in "Nemona".encode_utf16().enumerate() {
        name[i * 2..i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
    }
    buf.extend(name);
    buf.extend([0u8; 0x36]);
    buf.extend([4, 1]);
    buf
}

/// Lay blocks out the way a save file does: key, then the encoded block.
fn plain_image(blocks: &[(u32, BlockValue)]) -> Vec<u8> {
    let mut data = vec![0u8; 0x40];
    for (key, value) in blocks {
        data.extend(key.to_le_bytes());
        data.extend(value.encode(*key));
        data.extend([0u8; 0x10]);
    }
    // trailing hash, left untouched by the pad
    data.extend([0xEE; 0x20]);
    data
}

#[test]
fn test_save_image_yields_trainer_and_progress() {
    let flags = BlockKey::STORY_FLAGS;
    let plain = plain_image(&[
        (flags[0].key, BlockValue::Bool(true)),
        (flags[1].key, BlockValue::Bool(true)),
        (flags[2].key, BlockValue::Bool(false)),
        (flags[3].key, BlockValue::Bool(false)),
        (
            BlockKey::TRAINER_STATUS.key,
            BlockValue::Object(trainer_status()),
        ),
    ]);
    let raw = SaveImage::from_plain(plain.clone()).into_raw();
    assert_ne!(raw, plain);
    assert_eq!(raw[raw.len() - 0x20..], plain[plain.len() - 0x20..]);

    let image = SaveImage::decrypt(raw);
    let trainer = save::read_trainer(&image).expect("trainer block should decode");
    assert_eq!(trainer.tid, 17328);
    assert_eq!(trainer.sid, 4753);
    assert_eq!(trainer.name, "Nemona");
    assert_eq!(trainer.game(), Some(GameVersion::Scarlet));
    assert_eq!((trainer.birth_month, trainer.birth_day), (4, 1));

    let progress = save::read_story_progress(&image).expect("flags should decode");
    assert_eq!(progress, StoryProgress::FourStar);
}

#[test]
fn test_no_flags_means_default_progress() {
    let plain = plain_image(
        &BlockKey::STORY_FLAGS.map(|flag| (flag.key, BlockValue::Bool(false))),
    );
    let image = SaveImage::from_plain(plain);
    assert_eq!(
        save::read_story_progress(&image).expect("flags should decode"),
        StoryProgress::Default
    );
}

#[test]
fn test_missing_block_and_wrong_shape() {
    let key = 0x1357_9BDF;
    let image = SaveImage::from_plain(plain_image(&[(
        key,
        BlockValue::Scalar(ScalarValue::U32(7)),
    )]));

    let missing = save::read_trainer(&image).expect_err("no trainer block present");
    assert!(matches!(missing, SaveError::BlockNotFound { hint: None, .. }));

    let wrong = image
        .read_object(BlockKey::unhinted(key))
        .expect_err("a scalar is not an object");
    assert_eq!(wrong.error_code(), "SAVE_UNEXPECTED_TYPE");
}

#[test]
fn test_raid_block_round_trips_through_save() {
    let mut block = RaidBlock {
        current_seed: 0x0102_0304_0506_0708,
        tomorrow_seed: 0x1112_1314_1516_1718,
        slots: vec![RawSlotRecord::default(); 72],
    };
    block.slots[5] = RawSlotRecord {
        is_enabled: 1,
        area_id: 3,
        den_id: 12,
        seed: 0x1122_3344,
        content: 0,
        ..RawSlotRecord::default()
    };
    let payload = block.encode();
    assert_eq!(payload.len(), RAID_BLOCK_SIZE);

    let image = SaveImage::from_plain(plain_image(&[(
        BlockKey::RAID_SPAWNS.key,
        BlockValue::Object(payload),
    )]));
    assert_eq!(save::read_raid_block(&image).expect("raid block decodes"), block);
}

// ---------------------------------------------------------------------------
// Live snapshot neighborhood scan
// ---------------------------------------------------------------------------

const BASE_KEY: u32 = 0x4000_0000;
const HINT: usize = 0x2000;

/// A sorted directory with one boolean block per entry.
fn sorted_directory() -> InMemorySnapshot {
    let mut memory = InMemorySnapshot::with_directory_len(0x4000);
    for offset in (0..0x4000).step_by(0x20) {
        let key = BASE_KEY + offset as u32;
        memory.insert(offset, key, &BlockValue::Bool(true).encode(key));
    }
    memory
}

fn key_at(offset: usize) -> BlockKey {
    BlockKey::new(BASE_KEY + offset as u32, HINT)
}

#[test]
fn test_scan_finds_blocks_inside_the_window() {
    let snapshot = LiveSnapshot::new(sorted_directory());

    for offset in [HINT, HINT + 0x20, HINT + 0xFE0, HINT - 0x20, HINT - 0xFE0] {
        assert_eq!(snapshot.locate(key_at(offset)), Ok(offset));
        assert_eq!(snapshot.read_bool(key_at(offset)), Ok(true));
    }
}

#[test]
fn test_scan_stops_at_the_window_edge() {
    let snapshot = LiveSnapshot::new(sorted_directory());

    for offset in [HINT + 0x1000, HINT - 0x1000, HINT + 0x1800] {
        let err = snapshot
            .locate(key_at(offset))
            .expect_err("entries past the window are not reachable");
        assert_eq!(
            err,
            SaveError::BlockNotFound {
                key: BASE_KEY + offset as u32,
                hint: Some(HINT)
            }
        );
    }
}

#[test]
fn test_snapshot_reads_sized_objects() {
    let key = BlockKey::TRAINER_STATUS;
    let mut memory = InMemorySnapshot::with_directory_len(0x2A000);
    // entry moved one stride down from its hint
    let moved = key.hint.expect("trainer key is hinted") - 0x20;
    memory.insert(
        key.hint.expect("trainer key is hinted"),
        key.key + 1,
        &BlockValue::Bool(false).encode(key.key + 1),
    );
    memory.insert(moved, key.key, &BlockValue::Object(trainer_status()).encode(key.key));

    let trainer = save::read_trainer(&LiveSnapshot::new(&memory)).expect("trainer decodes");
    assert_eq!(trainer.full_id(), (4753 << 16) | 17328);
}
