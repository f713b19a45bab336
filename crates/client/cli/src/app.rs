//! Gathers the inputs, runs the engine and hands the result to the report.
use anyhow::{Context, Result};
use raid_content::{BufferCache, ContentFactory};
use raid_core::save::{self, SaveImage};
use raid_core::{RaidBlock, RaidEngine, StoryProgress, TrainerIdentity};

use crate::config::CliConfig;
use crate::report;

/// What a snapshot contributes beyond the static tables.
struct Snapshot {
    trainer: TrainerIdentity,
    progress: StoryProgress,
    block: RaidBlock,
}

pub fn run(config: &CliConfig) -> Result<()> {
    let factory = ContentFactory::new(&config.data_dir);
    let engine_config = factory
        .load_config()
        .with_context(|| format!("loading engine config from {}", config.data_dir.display()))?;
    let species = factory.load_species()?;
    let cache = BufferCache::new(&config.cache_dir);

    let snapshot = match &config.save_file {
        Some(path) => read_save(path, &cache)?,
        None => {
            tracing::info!(cache = %cache.dir().display(), "no save file, using cached raid block");
            Snapshot {
                trainer: TrainerIdentity::from_ids(config.tid, config.sid),
                progress: StoryProgress::Default,
                block: cache.load_raid_block()?,
            }
        }
    };
    let progress = config.story_progress.unwrap_or(snapshot.progress);
    let engine_config = match snapshot.trainer.game() {
        Some(version) => engine_config.with_game_version(version),
        None => engine_config,
    };

    let tables = cache.load_tables()?;
    let engine = RaidEngine::new(engine_config, &tables, &species);
    let raids = engine.derive_block(&snapshot.block, progress, &snapshot.trainer);

    report::print(config.output, &engine, &snapshot.trainer, progress, &raids)
}

/// Read everything from a raw save file, caching the raid block and the
/// event buffers so later runs can work without it.
fn read_save(path: &std::path::Path, cache: &BufferCache) -> Result<Snapshot> {
    let raw = std::fs::read(path).with_context(|| format!("reading save {}", path.display()))?;
    let image = SaveImage::decrypt(raw);

    let trainer = save::read_trainer(&image)?;
    let progress = save::read_story_progress(&image)?;
    let block = save::read_raid_block(&image)?;
    tracing::info!(%trainer, %progress, "save loaded");

    cache.store_event_buffers(&save::read_event_buffers(&image)?)?;
    cache.store_raid_block(&block)?;

    Ok(Snapshot {
        trainer,
        progress,
        block,
    })
}
