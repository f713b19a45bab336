//! Output formats.
use std::io::Write;

use anyhow::Result;
use raid_core::tables::{FixedRewardTable, LotteryRewardTable};
use raid_core::{
    DeriveError, DerivedRaid, RaidEngine, RaidFault, SpeciesOracle, Spawn, StoryProgress,
    TrainerIdentity,
};
use serde::Serialize;

use crate::config::OutputFormat;

#[derive(Serialize)]
struct Report<'a> {
    trainer: &'a TrainerIdentity,
    story_progress: StoryProgress,
    raids: Vec<SlotReport<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum SlotReport<'a> {
    Derived(RaidReport<'a>),
    Failed(SlotFailure<'a>),
}

#[derive(Serialize)]
struct SlotFailure<'a> {
    slot: usize,
    code: &'static str,
    severity: &'static str,
    message: String,
    error: &'a DeriveError,
}

#[derive(Serialize)]
struct RaidReport<'a> {
    #[serde(flatten)]
    raid: &'a DerivedRaid,
    fixed_rewards: Option<&'a FixedRewardTable>,
    lottery_rewards: Option<&'a LotteryRewardTable>,
}

pub fn print<S: SpeciesOracle + ?Sized>(
    format: OutputFormat,
    engine: &RaidEngine<'_, S>,
    trainer: &TrainerIdentity,
    progress: StoryProgress,
    raids: &[Result<DerivedRaid, DeriveError>],
) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            let raids = raids
                .iter()
                .enumerate()
                .map(|(slot, result)| match result {
                    Ok(raid) => {
                        let (fixed, lottery) = match &raid.spawn {
                            Some(spawn) => engine.rewards(spawn),
                            None => (None, None),
                        };
                        SlotReport::Derived(RaidReport {
                            raid,
                            fixed_rewards: fixed,
                            lottery_rewards: lottery,
                        })
                    }
                    Err(error) => SlotReport::Failed(SlotFailure {
                        slot,
                        code: error.error_code(),
                        severity: error.severity().as_str(),
                        message: error.to_string(),
                        error,
                    }),
                })
                .collect();
            let report = Report {
                trainer,
                story_progress: progress,
                raids,
            };
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Summary => {
            writeln!(out, "{trainer} progress: {progress}")?;
            for (slot, result) in raids.iter().enumerate() {
                match result {
                    Ok(DerivedRaid {
                        spawn: Some(spawn), ..
                    }) => writeln!(out, "{}", summary_line(slot, spawn))?,
                    Ok(_) => {}
                    Err(error) => writeln!(out, "{slot:>2} failed  [{}] {error}", error.error_code())?,
                }
            }
        }
    }
    Ok(())
}

fn summary_line(slot: usize, spawn: &Spawn) -> String {
    let attrs = &spawn.attributes;
    let stars = match spawn.difficulty.stars() {
        Some(n) => "★".repeat(usize::from(n)),
        None => "event".to_string(),
    };
    let ivs = attrs
        .ivs
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join("/");
    format!(
        "{slot:>2} {stars:<7} {name:<12} tera={tera} shiny={shiny} pid={pid:#010x} ivs={ivs} nature={nature} gender={gender} ability={ability}{group}",
        name = spawn.species_name,
        tera = attrs.tera_type,
        shiny = if attrs.is_shiny { "yes" } else { "no" },
        pid = attrs.pid,
        nature = attrs.nature,
        gender = attrs.gender,
        ability = attrs.ability.0,
        group = spawn
            .delivery_group
            .map(|g| format!(" group={g}"))
            .unwrap_or_default(),
    )
}
