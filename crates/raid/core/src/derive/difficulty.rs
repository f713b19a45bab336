//! Difficulty resolution for a raid slot.

use crate::rng::RandomSource;
use crate::types::{StarLevel, StoryProgress};

/// Slot content marking a fixed 6★ raid.
pub const CONTENT_SIX_STAR: u32 = 1;
/// Slot contents at or above this come from the event tables.
pub const CONTENT_EVENT: u32 = 2;

/// Map a `rand(100)` roll to a difficulty for the given story tier.
///
/// Each tier partitions the roll into contiguous bands; bounds are inclusive.
pub fn band(roll: u64, progress: StoryProgress) -> StarLevel {
    use StarLevel::*;
    let bands: &[(u64, StarLevel)] = match progress {
        StoryProgress::Default => &[(80, OneStar), (u64::MAX, TwoStar)],
        StoryProgress::ThreeStar => &[(30, OneStar), (70, TwoStar), (u64::MAX, ThreeStar)],
        StoryProgress::FourStar => &[
            (20, OneStar),
            (40, TwoStar),
            (70, ThreeStar),
            (u64::MAX, FourStar),
        ],
        StoryProgress::FiveStar => &[(40, ThreeStar), (75, FourStar), (u64::MAX, FiveStar)],
        StoryProgress::SixStar => &[(30, ThreeStar), (70, FourStar), (u64::MAX, FiveStar)],
    };
    bands
        .iter()
        .find(|(upper, _)| roll <= *upper)
        .map_or(TwoStar, |(_, level)| *level)
}

/// Resolve a slot's difficulty, consuming one `rand(100)` only for regular
/// slots. The same stream then serves the encounter draw.
pub fn resolve(content: u32, rng: &mut impl RandomSource, progress: StoryProgress) -> StarLevel {
    match content {
        CONTENT_SIX_STAR => StarLevel::SixStar,
        c if c >= CONTENT_EVENT => StarLevel::Event,
        _ => band(rng.rand(100), progress),
    }
}
