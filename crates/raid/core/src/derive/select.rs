//! Encounter selectability and the weighted slot draw.

use crate::rng::RandomSource;
use crate::tables::EncounterEntry;
use crate::types::{GameVersion, StoryProgress};

/// Which entries of a table a slot may draw.
///
/// Regular slots only filter by game version. Event slots additionally need
/// the entry's delivery group to match and its difficulty to be unlocked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selector {
    pub version: GameVersion,
    pub event: Option<EventFilter>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventFilter {
    pub group: u8,
    pub progress: StoryProgress,
}

impl Selector {
    pub fn regular(version: GameVersion) -> Self {
        Self {
            version,
            event: None,
        }
    }

    pub fn event(version: GameVersion, group: u8, progress: StoryProgress) -> Self {
        Self {
            version,
            event: Some(EventFilter { group, progress }),
        }
    }

    pub fn accepts(&self, entry: &EncounterEntry) -> bool {
        if !entry.version.accepts(self.version) {
            return false;
        }
        match self.event {
            None => true,
            Some(EventFilter { group, progress }) => {
                i16::from(entry.delivery_group_id) == i16::from(group)
                    && entry
                        .difficulty
                        .is_some_and(|level| level.is_unlocked(progress))
            }
        }
    }

    /// Summed rate over accepted entries.
    pub fn total_rate<'e>(&self, entries: impl IntoIterator<Item = &'e EncounterEntry>) -> u64 {
        entries
            .into_iter()
            .filter(|entry| self.accepts(entry))
            .map(|entry| u64::from(entry.rate))
            .sum()
    }
}

/// Draw one accepted entry by weight.
///
/// Returns the index into `entries` and the entry, or `None` when the
/// accepted entries sum to zero (no draw is made then). An entry is picked
/// when the roll is strictly below the running total.
pub fn draw<'e>(
    rng: &mut impl RandomSource,
    entries: &'e [EncounterEntry],
    selector: &Selector,
) -> Option<(usize, &'e EncounterEntry)> {
    let total = selector.total_rate(entries);
    if total == 0 {
        return None;
    }
    let roll = rng.rand(total);
    let mut running = 0u64;
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| selector.accepts(entry))
        .find(|(_, entry)| {
            running += u64::from(entry.rate);
            roll < running
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::BossSpec;
    use crate::types::{StarLevel, VersionFilter};

    struct Fixed(u64);

    impl RandomSource for Fixed {
        fn next_u64(&mut self) -> u64 {
            self.0
        }
    }

    fn entry(rate: u8, version: VersionFilter) -> EncounterEntry {
        EncounterEntry {
            version,
            number: 0,
            delivery_group_id: 0,
            difficulty: Some(StarLevel::ThreeStar),
            rate,
            drop_table_fix: 0,
            drop_table_random: 0,
            capture_rate: 0,
            capture_level: 0,
            boss: BossSpec::default(),
        }
    }

    #[test]
    fn boundary_roll_goes_to_next_entry() {
        let entries = [entry(10, VersionFilter::Both), entry(10, VersionFilter::Both)];
        let selector = Selector::regular(GameVersion::Scarlet);
        // rand(20) with mask 0x1F returns the raw value when below 20
        assert_eq!(draw(&mut Fixed(9), &entries, &selector).map(|(i, _)| i), Some(0));
        assert_eq!(draw(&mut Fixed(10), &entries, &selector).map(|(i, _)| i), Some(1));
        assert_eq!(draw(&mut Fixed(19), &entries, &selector).map(|(i, _)| i), Some(1));
    }

    #[test]
    fn filtered_entries_do_not_contribute() {
        let entries = [
            entry(50, VersionFilter::Violet),
            entry(10, VersionFilter::Scarlet),
        ];
        let selector = Selector::regular(GameVersion::Scarlet);
        assert_eq!(selector.total_rate(&entries), 10);
        assert_eq!(draw(&mut Fixed(3), &entries, &selector).map(|(i, _)| i), Some(1));
        assert!(draw(&mut Fixed(0), &entries[..1], &selector).is_none());
    }

    #[test]
    fn event_filter_checks_group_and_unlock() {
        let mut e = entry(5, VersionFilter::Both);
        e.delivery_group_id = 2;
        let selector = Selector::event(GameVersion::Violet, 2, StoryProgress::ThreeStar);
        assert!(selector.accepts(&e));
        assert!(!Selector::event(GameVersion::Violet, 1, StoryProgress::ThreeStar).accepts(&e));
        assert!(!Selector::event(GameVersion::Violet, 2, StoryProgress::Default).accepts(&e));
        e.difficulty = None;
        assert!(!selector.accepts(&e));
    }
}
