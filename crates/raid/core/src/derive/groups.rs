//! Delivery-group assignment for event slots.

use super::select::Selector;
use crate::config::UnusableGroupPolicy;
use crate::tables::{DeliveryPriority, EncounterTable, RawSlotRecord};
use crate::types::{GameVersion, StoryProgress};

/// Assign a delivery group to every enabled event slot.
///
/// Walks the slots in order. Each group claims slots until its reserved
/// count runs out, then the walk moves to the next group. A group with no
/// selectable event entry is handled per `policy`. Slots that are not
/// enabled event slots, or that outlast every group, get `None`.
///
/// Must run sequentially over the whole block before any slot is derived.
pub fn assign(
    slots: &[RawSlotRecord],
    priority: &DeliveryPriority,
    events: &EncounterTable,
    version: GameVersion,
    progress: StoryProgress,
    policy: UnusableGroupPolicy,
) -> Vec<Option<u8>> {
    let mut groups = priority.groups().filter(|&(_, count)| count > 0).filter(|&(id, _)| {
        let usable = Selector::event(version, id, progress).total_rate(&events.entries) > 0;
        if !usable {
            tracing::warn!(group = id, %policy, "delivery group has no selectable entry");
        }
        usable || policy == UnusableGroupPolicy::ConsumeAllowance
    });

    let mut current = groups.next();
    let mut used = 0u8;
    slots
        .iter()
        .map(|slot| {
            if !(slot.enabled() && slot.is_event()) {
                return None;
            }
            while let Some((_, count)) = current {
                if used < count {
                    break;
                }
                current = groups.next();
                used = 0;
            }
            let (id, _) = current?;
            used += 1;
            Some(id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{BossSpec, EncounterEntry};
    use crate::types::{StarLevel, VersionFilter};

    fn event_slot() -> RawSlotRecord {
        RawSlotRecord {
            is_enabled: 1,
            content: 2,
            ..RawSlotRecord::default()
        }
    }

    fn entry_for(group: i8) -> EncounterEntry {
        EncounterEntry {
            version: VersionFilter::Both,
            number: 0,
            delivery_group_id: group,
            difficulty: Some(StarLevel::OneStar),
            rate: 10,
            drop_table_fix: 0,
            drop_table_random: 0,
            capture_rate: 0,
            capture_level: 0,
            boss: BossSpec::default(),
        }
    }

    fn priority(counts: &[(usize, u8)]) -> DeliveryPriority {
        let mut p = DeliveryPriority::default();
        for &(id, count) in counts {
            p.counts[id] = count;
        }
        p
    }

    #[test]
    fn groups_claim_slots_in_order() {
        let slots = [
            event_slot(),
            RawSlotRecord::default(),
            event_slot(),
            event_slot(),
            event_slot(),
        ];
        let events = EncounterTable {
            entries: vec![entry_for(1), entry_for(2)],
        };
        let assigned = assign(
            &slots,
            &priority(&[(1, 2), (2, 1)]),
            &events,
            GameVersion::Scarlet,
            StoryProgress::Default,
            UnusableGroupPolicy::RollOver,
        );
        assert_eq!(assigned, vec![Some(1), None, Some(1), Some(2), None]);
    }

    #[test]
    fn unusable_group_policy_decides_allowance() {
        let slots = [event_slot(), event_slot(), event_slot()];
        let events = EncounterTable {
            entries: vec![entry_for(2)],
        };
        let counts = priority(&[(1, 2), (2, 3)]);
        let consume = assign(
            &slots,
            &counts,
            &events,
            GameVersion::Violet,
            StoryProgress::Default,
            UnusableGroupPolicy::ConsumeAllowance,
        );
        assert_eq!(consume, vec![Some(1), Some(1), Some(2)]);
        let roll_over = assign(
            &slots,
            &counts,
            &events,
            GameVersion::Violet,
            StoryProgress::Default,
            UnusableGroupPolicy::RollOver,
        );
        assert_eq!(roll_over, vec![Some(2), Some(2), Some(2)]);
    }
}
