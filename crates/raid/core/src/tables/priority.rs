//! Event delivery priority: how many raid slots each delivery group reserves.

use crate::table::{DecodeError, FieldCursor, TableView};

/// Number of delivery groups an event can define.
pub const GROUP_COUNT: usize = 10;

/// Reserved slot counts indexed by group id.
///
/// Index 0 is padding so that `counts[id]` is the count for group `id`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryPriority {
    pub version: i32,
    pub counts: [u8; GROUP_COUNT + 1],
}

impl DeliveryPriority {
    /// Decode the first priority record. An empty table reserves nothing.
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let records = FieldCursor::new(TableView::root(buf)?).vector()?;
        let Some(first) = records.get(0) else {
            tracing::debug!("delivery priority table is empty");
            return Ok(Self::default());
        };
        let mut c = FieldCursor::new(first?);
        let version = c.scalar::<i32>(0)?;
        let counts = c
            .nested(|mut groups| {
                let mut counts = [0u8; GROUP_COUNT + 1];
                for count in &mut counts[1..] {
                    let raw = groups.scalar::<i8>(0)?;
                    *count = u8::try_from(raw).map_err(|_| DecodeError::InvalidValue {
                        field: "group_id",
                        value: i64::from(raw),
                    })?;
                }
                Ok(counts)
            })?
            .unwrap_or_default();
        Ok(Self { version, counts })
    }

    /// `(group id, reserved count)` pairs in walk order.
    pub fn groups(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (1..=GROUP_COUNT as u8).map(|id| (id, self.counts[usize::from(id)]))
    }

    pub fn total_reserved(&self) -> u32 {
        self.counts.iter().map(|&c| u32::from(c)).sum()
    }
}
