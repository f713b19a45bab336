//! Raid derivation: from raw slot records to resolved spawns.
//!
//! Per slot, in order:
//!
//! 1. [`difficulty::resolve`] picks the difficulty (a `rand(100)` roll for
//!    regular slots).
//! 2. [`select::Selector`] filters the matching table and
//!    [`select::draw`] picks an entry, continuing the same stream.
//! 3. [`attributes::generate`] re-seeds and rolls the boss itself.
//!
//! Event slots first need a delivery group, assigned by
//! [`groups::assign`] over the whole block before any slot is derived.
//! After that, slots are independent: a failure stays with its own slot.
pub mod attributes;
pub mod difficulty;
mod engine;
pub mod groups;
pub mod select;
pub mod shiny;

pub use attributes::BossAttributes;
pub use engine::{DerivedRaid, RaidEngine, RaidTables, Spawn};

use crate::error::{ErrorSeverity, RaidFault};
use crate::types::{SpeciesId, StarLevel};

/// Broken invariant that stops a slot's derivation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Invariant {
    /// The selectable entries of the resolved table sum to zero.
    #[error("no selectable encounter for {difficulty} (group {group:?}), total rate is zero")]
    ZeroTotalRate {
        difficulty: StarLevel,
        group: Option<u8>,
    },

    /// No encounter table was supplied for this difficulty.
    #[error("no encounter table for {difficulty}")]
    MissingTable { difficulty: StarLevel },

    /// An event slot was left without a delivery group.
    #[error("event slot has no delivery group")]
    UnassignedEventSlot,
}

/// Errors raised while deriving raids.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DeriveError {
    #[error("slot {slot}: {invariant}")]
    InvariantViolation { slot: usize, invariant: Invariant },

    /// Species metadata has no entry for a boss.
    #[error("no species metadata for {species} form {form}")]
    UnknownSpecies { species: SpeciesId, form: i16 },
}

impl RaidFault for DeriveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            DeriveError::InvariantViolation { .. } => ErrorSeverity::Fatal,
            DeriveError::UnknownSpecies { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            DeriveError::InvariantViolation { .. } => "DERIVE_INVARIANT_VIOLATION",
            DeriveError::UnknownSpecies { .. } => "DERIVE_UNKNOWN_SPECIES",
        }
    }
}
