//! Read-only species metadata consumed by the derivation engine.
//!
//! The engine only needs three facts per species form: how its gender is
//! chosen, which ability sits in each slot, and a display name. Callers build
//! one [`SpeciesOracle`] before the first derivation and pass it by
//! reference; [`SpeciesTable`] is the in-memory implementation.
mod species;

pub use species::SpeciesTable;

use crate::types::{AbilityId, AbilityIndex, Gender, SpeciesId};

/// How a species form's gender is decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GenderPolicy {
    /// `rand(100) < female_threshold` yields female, else male.
    Ratio { female_threshold: u8 },
    Male,
    Female,
    Genderless,
}

impl GenderPolicy {
    /// The gender when no draw is needed.
    pub fn fixed(self) -> Option<Gender> {
        match self {
            Self::Ratio { .. } => None,
            Self::Male => Some(Gender::Male),
            Self::Female => Some(Gender::Female),
            Self::Genderless => Some(Gender::Genderless),
        }
    }
}

/// Metadata for one species form.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonalInfo {
    pub species: SpeciesId,
    pub form: i16,
    pub name: String,
    pub gender: GenderPolicy,
    /// First, second and hidden ability.
    pub abilities: [AbilityId; 3],
}

impl PersonalInfo {
    pub fn ability(&self, index: AbilityIndex) -> AbilityId {
        self.abilities[index as usize]
    }
}

/// Lookup of species-form metadata.
pub trait SpeciesOracle: Send + Sync {
    /// Metadata for `species` in `form`, or `None` when unknown.
    fn personal(&self, species: SpeciesId, form: i16) -> Option<&PersonalInfo>;
}

impl<T: SpeciesOracle + ?Sized> SpeciesOracle for &T {
    fn personal(&self, species: SpeciesId, form: i16) -> Option<&PersonalInfo> {
        (**self).personal(species, form)
    }
}
