use std::collections::HashMap;

use super::{PersonalInfo, SpeciesOracle};
use crate::types::SpeciesId;

/// In-memory [`SpeciesOracle`] keyed by `(species, form)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpeciesTable {
    entries: HashMap<(SpeciesId, i16), PersonalInfo>,
}

impl SpeciesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one form's metadata.
    pub fn insert(&mut self, info: PersonalInfo) -> Option<PersonalInfo> {
        self.entries.insert((info.species, info.form), info)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonalInfo> {
        self.entries.values()
    }
}

impl FromIterator<PersonalInfo> for SpeciesTable {
    fn from_iter<I: IntoIterator<Item = PersonalInfo>>(iter: I) -> Self {
        let mut table = Self::new();
        for info in iter {
            table.insert(info);
        }
        table
    }
}

impl SpeciesOracle for SpeciesTable {
    fn personal(&self, species: SpeciesId, form: i16) -> Option<&PersonalInfo> {
        self.entries.get(&(species, form))
    }
}
