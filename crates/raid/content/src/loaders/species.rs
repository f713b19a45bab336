//! Species metadata loader.

use std::path::Path;

use raid_core::{PersonalInfo, SpeciesTable};

use crate::loaders::{LoadResult, read_file};

/// Loader for species metadata from RON files.
pub struct SpeciesLoader;

impl SpeciesLoader {
    /// Load every species form from a RON file.
    ///
    /// RON format: Vec<PersonalInfo>
    ///
    /// ```ron
    /// [
    ///     (
    ///         species: 25,
    ///         form: 0,
    ///         name: "Pikachu",
    ///         gender: ratio(female_threshold: 50),
    ///         abilities: (9, 9, 31),
    ///     ),
    /// ]
    /// ```
    ///
    /// A form listed twice is an error.
    pub fn load(path: &Path) -> LoadResult<SpeciesTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SpeciesTable> {
        let records: Vec<PersonalInfo> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse species RON: {}", e))?;

        let mut table = SpeciesTable::new();
        for info in records {
            let (species, form) = (info.species, info.form);
            if table.insert(info).is_some() {
                anyhow::bail!("Duplicate species entry {} form {}", species, form);
            }
        }
        tracing::info!(forms = table.len(), "species metadata loaded");
        Ok(table)
    }
}
