//! Content factory for building engine inputs from a data directory.

use std::path::{Path, PathBuf};

use raid_core::{EngineConfig, SpeciesTable};

use crate::loaders::{ConfigLoader, LoadResult, SpeciesLoader};

/// Content factory that loads static raid content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── engine.toml
/// └── species.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load engine configuration from `engine.toml`.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        ConfigLoader::load(&self.data_dir.join("engine.toml"))
    }

    /// Load species metadata from `species.ron`.
    pub fn load_species(&self) -> LoadResult<SpeciesTable> {
        SpeciesLoader::load(&self.data_dir.join("species.ron"))
    }

    /// Path to the bundled data directory shipped with this crate.
    pub fn bundled_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }
}
