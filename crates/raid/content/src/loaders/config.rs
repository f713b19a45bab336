//! Engine configuration loader.

use std::path::Path;

use raid_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Every field is required; the generator formula and the delivery-group
    /// policy have no defaults.
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse engine config TOML: {}", e))?;
        tracing::debug!(
            formula = %config.formula,
            group_policy = %config.group_policy,
            game_version = %config.game_version,
            "engine config loaded"
        );
        Ok(config)
    }
}
