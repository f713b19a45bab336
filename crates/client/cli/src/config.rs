//! CLI configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use raid_core::StoryProgress;

/// How derived raids are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Summary,
}

impl std::str::FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "summary" => Ok(Self::Summary),
            _ => Err(()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key}={value} is not a valid value")]
    Invalid { key: &'static str, value: String },
}

/// Everything the CLI needs to locate its inputs.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Directory holding `engine.toml` and `species.ron`.
    pub data_dir: PathBuf,
    /// Directory of dumped table buffers.
    pub cache_dir: PathBuf,
    /// When set, logs are also written to a file here.
    pub log_dir: Option<PathBuf>,
    /// Raw save file; without it the cached raid block is used.
    pub save_file: Option<PathBuf>,
    pub story_progress: Option<StoryProgress>,
    /// Trainer ids used when no save file is given.
    pub tid: u16,
    pub sid: u16,
    pub output: OutputFormat,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `RAID_DATA_DIR` - Species and engine config (default: bundled data)
    /// - `RAID_CACHE_DIR` - Cached table buffers (default: platform cache dir)
    /// - `RAID_LOG_DIR` - Also log to `raid.log` in this directory
    /// - `RAID_SAVE_FILE` - Raw save file to read the block and trainer from
    /// - `RAID_STORY_PROGRESS` - Override, e.g. `four_star`
    /// - `RAID_TID` / `RAID_SID` - Trainer ids without a save (default: 0)
    /// - `RAID_OUTPUT` - `json` or `summary` (default: json)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            data_dir: env::var_os("RAID_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(raid_content::ContentFactory::bundled_data_dir),
            cache_dir: env::var_os("RAID_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_cache_dir),
            log_dir: env::var_os("RAID_LOG_DIR").map(PathBuf::from),
            save_file: env::var_os("RAID_SAVE_FILE").map(PathBuf::from),
            story_progress: read_env("RAID_STORY_PROGRESS")?,
            tid: read_env("RAID_TID")?.unwrap_or(0),
            sid: read_env("RAID_SID")?.unwrap_or(0),
            output: read_env("RAID_OUTPUT")?.unwrap_or_default(),
        })
    }
}

/// Platform cache directory, e.g. `~/.cache/raid/tables` on Linux.
fn default_cache_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "raid")
        .map(|dirs| dirs.cache_dir().join("tables"))
        .unwrap_or_else(|| PathBuf::from("./raid_cache"))
}

/// Read and parse an optional variable; a present but unparsable value is
/// an error rather than a silent default.
fn read_env<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
{
    let Ok(value) = env::var(key) else {
        return Ok(None);
    };
    value
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Invalid { key, value })
}
