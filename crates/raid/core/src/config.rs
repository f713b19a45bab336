//! Engine configuration.

use crate::rng::GeneratorFormula;
use crate::types::GameVersion;

/// What the delivery-group prepass does with a group that has no selectable
/// table entry.
///
/// The game's behavior here is not pinned down, so both readings are
/// available and the caller must choose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UnusableGroupPolicy {
    /// The group still claims its reserved slots; deriving one of them then
    /// fails because nothing can be drawn.
    ConsumeAllowance,
    /// The group is skipped and its slots go to the next usable group.
    RollOver,
}

/// Settings the derivation engine cannot infer from its inputs.
///
/// Neither the generator formula nor the group policy has a default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    pub formula: GeneratorFormula,
    pub group_policy: UnusableGroupPolicy,
    /// Build the snapshot came from; filters version-exclusive entries.
    pub game_version: GameVersion,
}

impl EngineConfig {
    pub fn new(
        formula: GeneratorFormula,
        group_policy: UnusableGroupPolicy,
        game_version: GameVersion,
    ) -> Self {
        Self {
            formula,
            group_policy,
            game_version,
        }
    }

    pub fn with_game_version(self, game_version: GameVersion) -> Self {
        Self {
            game_version,
            ..self
        }
    }
}
