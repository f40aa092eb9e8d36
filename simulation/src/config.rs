//! Match configuration loaded from TOML.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tower_defence_core::CombatTuning;
use tower_defence_world::WorldConfig;

const DEFAULT_SEED: u64 = 0x7d3f_0e1b_5eed_0001;

/// Tunable rules of a match.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Gold available before the first wave.
    pub starting_gold: u32,
    /// Lives available before the first wave.
    pub starting_lives: u32,
    /// Seed of the path-assignment stream.
    pub seed: u64,
    /// Combat constants.
    pub combat: CombatTuning,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let world = WorldConfig::default();
        Self {
            starting_gold: world.starting_gold,
            starting_lives: world.starting_lives,
            seed: DEFAULT_SEED,
            combat: world.combat,
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse simulation config toml contents")?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read simulation config at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid simulation config at {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.starting_lives == 0 {
            bail!("starting_lives must be at least 1");
        }
        let combat = &self.combat;
        if combat.chain_links == 0 {
            bail!("combat.chain_links must be at least 1");
        }
        if !(combat.projectile_speed.is_finite() && combat.projectile_speed > 0.0) {
            bail!("combat.projectile_speed must be positive");
        }
        if !(0.0..=1.0).contains(&combat.slow_factor) {
            bail!("combat.slow_factor must lie within [0, 1]");
        }
        for (name, value) in [
            ("chain_radius_factor", combat.chain_radius_factor),
            ("chain_falloff", combat.chain_falloff),
            ("slow_duration", combat.slow_duration),
            ("splash_radius_cells", combat.splash_radius_cells),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                bail!("combat.{name} must be finite and non-negative");
            }
        }
        Ok(())
    }

    pub(crate) fn world_config(&self) -> WorldConfig {
        WorldConfig {
            starting_gold: self.starting_gold,
            starting_lives: self.starting_lives,
            combat: self.combat,
        }
    }
}
