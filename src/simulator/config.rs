//! Simulation configuration.

use crate::config::{LanderConfig, LanderDifficulty};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated sessions
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random). Run `i` uses `seed + i`.
    pub seed: Option<u64>,

    /// Frames per session before it is cut off
    pub max_frames_per_run: u64,

    /// Preset used when no explicit lander configuration is given
    pub difficulty: LanderDifficulty,

    /// Full lander tuning, overriding `difficulty`
    pub lander: Option<LanderConfig>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            max_frames_per_run: 100_000,
            difficulty: LanderDifficulty::Journeyman,
            lander: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small seeded batch for smoke checks.
    pub fn quick_check(seed: u64) -> Self {
        Self {
            num_runs: 5,
            seed: Some(seed),
            max_frames_per_run: 20_000,
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Seeded batch at one difficulty preset.
    pub fn difficulty_sweep(difficulty: LanderDifficulty, seed: u64) -> Self {
        Self {
            num_runs: 50,
            seed: Some(seed),
            difficulty,
            ..Default::default()
        }
    }

    /// The tuning every simulated session is built from.
    pub fn lander_config(&self) -> LanderConfig {
        self.lander
            .clone()
            .unwrap_or_else(|| LanderConfig::for_difficulty(self.difficulty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_stock_tuning() {
        let config = SimConfig::default();
        assert_eq!(config.lander_config(), LanderConfig::default());
    }

    #[test]
    fn test_difficulty_selects_preset() {
        let config = SimConfig::difficulty_sweep(LanderDifficulty::Master, 1);
        assert_eq!(
            config.lander_config(),
            LanderConfig::for_difficulty(LanderDifficulty::Master)
        );
    }

    #[test]
    fn test_explicit_lander_overrides_difficulty() {
        let lander = LanderConfig {
            gravity: 0.001,
            ..Default::default()
        };
        let config = SimConfig {
            difficulty: LanderDifficulty::Master,
            lander: Some(lander.clone()),
            ..Default::default()
        };
        assert_eq!(config.lander_config(), lander);
    }
}
