//! Procedural terrain generation.
//!
//! A left-to-right random walk with three regimes per step: a rise, a drop,
//! or a flat continuation. The regime thresholds drift with the last height
//! so the walk is pulled back toward the reference band, and a flat step
//! halves both thresholds for the following step, which favours another flat
//! step and grows landing pads.

use super::types::{vertex_x, Terrain};
use crate::config::{validate_terrain_width, LanderConfig};
use crate::constants::*;
use crate::error::LanderError;
use rand::Rng;
use tracing::debug;

/// Which way the walk moved at one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainRegime {
    HillUp,
    HillDown,
    Flat,
}

impl TerrainRegime {
    /// Classify a uniform roll in [0, 1) against the drifting thresholds.
    ///
    /// `last_height` shifts mass from rises to drops the further it sits
    /// above the reference height; `divider` is 1 after a hill and 2 after
    /// a flat step.
    pub fn classify(roll: f64, last_height: f64, divider: f64) -> Self {
        let center_chance = (last_height - TERRAIN_REFERENCE_HEIGHT) / CENTER_PULL_DIVISOR;
        let hill_up = HILL_UP_CHANCE - center_chance;
        let hill_down = HILL_DOWN_CHANCE + center_chance;

        if roll <= hill_up / divider {
            Self::HillUp
        } else if roll < hill_down / divider {
            Self::HillDown
        } else {
            Self::Flat
        }
    }
}

/// Produces a fresh terrain for every session start and respawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainGenerator {
    width: usize,
    spacing: f64,
}

impl TerrainGenerator {
    /// Generator for `width` samples at the stock spacing.
    pub fn new(width: usize) -> Result<Self, LanderError> {
        Self::with_spacing(width, TERRAIN_SPACING)
    }

    pub fn with_spacing(width: usize, spacing: f64) -> Result<Self, LanderError> {
        validate_terrain_width(width)?;
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(LanderError::invalid(
                "terrain_spacing",
                format!("must be positive, got {spacing}"),
            ));
        }
        Ok(Self { width, spacing })
    }

    pub fn from_config(config: &LanderConfig) -> Result<Self, LanderError> {
        Self::with_spacing(config.terrain_width, config.terrain_spacing)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Walk the surface once. Always returns exactly `width` samples with the
    /// two outermost vertices on each side anchored at height 0.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Terrain {
        let count = self.width / 2;
        let mut heights = vec![0.0; count];
        let mut last = TERRAIN_REFERENCE_HEIGHT;
        let mut divider = 1.0;
        let mut flat_steps = 0usize;

        let interior = count - 2 * TERRAIN_ANCHOR_VERTICES;
        for h in heights.iter_mut().skip(TERRAIN_ANCHOR_VERTICES).take(interior) {
            let roll: f64 = rng.gen();
            let next = match TerrainRegime::classify(roll, last, divider) {
                TerrainRegime::HillUp => {
                    divider = 1.0;
                    last + (HILL_STEP - HILL_STEP * rng.gen::<f64>())
                }
                TerrainRegime::HillDown => {
                    divider = 1.0;
                    last - HILL_STEP * rng.gen::<f64>()
                }
                TerrainRegime::Flat => {
                    divider = FLAT_RUN_DIVIDER;
                    flat_steps += 1;
                    last
                }
            };
            last = reflect_into_band(next);
            *h = last;
        }

        let samples: Vec<f64> = heights
            .iter()
            .enumerate()
            .flat_map(|(i, &h)| [vertex_x(i, count, self.spacing), h])
            .collect();

        debug!(vertices = count, flat_steps, "generated terrain");

        Terrain::from_validated(samples, self.spacing)
    }
}

/// Mirror a step that overshoots the height band back inside it.
///
/// A step is at most one hill step and the band is wider than that, so one
/// reflection always lands inside. The result differs from the previous
/// height, so an overshoot never forms a flat run.
fn reflect_into_band(height: f64) -> f64 {
    if height < TERRAIN_MIN_HEIGHT {
        2.0 * TERRAIN_MIN_HEIGHT - height
    } else if height > TERRAIN_MAX_HEIGHT {
        2.0 * TERRAIN_MAX_HEIGHT - height
    } else {
        height
    }
}
