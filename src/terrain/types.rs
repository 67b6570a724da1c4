//! Terrain data structures.
//!
//! A terrain is stored as a flat sample array `[x0, y0, x1, y1, ...]`, the
//! layout the presentation layer hands straight to a polygon. Vertex `i`
//! lives at samples `2i` and `2i + 1`.

use crate::config::validate_terrain_width;
use crate::constants::{MAX_LANDING_SCORE, TERRAIN_ANCHOR_VERTICES};
use crate::error::LanderError;
use serde::{Deserialize, Serialize};

/// Generated ground polyline sampled at fixed horizontal spacing.
///
/// Heights are offsets from the baseline at the bottom of the viewport;
/// negative values rise up the screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTerrain")]
pub struct Terrain {
    samples: Vec<f64>,
    spacing: f64,
}

/// Wire form of [`Terrain`], checked by [`Terrain::from_samples`] on load.
#[derive(Deserialize)]
struct RawTerrain {
    samples: Vec<f64>,
    spacing: f64,
}

impl TryFrom<RawTerrain> for Terrain {
    type Error = LanderError;

    fn try_from(raw: RawTerrain) -> Result<Self, Self::Error> {
        Terrain::from_samples(raw.samples, raw.spacing)
    }
}

/// A flat run of more than one interval, labelled with its landing value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingPad {
    /// Index of the leftmost vertex of the run.
    pub start_vertex: usize,
    /// Number of flat intervals in the run.
    pub intervals: usize,
    pub start_x: f64,
    pub end_x: f64,
    pub height: f64,
    /// Points awarded for touching down anywhere on this pad.
    pub points: u32,
}

impl LandingPad {
    pub fn center_x(&self) -> f64 {
        (self.start_x + self.end_x) / 2.0
    }

    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.start_x && x <= self.end_x
    }
}

impl Terrain {
    /// Build a terrain from vertex heights, laying vertices out the same way
    /// the generator does. Anchors are not forced; callers supply them.
    pub fn from_heights(heights: &[f64], spacing: f64) -> Result<Self, LanderError> {
        validate_terrain_width(heights.len() * 2)?;
        let count = heights.len();
        let samples = heights
            .iter()
            .enumerate()
            .flat_map(|(i, &h)| [vertex_x(i, count, spacing), h])
            .collect();
        Ok(Self { samples, spacing })
    }

    /// Wrap a raw sample array.
    pub fn from_samples(samples: Vec<f64>, spacing: f64) -> Result<Self, LanderError> {
        validate_terrain_width(samples.len())?;
        Ok(Self { samples, spacing })
    }

    /// Caller guarantees the sample count already passed validation.
    pub(super) fn from_validated(samples: Vec<f64>, spacing: f64) -> Self {
        Self { samples, spacing }
    }

    /// Number of samples (twice the vertex count).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.samples.len() / 2
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Height of a vertex; indices past either end clamp to the nearest vertex.
    pub fn height(&self, vertex: usize) -> f64 {
        self.samples[self.clamp_vertex(vertex) * 2 + 1]
    }

    /// World x of a vertex, clamped like [`Terrain::height`].
    pub fn x(&self, vertex: usize) -> f64 {
        self.samples[self.clamp_vertex(vertex) * 2]
    }

    pub fn clamp_vertex(&self, vertex: usize) -> usize {
        vertex.min(self.vertex_count() - 1)
    }

    pub fn heights(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().skip(1).step_by(2).copied()
    }

    pub fn vertices(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Horizontal extent of the walkable surface.
    pub fn span(&self) -> f64 {
        crate::config::terrain_span(self.len(), self.spacing)
    }
}

/// World x of vertex `index` in a polyline of `count` vertices.
///
/// The first two vertices share x = 0 and the last vertex drops straight
/// down from the one before it, so both ends close vertically.
pub(crate) fn vertex_x(index: usize, count: usize, spacing: f64) -> f64 {
    let last_step = count.saturating_sub(TERRAIN_ANCHOR_VERTICES);
    index.clamp(1, last_step) as f64 * spacing - spacing
}

/// Landing value of a flat run of `intervals` intervals.
pub fn pad_points(intervals: usize) -> u32 {
    MAX_LANDING_SCORE / intervals.max(1) as u32
}

/// Every flat run of more than one interval, left to right.
///
/// These are the pad labels the presentation layer draws; a touchdown
/// anywhere on a pad scores exactly its `points`.
pub fn landing_pads(terrain: &Terrain) -> Vec<LandingPad> {
    let mut pads = Vec::new();
    let count = terrain.vertex_count();
    let mut start = 0;

    for vertex in 1..=count {
        let continues = vertex < count && terrain.height(vertex) == terrain.height(vertex - 1);
        if continues {
            continue;
        }
        let intervals = vertex - 1 - start;
        if intervals > 1 {
            pads.push(LandingPad {
                start_vertex: start,
                intervals,
                start_x: terrain.x(start),
                end_x: terrain.x(vertex - 1),
                height: terrain.height(start),
                points: pad_points(intervals),
            });
        }
        start = vertex;
    }

    pads
}
