//! Terrain lookup and touchdown classification.
//!
//! The lander's centre is mapped onto the terrain's vertex grid by a
//! nearest-neighbour lookup: the vertex at or left of the centre, and the one
//! after it, bound the interval the lander sits over. Lookups past either
//! end of the terrain clamp to the nearest vertex, since edge-scrolling can
//! carry the lander beyond the generated surface.

use super::types::{Contact, ContactOutcome};
use crate::config::LanderConfig;
use crate::constants::{LANDER_SIZE, MAX_LANDING_SCORE, MAX_LANDING_VELOCITY, VIEWPORT_HEIGHT};
use crate::flight::LanderState;
use crate::terrain::Terrain;

/// Classifies ground contact for one lander/terrain pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundEvaluator {
    pub viewport_height: f64,
    pub lander_size: f64,
    pub max_landing_velocity: f64,
}

impl Default for GroundEvaluator {
    fn default() -> Self {
        Self {
            viewport_height: VIEWPORT_HEIGHT,
            lander_size: LANDER_SIZE,
            max_landing_velocity: MAX_LANDING_VELOCITY,
        }
    }
}

impl GroundEvaluator {
    pub fn from_config(config: &LanderConfig) -> Self {
        Self {
            viewport_height: config.viewport_height,
            lander_size: config.lander_size,
            max_landing_velocity: config.max_landing_velocity,
        }
    }

    /// Left vertex of the interval under the lander's centre.
    ///
    /// `x` is the lander's screen x and `land_x` the terrain pan offset.
    pub fn touchdown_vertex(&self, x: f64, land_x: f64, terrain: &Terrain) -> usize {
        let ratio = (land_x + x + self.lander_size / 2.0) / terrain.spacing();
        let vertex = ratio.floor() + 1.0;
        if vertex > 0.0 {
            terrain.clamp_vertex(vertex as usize)
        } else {
            0
        }
    }

    /// Index into the raw sample array of the height under the lander.
    pub fn sample_index(&self, x: f64, land_x: f64, terrain: &Terrain) -> usize {
        self.touchdown_vertex(x, land_x, terrain) * 2 + 1
    }

    /// Gap between the lander and the terrain directly below it.
    pub fn clearance(&self, x: f64, y: f64, land_x: f64, terrain: &Terrain) -> f64 {
        let height = terrain.height(self.touchdown_vertex(x, land_x, terrain));
        self.viewport_height - (y - height)
    }

    pub fn is_contact(&self, clearance: f64) -> bool {
        clearance < self.lander_size
    }

    /// True iff both vertices bounding the interval under the lander share a height.
    pub fn is_flat(&self, x: f64, land_x: f64, terrain: &Terrain) -> bool {
        let (left, right) = self.interval(x, land_x, terrain);
        terrain.height(left) == terrain.height(right)
    }

    /// Soft touchdown needs level ground and a slow enough combined speed.
    pub fn classify(&self, is_flat: bool, vx: f64, vy: f64) -> ContactOutcome {
        if is_flat && vx.abs() + vy.abs() < self.max_landing_velocity {
            ContactOutcome::Landed
        } else {
            ContactOutcome::Crashed
        }
    }

    /// Points for touching down over the interval under the lander.
    ///
    /// Counts the level intervals continuing to the right of the touchdown
    /// interval and to its left, then divides 100 by the whole run length.
    /// Any touchdown on a pad of `n` intervals scores `100 / n`.
    pub fn score(&self, x: f64, land_x: f64, terrain: &Terrain) -> u32 {
        let (left, right) = self.interval(x, land_x, terrain);
        let run = flat_count_right(terrain, right) + flat_count_left(terrain, left) + 1;
        MAX_LANDING_SCORE / run as u32
    }

    /// Probe the terrain under the lander and classify any contact.
    pub fn evaluate(&self, lander: &LanderState, land_x: f64, terrain: &Terrain) -> Contact {
        let clearance = self.clearance(lander.x, lander.y, land_x, terrain);
        let is_flat = self.is_flat(lander.x, land_x, terrain);
        let outcome = self
            .is_contact(clearance)
            .then(|| self.classify(is_flat, lander.vx, lander.vy));

        Contact {
            clearance,
            is_flat,
            outcome,
        }
    }

    fn interval(&self, x: f64, land_x: f64, terrain: &Terrain) -> (usize, usize) {
        let left = self.touchdown_vertex(x, land_x, terrain);
        (left, terrain.clamp_vertex(left + 1))
    }
}

/// Level intervals starting at `vertex` and running right.
fn flat_count_right(terrain: &Terrain, vertex: usize) -> usize {
    let last = terrain.vertex_count() - 1;
    let mut v = vertex;
    let mut count = 0;
    while v < last && terrain.height(v) == terrain.height(v + 1) {
        count += 1;
        v += 1;
    }
    count
}

/// Level intervals ending at `vertex` and running left.
fn flat_count_left(terrain: &Terrain, vertex: usize) -> usize {
    let mut v = vertex;
    let mut count = 0;
    while v > 0 && terrain.height(v - 1) == terrain.height(v) {
        count += 1;
        v -= 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAD: f64 = -50.0;

    /// Anchors, a ramp, a pad of `intervals` level intervals, a ramp, anchors.
    /// The pad starts at vertex 3.
    fn pad_terrain(intervals: usize) -> Terrain {
        let mut heights = vec![0.0, 0.0, -10.0];
        heights.extend(std::iter::repeat(PAD).take(intervals + 1));
        heights.extend([-20.0, 0.0, 0.0]);
        Terrain::from_heights(&heights, 10.0).unwrap()
    }

    /// Screen x (with zero pan) whose centre sits mid-way over the interval
    /// starting at `vertex`.
    fn x_over(vertex: usize) -> f64 {
        (vertex as f64 - 1.0) * 10.0 + 5.0 - 12.5
    }

    fn lander_at(x: f64, y: f64, vx: f64, vy: f64) -> LanderState {
        let mut lander = LanderState::new(&LanderConfig::default());
        lander.x = x;
        lander.y = y;
        lander.vx = vx;
        lander.vy = vy;
        lander
    }

    #[test]
    fn test_touchdown_vertex_mapping() {
        let evaluator = GroundEvaluator::default();
        let terrain = pad_terrain(3);
        assert_eq!(evaluator.touchdown_vertex(x_over(3), 0.0, &terrain), 3);
        assert_eq!(evaluator.touchdown_vertex(x_over(5), 0.0, &terrain), 5);
        // floor((lx + x + 12.5) / 10) * 2 + 3
        assert_eq!(evaluator.sample_index(x_over(4), 0.0, &terrain), 9);
    }

    #[test]
    fn test_pan_offset_shifts_lookup() {
        let evaluator = GroundEvaluator::default();
        let terrain = pad_terrain(3);
        let direct = evaluator.touchdown_vertex(x_over(4), 0.0, &terrain);
        let panned = evaluator.touchdown_vertex(x_over(4) - 20.0, 20.0, &terrain);
        assert_eq!(direct, panned);
    }

    #[test]
    fn test_lookup_clamps_out_of_range() {
        let evaluator = GroundEvaluator::default();
        let terrain = pad_terrain(3);
        let last = terrain.vertex_count() - 1;
        assert_eq!(evaluator.touchdown_vertex(-5000.0, 0.0, &terrain), 0);
        assert_eq!(evaluator.touchdown_vertex(1.0e9, 0.0, &terrain), last);
        assert_eq!(evaluator.touchdown_vertex(f64::NAN, 0.0, &terrain), 0);
        // Probing past the end must not panic
        let far = lander_at(1.0e9, 790.0, 0.0, 0.0);
        let contact = evaluator.evaluate(&far, 0.0, &terrain);
        assert!(contact.is_flat);
        assert_eq!(evaluator.score(1.0e9, 0.0, &terrain), 50);
    }

    #[test]
    fn test_clearance() {
        let evaluator = GroundEvaluator::default();
        let terrain = pad_terrain(3);
        // Ground surface at screen y 800 + (-50) = 750
        let clearance = evaluator.clearance(x_over(3), 700.0, 0.0, &terrain);
        assert!((clearance - 50.0).abs() < f64::EPSILON);
        assert!(!evaluator.is_contact(clearance));
        let clearance = evaluator.clearance(x_over(3), 730.0, 0.0, &terrain);
        assert!(evaluator.is_contact(clearance));
    }

    #[test]
    fn test_is_flat() {
        let evaluator = GroundEvaluator::default();
        let terrain = pad_terrain(3);
        assert!(evaluator.is_flat(x_over(3), 0.0, &terrain));
        assert!(evaluator.is_flat(x_over(5), 0.0, &terrain));
        assert!(!evaluator.is_flat(x_over(2), 0.0, &terrain));
        assert!(!evaluator.is_flat(x_over(6), 0.0, &terrain));
    }

    #[test]
    fn test_slow_touchdown_on_single_pad_lands_for_100() {
        let evaluator = GroundEvaluator::default();
        let terrain = pad_terrain(1);
        let lander = lander_at(x_over(3), 730.0, 0.0, 0.1);

        let contact = evaluator.evaluate(&lander, 0.0, &terrain);

        assert_eq!(contact.outcome, Some(ContactOutcome::Landed));
        assert_eq!(evaluator.score(lander.x, 0.0, &terrain), 100);
    }

    #[test]
    fn test_fast_touchdown_on_pad_crashes() {
        let evaluator = GroundEvaluator::default();
        let terrain = pad_terrain(1);
        let lander = lander_at(x_over(3), 730.0, 0.0, 1.0);

        let contact = evaluator.evaluate(&lander, 0.0, &terrain);

        assert_eq!(contact.outcome, Some(ContactOutcome::Crashed));
    }

    #[test]
    fn test_slow_touchdown_on_slope_crashes() {
        let evaluator = GroundEvaluator::default();
        let terrain = pad_terrain(1);
        let lander = lander_at(x_over(2), 730.0, 0.0, 0.05);

        let contact = evaluator.evaluate(&lander, 0.0, &terrain);

        assert!(!contact.is_flat);
        assert_eq!(contact.outcome, Some(ContactOutcome::Crashed));
    }

    #[test]
    fn test_no_outcome_while_clear() {
        let evaluator = GroundEvaluator::default();
        let terrain = pad_terrain(1);
        let lander = lander_at(x_over(3), 100.0, 0.0, 5.0);
        let contact = evaluator.evaluate(&lander, 0.0, &terrain);
        assert!(contact.outcome.is_none());
        assert!(!contact.touched_down());
    }

    #[test]
    fn test_landing_boundary_uses_combined_speed() {
        let evaluator = GroundEvaluator::default();
        assert_eq!(evaluator.classify(true, 0.2, 0.1), ContactOutcome::Landed);
        assert_eq!(evaluator.classify(true, -0.2, 0.2), ContactOutcome::Crashed);
        assert_eq!(evaluator.classify(true, 0.0, 0.35), ContactOutcome::Crashed);
        assert_eq!(evaluator.classify(false, 0.0, 0.0), ContactOutcome::Crashed);
    }

    #[test]
    fn test_score_for_run_touched_at_center() {
        let evaluator = GroundEvaluator::default();
        for (intervals, expected) in [(1, 100), (2, 50), (5, 20), (10, 10)] {
            let terrain = pad_terrain(intervals);
            let center = 3 + intervals / 2;
            let score = evaluator.score(x_over(center), 0.0, &terrain);
            assert_eq!(score, expected, "run of {} intervals", intervals);
        }
    }

    #[test]
    fn test_score_same_anywhere_on_pad() {
        let evaluator = GroundEvaluator::default();
        let terrain = pad_terrain(4);
        for vertex in 3..7 {
            assert_eq!(evaluator.score(x_over(vertex), 0.0, &terrain), 25);
        }
    }

    #[test]
    fn test_score_rounds_toward_zero() {
        let evaluator = GroundEvaluator::default();
        let terrain = pad_terrain(3);
        assert_eq!(evaluator.score(x_over(4), 0.0, &terrain), 33);
        let terrain = pad_terrain(7);
        assert_eq!(evaluator.score(x_over(4), 0.0, &terrain), 14);
    }

    #[test]
    fn test_evaluator_from_config() {
        let config = LanderConfig {
            max_landing_velocity: 0.5,
            ..Default::default()
        };
        let evaluator = GroundEvaluator::from_config(&config);
        assert_eq!(evaluator.classify(true, 0.2, 0.25), ContactOutcome::Landed);
    }
}
