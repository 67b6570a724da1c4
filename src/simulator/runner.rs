//! Main simulation runner driving real sessions with the autopilot.
//!
//! Each run plays one seeded `Session` until its first game over or the
//! frame cap. Statistics are tracked externally from the session's events.

use super::autopilot::Autopilot;
use super::config::SimConfig;
use super::report::SimReport;
use crate::config::LanderConfig;
use crate::error::LanderError;
use crate::session::{Session, SessionEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

/// Outcome of one simulated session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub landings: u32,
    pub crashes: u32,
    pub out_of_bounds: u32,
    /// Points banked over all landings of the run.
    pub points_earned: u32,
    /// Score shown when the run ended.
    pub final_score: u32,
    pub fuel_used: f64,
    pub frames: u64,
    /// True if the run ended in game over rather than at the frame cap.
    pub game_over: bool,
}

impl RunStats {
    pub fn attempts(&self) -> u32 {
        self.landings + self.crashes + self.out_of_bounds
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, LanderError> {
    let lander = config.lander_config();
    lander.validate()?;

    let pilot = Autopilot::default();
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(u64::from(run_idx))),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(&lander, &pilot, rng, config.max_frames_per_run)?;

        if config.verbosity >= 2 {
            info!(
                run = run_idx + 1,
                of = config.num_runs,
                landings = run.landings,
                crashes = run.crashes,
                out_of_bounds = run.out_of_bounds,
                score = run.final_score,
                frames = run.frames,
                "run finished"
            );
        }
        all_runs.push(run);
    }

    let report = SimReport::from_runs(all_runs, config.max_frames_per_run);
    if config.verbosity >= 1 {
        info!(
            runs = report.num_runs,
            landing_rate = report.landing_rate,
            avg_final_score = report.avg_final_score,
            "simulation finished"
        );
    }
    Ok(report)
}

/// Play one session from spawn to game over or the frame cap.
fn simulate_single_run(
    lander: &LanderConfig,
    pilot: &Autopilot,
    rng: ChaCha8Rng,
    max_frames: u64,
) -> Result<RunStats, LanderError> {
    let mut session = Session::new(lander.clone(), rng)?;
    let mut stats = RunStats {
        landings: 0,
        crashes: 0,
        out_of_bounds: 0,
        points_earned: 0,
        final_score: 0,
        fuel_used: 0.0,
        frames: 0,
        game_over: false,
    };

    while stats.frames < max_frames {
        let inputs = pilot.inputs(&session);
        let fuel_before = session.lander.fuel;

        let events = session.step(&inputs);
        stats.frames += 1;
        stats.fuel_used += (fuel_before - session.lander.fuel).max(0.0);

        for event in &events {
            match *event {
                SessionEvent::LandingResult {
                    success: true,
                    points,
                } => {
                    stats.landings += 1;
                    stats.points_earned += points;
                }
                SessionEvent::LandingResult { success: false, .. } => stats.crashes += 1,
                SessionEvent::OutOfBounds => stats.out_of_bounds += 1,
                SessionEvent::GameOver { final_score } => {
                    stats.final_score = final_score;
                    stats.game_over = true;
                }
                _ => {}
            }
        }

        if stats.game_over {
            return Ok(stats);
        }
        stats.final_score = session.lander.score;
    }

    Ok(stats)
}
