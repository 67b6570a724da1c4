//! Scripted pilot for headless sessions.
//!
//! Steers toward the nearest landing pad, levels out over it and throttles
//! to hold a descent rate that shrinks with altitude. It only ever issues
//! the same commands a player can, so simulated sessions exercise the real
//! input path.

use crate::session::{LanderInput, Session};
use rand::Rng;

/// Throttle that cancels stock gravity at full thrust, in percent.
const HOVER_THROTTLE: f64 = 40.0;

/// Pad-seeking proportional controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    /// Descent rate held far above the ground.
    pub cruise_descent: f64,
    /// Descent rate held on final approach.
    pub final_descent: f64,
    /// Altitude below which the final descent rate applies.
    pub final_altitude: f64,
    /// Horizontal speed cap while travelling to a pad.
    pub max_travel_speed: f64,
    /// Largest tilt the pilot will hold, in degrees.
    pub max_tilt: f64,
    /// Most throttle steps issued in one frame.
    pub max_throttle_steps: u8,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            cruise_descent: 0.6,
            final_descent: 0.12,
            final_altitude: 120.0,
            max_travel_speed: 1.0,
            max_tilt: 30.0,
            max_throttle_steps: 4,
        }
    }
}

impl Autopilot {
    /// Commands for the coming frame. Empty while the lander is grounded.
    pub fn inputs<R: Rng>(&self, session: &Session<R>) -> Vec<LanderInput> {
        let lander = &session.lander;
        if !lander.is_airborne() {
            return Vec::new();
        }

        let config = session.config();
        let world_x = session.land_position_x + lander.x + config.lander_size / 2.0;
        let offset = self.target_x(session, world_x) - world_x;
        let altitude = session.evaluator().clearance(
            lander.x,
            lander.y,
            session.land_position_x,
            &session.terrain,
        ) - config.lander_size;

        let mut inputs = Vec::new();

        // Horizontal: tilt so thrust pushes toward the wanted velocity
        let wanted_vx = (offset * 0.01).clamp(-self.max_travel_speed, self.max_travel_speed);
        let wanted_tilt = ((wanted_vx - lander.vx) * 60.0).clamp(-self.max_tilt, self.max_tilt);
        let wanted_spin = ((wanted_tilt - lander.rotation) * 0.02).clamp(-0.5, 0.5);
        if lander.rotational_velocity < wanted_spin - config.turn_speed / 2.0 {
            inputs.push(LanderInput::RotateRight);
        } else if lander.rotational_velocity > wanted_spin + config.turn_speed / 2.0 {
            inputs.push(LanderInput::RotateLeft);
        }

        // Vertical: climb when low and off target, otherwise hold a descent rate
        let over_target = offset.abs() < config.terrain_spacing;
        let wanted_vy = if altitude > self.final_altitude {
            self.cruise_descent
        } else if over_target {
            self.final_descent
        } else {
            -0.1
        };
        let tilt_factor = lander.rotation.to_radians().cos().max(0.3);
        let wanted_throttle =
            ((HOVER_THROTTLE + (lander.vy - wanted_vy) * 300.0) / tilt_factor).clamp(0.0, 100.0);

        let delta = wanted_throttle.round() - f64::from(lander.throttle);
        let steps = (delta.abs() as u8).min(self.max_throttle_steps);
        let command = if delta > 0.0 {
            LanderInput::ThrottleUp
        } else {
            LanderInput::ThrottleDown
        };
        inputs.extend(std::iter::repeat(command).take(usize::from(steps)));

        inputs
    }

    /// World x to aim for: the centre of the closest pad, or straight down
    /// when the terrain has none.
    fn target_x<R: Rng>(&self, session: &Session<R>, world_x: f64) -> f64 {
        session
            .landing_pads
            .iter()
            .map(|pad| pad.center_x())
            .min_by(|a, b| (a - world_x).abs().total_cmp(&(b - world_x).abs()))
            .unwrap_or(world_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LanderConfig;

    fn create_test_session() -> Session {
        let config = LanderConfig {
            randomize_spawn_velocity: false,
            ..Default::default()
        };
        Session::seeded(config, 2024).unwrap()
    }

    #[test]
    fn test_no_inputs_when_grounded() {
        let mut session = create_test_session();
        session.lander.landed = true;
        assert!(Autopilot::default().inputs(&session).is_empty());
    }

    #[test]
    fn test_falling_fast_opens_throttle() {
        let mut session = create_test_session();
        session.lander.vy = 3.0;
        let inputs = Autopilot::default().inputs(&session);
        let ups = inputs
            .iter()
            .filter(|i| **i == LanderInput::ThrottleUp)
            .count();
        assert_eq!(ups, 4);
    }

    #[test]
    fn test_rising_closes_throttle() {
        let mut session = create_test_session();
        session.lander.vy = -3.0;
        session.lander.throttle = 80;
        let inputs = Autopilot::default().inputs(&session);
        assert!(inputs.contains(&LanderInput::ThrottleDown));
        assert!(!inputs.contains(&LanderInput::ThrottleUp));
    }

    #[test]
    fn test_never_exceeds_step_limit() {
        let mut session = create_test_session();
        session.lander.vy = 10.0;
        let pilot = Autopilot {
            max_throttle_steps: 2,
            ..Default::default()
        };
        let throttle_inputs = pilot
            .inputs(&session)
            .into_iter()
            .filter(|i| matches!(i, LanderInput::ThrottleUp | LanderInput::ThrottleDown))
            .count();
        assert!(throttle_inputs <= 2);
    }

    #[test]
    fn test_steers_toward_pad() {
        let mut session = create_test_session();
        session.landing_pads.clear();
        session.landing_pads.push(crate::terrain::LandingPad {
            start_vertex: 0,
            intervals: 2,
            start_x: 2000.0,
            end_x: 2020.0,
            height: -50.0,
            points: 50,
        });
        session.lander.vx = 0.0;
        session.lander.rotation = 0.0;
        session.lander.rotational_velocity = 0.0;

        let inputs = Autopilot::default().inputs(&session);

        assert!(inputs.contains(&LanderInput::RotateRight));
    }

    #[test]
    fn test_same_session_same_inputs() {
        let session = create_test_session();
        let pilot = Autopilot::default();
        assert_eq!(pilot.inputs(&session), pilot.inputs(&session));
    }
}
