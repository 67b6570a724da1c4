//! Per-frame flight integration.
//!
//! Semi-implicit Euler in the lander's frame order: thrust changes velocity,
//! position advances by that velocity, then gravity is added for the next
//! frame and the rotation advances. `dt` is measured in frames.

use super::types::{FlightControls, FlightOutput, FlightPhysics, LanderState};
use crate::constants::{
    EDGE_SCROLL_DIVISOR, FUEL_BURN_DIVISOR, THROTTLE_PER_PARTICLE, THRUST_NOZZLE_OFFSET,
};

/// Advance an airborne lander by `dt` frames. Landed or crashed landers are
/// left untouched.
pub fn integrate(
    state: &mut LanderState,
    controls: FlightControls,
    physics: &FlightPhysics,
    dt: f64,
) -> FlightOutput {
    let output = advance(state, controls, physics, dt);
    apply_gravity(state, controls, physics, dt);
    output
}

/// First half of a frame: thrust and the position update.
///
/// Ground contact is judged between this and [`apply_gravity`], so the
/// touchdown speed excludes this frame's gravity.
pub fn advance(
    state: &mut LanderState,
    controls: FlightControls,
    physics: &FlightPhysics,
    dt: f64,
) -> FlightOutput {
    if !state.is_airborne() {
        return FlightOutput::default();
    }

    let mut output = FlightOutput::default();

    if state.fuel > 0.0 {
        let (dir_x, dir_y) = thrust_direction(state.rotation);
        let power = f64::from(controls.throttle) / 100.0 * physics.max_thrust * dt;
        state.vx -= power * dir_x;
        state.vy -= power * dir_y;

        output.fuel_burned = burn_fuel(state, controls.throttle, dt);
        output.thrust_particles = thrust_particle_count(controls.throttle);
    }

    state.x += state.vx * dt;
    state.y += state.vy * dt;

    output
}

/// Second half of a frame: gravity for the next frame, then rotation.
pub fn apply_gravity(
    state: &mut LanderState,
    controls: FlightControls,
    physics: &FlightPhysics,
    dt: f64,
) {
    if !state.is_airborne() {
        return;
    }

    state.vy += physics.gravity * dt;
    state.rotation += controls.rotational_velocity * dt;
}

/// Exhaust particles for a throttle setting: one per started 20%.
pub fn thrust_particle_count(throttle: u8) -> u32 {
    u32::from(throttle).div_ceil(THROTTLE_PER_PARTICLE)
}

/// Unit vector the engine points along. Thrust acts opposite to it.
fn thrust_direction(rotation: f64) -> (f64, f64) {
    let radians = (rotation + 90.0).to_radians();
    (radians.cos(), radians.sin())
}

/// Where exhaust particles appear: just behind the lander's centre.
pub fn nozzle_position(state: &LanderState, lander_size: f64) -> (f64, f64) {
    let (dir_x, dir_y) = thrust_direction(state.rotation);
    let (cx, cy) = state.center(lander_size);
    (
        cx + dir_x * THRUST_NOZZLE_OFFSET,
        cy + dir_y * THRUST_NOZZLE_OFFSET,
    )
}

/// Burn `throttle / 20` fuel per frame, never dropping below zero.
/// Returns the amount actually burned.
fn burn_fuel(state: &mut LanderState, throttle: u8, dt: f64) -> f64 {
    let wanted = f64::from(throttle) / FUEL_BURN_DIVISOR * dt;
    let before = state.fuel;
    state.fuel = (state.fuel - wanted).max(0.0);
    before - state.fuel
}

/// Keep the lander inside the central band of the viewport by panning the
/// terrain instead. Returns the pan applied this frame; velocity is untouched.
pub fn edge_scroll(state: &mut LanderState, land_position_x: &mut f64, viewport_width: f64) -> f64 {
    let band = viewport_width / EDGE_SCROLL_DIVISOR;
    let right_edge = viewport_width - band;

    let shift = if state.x > right_edge {
        state.x - right_edge
    } else if state.x < band {
        state.x - band
    } else {
        0.0
    };

    *land_position_x += shift;
    state.x -= shift;
    shift
}

/// Crash-settle motion: drift by residual velocity with no forces applied.
pub fn settle(state: &mut LanderState, dt: f64) {
    state.x += state.vx * dt;
    state.y += state.vy * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LanderConfig;

    fn airborne() -> LanderState {
        let mut state = LanderState::new(&LanderConfig::default());
        state.vx = 0.3;
        state.vy = -0.2;
        state
    }

    fn physics() -> FlightPhysics {
        FlightPhysics::from_config(&LanderConfig::default())
    }

    fn controls(throttle: u8, rotational_velocity: f64) -> FlightControls {
        FlightControls {
            throttle,
            rotational_velocity,
        }
    }

    #[test]
    fn test_zero_inputs_only_advance_position() {
        let mut state = airborne();
        let before = state.clone();
        let zero = FlightPhysics {
            gravity: 0.0,
            max_thrust: 0.01,
        };

        let output = integrate(&mut state, controls(0, 0.0), &zero, 1.0);

        let mut expected = before.clone();
        expected.x += before.vx;
        expected.y += before.vy;
        assert_eq!(state, expected);
        assert_eq!(output, FlightOutput::default());
    }

    #[test]
    fn test_gravity_applied_after_position() {
        let mut state = airborne();
        state.vx = 0.0;
        state.vy = 0.0;
        let y_before = state.y;

        integrate(&mut state, controls(0, 0.0), &physics(), 1.0);

        assert!(
            (state.y - y_before).abs() < f64::EPSILON,
            "position should use pre-gravity velocity"
        );
        assert!((state.vy - 0.004).abs() < f64::EPSILON);

        integrate(&mut state, controls(0, 0.0), &physics(), 1.0);
        assert!((state.y - y_before - 0.004).abs() < 1e-12);
        assert!((state.vy - 0.008).abs() < 1e-12);
    }

    #[test]
    fn test_advance_leaves_gravity_for_later() {
        let mut state = airborne();
        state.vy = 0.3;

        advance(&mut state, controls(0, 0.5), &physics(), 1.0);
        assert!((state.vy - 0.3).abs() < f64::EPSILON);
        assert!((state.y - 100.3).abs() < 1e-12);
        assert!((state.rotation - 0.0).abs() < f64::EPSILON);

        apply_gravity(&mut state, controls(0, 0.5), &physics(), 1.0);
        assert!((state.vy - 0.304).abs() < 1e-12);
        assert!((state.rotation - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_upright_thrust_pushes_up() {
        let mut state = airborne();
        state.vx = 0.0;
        state.vy = 0.0;

        integrate(&mut state, controls(100, 0.0), &physics(), 1.0);

        // -0.01 thrust, +0.004 gravity afterwards
        assert!(state.vx.abs() < 1e-12);
        assert!((state.vy - (-0.01 + 0.004)).abs() < 1e-12);
        assert!(state.y < 100.0, "thrust should lift the lander");
    }

    #[test]
    fn test_tilted_thrust_pushes_sideways() {
        let mut state = airborne();
        state.vx = 0.0;
        state.vy = 0.0;
        state.rotation = 90.0;

        integrate(&mut state, controls(100, 0.0), &physics(), 1.0);

        assert!(
            (state.vx - 0.01).abs() < 1e-12,
            "90 degree tilt should thrust rightward, vx={}",
            state.vx
        );
    }

    #[test]
    fn test_half_throttle_half_thrust() {
        let mut full = airborne();
        let mut half = airborne();
        let zero_g = FlightPhysics {
            gravity: 0.0,
            max_thrust: 0.01,
        };
        let vy0 = full.vy;
        integrate(&mut full, controls(100, 0.0), &zero_g, 1.0);
        integrate(&mut half, controls(50, 0.0), &zero_g, 1.0);
        assert!(((full.vy - vy0) - 2.0 * (half.vy - vy0)).abs() < 1e-12);
    }

    #[test]
    fn test_thrust_consumes_fuel() {
        let mut state = airborne();
        let output = integrate(&mut state, controls(40, 0.0), &physics(), 1.0);
        assert!((state.fuel - (10_000.0 - 2.0)).abs() < f64::EPSILON);
        assert!((output.fuel_burned - 2.0).abs() < f64::EPSILON);
        assert_eq!(output.thrust_particles, 2);
    }

    #[test]
    fn test_no_thrust_without_fuel() {
        let mut state = airborne();
        state.fuel = 0.0;
        state.vy = 0.0;

        let output = integrate(&mut state, controls(100, 0.0), &physics(), 1.0);

        assert!(
            (state.vy - 0.004).abs() < f64::EPSILON,
            "without fuel only gravity should apply, vy={}",
            state.vy
        );
        assert_eq!(output.thrust_particles, 0);
        assert!((state.fuel - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fuel_never_negative() {
        let mut state = airborne();
        state.fuel = 7.3;
        let mut throttle = 0u8;
        for frame in 0..200 {
            throttle = throttle.wrapping_add(37) % 101;
            integrate(&mut state, controls(throttle, 0.0), &physics(), 1.0);
            assert!(state.fuel >= 0.0, "fuel negative at frame {}", frame);
        }
        assert!((state.fuel - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fuel_burn_capped_by_remaining() {
        let mut state = airborne();
        state.fuel = 1.5;
        let output = integrate(&mut state, controls(100, 0.0), &physics(), 1.0);
        assert!((output.fuel_burned - 1.5).abs() < f64::EPSILON);
        assert!((state.fuel - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_thrust_particle_count() {
        let cases = [(0, 0), (19, 1), (20, 1), (39, 2), (40, 2), (100, 5)];
        for (throttle, expected) in cases {
            assert_eq!(
                thrust_particle_count(throttle),
                expected,
                "throttle {}",
                throttle
            );
        }
    }

    #[test]
    fn test_rotation_integrates_without_damping() {
        let mut state = airborne();
        for _ in 0..10 {
            integrate(&mut state, controls(0, 0.5), &physics(), 1.0);
        }
        assert!((state.rotation - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_dt_scales_step() {
        let mut one = airborne();
        let mut halves = airborne();
        integrate(&mut one, controls(0, 0.0), &physics(), 1.0);
        integrate(&mut halves, controls(0, 0.0), &physics(), 0.5);
        assert!((halves.vy - (-0.2 + 0.002)).abs() < 1e-12);
        assert!((halves.x - (200.0 + 0.15)).abs() < 1e-12);
        assert!((one.vy - (-0.2 + 0.004)).abs() < 1e-12);
    }

    #[test]
    fn test_grounded_lander_frozen() {
        let mut state = airborne();
        state.landed = true;
        let before = state.clone();
        let output = integrate(&mut state, controls(100, 1.0), &physics(), 1.0);
        assert_eq!(state, before);
        assert_eq!(output.thrust_particles, 0);

        state.landed = false;
        state.crashed = true;
        let before = state.clone();
        integrate(&mut state, controls(100, 1.0), &physics(), 1.0);
        assert_eq!(state, before);
    }

    #[test]
    fn test_nozzle_behind_center() {
        let state = airborne();
        let (nx, ny) = nozzle_position(&state, 25.0);
        assert!((nx - 212.5).abs() < 1e-9);
        assert!((ny - (112.5 + 6.25)).abs() < 1e-9);
    }

    #[test]
    fn test_edge_scroll_right() {
        let mut state = airborne();
        state.x = 850.0;
        let mut land_x = 740.0;
        let vx = state.vx;

        let shift = edge_scroll(&mut state, &mut land_x, 1000.0);

        let right_edge = 1000.0 - 1000.0 / 6.0;
        assert!((shift - (850.0 - right_edge)).abs() < 1e-9);
        assert!((state.x - right_edge).abs() < 1e-9);
        assert!((land_x - (740.0 + shift)).abs() < 1e-9);
        assert!((state.vx - vx).abs() < f64::EPSILON, "pan must not alter velocity");
    }

    #[test]
    fn test_edge_scroll_left() {
        let mut state = airborne();
        state.x = 100.0;
        let mut land_x = 740.0;

        let shift = edge_scroll(&mut state, &mut land_x, 1000.0);

        let band = 1000.0 / 6.0;
        assert!((state.x - band).abs() < 1e-9);
        assert!((shift - (100.0 - band)).abs() < 1e-9);
        assert!(land_x < 740.0);
    }

    #[test]
    fn test_edge_scroll_preserves_world_position() {
        let mut state = airborne();
        state.x = 950.0;
        let mut land_x = 300.0;
        let world_before = land_x + state.x;
        edge_scroll(&mut state, &mut land_x, 1000.0);
        assert!((land_x + state.x - world_before).abs() < 1e-9);
    }

    #[test]
    fn test_edge_scroll_inside_band_is_noop() {
        let mut state = airborne();
        state.x = 500.0;
        let mut land_x = 740.0;
        assert!((edge_scroll(&mut state, &mut land_x, 1000.0) - 0.0).abs() < f64::EPSILON);
        assert!((land_x - 740.0).abs() < f64::EPSILON);
        assert!((state.x - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_settle_drifts_by_velocity() {
        let mut state = airborne();
        state.crashed = true;
        settle(&mut state, 1.0);
        assert!((state.x - 200.3).abs() < 1e-12);
        assert!((state.y - 99.8).abs() < 1e-12);
    }
}
