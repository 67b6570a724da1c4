//! Session game logic: input handling, the fixed-step frame loop and the
//! attempt state machine.
//!
//! An attempt runs `Flying -> (Landed | Crashed) -> Reset`. Landed and
//! crashed landers sit out a fixed delay before the reset; a crashed lander
//! also drifts for a few settle frames. Leaving the world skips the delay and
//! resets at the end of the same frame.

use super::types::{spawn_velocity, LanderInput, Session, SessionEvent};
use crate::constants::{MAX_TICK_DT_MS, MIN_FUEL_TO_CONTINUE, PHYSICS_TICK_MS};
use crate::flight::{
    advance, apply_gravity, edge_scroll, nozzle_position, settle, FlightControls,
    FlightPhysics,
};
use crate::ground::ContactOutcome;
use crate::terrain::landing_pads;
use rand::Rng;
use tracing::{debug, info};

impl<R: Rng> Session<R> {
    /// Apply one player command.
    ///
    /// Throttle only moves while airborne. Rotation commands accumulate into
    /// the rotational velocity with no damping.
    pub fn process_input(&mut self, input: LanderInput) {
        match input {
            LanderInput::ThrottleUp if self.lander.is_airborne() => {
                self.lander.adjust_throttle(1)
            }
            LanderInput::ThrottleDown if self.lander.is_airborne() => {
                self.lander.adjust_throttle(-1)
            }
            LanderInput::RotateLeft => self.lander.rotational_velocity -= self.config.turn_speed,
            LanderInput::RotateRight => self.lander.rotational_velocity += self.config.turn_speed,
            LanderInput::ThrottleUp | LanderInput::ThrottleDown => {}
        }
    }

    /// Advance by wall-clock time. Called from the frame loop.
    ///
    /// `dt_ms` is milliseconds since the last call, clamped to 100 so a
    /// stall does not replay a burst of frames. Whole 16 ms frames are
    /// stepped; the remainder carries over to the next call.
    pub fn tick(&mut self, dt_ms: u64) -> Vec<SessionEvent> {
        let dt_ms = dt_ms.min(MAX_TICK_DT_MS);
        self.accumulated_time_ms += dt_ms;

        let mut events = Vec::new();
        while self.accumulated_time_ms >= PHYSICS_TICK_MS {
            self.accumulated_time_ms -= PHYSICS_TICK_MS;
            events.extend(self.step(&[]));
        }
        events
    }

    /// Apply `inputs`, then advance exactly one frame.
    pub fn step(&mut self, inputs: &[LanderInput]) -> Vec<SessionEvent> {
        for &input in inputs {
            self.process_input(input);
        }

        self.frame_count += 1;
        let mut events = Vec::new();

        if self.lander.is_airborne() {
            self.fly(&mut events);
        } else {
            self.wait_for_reset(&mut events);
        }

        events
    }

    fn fly(&mut self, events: &mut Vec<SessionEvent>) {
        let controls = FlightControls::from_state(&self.lander);
        let physics = FlightPhysics::from_config(&self.config);
        let output = advance(&mut self.lander, controls, &physics, 1.0);

        if output.thrust_particles > 0 {
            let (origin_x, origin_y) = nozzle_position(&self.lander, self.config.lander_size);
            events.push(SessionEvent::ThrustParticles {
                count: output.thrust_particles,
                origin_x,
                origin_y,
                direction: self.lander.rotation + 90.0,
            });
        }

        edge_scroll(
            &mut self.lander,
            &mut self.land_position_x,
            self.config.viewport_width,
        );

        let contact = self
            .evaluator
            .evaluate(&self.lander, self.land_position_x, &self.terrain);
        apply_gravity(&mut self.lander, controls, &physics, 1.0);

        match contact.outcome {
            Some(ContactOutcome::Landed) => {
                let points =
                    self.evaluator
                        .score(self.lander.x, self.land_position_x, &self.terrain);
                self.on_contact(ContactOutcome::Landed, points);
                events.push(SessionEvent::LandingResult {
                    success: true,
                    points,
                });
                return;
            }
            Some(ContactOutcome::Crashed) => {
                let (origin_x, origin_y) = self.lander.center(self.config.lander_size);
                self.on_contact(ContactOutcome::Crashed, 0);
                events.push(SessionEvent::CrashParticles {
                    count: self.config.crash_particle_count,
                    origin_x,
                    origin_y,
                });
                events.push(SessionEvent::LandingResult {
                    success: false,
                    points: 0,
                });
                return;
            }
            None => {}
        }

        self.update_bounds_warning(events);

        if self.is_out_of_world() {
            events.push(SessionEvent::OutOfBounds);
            self.on_out_of_bounds();
            self.finish_attempt(events);
        }
    }

    fn wait_for_reset(&mut self, events: &mut Vec<SessionEvent>) {
        if self.lander.crashed && self.settle_frames > 0 {
            settle(&mut self.lander, 1.0);
            self.settle_frames -= 1;
        }

        self.delay_frames = self.delay_frames.saturating_sub(1);
        if self.delay_frames == 0 {
            self.finish_attempt(events);
        }
    }

    /// Record a touchdown. Landing banks `score_delta` and cuts the engine;
    /// crashing costs a life. Either way the respawn delay starts.
    pub fn on_contact(&mut self, outcome: ContactOutcome, score_delta: u32) {
        match outcome {
            ContactOutcome::Landed => {
                self.lander.landed = true;
                self.lander.throttle = 0;
                self.lander.score += score_delta;
                info!(
                    points = score_delta,
                    score = self.lander.score,
                    "lander touched down"
                );
            }
            ContactOutcome::Crashed => {
                self.lander.crashed = true;
                self.lander.lives = self.lander.lives.saturating_sub(1);
                self.settle_frames = self.config.crash_settle_frames;
                info!(lives = self.lander.lives, "lander crashed");
            }
        }
        self.delay_frames = self.config.landing_delay_frames;
    }

    /// Forced life loss for flying out of the world.
    pub fn on_out_of_bounds(&mut self) {
        self.lander.lives = self.lander.lives.saturating_sub(1);
        info!(
            lives = self.lander.lives,
            land_position_x = self.land_position_x,
            "lander left the world"
        );
    }

    /// Out of lives or out of fuel.
    pub fn is_game_over(&self) -> bool {
        self.lander.lives < 1 || self.lander.fuel < MIN_FUEL_TO_CONTINUE
    }

    /// Start a new attempt on fresh terrain.
    ///
    /// A game-over reset also restores score, lives and fuel; otherwise they
    /// carry over.
    pub fn reset(&mut self, is_game_over: bool) {
        if is_game_over {
            self.lander.score = 0;
            self.lander.lives = self.config.starting_lives;
            self.lander.fuel = self.config.starting_fuel;
        }

        let vx = spawn_velocity(&self.config, &mut self.rng);
        self.lander.respawn(&self.config, vx);

        self.terrain = self.generator.generate(&mut self.rng);
        self.landing_pads = landing_pads(&self.terrain);
        self.land_position_x = self.config.initial_land_position();
        self.bounds_warning = false;
        self.delay_frames = 0;
        self.settle_frames = 0;

        debug!(
            is_game_over,
            pads = self.landing_pads.len(),
            "session reset"
        );
    }

    fn finish_attempt(&mut self, events: &mut Vec<SessionEvent>) {
        let game_over = self.is_game_over();
        if game_over {
            info!(final_score = self.lander.score, "game over");
            events.push(SessionEvent::GameOver {
                final_score: self.lander.score,
            });
        }

        let was_warning = self.bounds_warning;
        self.reset(game_over);
        if was_warning {
            events.push(SessionEvent::BoundsWarning { active: false });
        }
        events.push(SessionEvent::Respawned { game_over });
    }

    fn update_bounds_warning(&mut self, events: &mut Vec<SessionEvent>) {
        let lx = self.land_position_x;
        let active = lx > self.config.bounds_warning_max || lx < self.config.bounds_warning_min;
        if active != self.bounds_warning {
            self.bounds_warning = active;
            debug!(active, land_position_x = lx, "bounds warning changed");
            events.push(SessionEvent::BoundsWarning { active });
        }
    }

    fn is_out_of_world(&self) -> bool {
        let lx = self.land_position_x;
        lx > self.config.out_of_world_max || lx < self.config.out_of_world_min
    }
}
