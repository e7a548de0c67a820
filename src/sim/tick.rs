//! Fixed timestep simulation loop
//!
//! A [`Session`] owns all mutable game state and advances it one tick at a
//! time: scroll and steering, track upkeep, collision, phase transitions.
//! Nothing in here is fatal; malformed input degrades to a no-op.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{Ship, ShipFootprint, check_collision};
use super::frame::Frame;
use super::grid::Grid;
use super::projection::Projector;
use super::state::{GameEvent, GamePhase, SimulationState, Steer, Viewport};
use super::track::TrackGenerator;
use crate::config::Config;
use crate::consts::MAX_TICK_DT;

/// Input for a single tick
///
/// `steer` is a level (last edge wins); `start`, `restart` and
/// `menu_button` are one-shots the driver clears after the tick consumes them.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub steer: Option<Steer>,
    pub start: bool,
    pub restart: bool,
    /// START on the title screen, RESTART after a crash
    pub menu_button: bool,
}

/// One game session: the simulation loop and everything it owns
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    state: SimulationState,
    track: TrackGenerator,
    ship: Ship,
    events: Vec<GameEvent>,
}

impl Session {
    /// Fresh session on the title screen
    pub fn new(config: Config, seed: u64) -> Self {
        let track = TrackGenerator::new(&config, seed);
        let ship = Ship::from_config(&config);
        let mut session = Self {
            config,
            state: SimulationState::new(seed),
            track,
            ship,
            events: Vec::new(),
        };
        session.reset(seed);
        session
    }

    /// Return every offset, the track and the score to their initial values
    /// and go back to the title screen
    pub fn reset(&mut self, seed: u64) {
        if let Some(token) = self.state.crash_cue_token.take() {
            self.state.crash_cue.cancel(token);
        }
        self.state = SimulationState::new(seed);

        self.track.reset(seed);
        self.track.prefill(self.config.prefill_rows, 0);
        self.track.tick(0);
    }

    /// Idle -> Running. Returns whether the trigger applied.
    pub fn start(&mut self) -> bool {
        if self.state.phase != GamePhase::Idle {
            return false;
        }
        self.state.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        log::info!("Game started with seed: {}", self.state.seed);
        true
    }

    /// Crashed -> Running on a new track. Returns whether the trigger applied.
    pub fn restart(&mut self) -> bool {
        if self.state.phase != GamePhase::Crashed {
            return false;
        }
        let seed = next_seed(self.state.seed);
        self.reset(seed);
        self.state.phase = GamePhase::Running;
        self.events.push(GameEvent::Restarted);
        log::info!("Game restarted with seed: {}", seed);
        true
    }

    /// The title/game-over overlay's single button
    pub fn press_menu_button(&mut self) -> bool {
        match self.state.phase {
            GamePhase::Idle => self.start(),
            GamePhase::Crashed => self.restart(),
            GamePhase::Running => false,
        }
    }

    /// Steering edge. Ignored (speed held at zero) unless running.
    pub fn steer(&mut self, steer: Steer) {
        self.state.lateral_speed = if self.state.is_running() {
            steer.sign() * self.config.lanes_per_second()
        } else {
            0.0
        };
    }

    /// Apply triggers and steering, then advance one tick
    pub fn step(&mut self, input: &TickInput, dt: f32, viewport: Viewport) -> Frame {
        if input.start {
            self.start();
        }
        if input.restart {
            self.restart();
        }
        if input.menu_button {
            self.press_menu_button();
        }
        if let Some(steer) = input.steer {
            self.steer(steer);
        }
        self.tick(dt, viewport)
    }

    /// Advance the simulation by `dt` seconds and return the frame to draw
    pub fn tick(&mut self, dt: f32, viewport: Viewport) -> Frame {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_TICK_DT) } else { 0.0 };
        self.state.time_ticks += 1;

        self.poll_crash_cue(dt);

        let projector = Projector::for_viewport(viewport, &self.config);

        if self.state.is_running() {
            let row_before = self.state.current_row();
            self.state.scroll += f64::from(self.config.rows_per_second() * dt);
            self.state.lateral_offset += self.state.lateral_speed * dt;
            let crossed = self.state.current_row() - row_before;
            self.state.score += crossed.max(0) as u64;
        } else {
            self.state.lateral_speed = 0.0;
        }

        self.track.tick(self.state.current_row());

        let grid = self.grid(viewport);
        let ship = self.ship.footprint(viewport);

        if self.state.is_running() {
            if viewport.is_degenerate() || projector.is_degenerate() {
                log::debug!("Skipping collision on degenerate viewport {:?}", viewport);
            } else if self.crashed(&ship, &grid) {
                self.crash();
            }
        }

        Frame::build(&projector, &grid, &ship, self.track.segments())
    }

    fn crashed(&self, ship: &ShipFootprint, grid: &Grid) -> bool {
        let hit = check_collision(
            ship,
            self.track.segments(),
            grid,
            self.config.collision_row_margin,
        );
        self.config.crash_policy.is_crash(hit)
    }

    fn crash(&mut self) {
        self.state.phase = GamePhase::Crashed;
        self.state.lateral_speed = 0.0;
        let token = self.state.crash_cue.schedule(self.config.crash_cue_delay);
        self.state.crash_cue_token = Some(token);
        self.events.push(GameEvent::Crashed {
            score: self.state.score,
        });
        log::info!(
            "Game over at row {} (score {})",
            self.state.current_row(),
            self.state.score
        );
    }

    fn poll_crash_cue(&mut self, dt: f32) {
        let Some(fired) = self.state.crash_cue.advance(dt) else {
            return;
        };
        if self.state.crash_cue_token == Some(fired) && self.state.phase == GamePhase::Crashed {
            self.state.crash_cue_token = None;
            self.events.push(GameEvent::DelayedCrashCue);
        }
    }

    /// Lattice layout for the current state
    pub fn grid(&self, viewport: Viewport) -> Grid {
        Grid::new(
            viewport,
            &self.config,
            self.state.scroll,
            self.state.lateral_offset,
        )
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn track(&self) -> &TrackGenerator {
        &self.track
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn score_text(&self) -> String {
        format!("SCORE: {}", self.state.score)
    }

    /// Whether the title/game-over overlay is shown
    pub fn menu_visible(&self) -> bool {
        !self.state.is_running()
    }

    pub fn menu_title(&self) -> &'static str {
        match self.state.phase {
            GamePhase::Crashed => "G  A  M  E    O  V  E  R",
            _ => "G   A   L   A   X   Y",
        }
    }

    pub fn menu_button_label(&self) -> &'static str {
        match self.state.phase {
            GamePhase::Crashed => "RESTART",
            _ => "START",
        }
    }
}

/// Seed for the track after a restart, derived from the previous one
pub fn next_seed(seed: u64) -> u64 {
    Pcg32::seed_from_u64(seed).random()
}
