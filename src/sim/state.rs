//! Game state and core simulation types

use serde::{Deserialize, Serialize};

use super::timer::{OneShotTimer, TimerToken};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, waiting for restart
    Crashed,
}

/// Transitions reported to external collaborators (audio, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Idle -> Running
    Started,
    /// Running -> Crashed
    Crashed { score: u64 },
    /// Fires `crash_cue_delay` seconds after a crash unless a restart came first
    DelayedCrashCue,
    /// Crashed -> Running, after a full reset
    Restarted,
}

/// Steering edge from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Steer {
    /// Ship moves left (lattice shifts right)
    Left,
    /// Ship moves right (lattice shifts left)
    Right,
    Release,
}

impl Steer {
    /// Lateral speed sign
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Steer::Left => 1.0,
            Steer::Right => -1.0,
            Steer::Release => 0.0,
        }
    }
}

/// Drawable surface size, queried once per tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0) || !(self.height > 0.0)
    }
}

/// Motion and progress of one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Seed the current track was generated from
    pub seed: u64,
    pub phase: GamePhase,
    /// Rows travelled (monotonic within a run)
    pub scroll: f64,
    /// Lattice shift in lanes
    pub lateral_offset: f32,
    /// Lanes per second; written by input edges, zero unless running
    pub lateral_speed: f32,
    /// Rows crossed this run
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Delayed game-over cue, scheduled on crash
    pub crash_cue: OneShotTimer,
    /// Token of the cue scheduled for the current crash
    pub crash_cue_token: Option<TimerToken>,
}

impl SimulationState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Row the ship is on
    #[inline]
    pub fn current_row(&self) -> i32 {
        self.scroll.floor() as i32
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
