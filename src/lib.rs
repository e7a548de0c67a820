//! Galaxy Runner - a pseudo-3D endless runner core
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (projection, track generation, collisions, game loop)
//! - `config`: Data-driven constants, loadable from JSON
//! - `input`: Keyboard/touch edges mapped to steering and menu triggers
//! - `audio`: Game events mapped to sound cues for an external player

pub mod audio;
pub mod config;
pub mod input;
pub mod sim;

pub use config::{Config, ConfigError, CrashPolicy};
pub use sim::{Frame, GameEvent, GamePhase, Session, Steer, Viewport};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest dt a single tick will integrate
    pub const MAX_TICK_DT: f32 = 0.25;

    /// Grid defaults
    pub const V_NB_LINES: u32 = 8;
    pub const V_LINES_SPACING: f32 = 0.4; // fraction of viewport width
    pub const H_NB_LINES: u32 = 8;
    /// Upper bound on either line count
    pub const MAX_NB_LINES: u32 = 1024;
    pub const H_LINES_SPACING: f32 = 0.15; // fraction of viewport height

    /// Motion defaults, in percent of the viewport per reference frame
    pub const SPEED: f32 = 0.8;
    pub const SPEED_X: f32 = 3.5;
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Track window defaults
    pub const NB_TILES: usize = 16;
    pub const PREFILL_ROWS: usize = 10;
    pub const TURN_RUN_MIN: u32 = 2;
    pub const TURN_RUN_MAX: u32 = 3;
    pub const COLLISION_ROW_MARGIN: i32 = 1;

    /// Ship defaults, as fractions of the viewport
    pub const SHIP_WIDTH: f32 = 0.1;
    pub const SHIP_HEIGHT: f32 = 0.035;
    pub const SHIP_BASE_Y: f32 = 0.04;

    /// Vanishing point, as fractions of the viewport
    pub const VANISHING_X: f32 = 0.5;
    pub const VANISHING_Y: f32 = 0.75;

    /// Seconds between the crash and the game-over voice
    pub const CRASH_CUE_DELAY: f32 = 3.0;
}
