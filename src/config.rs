//! Game configuration
//!
//! Every numeric constant the simulation reads. Loaded once at startup and
//! treated as immutable for the lifetime of a session.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How a collision query result ends a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CrashPolicy {
    /// The ship must stay on the path; no tile under the ship is a crash
    #[default]
    LeavingTrack,
    /// Tiles are obstacles; touching one is a crash
    TouchingTile,
}

impl CrashPolicy {
    /// Whether a collision query result means the ship crashed
    #[inline]
    pub fn is_crash(&self, hit: bool) -> bool {
        match self {
            CrashPolicy::LeavingTrack => !hit,
            CrashPolicy::TouchingTile => hit,
        }
    }
}

/// World to screen mapping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Tunnel perspective (normal play)
    #[default]
    Perspective,
    /// Identity mapping for debugging
    Flat,
}

/// Errors from loading or validating a configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io(std::io::Error),
    /// The configuration text is not valid JSON for [`Config`].
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with.
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config: {e}"),
            Self::Parse(e) => write!(f, "failed to parse config: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid config field '{field}': {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Grid ===
    /// Number of vertical grid lines
    pub v_nb_lines: u32,
    /// Lane width as a fraction of viewport width
    pub v_lines_spacing: f32,
    /// Number of horizontal grid lines
    pub h_nb_lines: u32,
    /// Row depth as a fraction of viewport height
    pub h_lines_spacing: f32,

    // === Motion ===
    /// Forward speed (percent of viewport height per reference frame)
    pub speed: f32,
    /// Steering speed (percent of viewport width per reference frame)
    pub speed_x: f32,
    /// Frame rate the speeds above were tuned at
    pub reference_fps: f32,

    // === Track ===
    /// Maximum live segments
    pub nb_tiles: usize,
    /// Straight rows generated on reset
    pub prefill_rows: usize,
    /// Shortest committed turn (rows)
    pub turn_run_min: u32,
    /// Longest committed turn (rows)
    pub turn_run_max: u32,

    // === Collision ===
    /// Rows around the ship considered by the collision check
    pub collision_row_margin: i32,
    pub crash_policy: CrashPolicy,

    // === Ship ===
    /// Fraction of viewport width
    pub ship_width: f32,
    /// Fraction of viewport height
    pub ship_height: f32,
    /// Fraction of viewport height
    pub ship_base_y: f32,

    // === Projection ===
    /// Vanishing point X as a fraction of viewport width
    pub vanishing_x: f32,
    /// Vanishing point Y as a fraction of viewport height
    pub vanishing_y: f32,
    pub projection: ProjectionMode,

    // === Events ===
    /// Seconds from crash to the delayed game-over cue
    pub crash_cue_delay: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            v_nb_lines: V_NB_LINES,
            v_lines_spacing: V_LINES_SPACING,
            h_nb_lines: H_NB_LINES,
            h_lines_spacing: H_LINES_SPACING,

            speed: SPEED,
            speed_x: SPEED_X,
            reference_fps: REFERENCE_FPS,

            nb_tiles: NB_TILES,
            prefill_rows: PREFILL_ROWS,
            turn_run_min: TURN_RUN_MIN,
            turn_run_max: TURN_RUN_MAX,

            collision_row_margin: COLLISION_ROW_MARGIN,
            crash_policy: CrashPolicy::LeavingTrack,

            ship_width: SHIP_WIDTH,
            ship_height: SHIP_HEIGHT,
            ship_base_y: SHIP_BASE_Y,

            vanishing_x: VANISHING_X,
            vanishing_y: VANISHING_Y,
            projection: ProjectionMode::Perspective,

            crash_cue_delay: CRASH_CUE_DELAY,

            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
        }
    }
}

impl Config {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }
        fn unit(v: f32) -> bool {
            v > 0.0 && v <= 1.0
        }

        if self.v_nb_lines < 2 {
            return invalid("v_nb_lines", "need at least two lines to bound a lane");
        }
        if self.v_nb_lines > MAX_NB_LINES {
            return invalid("v_nb_lines", "too many lines");
        }
        if !(self.v_lines_spacing > 0.0) {
            return invalid("v_lines_spacing", "must be positive");
        }
        if self.h_nb_lines == 0 || self.h_nb_lines > MAX_NB_LINES {
            return invalid("h_nb_lines", "must be in 1..=1024");
        }
        if !(self.h_lines_spacing > 0.0) {
            return invalid("h_lines_spacing", "must be positive");
        }
        if !(self.speed >= 0.0) || !(self.speed_x >= 0.0) {
            return invalid("speed", "speeds must be non-negative");
        }
        if !(self.reference_fps > 0.0) {
            return invalid("reference_fps", "must be positive");
        }
        if self.nb_tiles == 0 {
            return invalid("nb_tiles", "must be at least one");
        }
        if self.turn_run_min == 0 || self.turn_run_min > self.turn_run_max {
            return invalid("turn_run_min", "must be in 1..=turn_run_max");
        }
        if self.collision_row_margin < 0 {
            return invalid("collision_row_margin", "must be non-negative");
        }
        if !unit(self.ship_width) || !unit(self.ship_height) || !(self.ship_base_y >= 0.0) {
            return invalid("ship", "ship geometry must be a fraction of the viewport");
        }
        if !unit(self.vanishing_x) || !unit(self.vanishing_y) {
            return invalid("vanishing", "vanishing point must be in (0, 1]");
        }
        if !(self.crash_cue_delay >= 0.0) {
            return invalid("crash_cue_delay", "must be non-negative");
        }
        for (field, v) in [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
            ("music_volume", self.music_volume),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return invalid(field, "volume must be in [0, 1]");
            }
        }
        Ok(())
    }

    /// Forward speed in rows per second
    pub fn rows_per_second(&self) -> f32 {
        self.speed * self.reference_fps / 100.0 / self.h_lines_spacing
    }

    /// Steering speed in lanes per second
    pub fn lanes_per_second(&self) -> f32 {
        self.speed_x * self.reference_fps / 100.0 / self.v_lines_spacing
    }

    /// Index of the leftmost vertical line (lines are centered on 0)
    pub fn first_line_index(&self) -> i32 {
        -(self.v_nb_lines as i32 / 2) + 1
    }

    /// Index of the rightmost vertical line
    pub fn last_line_index(&self) -> i32 {
        self.first_line_index() + self.v_nb_lines as i32 - 1
    }

    /// Lanes the path may occupy: every tile stays between the outer lines
    pub fn lane_range(&self) -> std::ops::RangeInclusive<i32> {
        self.first_line_index()..=self.last_line_index() - 1
    }
}
