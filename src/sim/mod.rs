//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `Session::tick`
//! - Seeded RNG only
//! - Segments kept in generation order
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod frame;
pub mod grid;
pub mod projection;
pub mod state;
pub mod tick;
pub mod timer;
pub mod track;

pub use autopilot::autopilot;
pub use collision::{Contact, Ship, ShipFootprint, check_collision, find_contact};
pub use frame::Frame;
pub use grid::{Grid, GridCoordinate, Rect};
pub use projection::{Projector, project_2d, project_perspective};
pub use state::{GameEvent, GamePhase, SimulationState, Steer, Viewport};
pub use tick::{Session, TickInput, next_seed};
pub use timer::{OneShotTimer, TimerToken};
pub use track::{Course, Heading, TrackGenerator, TrackSegment, TrackState};
