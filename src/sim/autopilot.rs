//! Demo-mode pilot
//!
//! Steers the ship toward the lane the track continues in one row past the
//! ship's nose. Used by the headless driver and in attract mode.

use super::grid::Grid;
use super::state::{Steer, Viewport};
use super::tick::Session;
use super::track::TrackSegment;

/// How far off a lane center (in lanes) the ship may drift before steering
pub const DEADBAND: f32 = 0.15;

/// Lane of the first segment laid in `row`, which is where the path enters it
pub fn target_lane<'a>(
    segments: impl IntoIterator<Item = &'a TrackSegment>,
    row: i32,
) -> Option<i32> {
    segments
        .into_iter()
        .find(|s| s.coord.iy == row)
        .map(|s| s.coord.ix)
}

/// Ship position in lane units; lane `ix` spans `[ix, ix + 1)`
pub fn ship_lane(grid: &Grid) -> f32 {
    if grid.lane_spacing > 0.0 {
        (grid.viewport.width / 2.0 - grid.line_x(0)) / grid.lane_spacing
    } else {
        0.5
    }
}

pub fn choose_steer(ship_lane: f32, target_lane: i32, deadband: f32) -> Steer {
    let error = target_lane as f32 + 0.5 - ship_lane;
    if error > deadband {
        Steer::Right
    } else if error < -deadband {
        Steer::Left
    } else {
        Steer::Release
    }
}

/// Steering decision for the current tick
pub fn autopilot(session: &Session, viewport: Viewport) -> Steer {
    let config = session.config();
    let nose = if config.h_lines_spacing > 0.0 {
        (config.ship_base_y + config.ship_height) / config.h_lines_spacing
    } else {
        0.0
    };
    let nose_row = (session.state().scroll + f64::from(nose)).floor() as i32;

    let grid = session.grid(viewport);
    match target_lane(session.track().segments(), nose_row + 1) {
        Some(lane) => choose_steer(ship_lane(&grid), lane, DEADBAND),
        None => Steer::Release,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::consts::SIM_DT;
    use crate::sim::grid::GridCoordinate;
    use crate::sim::state::GamePhase;

    const VIEW: Viewport = Viewport::new(900.0, 400.0);

    #[test]
    fn test_target_lane_is_first_in_row() {
        let track: Vec<_> = [(0, 3), (1, 3), (1, 4), (2, 4)]
            .iter()
            .map(|&(ix, iy)| TrackSegment {
                coord: GridCoordinate::new(ix, iy),
            })
            .collect();
        assert_eq!(target_lane(&track, 3), Some(0));
        assert_eq!(target_lane(&track, 4), Some(1));
        assert_eq!(target_lane(&track, 9), None);
    }

    #[test]
    fn test_ship_lane_at_rest_is_lane_zero_center() {
        let grid = Grid::new(VIEW, &Config::default(), 0.0, 0.0);
        assert!((ship_lane(&grid) - 0.5).abs() < 1e-5);

        // lattice shifted one lane left puts the ship over lane 1
        let grid = Grid::new(VIEW, &Config::default(), 0.0, -1.0);
        assert!((ship_lane(&grid) - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_choose_steer() {
        assert_eq!(choose_steer(0.5, 0, DEADBAND), Steer::Release);
        assert_eq!(choose_steer(0.5, 1, DEADBAND), Steer::Right);
        assert_eq!(choose_steer(0.5, -1, DEADBAND), Steer::Left);
        assert_eq!(choose_steer(0.6, 0, DEADBAND), Steer::Release);
    }

    #[test]
    fn test_autopilot_keeps_running_on_prefill() {
        let mut session = Session::new(Config::default(), 9);
        session.start();
        for _ in 0..120 {
            let steer = autopilot(&session, VIEW);
            session.steer(steer);
            session.tick(SIM_DT, VIEW);
        }
        assert_eq!(session.phase(), GamePhase::Running);
        assert!(session.score() >= 6);
    }
}
