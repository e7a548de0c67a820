//! Ship versus track collision detection
//!
//! A vertex-in-box test: the ship touches a segment when one of its three
//! corners lies inside the segment's rectangle, edges included. A tile edge
//! that only grazes the ship's sides between corners is not detected.

use glam::Vec2;

use super::Viewport;
use super::grid::{Grid, GridCoordinate, Rect};
use super::track::TrackSegment;
use crate::config::Config;

/// Fixed ship geometry, as fractions of the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ship {
    pub width: f32,
    pub height: f32,
    pub base_y: f32,
}

impl Ship {
    pub fn from_config(config: &Config) -> Self {
        Self {
            width: config.ship_width,
            height: config.ship_height,
            base_y: config.ship_base_y,
        }
    }

    /// Triangle in world space. The ship sits at the horizontal center of the
    /// viewport; steering moves the lattice, not the ship.
    ///
    /// ```text
    ///      1
    ///   0     2
    /// ```
    pub fn footprint(&self, viewport: Viewport) -> ShipFootprint {
        let center_x = viewport.width / 2.0;
        let base_y = self.base_y * viewport.height;
        let half_width = self.width * viewport.width / 2.0;
        let height = self.height * viewport.height;

        ShipFootprint {
            points: [
                Vec2::new(center_x - half_width, base_y),
                Vec2::new(center_x, base_y + height),
                Vec2::new(center_x + half_width, base_y),
            ],
        }
    }
}

/// The ship's triangle in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipFootprint {
    pub points: [Vec2; 3],
}

impl ShipFootprint {
    /// Whether any corner of the ship lies inside `rect`
    #[inline]
    pub fn touches(&self, rect: &Rect) -> bool {
        self.points.iter().any(|&p| rect.contains(p))
    }
}

/// First segment found under the ship
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub coord: GridCoordinate,
    pub rect: Rect,
}

/// Find the first live segment one of the ship's corners lies in.
///
/// Segments more than `row_margin` rows from the ship's row are skipped;
/// segments are ordered by row, so the scan stops at the first one past the
/// margin ahead.
pub fn find_contact<'a>(
    ship: &ShipFootprint,
    segments: impl IntoIterator<Item = &'a TrackSegment>,
    grid: &Grid,
    row_margin: i32,
) -> Option<Contact> {
    let row = grid.current_row;
    let ahead = row.saturating_add(row_margin);
    let behind = row.saturating_sub(row_margin);
    for segment in segments {
        let iy = segment.coord.iy;
        if iy > ahead {
            break;
        }
        if iy < behind {
            continue;
        }
        let rect = segment.footprint(grid);
        if ship.touches(&rect) {
            return Some(Contact {
                coord: segment.coord,
                rect,
            });
        }
    }
    None
}

/// Whether the ship touches any live segment near its row
#[inline]
pub fn check_collision<'a>(
    ship: &ShipFootprint,
    segments: impl IntoIterator<Item = &'a TrackSegment>,
    grid: &Grid,
    row_margin: i32,
) -> bool {
    find_contact(ship, segments, grid, row_margin).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEW: Viewport = Viewport::new(900.0, 400.0);

    fn setup(scroll: f64, lateral: f32) -> (Config, Grid, ShipFootprint) {
        let config = Config::default();
        let grid = Grid::new(VIEW, &config, scroll, lateral);
        let ship = Ship::from_config(&config).footprint(VIEW);
        (config, grid, ship)
    }

    fn segs(coords: &[(i32, i32)]) -> Vec<TrackSegment> {
        coords
            .iter()
            .map(|&(ix, iy)| TrackSegment {
                coord: GridCoordinate::new(ix, iy),
            })
            .collect()
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-3
    }

    #[test]
    fn test_ship_footprint_geometry() {
        let (_, _, ship) = setup(0.0, 0.0);
        assert!(approx(ship.points[0], Vec2::new(405.0, 16.0)));
        assert!(approx(ship.points[1], Vec2::new(450.0, 30.0)));
        assert!(approx(ship.points[2], Vec2::new(495.0, 16.0)));
    }

    #[test]
    fn test_empty_window_never_collides() {
        let (_, grid, ship) = setup(0.0, 0.0);
        let track: Vec<TrackSegment> = Vec::new();
        assert!(!check_collision(&ship, &track, &grid, 1));
    }

    #[test]
    fn test_ship_over_center_lane_collides() {
        let (_, grid, ship) = setup(0.0, 0.0);
        let track = segs(&[(0, 0), (0, 1)]);
        let contact = find_contact(&ship, &track, &grid, 1).unwrap();
        assert_eq!(contact.coord, GridCoordinate::new(0, 0));
    }

    #[test]
    fn test_footprint_outside_all_segments() {
        let (_, grid, ship) = setup(0.0, 0.0);
        let track = segs(&[(2, 0), (2, 1), (-2, 1)]);
        assert!(!check_collision(&ship, &track, &grid, 1));
    }

    #[test]
    fn test_corner_on_edge_counts() {
        // lane 1 starts at x = 630; steering 135px left puts its edge exactly
        // under the ship's right corner at x = 495
        let track = segs(&[(1, 0)]);
        let (_, grid, ship) = setup(0.0, -0.375);
        assert!(check_collision(&ship, &track, &grid, 1));

        let (_, grid, ship) = setup(0.0, -0.374);
        assert!(!check_collision(&ship, &track, &grid, 1));
    }

    #[test]
    fn test_far_rows_are_skipped() {
        let (_, grid, ship) = setup(0.0, 0.0);
        let track = segs(&[(0, 5)]);
        assert!(!check_collision(&ship, &track, &grid, 1));
        let track = segs(&[(0, -3), (3, 0)]);
        assert!(!check_collision(&ship, &track, &grid, 1));
    }

    #[test]
    fn test_scan_stops_at_first_row_past_margin() {
        let (_, grid, ship) = setup(0.0, 0.0);
        // out-of-order tail past the margin is never reached
        let track = segs(&[(3, 0), (0, 4), (0, 0)]);
        assert!(!check_collision(&ship, &track, &grid, 1));
    }

    #[test]
    fn test_huge_margin_scans_whole_window() {
        let (_, grid, ship) = setup(3.0, 0.0);
        let track = segs(&[(2, 1), (0, 3), (2, 9)]);
        assert!(check_collision(&ship, &track, &grid, i32::MAX));
        assert!(!check_collision(&ship, &segs(&[(2, 3)]), &grid, i32::MAX));
    }

    proptest! {
        #[test]
        fn prop_collision_iff_vertex_in_candidate(
            scroll in 0.0f64..50.0,
            lateral in -3.0f32..3.0,
            lanes in prop::collection::vec(-3i32..=3, 1..16),
        ) {
            let (config, grid, ship) = setup(scroll, lateral);
            let row = grid.current_row;
            let track: Vec<_> = lanes
                .iter()
                .enumerate()
                .map(|(i, &ix)| TrackSegment { coord: GridCoordinate::new(ix, row + i as i32 / 2) })
                .collect();

            let expected = track.iter().any(|s| {
                (s.coord.iy - row).abs() <= config.collision_row_margin
                    && ship.points.iter().any(|&p| s.footprint(&grid).contains(p))
            });
            prop_assert_eq!(
                check_collision(&ship, &track, &grid, config.collision_row_margin),
                expected
            );
        }
    }
}
