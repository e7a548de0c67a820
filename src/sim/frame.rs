//! Screen-space geometry handed to the renderer each tick

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::ShipFootprint;
use super::grid::Grid;
use super::projection::Projector;
use super::track::TrackSegment;

/// Everything the external draw step needs for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Left base, apex, right base
    pub ship: [IVec2; 3],
    /// Bottom-left, top-left, top-right, bottom-right per live segment
    pub tiles: Vec<[IVec2; 4]>,
    pub vertical_lines: Vec<[IVec2; 2]>,
    pub horizontal_lines: Vec<[IVec2; 2]>,
}

impl Frame {
    pub fn build<'a>(
        projector: &Projector,
        grid: &Grid,
        ship: &ShipFootprint,
        segments: impl IntoIterator<Item = &'a TrackSegment>,
    ) -> Self {
        Self {
            ship: projector.project_all(ship.points),
            tiles: segments
                .into_iter()
                .map(|s| projector.project_all(s.footprint(grid).corners()))
                .collect(),
            vertical_lines: grid
                .vertical_lines()
                .into_iter()
                .map(|line| projector.project_all(line))
                .collect(),
            horizontal_lines: grid
                .horizontal_lines()
                .into_iter()
                .map(|line| projector.project_all(line))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::Viewport;
    use crate::sim::collision::Ship;
    use crate::sim::grid::GridCoordinate;

    #[test]
    fn test_frame_projects_every_element() {
        let config = Config::default();
        let view = Viewport::new(900.0, 400.0);
        let projector = Projector::for_viewport(view, &config);
        let grid = Grid::new(view, &config, 0.0, 0.0);
        let ship = Ship::from_config(&config).footprint(view);
        let segments = [
            TrackSegment { coord: GridCoordinate::new(0, 0) },
            TrackSegment { coord: GridCoordinate::new(0, 1) },
        ];

        let frame = Frame::build(&projector, &grid, &ship, &segments);
        assert_eq!(frame.tiles.len(), 2);
        assert_eq!(frame.vertical_lines.len(), 8);
        assert_eq!(frame.horizontal_lines.len(), 8);

        // the near edge of the first tile sits on the bottom of the screen
        assert_eq!(frame.tiles[0][0], IVec2::new(270, 0));
        assert_eq!(frame.tiles[0][3], IVec2::new(630, 0));
        // its far edge is pulled toward the vanishing point
        assert!(frame.tiles[0][1].x > 270);
        assert!(frame.tiles[0][1].y > 0);
        // the ship apex stays on the center column
        assert_eq!(frame.ship[1].x, 450);
    }
}
