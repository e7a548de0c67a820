//! Lane/row lattice and its per-frame world-space layout
//!
//! World space is viewport pixels before projection, Y up from the bottom
//! edge. Lanes are `v_lines_spacing * width` wide and rows are
//! `h_lines_spacing * height` deep, so the layout follows viewport resizes.
//! The ship never moves on screen: steering shifts the lattice sideways and
//! scrolling slides it down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Viewport;
use crate::config::Config;

/// Logical position of one track segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoordinate {
    /// Lane index (0 is under the ship at rest)
    pub ix: i32,
    /// Row index, increasing with distance travelled
    pub iy: i32,
}

impl GridCoordinate {
    #[inline]
    pub const fn new(ix: i32, iy: i32) -> Self {
        Self { ix, iy }
    }
}

/// Axis-aligned world-space rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Inclusive of edges
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// Corners in draw order: bottom-left, top-left, top-right, bottom-right
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.min.x, self.max.y),
            self.max,
            Vec2::new(self.max.x, self.min.y),
        ]
    }
}

/// Per-frame layout of the lattice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub viewport: Viewport,
    /// X of the line pair around lane 0, before steering
    pub center_x: f32,
    pub lane_spacing: f32,
    pub row_spacing: f32,
    /// Row the ship is on
    pub current_row: i32,
    /// Pixels scrolled into the current row
    pub row_offset: f32,
    /// Pixels the lattice is shifted by steering
    pub lateral_px: f32,
    first_line: i32,
    v_nb_lines: u32,
    h_nb_lines: u32,
}

impl Grid {
    /// Layout for a scroll distance (rows) and lateral offset (lanes)
    pub fn new(viewport: Viewport, config: &Config, scroll: f64, lateral: f32) -> Self {
        let lane_spacing = config.v_lines_spacing * viewport.width;
        let row_spacing = config.h_lines_spacing * viewport.height;
        let row = scroll.floor();
        Self {
            viewport,
            center_x: viewport.width * config.vanishing_x,
            lane_spacing,
            row_spacing,
            current_row: row as i32,
            row_offset: (scroll - row) as f32 * row_spacing,
            lateral_px: lateral * lane_spacing,
            first_line: config.first_line_index(),
            v_nb_lines: config.v_nb_lines,
            h_nb_lines: config.h_nb_lines,
        }
    }

    /// World X of vertical line `index`
    #[inline]
    pub fn line_x(&self, index: i32) -> f32 {
        self.center_x + (index as f32 - 0.5) * self.lane_spacing + self.lateral_px
    }

    /// World Y of horizontal line `index` rows ahead of the current row
    #[inline]
    pub fn line_y(&self, index: i32) -> f32 {
        index as f32 * self.row_spacing - self.row_offset
    }

    /// World position of the lower-left corner of cell `(ix, iy)`
    #[inline]
    pub fn to_world(&self, ix: i32, iy: i32) -> Vec2 {
        Vec2::new(self.line_x(ix), self.line_y(iy - self.current_row))
    }

    /// World footprint of a segment
    pub fn footprint(&self, coord: GridCoordinate) -> Rect {
        Rect::new(
            self.to_world(coord.ix, coord.iy),
            self.to_world(coord.ix + 1, coord.iy + 1),
        )
    }

    /// Endpoints of every vertical line, bottom to top of the viewport
    pub fn vertical_lines(&self) -> Vec<[Vec2; 2]> {
        (self.first_line..self.first_line + self.v_nb_lines as i32)
            .map(|i| {
                let x = self.line_x(i);
                [Vec2::new(x, 0.0), Vec2::new(x, self.viewport.height)]
            })
            .collect()
    }

    /// Endpoints of every horizontal line, spanning the outer vertical lines
    pub fn horizontal_lines(&self) -> Vec<[Vec2; 2]> {
        let x_min = self.line_x(self.first_line);
        let x_max = self.line_x(self.first_line + self.v_nb_lines as i32 - 1);
        (0..self.h_nb_lines as i32)
            .map(|i| {
                let y = self.line_y(i);
                [Vec2::new(x_min, y), Vec2::new(x_max, y)]
            })
            .collect()
    }
}
