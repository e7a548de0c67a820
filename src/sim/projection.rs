//! Pseudo-3D tunnel projection
//!
//! Maps flat world coordinates (viewport pixels, Y up from the bottom edge)
//! onto the screen so the grid converges toward a vanishing point. The
//! quartic falloff packs rows tightly near the horizon.

use glam::{IVec2, Vec2};

use super::Viewport;
use crate::config::{Config, ProjectionMode};

/// Perspective mapping of a single point
///
/// Falls back to the identity mapping when the viewport height or the
/// vanishing point height is not positive.
pub fn project_perspective(
    x: f32,
    y: f32,
    _viewport_width: f32,
    viewport_height: f32,
    vanishing_x: f32,
    vanishing_y: f32,
) -> IVec2 {
    if !(viewport_height > 0.0) || !(vanishing_y > 0.0) {
        return project_2d(x, y);
    }

    let lin_y = (y * vanishing_y / viewport_height).min(vanishing_y);

    let diff_x = x - vanishing_x;
    let diff_y = vanishing_y - lin_y;

    let factor = (diff_y / vanishing_y).powi(4);

    let screen_x = vanishing_x + diff_x * factor;
    let screen_y = vanishing_y - factor * vanishing_y;

    IVec2::new(screen_x as i32, screen_y as i32)
}

/// Identity mapping (debug view without perspective)
#[inline]
pub fn project_2d(x: f32, y: f32) -> IVec2 {
    IVec2::new(x as i32, y as i32)
}

/// Projection parameters for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub width: f32,
    pub height: f32,
    pub vanishing: Vec2,
    pub mode: ProjectionMode,
}

impl Projector {
    /// Derive the vanishing point from the current viewport
    pub fn for_viewport(viewport: Viewport, config: &Config) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            vanishing: Vec2::new(
                viewport.width * config.vanishing_x,
                viewport.height * config.vanishing_y,
            ),
            mode: config.projection,
        }
    }

    /// Whether perspective math can run on this viewport
    pub fn is_degenerate(&self) -> bool {
        !(self.height > 0.0) || !(self.vanishing.y > 0.0)
    }

    #[inline]
    pub fn project(&self, p: Vec2) -> IVec2 {
        match self.mode {
            ProjectionMode::Perspective => project_perspective(
                p.x,
                p.y,
                self.width,
                self.height,
                self.vanishing.x,
                self.vanishing.y,
            ),
            ProjectionMode::Flat => project_2d(p.x, p.y),
        }
    }

    pub fn project_all<const N: usize>(&self, points: [Vec2; N]) -> [IVec2; N] {
        points.map(|p| self.project(p))
    }
}
