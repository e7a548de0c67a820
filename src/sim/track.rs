//! Procedural track generation
//!
//! The path is infinite in one direction but only a sliding window of it is
//! ever alive: segments behind the ship are evicted and new ones are appended
//! ahead until the window is full again.
//!
//! Generation is driven by a small course state machine. A heading is rolled
//! uniformly from {straight, right, left}; a turn commits to a run of several
//! rows. Each turned row first lays a shoulder segment one lane over in the
//! same row, then advances, so the path forms a staircase the ship can follow
//! instead of touching only at corners.

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Grid, GridCoordinate, Rect};
use crate::config::Config;

/// Direction the path is heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Heading {
    #[default]
    Straight,
    Left,
    Right,
}

impl Heading {
    /// Lane step per turned row
    #[inline]
    pub fn delta(&self) -> i32 {
        match self {
            Heading::Straight => 0,
            Heading::Left => -1,
            Heading::Right => 1,
        }
    }

    fn from_roll(roll: u32) -> Self {
        match roll {
            0 => Heading::Straight,
            1 => Heading::Right,
            _ => Heading::Left,
        }
    }
}

/// Current run of the course state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Course {
    pub heading: Heading,
    /// Rows left before the next roll
    pub rows_left: u32,
    /// Shoulder already laid for the row being built
    pub shifted: bool,
}

impl Course {
    fn exhausted(&self) -> bool {
        self.rows_left == 0
    }
}

/// One generated unit of path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub coord: GridCoordinate,
}

impl TrackSegment {
    /// World-space footprint for this frame's layout
    #[inline]
    pub fn footprint(&self, grid: &Grid) -> Rect {
        grid.footprint(self.coord)
    }
}

/// Live window of the path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackState {
    /// Ordered by row, oldest first
    pub segments: VecDeque<TrackSegment>,
    /// Last coordinate ever generated (survives eviction)
    pub last: Option<GridCoordinate>,
    pub course: Course,
}

/// Owns the track window and its generation rules
#[derive(Debug, Clone)]
pub struct TrackGenerator {
    state: TrackState,
    rng: Pcg32,
    nb_tiles: usize,
    lanes: RangeInclusive<i32>,
    turn_run: RangeInclusive<u32>,
}

impl TrackGenerator {
    pub fn new(config: &Config, seed: u64) -> Self {
        let run_min = config.turn_run_min.max(1);
        let run_max = config.turn_run_max.max(run_min);
        Self {
            state: TrackState::default(),
            rng: Pcg32::seed_from_u64(seed),
            nb_tiles: config.nb_tiles,
            lanes: config.lane_range(),
            turn_run: run_min..=run_max,
        }
    }

    /// Drop every segment and reseed
    pub fn reset(&mut self, seed: u64) {
        self.state = TrackState::default();
        self.rng = Pcg32::seed_from_u64(seed);
    }

    pub fn state(&self) -> &TrackState {
        &self.state
    }

    pub fn segments(&self) -> &VecDeque<TrackSegment> {
        &self.state.segments
    }

    pub fn len(&self) -> usize {
        self.state.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.segments.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.nb_tiles
    }

    pub fn lanes(&self) -> RangeInclusive<i32> {
        self.lanes.clone()
    }

    /// Lay `count` straight segments in lane 0 starting at `current_row`,
    /// or continue straight from the last segment if the window is not empty
    pub fn prefill(&mut self, count: usize, current_row: i32) {
        let room = self.nb_tiles.saturating_sub(self.len());
        for _ in 0..count.min(room) {
            let coord = match self.state.last {
                Some(last) if !self.is_empty() => GridCoordinate::new(last.ix, last.iy + 1),
                _ => GridCoordinate::new(0, current_row),
            };
            self.push(coord);
        }
        // next extension rolls a fresh heading
        self.state.course = Course::default();
    }

    /// Evict segments behind `current_row`, then refill the window
    pub fn tick(&mut self, current_row: i32) {
        self.evict(current_row);
        self.extend(current_row);
    }

    fn evict(&mut self, current_row: i32) {
        while let Some(front) = self.state.segments.front() {
            if front.coord.iy >= current_row {
                break;
            }
            self.state.segments.pop_front();
        }
    }

    fn extend(&mut self, current_row: i32) {
        if let Some(last) = self.state.last {
            if last.iy < current_row {
                // the whole window fell behind; resume straight at the current row
                log::debug!("Track caught up from row {} to {}", last.iy, current_row);
                self.state.last = Some(GridCoordinate::new(last.ix, current_row - 1));
                self.state.course = Course {
                    heading: Heading::Straight,
                    rows_left: 1,
                    shifted: false,
                };
            }
        }

        while self.len() < self.nb_tiles {
            let coord = self.next_coordinate(current_row);
            self.push(coord);
        }
    }

    fn push(&mut self, coord: GridCoordinate) {
        self.state.segments.push_back(TrackSegment { coord });
        self.state.last = Some(coord);
    }

    /// One step of the course state machine
    fn next_coordinate(&mut self, current_row: i32) -> GridCoordinate {
        let Some(last) = self.state.last else {
            return GridCoordinate::new(0, current_row);
        };

        if self.state.course.exhausted() {
            self.state.course = self.roll(last.ix);
        }

        let course = &mut self.state.course;
        let delta = course.heading.delta();
        if delta != 0 && !course.shifted {
            if self.lanes.contains(&(last.ix + delta)) {
                course.shifted = true;
                return GridCoordinate::new(last.ix + delta, last.iy);
            }
            // the turn would leave the lanes; finish this row straight
            course.heading = Heading::Straight;
            course.rows_left = 1;
        }

        course.shifted = false;
        course.rows_left = course.rows_left.saturating_sub(1);
        GridCoordinate::new(last.ix, last.iy + 1)
    }

    /// Pick the next heading, steering away from the lane bounds
    fn roll(&mut self, ix: i32) -> Course {
        let mut heading = Heading::from_roll(self.rng.random_range(0..3));
        if ix <= *self.lanes.start() {
            heading = Heading::Right;
        }
        if ix >= *self.lanes.end() {
            heading = Heading::Left;
        }

        let rows_left = match heading {
            Heading::Straight => 1,
            Heading::Left | Heading::Right => self.rng.random_range(self.turn_run.clone()),
        };
        log::debug!("Track heading {:?} for {} rows from lane {}", heading, rows_left, ix);

        Course {
            heading,
            rows_left,
            shifted: false,
        }
    }
}
