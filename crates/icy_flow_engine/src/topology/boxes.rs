//! Closed box detection
//!
//! A box is any closed loop of drawing characters. The boundary is found by
//! walking from a start cell, going straight while possible and turning at
//! corners, until the walk arrives back at the start.

use std::collections::HashMap;

use crate::{Direction, FlowError, Grid, Position, Rectangle, Result, topology::MAX_STEPS};

/// Order in which the first walking direction is chosen.
pub const INITIAL_DIRECTION_PRIORITY: [Direction; 4] = [Direction::Right, Direction::Down, Direction::Up, Direction::Left];

/// Order in which turns are tried when the walk cannot go straight.
pub const BOX_TURN_PRIORITY: [Direction; 4] = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];

/// A closed boundary found by [`detect_box`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoxShape {
    /// Boundary cells in walk order, starting with the probed cell.
    pub points: Vec<Position>,
    pub bounds: Rectangle,
    /// Boundary cells with three or more drawing neighbours.
    pub connectors: Vec<Position>,
}

impl BoxShape {
    fn new(grid: &Grid, points: Vec<Position>) -> Option<Self> {
        let bounds = get_box(&points)?;
        let connectors = get_end_points(grid, &points);
        Some(Self { points, bounds, connectors })
    }
}

enum WalkStep {
    Advanced,
    Closed,
    DeadEnd,
    Stuck,
}

/// Boundary walk state: current cell and heading plus the turns already taken at
/// each vertex.
struct BoxWalker {
    origin: Position,
    position: Position,
    direction: Direction,
    turned: HashMap<Position, u8>,
    points: Vec<Position>,
}

impl BoxWalker {
    fn new(origin: Position, direction: Direction) -> Self {
        Self {
            origin,
            position: origin,
            direction,
            turned: HashMap::new(),
            points: vec![origin],
        }
    }

    fn step(&mut self, grid: &Grid) -> WalkStep {
        if grid.get_pixel_context(self.position).length() < 2 {
            return WalkStep::DeadEnd;
        }

        if !grid.is_draw_char(self.position + self.direction) {
            let turned = self.turned.entry(self.position).or_default();
            let reverse = self.direction.opposite();
            let Some(next) = BOX_TURN_PRIORITY
                .into_iter()
                .find(|d| *d != reverse && *turned & d.bit() == 0 && grid.is_draw_char(self.position + *d))
            else {
                return WalkStep::Stuck;
            };
            *turned |= next.bit();
            self.direction = next;
        }

        let next = self.position + self.direction;
        if next == self.origin {
            return WalkStep::Closed;
        }
        self.position = next;
        self.points.push(next);
        WalkStep::Advanced
    }
}

/// Finds the closed loop of drawing characters running through `pos`.
///
/// Returns `None` if `pos` is not a drawing character, the walk reaches a dead
/// end or cannot turn, or no loop closes within [`MAX_STEPS`].
pub fn detect_box(grid: &Grid, pos: Position) -> Option<BoxShape> {
    if !grid.is_draw_char(pos) {
        return None;
    }
    let direction = INITIAL_DIRECTION_PRIORITY.into_iter().find(|d| grid.is_draw_char(pos + *d))?;
    let mut walker = BoxWalker::new(pos, direction);

    for _ in 0..MAX_STEPS {
        match walker.step(grid) {
            WalkStep::Advanced => {}
            WalkStep::Closed => return BoxShape::new(grid, walker.points),
            WalkStep::DeadEnd => {
                log::trace!("box walk from {pos} reached a dead end at {}", walker.position);
                return None;
            }
            WalkStep::Stuck => {
                log::trace!("box walk from {pos} found no turn at {}", walker.position);
                return None;
            }
        }
    }
    log::warn!("box walk from {pos} hit the step limit");
    None
}

/// Bounding box of a boundary loop.
pub fn get_box(points: &[Position]) -> Option<Rectangle> {
    Rectangle::bounding(points.iter().copied())
}

/// Loop cells where other lines attach (three or more drawing neighbours).
pub fn get_end_points(grid: &Grid, points: &[Position]) -> Vec<Position> {
    points.iter().copied().filter(|p| grid.get_pixel_context(*p).length() >= 3).collect()
}

/// True if every cell of `area` holds a drawing character and the area is
/// neither a single row nor a single column.
///
/// # Errors
///
/// Returns `OutOfBounds` if a corner of `area` lies outside the grid.
pub fn is_draw_char_area(grid: &Grid, area: Rectangle) -> Result<bool> {
    for corner in [area.min, area.max] {
        if grid.is_out_of_bounds(corner) {
            return Err(FlowError::OutOfBounds { pos: corner });
        }
    }
    if area.is_degenerate() {
        return Ok(false);
    }
    Ok(area.positions().all(|p| grid.is_draw_char(p)))
}
