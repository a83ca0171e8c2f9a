//! Connection tracing
//!
//! Follows a line leaving a box connector until it ends, so the line can be
//! redrawn when the box moves.

use crate::{
    Direction, Grid, Position,
    glyphs::is_arrow,
    topology::{BoxShape, LineMode, MAX_STEPS},
};

/// Order in which the tracer picks the next direction along a line.
pub const LINE_TURN_PRIORITY: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

/// A traced line from a box connector to its far end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    /// At least two cells; the first is the connector, the last the far end
    /// (an arrow head if the line carries one).
    points: Vec<Position>,
}

impl Connection {
    /// Wraps a traced path. Returns `None` for paths shorter than two cells.
    pub fn new(points: Vec<Position>) -> Option<Self> {
        (points.len() >= 2).then_some(Self { points })
    }

    pub fn points(&self) -> &[Position] {
        &self.points
    }

    pub fn start(&self) -> Position {
        self.points[0]
    }

    pub fn end(&self) -> Position {
        self.points[self.points.len() - 1]
    }

    /// Heading of the first step away from the connector.
    pub fn start_direction(&self) -> Option<Direction> {
        Direction::from_offset(self.points[1] - self.points[0])
    }

    /// Heading of the last step into the far end.
    pub fn end_direction(&self) -> Option<Direction> {
        let n = self.points.len();
        Direction::from_offset(self.points[n - 1] - self.points[n - 2])
    }

    /// Line mode that reproduces the connection's tangents when redrawn.
    pub fn redraw_mode(&self) -> LineMode {
        let start = self.start_direction().is_some_and(Direction::is_horizontal);
        let end = self.end_direction().is_some_and(Direction::is_horizontal);
        match (start, end) {
            (true, true) => LineMode::HorizontalHorizontal,
            (false, false) => LineMode::VerticalVertical,
            (true, false) => LineMode::HorizontalFirst,
            (false, true) => LineMode::VerticalFirst,
        }
    }
}

/// Traces the line leaving `pos` in `direction` and returns its full path,
/// starting with `pos`.
///
/// Returns `None` if there is no line in that direction or the line runs into
/// a junction before reaching a dead end.
pub fn get_line_points(grid: &Grid, pos: Position, direction: Direction) -> Option<Vec<Position>> {
    let mut points = vec![pos];
    let mut position = pos;
    let mut direction = direction;

    for _ in 0..MAX_STEPS {
        let next = position + direction;
        if !grid.is_draw_char(next) {
            return None;
        }
        position = next;
        points.push(position);

        let ctx = grid.get_pixel_context(position);
        if ctx.length() >= 3 {
            log::trace!("line from {pos} runs into junction {position}");
            return None;
        }

        let reverse = direction.opposite();
        match LINE_TURN_PRIORITY.into_iter().find(|d| *d != reverse && ctx.has(*d)) {
            Some(d) => direction = d,
            None => {
                let tip = position + direction;
                if grid.get_value(tip).is_some_and(is_arrow) {
                    points.push(tip);
                }
                return Some(points);
            }
        }
    }
    log::warn!("line trace from {pos} hit the step limit");
    None
}

/// Traces every line leaving the box through one of its connectors.
pub fn detect_connections(grid: &Grid, shape: &BoxShape) -> Vec<Connection> {
    let mut result = Vec::new();
    for connector in &shape.connectors {
        for direction in Direction::ALL {
            let next = *connector + direction;
            if shape.bounds.contains(next) || !grid.is_draw_char(next) {
                continue;
            }
            if let Some(connection) = get_line_points(grid, *connector, direction).and_then(Connection::new) {
                result.push(connection);
            }
        }
    }
    result
}
