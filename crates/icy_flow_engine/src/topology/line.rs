//! Line synthesis
//!
//! Lines are axis aligned: a straight line is one horizontal and one vertical
//! run joined at a corner, a stepped line is three runs meeting at the midpoint
//! axis between start and end.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    Direction, FlowError, Grid, Position, Rectangle, Result,
    glyphs::{is_accepted, is_blank},
    pixel::PendingValue,
};

/// How `draw_line` routes between two points.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineMode {
    /// Horizontal run at `start.y`, then vertical run at `end.x`.
    HorizontalFirst,
    /// Vertical run at `start.x`, then horizontal run at `end.y`.
    VerticalFirst,
    /// Horizontal, vertical, horizontal; the vertical leg sits on the middle column.
    HorizontalHorizontal,
    /// Vertical, horizontal, vertical; the horizontal leg sits on the middle row.
    VerticalVertical,
    /// Resolves to [`BEST_LINE_MODE`].
    #[default]
    Best,
}

/// The strategy `LineMode::Best` uses. Fixed policy, not inferred from the grid.
pub const BEST_LINE_MODE: LineMode = LineMode::HorizontalHorizontal;

impl LineMode {
    pub fn resolve(self) -> LineMode {
        if self == LineMode::Best { BEST_LINE_MODE } else { self }
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

struct LinePainter<'a> {
    grid: &'a mut Grid,
    value: PendingValue,
    omit_intersections: bool,
    /// Cells this line has staged so far.
    painted: HashSet<Position>,
}

impl LinePainter<'_> {
    fn plot(&mut self, pos: Position, axis: Axis) {
        let value = if self.omit_intersections && self.is_crossing(pos, axis) {
            PendingValue::Erase
        } else {
            self.value
        };
        self.grid.stage(pos, value);
        self.painted.insert(pos);
    }

    /// A cell flanked on both sides of the perpendicular axis already belongs
    /// to another line. Cells of this line's own legs don't count.
    fn is_crossing(&self, pos: Position, axis: Axis) -> bool {
        let existing = |direction: Direction| {
            let neighbour = pos + direction;
            !self.painted.contains(&neighbour) && self.grid.is_draw_char(neighbour)
        };
        match axis {
            Axis::Horizontal => existing(Direction::Up) && existing(Direction::Down),
            Axis::Vertical => existing(Direction::Left) && existing(Direction::Right),
        }
    }

    fn straight(&mut self, start: Position, end: Position, horizontal_first: bool) {
        let rect = Rectangle::from_pt(start, end);
        if horizontal_first {
            for x in rect.x_range_inclusive() {
                self.plot(Position::new(x, start.y), Axis::Horizontal);
            }
            for y in rect.y_range_inclusive() {
                self.plot(Position::new(end.x, y), Axis::Vertical);
            }
        } else {
            for y in rect.y_range_inclusive() {
                self.plot(Position::new(start.x, y), Axis::Vertical);
            }
            for x in rect.x_range_inclusive() {
                self.plot(Position::new(x, end.y), Axis::Horizontal);
            }
        }
    }

    fn stepped(&mut self, start: Position, end: Position, horizontal: bool) {
        if horizontal {
            let mid_x = (start.x + end.x).div_euclid(2);
            let a = Position::new(mid_x, start.y);
            let b = Position::new(mid_x, end.y);
            self.straight(start, a, true);
            self.straight(a, b, false);
            self.straight(b, end, true);
        } else {
            let mid_y = (start.y + end.y).div_euclid(2);
            let a = Position::new(start.x, mid_y);
            let b = Position::new(end.x, mid_y);
            self.straight(start, a, false);
            self.straight(a, b, true);
            self.straight(b, end, false);
        }
    }
}

/// Stages a line of `glyph` from `start` to `end`.
///
/// With `omit_intersections` a cell that already sits between two line cells on
/// the perpendicular axis is staged blank instead of `glyph`. Every visited cell
/// is staged either way, so a rollback removes the whole preview.
///
/// # Errors
///
/// Returns `UnrecognizedCharacter` if `glyph` is not an accepted glyph. Nothing
/// is staged in that case.
pub fn draw_line(grid: &mut Grid, start: Position, end: Position, mode: LineMode, glyph: char, omit_intersections: bool) -> Result<()> {
    if !is_blank(glyph) && !is_accepted(glyph) {
        return Err(FlowError::unrecognized(glyph));
    }
    let mut painter = LinePainter {
        grid,
        value: PendingValue::from_char(glyph),
        omit_intersections,
        painted: HashSet::new(),
    };
    match mode.resolve() {
        LineMode::HorizontalFirst => painter.straight(start, end, true),
        LineMode::VerticalFirst => painter.straight(start, end, false),
        LineMode::HorizontalHorizontal => painter.stepped(start, end, true),
        LineMode::VerticalVertical | LineMode::Best => painter.stepped(start, end, false),
    }
    Ok(())
}
