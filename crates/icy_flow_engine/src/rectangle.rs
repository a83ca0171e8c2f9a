use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::Position;

/// Axis aligned bounding box with inclusive corners.
///
/// Unlike a start/size rectangle both `min` and `max` are cells that belong to
/// the box, so a rectangle spanning a single cell has `min == max`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub min: Position,
    pub max: Position,
}

impl std::fmt::Display for Rectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(x:{}, y:{}, width: {}, height: {})", self.min.x, self.min.y, self.width(), self.height())
    }
}

impl Rectangle {
    /// Builds the box spanned by two arbitrary corners.
    pub fn from_pt(p1: impl Into<Position>, p2: impl Into<Position>) -> Self {
        let p1 = p1.into();
        let p2 = p2.into();
        Rectangle {
            min: p1.min(p2),
            max: p1.max(p2),
        }
    }

    pub fn from_coords(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::from_pt(Position::new(x1, y1), Position::new(x2, y2))
    }

    /// Bounding box of a set of points, `None` if the iterator is empty.
    pub fn bounding(points: impl IntoIterator<Item = Position>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Rectangle { min: first, max: first }, |rect, p| Rectangle {
            min: rect.min.min(p),
            max: rect.max.max(p),
        }))
    }

    /// Centre cell, rounded towards `min`.
    pub fn mid(&self) -> Position {
        Position::new((self.min.x + self.max.x).div_euclid(2), (self.min.y + self.max.y).div_euclid(2))
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }

    /// Number of cells covered, bounds inclusive.
    pub fn area(&self) -> i32 {
        self.width() * self.height()
    }

    /// True if the box collapses to a row or a column.
    pub fn is_degenerate(&self) -> bool {
        self.min.x == self.max.x || self.min.y == self.max.y
    }

    pub fn contains(&self, pos: impl Into<Position>) -> bool {
        let pos = pos.into();
        self.min.x <= pos.x && pos.x <= self.max.x && self.min.y <= pos.y && pos.y <= self.max.y
    }

    pub fn x_range_inclusive(&self) -> std::ops::RangeInclusive<i32> {
        self.min.x..=self.max.x
    }

    pub fn y_range_inclusive(&self) -> std::ops::RangeInclusive<i32> {
        self.min.y..=self.max.y
    }

    /// Every cell of the box, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.y_range_inclusive().flat_map(move |y| self.x_range_inclusive().map(move |x| Position::new(x, y)))
    }
}

impl Add<Position> for Rectangle {
    type Output = Rectangle;

    fn add(self, rhs: Position) -> Rectangle {
        Rectangle {
            min: self.min + rhs,
            max: self.max + rhs,
        }
    }
}

impl Sub<Position> for Rectangle {
    type Output = Rectangle;

    fn sub(self, rhs: Position) -> Rectangle {
        Rectangle {
            min: self.min - rhs,
            max: self.max - rhs,
        }
    }
}
