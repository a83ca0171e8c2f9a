use crate::{Direction, Grid, Position};

/// Which of the four axis neighbours of a cell hold drawing characters.
///
/// `length()` is the main branch key of the topology engine:
/// 0 isolated, 1 dead end, 2 segment or corner, 3 T-junction, 4 crossing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelContext {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl PixelContext {
    /// Probes the four neighbours of `pos`, reading staged values.
    pub fn probe(grid: &Grid, pos: Position) -> Self {
        Self {
            left: grid.is_draw_char(pos + Direction::Left),
            right: grid.is_draw_char(pos + Direction::Right),
            top: grid.is_draw_char(pos + Direction::Up),
            bottom: grid.is_draw_char(pos + Direction::Down),
        }
    }

    pub fn length(&self) -> usize {
        usize::from(self.left) + usize::from(self.right) + usize::from(self.top) + usize::from(self.bottom)
    }

    pub fn has(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.top,
            Direction::Down => self.bottom,
        }
    }

    /// Neighbours that are set, in `Direction::ALL` order.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.has(*d))
    }

    /// 4-bit adjacency pattern (left = 1, right = 2, top = 4, bottom = 8).
    pub fn pattern(&self) -> u8 {
        self.directions().fold(0, |bits, d| bits | d.bit())
    }

    pub fn from_pattern(pattern: u8) -> Self {
        Self {
            left: pattern & Direction::Left.bit() != 0,
            right: pattern & Direction::Right.bit() != 0,
            top: pattern & Direction::Up.bit() != 0,
            bottom: pattern & Direction::Down.bit() != 0,
        }
    }
}
