//! Endpoint and run detection
//!
//! Walks along straight runs of drawing characters to find where a line ends
//! and which junctions it passes on the way. The result drives tool decisions
//! such as "this is a movable line" or "this is a resizable box side".

use crate::{
    Direction, Grid, PixelContext, Position,
    glyphs::is_arrow,
    topology::MAX_STEPS,
};

/// Child endpoints are probed from junctions to this depth and no further.
pub const CHILD_PROBE_DEPTH: usize = 1;

/// Result of walking a straight run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunEnd {
    /// Last drawing character reached.
    pub end: Position,
    /// Cells with three or more drawing neighbours passed on the way, in walk order.
    pub junctions: Vec<Position>,
}

/// Walks from `pos` in `direction` while the next cell is a drawing character.
///
/// Returns `pos` itself as the end if the first neighbour is not a drawing
/// character. The walk is capped at [`MAX_STEPS`].
pub fn get_final_coords(grid: &Grid, pos: Position, direction: Direction) -> RunEnd {
    let mut end = pos;
    let mut junctions = Vec::new();

    for _ in 0..MAX_STEPS {
        let next = end + direction;
        if !grid.is_draw_char(next) {
            return RunEnd { end, junctions };
        }
        if end != pos && grid.get_pixel_context(end).length() >= 3 {
            junctions.push(end);
        }
        end = next;
    }
    log::warn!("endpoint walk from {pos} {direction} hit the step limit");
    RunEnd { end, junctions }
}

/// One end of a run found by [`detect_end_points`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointInfo {
    pub position: Position,
    pub context: PixelContext,
    /// The run was found probing left or right.
    pub horizontal: bool,
    /// Direction the run was probed in.
    pub direction: Direction,
    /// An arrow head sits at or just behind the probe origin.
    pub start_arrow: bool,
    /// An arrow head sits at or just beyond the endpoint.
    pub end_arrow: bool,
    /// Endpoints probed from this junction. Always empty below the first level.
    pub children: Vec<EndpointInfo>,
}

impl EndpointInfo {
    fn new(grid: &Grid, origin: Position, position: Position, direction: Direction) -> Self {
        Self {
            position,
            context: grid.get_pixel_context(position),
            horizontal: direction.is_horizontal(),
            direction,
            start_arrow: has_arrow(grid, origin, direction.opposite()),
            end_arrow: has_arrow(grid, position, direction),
            children: Vec::new(),
        }
    }

    pub fn is_junction(&self) -> bool {
        self.context.length() >= 3
    }
}

fn has_arrow(grid: &Grid, pos: Position, direction: Direction) -> bool {
    [pos, pos + direction].into_iter().any(|p| grid.get_value(p).is_some_and(is_arrow))
}

/// Probes the four directions around `pos` and describes every run found.
///
/// Directions whose first neighbour is not a drawing character yield nothing.
/// A junction crossed on the way is reported as an endpoint of its own, and
/// the other three directions from it are probed once more as its children.
pub fn detect_end_points(grid: &Grid, pos: Position) -> Vec<EndpointInfo> {
    probe(grid, pos, None, 0)
}

fn probe(grid: &Grid, pos: Position, came_from: Option<Direction>, depth: usize) -> Vec<EndpointInfo> {
    let mut result = Vec::new();
    for direction in Direction::ALL {
        if Some(direction) == came_from || !grid.is_draw_char(pos + direction) {
            continue;
        }
        let run = get_final_coords(grid, pos, direction);
        result.push(EndpointInfo::new(grid, pos, run.end, direction));

        if depth >= CHILD_PROBE_DEPTH {
            continue;
        }
        for junction in run.junctions {
            let mut info = EndpointInfo::new(grid, pos, junction, direction);
            info.children = probe(grid, junction, Some(direction.opposite()), depth + 1);
            result.push(info);
        }
    }
    result
}

/// Exactly two dead ends on the same axis: a plain line that can be dragged.
pub fn is_movable_line(endpoints: &[EndpointInfo]) -> bool {
    match endpoints {
        [a, b] => a.context.length() == 1 && b.context.length() == 1 && a.horizontal == b.horizontal,
        _ => false,
    }
}

/// Two corners on the same axis turning to the same side: a box side that
/// can be dragged to resize the box.
///
/// This is not the "each endpoint has one same-axis child" rule. Children are
/// only probed from junctions, and a probe from the middle of a plain box side
/// crosses none, so that rule never matches a side. The corner shape at both
/// run ends is what tells a side apart from a free line.
pub fn is_resizable_side(endpoints: &[EndpointInfo]) -> bool {
    match endpoints {
        [a, b] if a.horizontal == b.horizontal => {
            let turn = |e: &EndpointInfo| {
                if e.horizontal {
                    (e.context.top, e.context.bottom)
                } else {
                    (e.context.left, e.context.right)
                }
            };
            let (ta, tb) = (turn(a), turn(b));
            ta == tb && ta.0 != ta.1
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_coords_straight_run() {
        let grid = Grid::from_text("-----").unwrap();
        let run = get_final_coords(&grid, Position::new(2, 0), Direction::Right);
        assert_eq!(run.end, Position::new(4, 0));
        assert!(run.junctions.is_empty());

        let run = get_final_coords(&grid, Position::new(2, 0), Direction::Up);
        assert_eq!(run.end, Position::new(2, 0));
    }

    #[test]
    fn test_final_coords_reports_junction() {
        let grid = Grid::from_text("  |  \n--+--").unwrap();
        let run = get_final_coords(&grid, Position::new(0, 1), Direction::Right);
        assert_eq!(run.end, Position::new(4, 1));
        assert_eq!(run.junctions, vec![Position::new(2, 1)]);
    }

    #[test]
    fn test_simple_line_is_movable() {
        let grid = Grid::from_text(" ----- ").unwrap();
        let endpoints = detect_end_points(&grid, Position::new(3, 0));
        assert_eq!(endpoints.len(), 2);
        assert!(is_movable_line(&endpoints));
        assert!(!is_resizable_side(&endpoints));
    }

    #[test]
    fn test_box_side_is_resizable() {
        let grid = Grid::from_text("+---+\n|   |\n+---+").unwrap();
        let endpoints = detect_end_points(&grid, Position::new(2, 0));
        assert_eq!(endpoints.len(), 2);
        assert!(is_resizable_side(&endpoints));
        assert!(!is_movable_line(&endpoints));
    }

    #[test]
    fn test_junction_children_one_level() {
        let grid = Grid::from_text("  |  \n--+--\n  |  ").unwrap();
        let endpoints = detect_end_points(&grid, Position::new(0, 1));
        // right end plus the crossing passed on the way
        assert_eq!(endpoints.len(), 2);
        let junction = endpoints.iter().find(|e| e.position == Position::new(2, 1)).unwrap();
        assert!(junction.is_junction());
        assert_eq!(junction.children.len(), 3);
        assert!(junction.children.iter().all(|c| c.children.is_empty()));
        assert!(junction.children.iter().any(|c| c.position == Position::new(2, 0)));
        assert!(junction.children.iter().any(|c| c.position == Position::new(2, 2)));
    }

    #[test]
    fn test_arrow_flags() {
        let grid = Grid::from_text("◀----▶").unwrap();
        let endpoints = detect_end_points(&grid, Position::new(2, 0));
        let right = endpoints.iter().find(|e| e.direction == Direction::Right).unwrap();
        assert_eq!(right.position, Position::new(4, 0));
        assert!(right.end_arrow);
        assert!(!right.start_arrow);

        let left = endpoints.iter().find(|e| e.direction == Direction::Left).unwrap();
        assert!(left.end_arrow);
    }
}
