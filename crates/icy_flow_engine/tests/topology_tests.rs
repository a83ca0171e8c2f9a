//! Tests for line synthesis, endpoint detection, box detection and connections

use icy_flow_engine::{
    Direction, Grid, LineMode, PixelContext, Position, Rectangle, StyleId,
    topology::{
        MAX_STEPS, detect_box, detect_connections, detect_end_points, draw_line, get_final_coords, get_line_points, is_movable_line, is_resizable_side,
        relocate_box,
    },
};
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn committed(grid: &Grid) -> Vec<Option<char>> {
    grid.rectangle().positions().map(|p| grid.get_pixel(p).and_then(|px| px.committed_value())).collect()
}

// ============================================================================
// Line synthesis
// ============================================================================

#[test]
fn test_horizontal_first_runs() {
    let mut grid = Grid::new(8, 6);
    let start = Position::new(6, 4);
    let end = Position::new(1, 1);
    draw_line(&mut grid, start, end, LineMode::HorizontalFirst, '#', false).unwrap();

    for pos in grid.rectangle().positions() {
        let on_row = pos.y == start.y && (end.x..=start.x).contains(&pos.x);
        let on_column = pos.x == end.x && (end.y..=start.y).contains(&pos.y);
        let expected = if on_row || on_column { Some('#') } else { None };
        assert_eq!(grid.get_value(pos), expected, "at {pos}");
    }
}

#[test]
fn test_rectangle_traversal_order_does_not_matter() {
    let a = Position::new(0, 0);
    let b = Position::new(2, 2);

    let mut horizontal = Grid::new(3, 3);
    draw_line(&mut horizontal, a, b, LineMode::HorizontalFirst, '+', false).unwrap();
    let first_leg_horizontal = horizontal.staged_positions();
    draw_line(&mut horizontal, b, a, LineMode::HorizontalFirst, '+', false).unwrap();
    horizontal.commit().unwrap();

    let mut vertical = Grid::new(3, 3);
    draw_line(&mut vertical, a, b, LineMode::VerticalFirst, '+', false).unwrap();
    let first_leg_vertical = vertical.staged_positions();
    draw_line(&mut vertical, b, a, LineMode::VerticalFirst, '+', false).unwrap();
    vertical.commit().unwrap();

    assert_ne!(first_leg_horizontal, first_leg_vertical);
    assert_eq!(horizontal.export(), "+++\n+ +\n+++");
    assert_eq!(vertical.export(), horizontal.export());
}

#[test]
fn test_omit_intersections_leaves_gap() {
    let mut grid = Grid::from_text("  |  \n  |  \n  |  ").unwrap();
    draw_line(&mut grid, Position::new(0, 1), Position::new(4, 1), LineMode::HorizontalFirst, '-', true).unwrap();
    assert_eq!(grid.get_value(Position::new(2, 1)), None);
    assert!(grid.staged_positions().contains(&Position::new(2, 1)));

    grid.commit().unwrap();
    assert_eq!(grid.export(), "  |  \n-- --\n  |  ");
}

#[test]
fn test_line_preview_rollback() {
    let mut grid = Grid::from_text("  |  \n  |  \n  |  ").unwrap();
    let before = committed(&grid);

    draw_line(&mut grid, Position::new(0, 1), Position::new(4, 1), LineMode::Best, '-', true).unwrap();
    draw_line(&mut grid, Position::new(0, 0), Position::new(4, 2), LineMode::VerticalVertical, '+', false).unwrap();
    grid.rollback();

    assert_eq!(committed(&grid), before);
    assert_eq!(grid.export(), "  |  \n  |  \n  |  ");
}

// ============================================================================
// Pixel context
// ============================================================================

#[test]
fn test_context_only_reads_neighbours() {
    let mut grid = Grid::from_text("+-+-+\n|   |\n+-+-+\n|   |\n+-+-+").unwrap();
    let center = Position::new(2, 2);
    let expected = grid.get_pixel_context(center);
    assert_eq!(expected, PixelContext { left: true, right: true, top: false, bottom: false });

    let neighbourhood: Vec<Position> = std::iter::once(center).chain(Direction::ALL.iter().map(|d| center + *d)).collect();
    for pos in grid.rectangle().positions() {
        if neighbourhood.contains(&pos) {
            continue;
        }
        grid.stage_pixel(pos, '+').unwrap();
        assert_eq!(grid.get_pixel_context(center), expected);
        grid.stage_pixel(pos, ' ').unwrap();
        assert_eq!(grid.get_pixel_context(center), expected);
    }
}

#[test]
fn test_context_sees_staged_values() {
    let mut grid = Grid::new(3, 3);
    let center = Position::new(1, 1);
    assert_eq!(grid.get_pixel_context(center).length(), 0);

    grid.stage_pixel(Position::new(1, 0), '|').unwrap();
    grid.stage_pixel(Position::new(2, 1), '─').unwrap();
    let ctx = grid.get_pixel_context(center);
    assert_eq!(ctx.pattern(), 0b0110);
    assert_eq!(ctx.length(), 2);
}

// ============================================================================
// Endpoints
// ============================================================================

#[test]
fn test_plain_line_is_movable() {
    init_logging();
    let grid = Grid::from_text("     \n-----\n     ").unwrap();
    let endpoints = detect_end_points(&grid, Position::new(2, 1));
    let positions: Vec<Position> = endpoints.iter().map(|e| e.position).collect();
    assert_eq!(positions, vec![Position::new(0, 1), Position::new(4, 1)]);
    assert!(endpoints.iter().all(|e| e.horizontal));
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

    let endpoints = detect_end_points(&grid, Position::new(4, 1));
    assert_eq!(endpoints.len(), 2);
    assert!(endpoints.iter().all(|e| !e.horizontal));
    assert!(is_resizable_side(&endpoints));
}

#[test]
fn test_arrow_flags() {
    let grid = Grid::from_text("<---->").unwrap();
    let endpoints = detect_end_points(&grid, Position::new(2, 0));
    assert_eq!(endpoints.len(), 2);
    assert_eq!(endpoints[0].direction, Direction::Left);
    assert_eq!(endpoints[0].position, Position::new(1, 0));
    assert!(endpoints[0].end_arrow);
    assert!(endpoints[1].end_arrow);
    assert!(!endpoints[0].start_arrow);
}

// ============================================================================
// Boxes
// ============================================================================

#[test]
fn test_detect_box_from_every_boundary_cell() {
    init_logging();
    let text = "      \n ┌──┐ \n │  │ \n │  │ \n └──┘ ";
    let grid = Grid::from_text(text).unwrap();
    let rect = Rectangle::from_coords(1, 1, 4, 4);

    for pos in rect.positions() {
        let on_boundary = pos.x == rect.min.x || pos.x == rect.max.x || pos.y == rect.min.y || pos.y == rect.max.y;
        let shape = detect_box(&grid, pos);
        if on_boundary {
            let shape = shape.unwrap_or_else(|| panic!("no box from {pos}"));
            assert_eq!(shape.bounds, rect);
            assert_eq!(shape.points.len(), 12);
        } else {
            assert!(shape.is_none());
        }
    }
}

#[test]
fn test_open_line_is_not_a_box() {
    let grid = Grid::from_text("┌───\n│   \n└───").unwrap();
    for pos in [Position::new(0, 0), Position::new(2, 0), Position::new(0, 1), Position::new(3, 2)] {
        assert!(detect_box(&grid, pos).is_none(), "box found from {pos}");
    }
    let grid = Grid::from_text("------").unwrap();
    assert!(detect_box(&grid, Position::new(3, 0)).is_none());
}

// ============================================================================
// Connections
// ============================================================================

#[test]
fn test_connections_of_box() {
    let grid = Grid::from_text("+--+      \n|  +----+ \n+--+    | \n        ▼ ").unwrap();
    let shape = detect_box(&grid, Position::new(0, 0)).unwrap();
    let connections = detect_connections(&grid, &shape);
    assert_eq!(connections.len(), 1);

    let connection = &connections[0];
    assert_eq!(connection.start(), Position::new(3, 1));
    assert_eq!(connection.end(), Position::new(8, 3));
    assert_eq!(connection.end_direction(), Some(Direction::Down));
    assert_eq!(connection.redraw_mode(), LineMode::HorizontalFirst);
}

#[test]
fn test_relocate_box_commits_cleanly() {
    let mut grid = Grid::from_text("+-+      \n| +----->\n+-+      \n         ").unwrap();
    let shape = detect_box(&grid, Position::new(2, 2)).unwrap();
    relocate_box(&mut grid, &shape, Position::new(0, 1), StyleId::Ascii).unwrap();
    grid.rollback();
    assert_eq!(grid.export(), "+-+      \n| +----->\n+-+      \n         ");
}

// ============================================================================
// Step limit
// ============================================================================

/// A closed ASCII box `width` cells wide and three rows high.
fn wide_box(width: usize) -> String {
    let edge = format!("+{}+", "-".repeat(width - 2));
    let side = format!("|{}|", " ".repeat(width - 2));
    format!("{edge}\n{side}\n{edge}")
}

#[test]
fn test_run_walk_stops_at_step_limit() {
    init_logging();
    assert_eq!(MAX_STEPS, 1000);

    let grid = Grid::from_text(&"-".repeat(1500)).unwrap();
    let run = get_final_coords(&grid, Position::new(0, 0), Direction::Right);
    assert_eq!(run.end, Position::new(1000, 0));

    let grid = Grid::from_text(&"-".repeat(900)).unwrap();
    let run = get_final_coords(&grid, Position::new(0, 0), Direction::Right);
    assert_eq!(run.end, Position::new(899, 0));
}

#[test]
fn test_box_walk_gives_up_past_step_limit() {
    // perimeter of 1206 cells
    let grid = Grid::from_text(&wide_box(602)).unwrap();
    assert!(detect_box(&grid, Position::new(0, 0)).is_none());

    // perimeter of 602 cells
    let grid = Grid::from_text(&wide_box(300)).unwrap();
    let shape = detect_box(&grid, Position::new(0, 0)).unwrap();
    assert_eq!(shape.bounds, Rectangle::from_coords(0, 0, 299, 2));
}

#[test]
fn test_line_trace_gives_up_past_step_limit() {
    let grid = Grid::from_text(&"-".repeat(1500)).unwrap();
    assert!(get_line_points(&grid, Position::new(0, 0), Direction::Right).is_none());

    let grid = Grid::from_text(&"-".repeat(900)).unwrap();
    let points = get_line_points(&grid, Position::new(0, 0), Direction::Right).unwrap();
    assert_eq!(points.len(), 900);
}
