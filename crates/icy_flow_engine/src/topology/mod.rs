//! Grid topology engine
//!
//! Infers lines, endpoints, closed boxes and connections purely from the
//! pattern of drawing characters around a cell, and synthesizes new lines.
//! All queries read staged values, so a gesture can erase old geometry and
//! probe the result before anything is committed.
//!
//! Detection functions report "nothing found" with `None` or an empty `Vec`;
//! failing to find a shape at an arbitrary cell is the common case.

/// Upper bound for every walk over the grid. Guarantees termination on cyclic
/// or malformed input.
pub const MAX_STEPS: usize = 1000;

mod boxes;
mod connections;
mod endpoints;
mod line;
mod relocate;

pub use boxes::{BOX_TURN_PRIORITY, BoxShape, INITIAL_DIRECTION_PRIORITY, detect_box, get_box, get_end_points, is_draw_char_area};
pub use connections::{Connection, LINE_TURN_PRIORITY, detect_connections, get_line_points};
pub use endpoints::{CHILD_PROBE_DEPTH, EndpointInfo, RunEnd, detect_end_points, get_final_coords, is_movable_line, is_resizable_side};
pub use line::{BEST_LINE_MODE, LineMode, draw_line};
pub use relocate::relocate_box;
