use crate::{
    Grid, Position, Rectangle, Result,
    glyphs::is_arrow,
    pixel::PendingValue,
    style::{StyleId, apply_style, draw_styled_line},
    topology::{BoxShape, detect_connections},
};

/// Stages moving a detected box by `delta` while keeping its lines attached.
///
/// Lines leaving the box are traced, erased, and redrawn from the moved
/// connector to their unchanged far end. Arrow heads at the far end are kept.
/// Nothing is committed; returns the new bounds of the box.
///
/// # Errors
///
/// Propagates errors from [`draw_styled_line`].
pub fn relocate_box(grid: &mut Grid, shape: &BoxShape, delta: Position, style: StyleId) -> Result<Rectangle> {
    let connections = detect_connections(grid, shape);
    log::debug!("moving box {} by {delta} with {} connections", shape.bounds, connections.len());

    for connection in &connections {
        for pos in connection.points().iter().skip(1) {
            grid.stage(*pos, PendingValue::Erase);
        }
    }

    grid.move_area(shape.bounds, delta);

    for connection in &connections {
        let Some(start_direction) = connection.start_direction() else {
            continue;
        };
        let start = connection.start() + delta + start_direction;
        let tip = connection.end();
        let arrow = grid.get_pixel(tip).and_then(|p| p.committed_value()).filter(|ch| is_arrow(*ch));
        let end = if arrow.is_some() { connection.points()[connection.points().len() - 2] } else { tip };

        draw_styled_line(grid, start, end, connection.redraw_mode(), style, false)?;
        if let Some(arrow) = arrow {
            grid.stage(tip, PendingValue::Glyph(arrow));
            apply_style(grid, &[tip], style);
        }
    }
    Ok(shape.bounds + delta)
}
