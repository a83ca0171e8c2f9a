//! Transactional character buffer.
//!
//! Edits are staged into the grid and recorded in an ordered staging log. The
//! staged values are immediately visible to readers through [`Grid::get_value`]
//! (topology queries depend on that) and are either promoted with
//! [`Grid::commit`] or dropped with [`Grid::rollback`].

use crate::{
    FlowError, PixelContext, Position, Rectangle, Result,
    glyphs::{ERASE_CHAR, is_accepted, is_blank, is_draw_char},
    persistence::Persistence,
    pixel::{PendingValue, Pixel},
};

pub struct Grid {
    width: i32,
    height: i32,
    pixels: Vec<Pixel>,

    /// Staged cells in insertion order, may contain duplicates.
    staging_log: Vec<Position>,

    persistence: Option<Box<dyn Persistence>>,
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("staged", &self.staging_log.len())
            .finish_non_exhaustive()
    }
}

impl Grid {
    /// Creates an empty grid. Non positive dimensions are raised to 1.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![Pixel::default(); (width * height) as usize],
            staging_log: Vec::new(),
            persistence: None,
        }
    }

    /// Creates a grid just large enough for `text` and commits the text into it.
    ///
    /// # Errors
    ///
    /// Returns `UnrecognizedCharacter` if the text contains a glyph outside the accepted set.
    pub fn from_text(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        let width = lines.iter().map(|l| l.trim_end_matches('\r').chars().count()).max().unwrap_or(0);
        let mut grid = Grid::new(width as i32, lines.len() as i32);
        if let Err(err) = grid.import_text(text, Position::default(), true, false) {
            grid.rollback();
            return Err(err);
        }
        grid.commit()?;
        Ok(grid)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn rectangle(&self) -> Rectangle {
        Rectangle::from_coords(0, 0, self.width - 1, self.height - 1)
    }

    /// Installs the sink that receives the exported grid after each commit.
    pub fn set_persistence(&mut self, persistence: Box<dyn Persistence>) {
        self.persistence = Some(persistence);
    }

    pub fn is_out_of_bounds(&self, pos: Position) -> bool {
        pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.is_out_of_bounds(pos) {
            None
        } else {
            Some((pos.y * self.width + pos.x) as usize)
        }
    }

    pub fn get_pixel(&self, pos: Position) -> Option<&Pixel> {
        self.index(pos).map(|i| &self.pixels[i])
    }

    /// Resolved glyph at `pos`: staged value first, committed value otherwise.
    pub fn get_value(&self, pos: Position) -> Option<char> {
        self.get_pixel(pos).and_then(Pixel::get_value)
    }

    pub fn is_draw_char(&self, pos: Position) -> bool {
        self.get_value(pos).is_some_and(is_draw_char)
    }

    pub fn get_pixel_context(&self, pos: Position) -> PixelContext {
        PixelContext::probe(self, pos)
    }

    /// Resets committed and staged values of `area` (the whole grid if `None`)
    /// without going through the staging log.
    pub fn clear(&mut self, area: Option<Rectangle>) {
        let area = area.unwrap_or_else(|| self.rectangle());
        for pos in area.positions() {
            if let Some(i) = self.index(pos) {
                self.pixels[i].clear();
            }
        }
    }

    /// Stages `ch` at `pos`. A blank character stages an erase.
    ///
    /// Out of bounds positions are ignored.
    ///
    /// # Errors
    ///
    /// Returns `UnrecognizedCharacter` if `ch` is outside the accepted glyph set;
    /// nothing is staged in that case.
    pub fn stage_pixel(&mut self, pos: Position, ch: char) -> Result<()> {
        if self.is_out_of_bounds(pos) {
            return Ok(());
        }
        if !is_blank(ch) && !is_accepted(ch) {
            return Err(FlowError::unrecognized(ch));
        }
        self.stage(pos, PendingValue::from_char(ch));
        Ok(())
    }

    pub(crate) fn stage(&mut self, pos: Position, value: PendingValue) {
        if let Some(i) = self.index(pos) {
            self.pixels[i].stage(value);
            self.staging_log.push(pos);
        }
    }

    /// Stages a blank over every cell of `area`.
    pub fn stage_area(&mut self, area: Rectangle) {
        for pos in area.positions() {
            self.stage(pos, PendingValue::Erase);
        }
    }

    /// Stages a (possibly multi line) string with its first character at `origin`.
    ///
    /// # Errors
    ///
    /// Returns the first `UnrecognizedCharacter` unless `skip_unrecognized` is set.
    /// Characters before the failing one stay staged.
    pub fn import_text(&mut self, text: &str, origin: Position, skip_blanks: bool, skip_unrecognized: bool) -> Result<()> {
        let mut skipped = 0;
        for (row, line) in text.lines().enumerate() {
            for (col, ch) in line.trim_end_matches('\r').chars().enumerate() {
                if skip_blanks && is_blank(ch) {
                    continue;
                }
                let pos = origin + Position::new(col as i32, row as i32);
                match self.stage_pixel(pos, ch) {
                    Ok(()) => {}
                    Err(FlowError::UnrecognizedCharacter { .. }) if skip_unrecognized => skipped += 1,
                    Err(err) => return Err(err),
                }
            }
        }
        if skipped > 0 {
            log::warn!("import skipped {skipped} unrecognized characters");
        }
        Ok(())
    }

    /// Stages moving the committed contents of `area` by `delta`.
    ///
    /// The source is cleared first. A blank source cell does not overwrite a
    /// non-blank destination.
    pub fn move_area(&mut self, area: Rectangle, delta: Position) {
        let moved: Vec<(Position, Option<char>)> = area
            .positions()
            .map(|pos| (pos, self.get_pixel(pos).and_then(Pixel::committed_value)))
            .collect();

        self.stage_area(area);

        for (pos, value) in moved {
            let dest = pos + delta;
            if self.is_out_of_bounds(dest) {
                continue;
            }
            let value = value.or_else(|| self.get_value(dest));
            self.stage(dest, value.map_or(PendingValue::Erase, PendingValue::Glyph));
        }
    }

    /// Staged cells in insertion order without duplicates.
    pub fn staged_positions(&self) -> Vec<Position> {
        self.staged_positions_since(0)
    }

    /// Current length of the staging log, see [`Grid::staged_positions_since`].
    pub fn staging_mark(&self) -> usize {
        self.staging_log.len()
    }

    /// Cells staged after `mark` was taken, deduplicated.
    pub fn staged_positions_since(&self, mark: usize) -> Vec<Position> {
        let mut seen = std::collections::HashSet::new();
        self.staging_log
            .iter()
            .skip(mark)
            .copied()
            .filter(|pos| seen.insert(*pos))
            .collect()
    }

    pub fn has_staged_changes(&self) -> bool {
        !self.staging_log.is_empty()
    }

    /// Promotes every staged value and hands the result to the persistence sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the persistence sink fails. The commit itself has
    /// already been applied at that point.
    pub fn commit(&mut self) -> Result<()> {
        let mut changed = 0;
        for pos in std::mem::take(&mut self.staging_log) {
            if let Some(i) = self.index(pos) {
                if self.pixels[i].commit() {
                    changed += 1;
                }
            }
        }
        log::debug!("committed {changed} cells");

        if self.persistence.is_some() {
            let text = self.export();
            if let Some(persistence) = self.persistence.as_mut() {
                persistence.persist(&text)?;
            }
        }
        Ok(())
    }

    /// Drops all staged values, committed state is untouched.
    pub fn rollback(&mut self) {
        let staged = self.staging_log.len();
        for pos in std::mem::take(&mut self.staging_log) {
            if let Some(i) = self.index(pos) {
                self.pixels[i].discard();
            }
        }
        if staged > 0 {
            log::debug!("rolled back {staged} staged edits");
        }
    }

    /// Serializes the committed grid, one line per row, empty cells as spaces.
    pub fn export(&self) -> String {
        let mut result = String::with_capacity(((self.width + 1) * self.height) as usize);
        for (y, row) in self.pixels.chunks(self.width as usize).enumerate() {
            if y > 0 {
                result.push('\n');
            }
            result.extend(row.iter().map(|p| p.committed_value().unwrap_or(ERASE_CHAR)));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_is_visible_before_commit() {
        let mut grid = Grid::new(5, 5);
        grid.stage_pixel(Position::new(1, 1), 'x').unwrap();
        assert_eq!(grid.get_value(Position::new(1, 1)), Some('x'));
        assert_eq!(grid.get_pixel(Position::new(1, 1)).unwrap().committed_value(), None);
        assert!(grid.has_staged_changes());
    }

    #[test]
    fn test_out_of_bounds_stage_is_noop() {
        let mut grid = Grid::new(2, 2);
        grid.stage_pixel(Position::new(5, 5), 'x').unwrap();
        grid.stage_pixel(Position::new(-1, 0), '字').unwrap();
        assert!(!grid.has_staged_changes());
        assert!(grid.get_pixel(Position::new(2, 0)).is_none());
    }

    #[test]
    fn test_last_writer_wins() {
        let mut grid = Grid::new(3, 1);
        let pos = Position::new(0, 0);
        grid.stage_pixel(pos, 'a').unwrap();
        grid.stage_pixel(pos, 'b').unwrap();
        grid.commit().unwrap();
        assert_eq!(grid.get_value(pos), Some('b'));
        assert!(!grid.has_staged_changes());
    }

    #[test]
    fn test_staged_positions_dedup() {
        let mut grid = Grid::new(3, 1);
        grid.stage_pixel(Position::new(2, 0), 'a').unwrap();
        grid.stage_pixel(Position::new(0, 0), 'a').unwrap();
        grid.stage_pixel(Position::new(2, 0), 'b').unwrap();
        assert_eq!(grid.staged_positions(), vec![Position::new(2, 0), Position::new(0, 0)]);
    }

    #[test]
    fn test_clear_is_immediate() {
        let mut grid = Grid::from_text("ab\ncd").unwrap();
        grid.clear(Some(Rectangle::from_coords(1, 0, 1, 1)));
        assert_eq!(grid.export(), "a \nc ");
        grid.clear(None);
        assert_eq!(grid.export(), "  \n  ");
    }
}
