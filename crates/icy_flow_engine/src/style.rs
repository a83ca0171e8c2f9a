//! Style resolver
//!
//! Lines are drawn with a generic drawing character and then resolved cell by
//! cell into the glyphs of a drawing style. The glyph for a cell depends only on
//! which of its four neighbours are drawing characters; the mapping is a table
//! indexed by the 4-bit adjacency pattern of [`PixelContext::pattern`].

use serde::{Deserialize, Serialize};

use crate::{
    Grid, LineMode, PixelContext, Position, Result,
    glyphs::{ARROW_DOWN, ARROW_LEFT, ARROW_RIGHT, ARROW_UP, SPECIAL_VALUE, is_arrow, is_draw_char},
    pixel::PendingValue,
    topology::draw_line,
};

/// Named drawing styles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleId {
    Ascii,
    #[default]
    Light,
    Heavy,
    Double,
    Rounded,
}

impl StyleId {
    pub const ALL: [StyleId; 5] = [StyleId::Ascii, StyleId::Light, StyleId::Heavy, StyleId::Double, StyleId::Rounded];

    pub fn palette(self) -> &'static Palette {
        match self {
            StyleId::Ascii => &ASCII_PALETTE,
            StyleId::Light => &LIGHT_PALETTE,
            StyleId::Heavy => &HEAVY_PALETTE,
            StyleId::Double => &DOUBLE_PALETTE,
            StyleId::Rounded => &ROUNDED_PALETTE,
        }
    }
}

impl std::fmt::Display for StyleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleId::Ascii => write!(f, "ascii"),
            StyleId::Light => write!(f, "light"),
            StyleId::Heavy => write!(f, "heavy"),
            StyleId::Double => write!(f, "double"),
            StyleId::Rounded => write!(f, "rounded"),
        }
    }
}

/// What a cell should become for a given adjacency pattern.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GlyphSlot {
    /// Leave the glyph as it is.
    Keep,
    Horizontal,
    Vertical,
    /// ┌
    TopLeft,
    /// ┐
    TopRight,
    /// └
    BottomLeft,
    /// ┘
    BottomRight,
    /// ┬
    TeeDown,
    /// ┴
    TeeUp,
    /// ├
    TeeRight,
    /// ┤
    TeeLeft,
    Cross,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

use GlyphSlot::{
    ArrowDown, ArrowLeft, ArrowRight, ArrowUp, BottomLeft, BottomRight, Cross, Horizontal, Keep, TeeDown, TeeLeft, TeeRight, TeeUp, TopLeft, TopRight,
    Vertical,
};

/// Box glyph slots by adjacency pattern (left = 1, right = 2, top = 4, bottom = 8).
/// All four tees get a slot, ┬ included, so every 3-neighbour pattern has its own glyph.
pub const BOX_SLOTS: [GlyphSlot; 16] = [
    Keep,        // isolated
    Horizontal,  // l
    Horizontal,  // r
    Horizontal,  // l r
    Vertical,    // t
    BottomRight, // l t
    BottomLeft,  // r t
    TeeUp,       // l r t
    Vertical,    // b
    TopRight,    // l b
    TopLeft,     // r b
    TeeDown,     // l r b
    Vertical,    // t b
    TeeLeft,     // l t b
    TeeRight,    // r t b
    Cross,       // l r t b
];

/// Arrow slots by adjacency pattern. A dead end points away from its only
/// neighbour, a T points into the missing side.
pub const ARROW_SLOTS: [GlyphSlot; 16] = [
    Keep,       // isolated
    ArrowRight, // l
    ArrowLeft,  // r
    Keep,       // l r
    ArrowDown,  // t
    Keep,       // l t
    Keep,       // r t
    ArrowDown,  // l r t
    ArrowUp,    // b
    Keep,       // l b
    Keep,       // r b
    ArrowUp,    // l r b
    Keep,       // t b
    ArrowRight, // l t b
    ArrowLeft,  // r t b
    Cross,      // l r t b
];

/// Glyphs of one drawing style. `None` entries fall back as documented on
/// [`Palette::glyph`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub horizontal: char,
    pub vertical: char,
    /// Generic corner used when a dedicated corner glyph is missing.
    pub corner: char,
    pub top_left: Option<char>,
    pub top_right: Option<char>,
    pub bottom_left: Option<char>,
    pub bottom_right: Option<char>,
    pub tee_down: Option<char>,
    pub tee_up: Option<char>,
    pub tee_right: Option<char>,
    pub tee_left: Option<char>,
    pub cross: Option<char>,
    pub arrow_up: char,
    pub arrow_down: char,
    pub arrow_left: char,
    pub arrow_right: char,
}

pub const ASCII_PALETTE: Palette = Palette {
    horizontal: '-',
    vertical: '|',
    corner: '+',
    top_left: None,
    top_right: None,
    bottom_left: None,
    bottom_right: None,
    tee_down: Some('+'),
    tee_up: Some('+'),
    tee_right: Some('+'),
    tee_left: Some('+'),
    cross: Some('+'),
    arrow_up: '^',
    arrow_down: 'v',
    arrow_left: '<',
    arrow_right: '>',
};

pub const LIGHT_PALETTE: Palette = Palette {
    horizontal: '─',
    vertical: '│',
    corner: '┼',
    top_left: Some('┌'),
    top_right: Some('┐'),
    bottom_left: Some('└'),
    bottom_right: Some('┘'),
    tee_down: Some('┬'),
    tee_up: Some('┴'),
    tee_right: Some('├'),
    tee_left: Some('┤'),
    cross: Some('┼'),
    arrow_up: ARROW_UP,
    arrow_down: ARROW_DOWN,
    arrow_left: ARROW_LEFT,
    arrow_right: ARROW_RIGHT,
};

pub const HEAVY_PALETTE: Palette = Palette {
    horizontal: '━',
    vertical: '┃',
    corner: '╋',
    top_left: Some('┏'),
    top_right: Some('┓'),
    bottom_left: Some('┗'),
    bottom_right: Some('┛'),
    tee_down: Some('┳'),
    tee_up: Some('┻'),
    tee_right: Some('┣'),
    tee_left: Some('┫'),
    cross: Some('╋'),
    arrow_up: ARROW_UP,
    arrow_down: ARROW_DOWN,
    arrow_left: ARROW_LEFT,
    arrow_right: ARROW_RIGHT,
};

pub const DOUBLE_PALETTE: Palette = Palette {
    horizontal: '═',
    vertical: '║',
    corner: '╬',
    top_left: Some('╔'),
    top_right: Some('╗'),
    bottom_left: Some('╚'),
    bottom_right: Some('╝'),
    tee_down: Some('╦'),
    tee_up: Some('╩'),
    tee_right: Some('╠'),
    tee_left: Some('╣'),
    cross: Some('╬'),
    arrow_up: ARROW_UP,
    arrow_down: ARROW_DOWN,
    arrow_left: ARROW_LEFT,
    arrow_right: ARROW_RIGHT,
};

pub const ROUNDED_PALETTE: Palette = Palette {
    horizontal: '─',
    vertical: '│',
    corner: '┼',
    top_left: Some('╭'),
    top_right: Some('╮'),
    bottom_left: Some('╰'),
    bottom_right: Some('╯'),
    tee_down: None,
    tee_up: None,
    tee_right: None,
    tee_left: None,
    cross: None,
    arrow_up: ARROW_UP,
    arrow_down: ARROW_DOWN,
    arrow_left: ARROW_LEFT,
    arrow_right: ARROW_RIGHT,
};

impl Palette {
    /// Glyph for `slot`, or `original` for [`GlyphSlot::Keep`].
    ///
    /// Fallbacks: a missing cross becomes the horizontal glyph, a missing corner
    /// the generic corner, a missing ┬/┴ the horizontal and a missing ├/┤ the
    /// vertical glyph.
    pub fn glyph(&self, slot: GlyphSlot, original: char) -> char {
        match slot {
            Keep => original,
            Horizontal => self.horizontal,
            Vertical => self.vertical,
            TopLeft => self.top_left.unwrap_or(self.corner),
            TopRight => self.top_right.unwrap_or(self.corner),
            BottomLeft => self.bottom_left.unwrap_or(self.corner),
            BottomRight => self.bottom_right.unwrap_or(self.corner),
            TeeDown => self.tee_down.unwrap_or(self.horizontal),
            TeeUp => self.tee_up.unwrap_or(self.horizontal),
            TeeRight => self.tee_right.unwrap_or(self.vertical),
            TeeLeft => self.tee_left.unwrap_or(self.vertical),
            Cross => self.cross.unwrap_or(self.horizontal),
            ArrowUp => self.arrow_up,
            ArrowDown => self.arrow_down,
            ArrowLeft => self.arrow_left,
            ArrowRight => self.arrow_right,
        }
    }
}

/// Slot for a glyph with the given neighbourhood, `None` for text.
pub fn glyph_slot(value: char, ctx: PixelContext) -> Option<GlyphSlot> {
    let pattern = ctx.pattern() as usize;
    if is_draw_char(value) {
        Some(BOX_SLOTS[pattern])
    } else if is_arrow(value) {
        Some(ARROW_SLOTS[pattern])
    } else {
        None
    }
}

/// The glyph `pos` should show in `style`, given its current neighbours.
///
/// Text passes through unchanged, empty cells resolve to `None`.
pub fn get_pixel_value_integrated(grid: &Grid, pos: Position, style: StyleId) -> Option<char> {
    let value = grid.get_value(pos)?;
    match glyph_slot(value, grid.get_pixel_context(pos)) {
        Some(slot) => Some(style.palette().glyph(slot, value)),
        None => Some(value),
    }
}

/// Restages the given cells with their resolved glyphs.
pub fn apply_style(grid: &mut Grid, positions: &[Position], style: StyleId) {
    let resolved: Vec<(Position, char)> = positions
        .iter()
        .filter_map(|pos| {
            let current = grid.get_value(*pos)?;
            let value = get_pixel_value_integrated(grid, *pos, style)?;
            (value != current).then_some((*pos, value))
        })
        .collect();

    for (pos, value) in resolved {
        grid.stage(pos, PendingValue::Glyph(value));
    }
}

/// Draws a line with the generic drawing character and resolves every cell it
/// staged into `style`.
///
/// # Errors
///
/// Propagates errors from [`draw_line`].
pub fn draw_styled_line(grid: &mut Grid, start: Position, end: Position, mode: LineMode, style: StyleId, omit_intersections: bool) -> Result<()> {
    let mark = grid.staging_mark();
    draw_line(grid, start, end, mode, SPECIAL_VALUE, omit_intersections)?;
    let staged = grid.staged_positions_since(mark);
    apply_style(grid, &staged, style);
    Ok(())
}
