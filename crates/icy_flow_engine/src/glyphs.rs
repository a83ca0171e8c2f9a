//! Character classes used by the grid and the topology engine.

/// Stored in a staged cell to erase it on commit.
pub const ERASE_CHAR: char = ' ';

/// Generic drawing character used before a style is resolved.
pub const SPECIAL_VALUE: char = '+';

pub const ARROW_UP: char = '▲';
pub const ARROW_DOWN: char = '▼';
pub const ARROW_LEFT: char = '◀';
pub const ARROW_RIGHT: char = '▶';

/// Literal arrow glyphs that are accepted outside the ASCII range.
pub const ARROW_GLYPHS: [char; 4] = [ARROW_UP, ARROW_DOWN, ARROW_LEFT, ARROW_RIGHT];

/// ASCII arrow heads drawn by the ASCII style.
pub const ASCII_ARROW_GLYPHS: [char; 4] = ['^', 'v', '<', '>'];

const BOX_DRAWING: std::ops::RangeInclusive<char> = '\u{2500}'..='\u{257F}';

/// True for whitespace that renders as an empty cell.
pub fn is_blank(ch: char) -> bool {
    ch == ERASE_CHAR
}

/// Whether `ch` may be stored in a grid cell.
///
/// Accepts printable ASCII, Latin-1 supplement letters, Latin Extended-A/B,
/// the four literal arrow glyphs and the Unicode box drawing block.
pub fn is_accepted(ch: char) -> bool {
    matches!(ch,
        '\u{0020}'..='\u{007E}' |
        '\u{00C0}'..='\u{00D6}' |
        '\u{00D8}'..='\u{00F6}' |
        '\u{00F8}'..='\u{024F}' |
        '\u{2500}'..='\u{257F}'
    ) || ARROW_GLYPHS.contains(&ch)
}

/// Line, corner and junction glyphs. Arrows and text are not drawing characters.
pub fn is_draw_char(ch: char) -> bool {
    matches!(ch, '+' | '-' | '|') || BOX_DRAWING.contains(&ch)
}

pub fn is_arrow(ch: char) -> bool {
    ARROW_GLYPHS.contains(&ch) || ASCII_ARROW_GLYPHS.contains(&ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_ranges() {
        for ch in [' ', 'a', '~', 'Ä', 'ÿ', 'Ł', 'ɏ', '─', '╬', '▲', '◀'] {
            assert!(is_accepted(ch), "{ch} should be accepted");
        }
        for ch in ['字', '\t', '\u{7F}', '×', '÷', '→', '█'] {
            assert!(!is_accepted(ch), "{ch} should be rejected");
        }
    }

    #[test]
    fn test_draw_chars_exclude_arrows_and_text() {
        assert!(is_draw_char('+'));
        assert!(is_draw_char('│'));
        assert!(is_draw_char('╭'));
        assert!(!is_draw_char('▶'));
        assert!(!is_draw_char('>'));
        assert!(!is_draw_char('a'));
        assert!(!is_draw_char(' '));
    }
}
