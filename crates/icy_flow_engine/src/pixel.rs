use crate::glyphs::{is_blank, is_draw_char};

/// A pending edit of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PendingValue {
    Glyph(char),
    /// Clear the cell on commit.
    Erase,
}

impl PendingValue {
    pub fn from_char(ch: char) -> Self {
        if is_blank(ch) { PendingValue::Erase } else { PendingValue::Glyph(ch) }
    }

    pub fn as_char(self) -> Option<char> {
        match self {
            PendingValue::Glyph(ch) => Some(ch),
            PendingValue::Erase => None,
        }
    }
}

/// One grid cell: the committed glyph plus an optional staged replacement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    value: Option<char>,
    temp_value: Option<PendingValue>,
}

impl Pixel {
    pub fn new(value: Option<char>) -> Self {
        Self { value, temp_value: None }
    }

    /// The committed glyph, ignoring staged edits.
    pub fn committed_value(&self) -> Option<char> {
        self.value
    }

    pub fn temp_value(&self) -> Option<PendingValue> {
        self.temp_value
    }

    pub fn has_pending(&self) -> bool {
        self.temp_value.is_some()
    }

    /// Staged value if there is one, the committed value otherwise.
    pub fn get_value(&self) -> Option<char> {
        match self.temp_value {
            Some(pending) => pending.as_char(),
            None => self.value,
        }
    }

    pub fn is_draw_char(&self) -> bool {
        self.get_value().is_some_and(is_draw_char)
    }

    pub(crate) fn stage(&mut self, pending: PendingValue) {
        self.temp_value = Some(pending);
    }

    /// Promotes the staged value. Returns false if nothing was staged.
    pub(crate) fn commit(&mut self) -> bool {
        match self.temp_value.take() {
            Some(pending) => {
                self.value = pending.as_char();
                true
            }
            None => false,
        }
    }

    pub(crate) fn discard(&mut self) {
        self.temp_value = None;
    }

    pub(crate) fn clear(&mut self) {
        self.value = None;
        self.temp_value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_overrides_committed() {
        let mut pixel = Pixel::new(Some('a'));
        assert_eq!(pixel.get_value(), Some('a'));

        pixel.stage(PendingValue::Glyph('b'));
        assert_eq!(pixel.get_value(), Some('b'));
        assert_eq!(pixel.committed_value(), Some('a'));

        pixel.stage(PendingValue::Erase);
        assert_eq!(pixel.get_value(), None);

        assert!(pixel.commit());
        assert_eq!(pixel.committed_value(), None);
        assert!(!pixel.has_pending());
        assert!(!pixel.commit());
    }

    #[test]
    fn test_discard_keeps_committed() {
        let mut pixel = Pixel::new(Some('-'));
        pixel.stage(PendingValue::from_char(' '));
        assert!(!pixel.is_draw_char());
        pixel.discard();
        assert!(pixel.is_draw_char());
    }
}
