//! Bitmap fonts for text rendering
//!
//! The glyph tables themselves are supplied by the application. A font is
//! a contiguous run of glyphs starting at [Font::first_char], every glyph
//! stored as `height` rows. Rows are MSB first: the leftmost column of a
//! glyph is bit 7 of a byte row or bit 15 of a half-word row.

/// Storage of the glyph rows of a [Font]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphData {
    /// One byte per row, for fonts up to 8 pixels wide
    Narrow(&'static [u8]),
    /// One half-word per row, for fonts up to 16 pixels wide
    Wide(&'static [u16]),
}

/// Bitmap font description
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Font {
    width: u8,
    height: u8,
    first_char: u8,
    glyphs: GlyphData,
}

/// First character of a font table if not specified otherwise (ASCII space)
pub const DEFAULT_FIRST_CHAR: u8 = b' ';

impl Font {
    /// Font with byte rows, `width` must not exceed 8
    pub const fn narrow(width: u8, height: u8, glyphs: &'static [u8]) -> Self {
        assert!(width <= 8);
        Font {
            width,
            height,
            first_char: DEFAULT_FIRST_CHAR,
            glyphs: GlyphData::Narrow(glyphs),
        }
    }

    /// Font with half-word rows, `width` must be in `9..=16`
    pub const fn wide(width: u8, height: u8, glyphs: &'static [u16]) -> Self {
        assert!(width > 8 && width <= 16);
        Font {
            width,
            height,
            first_char: DEFAULT_FIRST_CHAR,
            glyphs: GlyphData::Wide(glyphs),
        }
    }

    /// Changes the character the glyph table starts with
    pub const fn with_first_char(mut self, first_char: u8) -> Self {
        self.first_char = first_char;
        self
    }

    /// Glyph width in pixels
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Glyph height in pixels
    pub fn height(&self) -> u8 {
        self.height
    }

    /// First character of the glyph table
    pub fn first_char(&self) -> u8 {
        self.first_char
    }

    /// Raw glyph table
    pub fn glyphs(&self) -> GlyphData {
        self.glyphs
    }

    /// Returns the bit pattern of `row` of the glyph for `ch`
    ///
    /// The pattern is left aligned into a 16 bit word: the leftmost column
    /// is bit 15 for both storage formats. `None` if the font has no glyph
    /// for `ch` or `row` is outside the glyph.
    pub fn glyph_row(&self, ch: u8, row: u8) -> Option<u16> {
        if row >= self.height {
            return None;
        }
        let glyph = ch.checked_sub(self.first_char)? as usize;
        let index = glyph * self.height as usize + row as usize;
        match self.glyphs {
            GlyphData::Narrow(rows) => rows.get(index).map(|&bits| (bits as u16) << 8),
            GlyphData::Wide(rows) => rows.get(index).copied(),
        }
    }

    /// Returns `true` if the font contains a glyph for `ch`
    pub fn has_glyph(&self, ch: u8) -> bool {
        self.height == 0 || self.glyph_row(ch, self.height - 1).is_some()
    }
}
