//! B/W Color for the SSD1306 panel

use core::ops::Not;

#[cfg(feature = "graphics")]
use embedded_graphics_core::pixelcolor::{
    raw::{RawData, RawU1},
    BinaryColor, PixelColor,
};

/// Monochrome pixel color
///
/// White is a lit pixel (bit set in display RAM), black is an unlit one.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Color {
    /// Pixel off
    #[default]
    Black,
    /// Pixel on
    White,
}

impl Color {
    /// Get the color encoding of the color for one bit
    pub fn get_bit_value(self) -> u8 {
        match self {
            Color::Black => 0u8,
            Color::White => 1u8,
        }
    }

    /// Gets a full byte of black or white pixels
    pub fn get_byte_value(self) -> u8 {
        match self {
            Color::Black => 0x00,
            Color::White => 0xff,
        }
    }

    /// Color that ends up in display RAM when the panel content is inverted
    pub fn inverted_if(self, inverted: bool) -> Color {
        if inverted {
            !self
        } else {
            self
        }
    }

    /// Returns `true` for a lit pixel
    pub fn is_on(self) -> bool {
        self == Color::White
    }
}

impl Not for Color {
    type Output = Color;

    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl From<bool> for Color {
    fn from(on: bool) -> Self {
        if on {
            Color::White
        } else {
            Color::Black
        }
    }
}

#[cfg(feature = "graphics")]
impl PixelColor for Color {
    type Raw = RawU1;
}

#[cfg(feature = "graphics")]
impl From<RawU1> for Color {
    fn from(raw: RawU1) -> Self {
        Color::from(raw.into_inner() != 0)
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for RawU1 {
    fn from(color: Color) -> Self {
        RawU1::new(color.get_bit_value())
    }
}

#[cfg(feature = "graphics")]
impl From<BinaryColor> for Color {
    fn from(color: BinaryColor) -> Self {
        Color::from(color.is_on())
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for BinaryColor {
    fn from(color: Color) -> Self {
        BinaryColor::from(color.is_on())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement() {
        assert_eq!(!Color::Black, Color::White);
        assert_eq!(!Color::White, Color::Black);
    }

    #[test]
    fn inversion() {
        assert_eq!(Color::White.inverted_if(false), Color::White);
        assert_eq!(Color::White.inverted_if(true), Color::Black);
        assert_eq!(Color::Black.inverted_if(true), Color::White);
    }

    #[test]
    fn bit_and_byte_values() {
        assert_eq!(Color::White.get_bit_value(), 1);
        assert_eq!(Color::Black.get_bit_value(), 0);
        assert_eq!(Color::White.get_byte_value(), 0xff);
        assert_eq!(Color::Black.get_byte_value(), 0x00);
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn binary_color_conversion() {
        assert_eq!(Color::from(BinaryColor::On), Color::White);
        assert_eq!(Color::from(BinaryColor::Off), Color::Black);
        assert_eq!(BinaryColor::from(Color::White), BinaryColor::On);
    }
}
