//! Graphics Support for the framebuffer
//!
//! Lets any `embedded-graphics` drawable (fonts, primitives, images) render
//! into a [FrameBuffer]. Pixels go through [FrameBuffer::draw_pixel], so the
//! inversion flag applies and pixels outside of the panel are dropped.

use crate::color::Color;
use crate::framebuffer::FrameBuffer;
use embedded_graphics_core::prelude::*;

/// For use with embedded_grahics
impl<const WIDTH: u32, const HEIGHT: u32, const BYTECOUNT: usize> DrawTarget
    for FrameBuffer<WIDTH, HEIGHT, BYTECOUNT>
{
    type Color = Color;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.draw_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

/// For use with embedded_grahics
impl<const WIDTH: u32, const HEIGHT: u32, const BYTECOUNT: usize> OriginDimensions
    for FrameBuffer<WIDTH, HEIGHT, BYTECOUNT>
{
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}
