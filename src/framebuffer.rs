//! In-memory copy of the SSD1306 display RAM
//!
//! The buffer is split into `HEIGHT / 8` pages of `WIDTH` bytes. Every byte
//! is one column of an 8 pixel high page: bit 0 is the top row of the page,
//! bit 7 the bottom one. This is exactly the layout the controller expects in
//! horizontal addressing mode, so the buffer can be streamed page by page.

use bit_field::BitField;

use crate::color::Color;
use crate::error::InvalidArgument;

/// Width of the common 128x64 panel in pixels
pub const DEFAULT_WIDTH: u32 = 128;
/// Height of the common 128x64 panel in pixels
pub const DEFAULT_HEIGHT: u32 = 64;
/// Size of the framebuffer of the common 128x64 panel in bytes
pub const BUFFER_SIZE: usize = (DEFAULT_WIDTH * DEFAULT_HEIGHT / 8) as usize;

/// Number of pages of a panel with `height` rows
pub const fn page_count(height: u32) -> u32 {
    height / 8
}

/// Bit packed framebuffer with drawing state
///
/// - WIDTH: width in pixel
/// - HEIGHT: height in pixel, a multiple of 8
/// - BYTECOUNT: `WIDTH * HEIGHT / 8`. This is redundant with the other
///   parameters and should be removed once const generic expressions are
///   stabilized
///
/// Besides the pixels it carries the text cursor and the inversion flag.
/// While inverted, every color drawn is complemented before it is written.
#[derive(Clone)]
pub struct FrameBuffer<const WIDTH: u32 = 128, const HEIGHT: u32 = 64, const BYTECOUNT: usize = 1024> {
    buffer: [u8; BYTECOUNT],
    cursor: (u32, u32),
    inverted: bool,
}

impl<const WIDTH: u32, const HEIGHT: u32, const BYTECOUNT: usize> Default
    for FrameBuffer<WIDTH, HEIGHT, BYTECOUNT>
{
    // inline is necessary here to allow heap allocation via Box on stack limited programs
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<const WIDTH: u32, const HEIGHT: u32, const BYTECOUNT: usize> FrameBuffer<WIDTH, HEIGHT, BYTECOUNT> {
    const GEOMETRY: () = {
        assert!(WIDTH > 0 && HEIGHT > 0, "panel must not be empty");
        assert!(HEIGHT % 8 == 0, "height must be a whole number of pages");
        assert!(
            BYTECOUNT == (WIDTH as usize) * (HEIGHT as usize) / 8,
            "BYTECOUNT must be WIDTH * HEIGHT / 8"
        );
    };

    /// Creates a black, non inverted framebuffer with the cursor at the origin
    pub const fn new() -> Self {
        let () = Self::GEOMETRY;
        Self {
            buffer: [0u8; BYTECOUNT],
            cursor: (0, 0),
            inverted: false,
        }
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        WIDTH
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        HEIGHT
    }

    /// Number of 8 row pages
    pub const fn pages(&self) -> u32 {
        page_count(HEIGHT)
    }

    /// get internal buffer to use it (to send it to the display)
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Mutable access to the raw buffer
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Bytes of a single page, `None` if `page` is outside the panel
    pub fn page(&self, page: u32) -> Option<&[u8]> {
        if page >= self.pages() {
            return None;
        }
        let start = (page * WIDTH) as usize;
        Some(&self.buffer[start..start + WIDTH as usize])
    }

    /// Iterates over all pages from top to bottom
    pub fn page_iter(&self) -> impl Iterator<Item = &[u8]> {
        self.buffer.chunks(WIDTH as usize)
    }

    /// Current text cursor position `(x, y)`
    pub fn cursor(&self) -> (u32, u32) {
        self.cursor
    }

    pub(crate) fn set_cursor_unchecked(&mut self, x: u32, y: u32) {
        self.cursor = (x, y);
    }

    /// Is the drawing color complemented?
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Complement every color drawn from now on
    ///
    /// Pixels already in the buffer stay as they are.
    pub fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    /// Moves the text cursor
    ///
    /// Unlike pixel drawing a position outside of the panel is rejected.
    pub fn goto_xy(&mut self, x: u32, y: u32) -> Result<(), InvalidArgument> {
        if x >= WIDTH || y >= HEIGHT {
            log::warn!("cursor position ({}, {}) is outside of the panel", x, y);
            return Err(InvalidArgument);
        }
        self.cursor = (x, y);
        Ok(())
    }

    /// Fills the whole buffer with `color`
    pub fn fill(&mut self, color: Color) {
        let byte = color.inverted_if(self.inverted).get_byte_value();
        self.buffer.fill(byte);
    }

    /// Sets every bit to 0, regardless of the inversion
    pub fn clear(&mut self) {
        self.buffer.fill(0x00);
    }

    /// Sets a single pixel
    ///
    /// Coordinates outside of the panel are silently ignored so shape
    /// algorithms can overshoot the edges.
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.plot(x.into(), y.into(), color);
    }

    // pixel setter for the rasterizer, which works on widened coordinates
    pub(crate) fn plot(&mut self, x: i64, y: i64, color: Color) {
        if let Some((index, bit)) = Self::locate(x, y) {
            let on = color.inverted_if(self.inverted).is_on();
            self.buffer[index].set_bit(bit, on);
        }
    }

    /// Reads back the bit of a pixel, `None` outside of the panel
    ///
    /// `true` is a lit pixel in display RAM. The inversion flag is not
    /// applied.
    pub fn pixel(&self, x: i32, y: i32) -> Option<bool> {
        Self::locate(x.into(), y.into()).map(|(index, bit)| self.buffer[index].get_bit(bit))
    }

    // byte index and bit position of a pixel
    fn locate(x: i64, y: i64) -> Option<(usize, usize)> {
        if !Self::contains(x, y) {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((x + (y / 8) * WIDTH as usize, y % 8))
    }

    fn contains(x: i64, y: i64) -> bool {
        (0..i64::from(WIDTH)).contains(&x) && (0..i64::from(HEIGHT)).contains(&y)
    }

    /// Does the box spanned by the corners `(x0, y0)` and `(x1, y1)` overlap the panel?
    pub(crate) fn overlaps(x0: i64, y0: i64, x1: i64, y1: i64) -> bool {
        x0.min(x1) < i64::from(WIDTH)
            && x0.max(x1) >= 0
            && y0.min(y1) < i64::from(HEIGHT)
            && y0.max(y1) >= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Fb = FrameBuffer;

    #[test]
    fn buffer_size() {
        let fb = Fb::new();
        assert_eq!(fb.buffer().len(), BUFFER_SIZE);
        assert_eq!(fb.buffer().len(), 1024);
        assert_eq!(fb.pages(), 8);
        assert!(fb.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn small_geometry() {
        let fb = FrameBuffer::<128, 32, 512>::new();
        assert_eq!(fb.pages(), 4);
        assert_eq!(fb.page_iter().count(), 4);
    }

    #[test]
    fn pixel_packing() {
        let mut fb = Fb::new();
        fb.draw_pixel(0, 0, Color::White);
        assert_eq!(fb.buffer()[0], 0b0000_0001);

        fb.draw_pixel(0, 7, Color::White);
        assert_eq!(fb.buffer()[0], 0b1000_0001);

        // second page, column 5, row 1 of that page
        fb.draw_pixel(5, 9, Color::White);
        assert_eq!(fb.buffer()[128 + 5], 0b0000_0010);

        fb.draw_pixel(127, 63, Color::White);
        assert_eq!(fb.buffer()[1023], 0b1000_0000);
    }

    #[test]
    fn pixel_reflects_color_xor_inversion() {
        for &inverted in &[false, true] {
            for &color in &[Color::Black, Color::White] {
                let mut fb = Fb::new();
                fb.set_inverted(inverted);
                fb.draw_pixel(17, 42, color);
                assert_eq!(fb.pixel(17, 42), Some(color.is_on() ^ inverted));
            }
        }
    }

    #[test]
    fn complementary_draw_restores_bit() {
        let mut fb = Fb::new();
        fb.draw_pixel(3, 3, Color::White);
        let before = fb.clone();
        fb.draw_pixel(60, 20, Color::White);
        fb.draw_pixel(60, 20, Color::Black);
        assert_eq!(fb.buffer(), before.buffer());
    }

    #[test]
    fn out_of_range_pixels_are_ignored() {
        let mut fb = Fb::new();
        fb.fill(Color::White);
        fb.draw_pixel(40, 10, Color::Black);
        let before = fb.clone();

        for &(x, y) in &[(128, 0), (0, 64), (500, 500), (-1, 0), (0, -1), (i32::MIN, i32::MAX)] {
            fb.draw_pixel(x, y, Color::Black);
            fb.draw_pixel(x, y, Color::White);
            assert_eq!(fb.pixel(x, y), None);
        }
        assert_eq!(fb.buffer(), before.buffer());
    }

    #[test]
    fn fill_respects_inversion() {
        let mut fb = Fb::new();
        fb.fill(Color::Black);
        assert!(fb.buffer().iter().all(|&b| b == 0x00));
        fb.fill(Color::White);
        assert!(fb.buffer().iter().all(|&b| b == 0xFF));

        fb.set_inverted(true);
        fb.fill(Color::Black);
        assert!(fb.buffer().iter().all(|&b| b == 0xFF));
        fb.fill(Color::White);
        assert!(fb.buffer().iter().all(|&b| b == 0x00));
    }

    #[test]
    fn clear_ignores_inversion() {
        let mut fb = Fb::new();
        fb.set_inverted(true);
        fb.fill(Color::Black);
        fb.clear();
        assert!(fb.buffer().iter().all(|&b| b == 0x00));
    }

    #[test]
    fn goto_bounds() {
        let mut fb = Fb::new();
        assert_eq!(fb.goto_xy(128, 0), Err(InvalidArgument));
        assert_eq!(fb.goto_xy(0, 64), Err(InvalidArgument));
        assert_eq!(fb.cursor(), (0, 0));
        assert_eq!(fb.goto_xy(127, 63), Ok(()));
        assert_eq!(fb.cursor(), (127, 63));
    }

    #[test]
    fn raw_buffer_writes_are_visible_as_pixels() {
        let mut fb = Fb::new();
        fb.buffer_mut()[128 * 2 + 9] = 0b0001_0000;
        assert_eq!(fb.pixel(9, 20), Some(true));
        assert_eq!(fb.pixel(9, 19), Some(false));
    }

    #[test]
    fn pages() {
        let mut fb = Fb::new();
        fb.draw_pixel(1, 8, Color::White);
        assert_eq!(fb.page(1).map(|p| p[1]), Some(0x01));
        assert_eq!(fb.page(0).map(|p| p.len()), Some(128));
        assert!(fb.page(8).is_none());
    }
}
