//! Rasterization of shapes, bitmaps and text into a [FrameBuffer]
//!
//! Everything here only touches the buffer. Shapes are allowed to leave the
//! panel, the parts outside are dropped pixel by pixel.

use crate::color::Color;
use crate::error::InvalidArgument;
use crate::font::Font;
use crate::framebuffer::FrameBuffer;

/// Room for a 32 digit base 2 number and its sign
const INT_DIGITS: usize = 33;

impl<const WIDTH: u32, const HEIGHT: u32, const BYTECOUNT: usize> FrameBuffer<WIDTH, HEIGHT, BYTECOUNT> {
    /// Draws a line with Bresenham's algorithm, both end points included
    ///
    /// The line is always rasterized from the lower to the higher end point
    /// so both directions produce the same pixels.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        self.line(x0.into(), y0.into(), x1.into(), y1.into(), color);
    }

    // Shapes may reach past the `i32` range, so the rasterizer works on `i64`.
    fn line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
        if !Self::overlaps(x0, y0, x1, y1) {
            return;
        }
        let ((mut x, mut y), (x1, y1)) = if (x0, y0) <= (x1, y1) {
            ((x0, y0), (x1, y1))
        } else {
            ((x1, y1), (x0, y0))
        };
        // axis aligned lines light the same pixels when cut to the panel
        let (x1, y1) = if y == y1 {
            x = x.max(0);
            (x1.min(i64::from(WIDTH) - 1), y1)
        } else if x == x1 {
            y = y.max(0);
            (x1, y1.min(i64::from(HEIGHT) - 1))
        } else {
            (x1, y1)
        };

        let dx = x1 - x;
        let dy = -(y1 - y).abs();
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            // x only grows and y only moves towards y1: once past the panel nothing is left to draw
            if x >= i64::from(WIDTH) || (sy > 0 && y >= i64::from(HEIGHT)) || (sy < 0 && y < 0) {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += 1;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Outline from `(x, y)` to `(x + w, y + h)`, both corners included
    pub fn draw_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        let (x0, y0) = (i64::from(x), i64::from(y));
        let (x1, y1) = (x0 + i64::from(w), y0 + i64::from(h));
        self.line(x0, y0, x1, y0, color);
        self.line(x0, y1, x1, y1, color);
        self.line(x0, y0, x0, y1, color);
        self.line(x1, y0, x1, y1, color);
    }

    /// Filled box from `(x, y)` to `(x + w, y + h)`, inclusive on all sides
    pub fn draw_filled_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        let (x0, y0) = (i64::from(x), i64::from(y));
        let x1 = x0 + i64::from(w);
        // rows outside of the panel draw nothing
        let top = y0.max(0);
        let bottom = (y0 + i64::from(h)).min(i64::from(HEIGHT) - 1);
        for row in top..=bottom {
            self.line(x0, row, x1, row, color);
        }
    }

    /// Circle outline with the midpoint algorithm
    pub fn draw_circle(&mut self, x0: i32, y0: i32, r: u32, color: Color) {
        let (x0, y0, r) = (i64::from(x0), i64::from(y0), i64::from(r));
        if !Self::overlaps(x0 - r, y0 - r, x0 + r, y0 + r) || Self::panel_inside_circle(x0, y0, r) {
            return;
        }
        midpoint_circle(r, |x, y| {
            self.plot(x0 - x, y0 + y, color);
            self.plot(x0 - y, y0 - x, color);
            self.plot(x0 + x, y0 - y, color);
            self.plot(x0 + y, y0 + x, color);
        });
    }

    /// Filled circle, connecting opposite points of every midpoint step
    ///
    /// The diagonal spokes do not cover every pixel of the disc, larger
    /// radii show small gaps.
    pub fn draw_filled_circle(&mut self, x0: i32, y0: i32, r: u32, color: Color) {
        let (x0, y0, r) = (i64::from(x0), i64::from(y0), i64::from(r));
        if !Self::overlaps(x0 - r, y0 - r, x0 + r, y0 + r) {
            return;
        }
        midpoint_circle(r, |x, y| {
            self.line(x0 - x, y0 + y, x0 + x, y0 - y, color);
            self.line(x0 - y, y0 - x, x0 + y, y0 + x, color);
            self.line(x0 + x, y0 - y, x0 - x, y0 + y, color);
            self.line(x0 + y, y0 + x, x0 - y, y0 - x, color);
        });
    }

    // true if the whole panel lies strictly inside the ring of outline pixels
    fn panel_inside_circle(x0: i64, y0: i64, r: i64) -> bool {
        let inner = i128::from(r - 2);
        if inner <= 0 {
            return false;
        }
        let (right, bottom) = (i64::from(WIDTH) - 1, i64::from(HEIGHT) - 1);
        [(0, 0), (right, 0), (0, bottom), (right, bottom)]
            .iter()
            .all(|&(cx, cy)| {
                let (dx, dy) = (i128::from(cx - x0), i128::from(cy - y0));
                dx * dx + dy * dy < inner * inner
            })
    }

    /// Triangle outline through the three vertices
    #[allow(clippy::too_many_arguments)]
    pub fn draw_triangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        color: Color,
    ) {
        self.draw_line(x1, y1, x2, y2, color);
        self.draw_line(x2, y2, x3, y3, color);
        self.draw_line(x3, y3, x1, y1, color);
    }

    /// Filled triangle
    ///
    /// Walks the edge from vertex 1 to vertex 2 with a DDA and draws a line
    /// from every visited point to vertex 3. This is a fan fill, thin
    /// triangles may keep a few unset pixels.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_filled_triangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        color: Color,
    ) {
        let (x1, y1, x2, y2) = (i64::from(x1), i64::from(y1), i64::from(x2), i64::from(y2));
        let (x3, y3) = (i64::from(x3), i64::from(y3));
        let (left, right) = (x1.min(x2).min(x3), x1.max(x2).max(x3));
        let (top, bottom) = (y1.min(y2).min(y3), y1.max(y2).max(y3));
        if !Self::overlaps(left, top, right, bottom) {
            return;
        }

        let delta_x = (x2 - x1).abs();
        let delta_y = (y2 - y1).abs();
        let step_x = if x2 >= x1 { 1 } else { -1 };
        let step_y = if y2 >= y1 { 1 } else { -1 };

        // (x, y) increments on an error overflow and on every step
        let (inc1, inc2, den, mut num, num_add, num_pixels) = if delta_x >= delta_y {
            ((0, step_y), (step_x, 0), delta_x, delta_x / 2, delta_y, delta_x)
        } else {
            ((step_x, 0), (0, step_y), delta_y, delta_y / 2, delta_x, delta_y)
        };

        let (mut x, mut y) = (x1, y1);
        for _ in 0..=num_pixels {
            self.line(x, y, x3, y3, color);

            num += num_add;
            if num >= den {
                num -= den;
                x += inc1.0;
                y += inc1.1;
            }
            x += inc2.0;
            y += inc2.1;
        }
    }

    /// Draws a bitmap with its top left corner at `(x, y)`
    ///
    /// The bitmap is row major, MSB first, with every row padded to a whole
    /// byte. Only set bits are drawn, the background is left untouched.
    /// Fails if `bitmap` is shorter than `ceil(w / 8) * h` bytes.
    pub fn draw_bitmap(
        &mut self,
        x: i32,
        y: i32,
        bitmap: &[u8],
        w: u32,
        h: u32,
        color: Color,
    ) -> Result<(), InvalidArgument> {
        let byte_width = (w as usize).div_ceil(8);
        let needed = byte_width.checked_mul(h as usize);
        if !needed.is_some_and(|needed| bitmap.len() >= needed) {
            log::warn!("bitmap of {} bytes is too small for {}x{}", bitmap.len(), w, h);
            return Err(InvalidArgument);
        }

        let (x, y) = (i64::from(x), i64::from(y));
        for (row, line) in bitmap.chunks(byte_width.max(1)).take(h as usize).enumerate() {
            for col in 0..w as usize {
                if line[col / 8] & (0x80 >> (col % 8)) != 0 {
                    self.plot(x + col as i64, y + row as i64, color);
                }
            }
        }
        Ok(())
    }

    /// Draws one character at the cursor and advances the cursor by the glyph width
    ///
    /// Set glyph bits are drawn with `color`, the others with its
    /// complement. The cursor does not wrap to the next line. Characters the
    /// font has no glyph for are rejected before anything is drawn.
    pub fn draw_char(&mut self, ch: char, font: &Font, color: Color) -> Result<(), InvalidArgument> {
        let code = u8::try_from(ch).map_err(|_| InvalidArgument)?;
        if !font.has_glyph(code) {
            log::warn!("font has no glyph for {:?}", ch);
            return Err(InvalidArgument);
        }

        let (cx, cy) = self.cursor();
        for row in 0..font.height() {
            let bits = font.glyph_row(code, row).ok_or(InvalidArgument)?;
            for col in 0..font.width() {
                let pixel_color = if (bits << col) & 0x8000 != 0 { color } else { !color };
                self.plot(
                    i64::from(cx) + i64::from(col),
                    i64::from(cy) + i64::from(row),
                    pixel_color,
                );
            }
        }

        self.set_cursor_unchecked(cx.saturating_add(font.width() as u32), cy);
        Ok(())
    }

    /// Draws a string character by character, stops at the first failing one
    pub fn draw_str(&mut self, s: &str, font: &Font, color: Color) -> Result<(), InvalidArgument> {
        s.chars().try_for_each(|ch| self.draw_char(ch, font, color))
    }

    /// Draws `num` in `base` (2 to 32)
    ///
    /// Digits above 9 use capital letters. Only base 10 numbers carry a
    /// minus sign, other bases print the magnitude.
    pub fn draw_int(&mut self, num: i32, base: u32, font: &Font, color: Color) -> Result<(), InvalidArgument> {
        let mut digits = [0u8; INT_DIGITS];
        let len = format_int(num, base, &mut digits)?;
        let text = core::str::from_utf8(&digits[..len]).map_err(|_| InvalidArgument)?;
        self.draw_str(text, font, color)
    }
}

/// Runs the midpoint circle algorithm and hands every step to `plot`
///
/// `plot` receives `(x, y)` with `x` running from `-r` to `0`, the caller
/// mirrors it into the four quadrants.
fn midpoint_circle(r: i64, mut plot: impl FnMut(i64, i64)) {
    let (mut x, mut y) = (-r, 0);
    let mut err = 2 - 2 * r;

    loop {
        plot(x, y);

        let prev = err;
        if prev > x {
            x += 1;
            err += x * 2 + 1;
        }
        if prev <= y {
            y += 1;
            err += y * 2 + 1;
        }
        if x >= 0 {
            break;
        }
    }
}

/// Writes the ASCII representation of `num` in `base` into `out`
///
/// Returns the number of bytes used.
fn format_int(num: i32, base: u32, out: &mut [u8; INT_DIGITS]) -> Result<usize, InvalidArgument> {
    if !(2..=32).contains(&base) {
        log::warn!("unsupported base {}", base);
        return Err(InvalidArgument);
    }

    if num == 0 {
        out[0] = b'0';
        return Ok(1);
    }

    let mut magnitude = num.unsigned_abs();
    let mut len = 0;
    // least significant digit first
    while magnitude != 0 {
        let rem = (magnitude % base) as u8;
        out[len] = if rem > 9 { rem - 10 + b'A' } else { rem + b'0' };
        len += 1;
        magnitude /= base;
    }
    if num < 0 && base == 10 {
        out[len] = b'-';
        len += 1;
    }

    out[..len].reverse();
    Ok(len)
}
