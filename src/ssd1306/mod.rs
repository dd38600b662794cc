//! A simple Driver for SSD1306 OLED panels
//!
//! The driver keeps a copy of the display RAM in a [FrameBuffer]. Drawing
//! only changes that copy, [update](Ssd1306::update) transfers it to the
//! panel. Configuration calls (contrast, inversion, scrolling) are sent to
//! the controller right away.
//!
//! # Example for a 128x64 panel on I2C
//!
//!```rust, no_run
//!# use embedded_hal_mock::eh1::i2c::Mock;
//!# fn main() -> Result<(), ssd1306_oled::error::Error<embedded_hal::i2c::ErrorKind>> {
//!use ssd1306_oled::{prelude::*, ssd1306::Ssd1306, transport::I2cTransport};
//!#
//!# let expectations = [];
//!# let i2c = Mock::new(&expectations);
//!
//!let mut display: Ssd1306<_> = Ssd1306::new(I2cTransport::<_>::new(i2c));
//!display.init(0, DEFAULT_ADDRESS)?;
//!
//!display.draw_rect(10, 10, 20, 10, Color::White)?;
//!display.draw_filled_circle(90, 32, 12, Color::White)?;
//!display.update()?;
//!
//!display.scroll(ScrollDirection::Right, Page::Page0, Page::Page7, ScrollInterval::Frames5)?;
//!# Ok(())
//!# }
//!```

use crate::color::Color;
use crate::error::Error;
use crate::font::Font;
use crate::framebuffer::{page_count, FrameBuffer};
use crate::interface::DisplayInterface;
use crate::traits::{BusTransport, Command as _};

pub(crate) mod command;

use self::command::{AddressingMode, Command, CHARGE_PUMP_DISABLE, CHARGE_PUMP_ENABLE};
pub use self::command::{Page, ScrollDirection, ScrollInterval};

/// Default I2C address of the panel (SA0 low)
pub const DEFAULT_ADDRESS: u8 = 0x3C;
/// I2C address of the panel with SA0 pulled high
pub const ALTERNATE_ADDRESS: u8 = 0x3D;
/// Contrast set by [init](Ssd1306::init)
pub const DEFAULT_CONTRAST: u8 = 0xFF;

/// Number of bytes of the configuration block sent during init, without the control byte
const CONFIG_BLOCK_LEN: usize = 24;

/// Ssd1306 driver
///
/// - T: the [BusTransport] the panel is attached to
/// - WIDTH, HEIGHT, BYTECOUNT: panel geometry, see [FrameBuffer]. The
///   defaults describe the common 128x64 panel.
///
/// The handle starts uninitialized. Everything but
/// [goto_xy](Ssd1306::goto_xy) and the accessors fails with
/// [Error::NotInitialized] until [init](Ssd1306::init) was called.
pub struct Ssd1306<T, const WIDTH: u32 = 128, const HEIGHT: u32 = 64, const BYTECOUNT: usize = 1024> {
    /// Connection Interface
    interface: DisplayInterface<T>,
    /// Pixels, cursor and inversion
    frame: FrameBuffer<WIDTH, HEIGHT, BYTECOUNT>,
    /// Mirror of the scroll activation of the controller
    scrolling: bool,
}

impl<T, const WIDTH: u32, const HEIGHT: u32, const BYTECOUNT: usize> Ssd1306<T, WIDTH, HEIGHT, BYTECOUNT>
where
    T: BusTransport,
{
    const PANEL: () = assert!(
        WIDTH <= 128 && HEIGHT <= 64 && HEIGHT >= 16,
        "the SSD1306 drives at most 128x64 pixels and at least 16 rows"
    );

    /// Creates an uninitialized driver on top of `transport`
    ///
    /// Nothing is sent before [init](Ssd1306::init).
    pub fn new(transport: T) -> Self {
        let () = Self::PANEL;
        Ssd1306 {
            interface: DisplayInterface::new(transport),
            frame: FrameBuffer::new(),
            scrolling: false,
        }
    }

    /// Soft-resets the panel and the handle
    ///
    /// Binds the handle to `address` on `channel`, then sends: display off,
    /// normal colors, full contrast, scrolling off, the addressing, hardware
    /// and timing configuration, display on. Finishes with
    /// [clear_display](Ssd1306::clear_display).
    ///
    /// A failing step aborts the sequence, the panel is left partially
    /// configured.
    pub fn init(&mut self, channel: u8, address: u8) -> Result<(), Error<T::Error>> {
        log::debug!("initializing ssd1306 at {:#04x} on channel {}", address, channel);

        self.frame = FrameBuffer::new();
        self.scrolling = false;
        self.interface.bind(channel, address);

        self.display_off()?;
        self.set_inversion(false)?;
        self.set_contrast(DEFAULT_CONTRAST)?;
        self.set_scroll_status(false)?;
        self.interface.commands(&Self::configuration())?;
        self.display_on()?;
        self.clear_display()
    }

    /// Addressing, hardware and timing configuration for this geometry
    fn configuration() -> [u8; CONFIG_BLOCK_LEN] {
        let com_pins = if HEIGHT == 64 { 0x12 } else { 0x02 };
        [
            Command::ResumeToRam.address(),
            // horizontal addressing over the whole panel
            Command::SetMemoryAddressingMode.address(),
            AddressingMode::Horizontal as u8,
            Command::SetColumnAddress.address(),
            0x00,
            (WIDTH - 1) as u8,
            Command::SetPageAddress.address(),
            0x00,
            (page_count(HEIGHT) - 1) as u8,
            // hardware configuration
            Command::SetDisplayStartLine.address(),
            Command::SegmentRemapReversed.address(),
            Command::SetMultiplexRatio.address(),
            (HEIGHT - 1) as u8,
            Command::ComScanRemapped.address(),
            Command::SetDisplayOffset.address(),
            0x00,
            Command::SetComPins.address(),
            com_pins,
            // timing and driving scheme
            Command::SetDisplayClock.address(),
            0x80,
            Command::SetPrechargePeriod.address(),
            0x22,
            Command::SetVcomhDeselect.address(),
            // 0.77 x Vcc
            0x20,
        ]
    }

    /// Enables the charge pump and turns the panel on
    pub fn display_on(&mut self) -> Result<(), Error<T::Error>> {
        log::debug!("display on");
        self.interface.commands(&[
            Command::ChargePumpSetting.address(),
            CHARGE_PUMP_ENABLE,
            Command::DisplayOn.address(),
        ])
    }

    /// Disables the charge pump and turns the panel off
    ///
    /// Display RAM and configuration are kept, [display_on](Ssd1306::display_on)
    /// brings the content back.
    pub fn display_off(&mut self) -> Result<(), Error<T::Error>> {
        log::debug!("display off");
        self.interface.commands(&[
            Command::ChargePumpSetting.address(),
            CHARGE_PUMP_DISABLE,
            Command::DisplayOff.address(),
        ])
    }

    /// Sets the contrast, 0x00 to 0xFF
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error<T::Error>> {
        self.interface
            .commands(&[Command::SetContrast.address(), contrast])
    }

    /// Switches between normal and inverted colors
    ///
    /// The controller inverts its output, and every color drawn afterwards
    /// is complemented as well.
    pub fn set_inversion(&mut self, inverted: bool) -> Result<(), Error<T::Error>> {
        let command = if inverted {
            Command::InvertDisplay
        } else {
            Command::NormalDisplay
        };
        self.interface.cmd(command)?;
        self.frame.set_inverted(inverted);
        Ok(())
    }

    /// Starts or stops the configured hardware scroll
    pub fn set_scroll_status(&mut self, scrolling: bool) -> Result<(), Error<T::Error>> {
        let command = if scrolling {
            Command::ActivateScroll
        } else {
            Command::DeactivateScroll
        };
        self.interface.cmd(command)?;
        self.scrolling = scrolling;
        Ok(())
    }

    /// Configures a continuous hardware scroll of the pages `start` to `end` and starts it
    ///
    /// Vertical directions move the content by one row per step. Pages
    /// outside of the panel are rejected.
    pub fn scroll(
        &mut self,
        direction: ScrollDirection,
        start: Page,
        end: Page,
        interval: ScrollInterval,
    ) -> Result<(), Error<T::Error>> {
        let pages = page_count(HEIGHT);
        if start as u32 >= pages || end as u32 >= pages {
            log::warn!("scroll pages {:?}..{:?} outside of {} pages", start, end, pages);
            return Err(Error::WrongParams);
        }
        log::debug!(
            "scroll {:?} pages {:?}..{:?} every {} frames",
            direction,
            start,
            end,
            interval.frames()
        );

        self.interface.commands(&[
            direction.command().address(),
            0x00,
            start as u8,
            interval as u8,
            end as u8,
        ])?;

        if direction.is_vertical() {
            // vertical offset of one row per step
            self.interface.command(0x01)?;
        } else {
            self.interface.command(0x00)?;
            self.interface.command(0xFF)?;
        }

        self.set_scroll_status(true)
    }

    /// Transfers the framebuffer to the display RAM, one page per transfer
    ///
    /// Relies on horizontal addressing: the controller wraps to the next
    /// page by itself, so no address commands are needed.
    pub fn update(&mut self) -> Result<(), Error<T::Error>> {
        log::trace!("flushing {} pages", self.frame.pages());
        for page in self.frame.page_iter() {
            self.interface.data(page)?;
        }
        Ok(())
    }

    /// Resets the inversion, fills the buffer black and updates the panel
    pub fn clear_display(&mut self) -> Result<(), Error<T::Error>> {
        self.set_inversion(false)?;
        self.draw_fill(Color::Black)?;
        self.update()
    }

    /// Sets every bit of the buffer to 0, the panel is not touched
    pub fn clear_buffer(&mut self) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        self.frame.clear();
        Ok(())
    }

    /// Moves the text cursor, rejects positions outside of the panel
    pub fn goto_xy(&mut self, x: u32, y: u32) -> Result<(), Error<T::Error>> {
        Ok(self.frame.goto_xy(x, y)?)
    }

    /// Fills the whole buffer with `color`
    pub fn draw_fill(&mut self, color: Color) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        self.frame.fill(color);
        Ok(())
    }

    /// Sets a pixel, coordinates outside of the panel are ignored
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        self.frame.draw_pixel(x, y, color);
        Ok(())
    }

    /// Draws a character at the cursor, see [FrameBuffer::draw_char]
    pub fn draw_char(&mut self, ch: char, font: &Font, color: Color) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        Ok(self.frame.draw_char(ch, font, color)?)
    }

    /// Draws a string at the cursor, see [FrameBuffer::draw_str]
    pub fn draw_str(&mut self, s: &str, font: &Font, color: Color) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        Ok(self.frame.draw_str(s, font, color)?)
    }

    /// Draws a number at the cursor, see [FrameBuffer::draw_int]
    pub fn draw_int(&mut self, num: i32, base: u32, font: &Font, color: Color) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        Ok(self.frame.draw_int(num, base, font, color)?)
    }

    /// Draws a line, see [FrameBuffer::draw_line]
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        self.frame.draw_line(x0, y0, x1, y1, color);
        Ok(())
    }

    /// Draws a rectangle outline, see [FrameBuffer::draw_rect]
    pub fn draw_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        self.frame.draw_rect(x, y, w, h, color);
        Ok(())
    }

    /// Draws a filled rectangle, see [FrameBuffer::draw_filled_rect]
    pub fn draw_filled_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        self.frame.draw_filled_rect(x, y, w, h, color);
        Ok(())
    }

    /// Draws a circle outline, see [FrameBuffer::draw_circle]
    pub fn draw_circle(&mut self, x0: i32, y0: i32, r: u32, color: Color) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        self.frame.draw_circle(x0, y0, r, color);
        Ok(())
    }

    /// Draws a filled circle, see [FrameBuffer::draw_filled_circle]
    pub fn draw_filled_circle(&mut self, x0: i32, y0: i32, r: u32, color: Color) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        self.frame.draw_filled_circle(x0, y0, r, color);
        Ok(())
    }

    /// Draws a triangle outline, see [FrameBuffer::draw_triangle]
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
    ) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        self.frame.draw_triangle(x1, y1, x2, y2, x3, y3, color);
        Ok(())
    }

    /// Draws a filled triangle, see [FrameBuffer::draw_filled_triangle]
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
    ) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        self.frame.draw_filled_triangle(x1, y1, x2, y2, x3, y3, color);
        Ok(())
    }

    /// Draws the set bits of a bitmap, see [FrameBuffer::draw_bitmap]
    pub fn draw_bitmap(
        &mut self,
        x: i32,
        y: i32,
        bitmap: &[u8],
        w: u32,
        h: u32,
        color: Color,
    ) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        Ok(self.frame.draw_bitmap(x, y, bitmap, w, h, color)?)
    }

    /// Has [init](Ssd1306::init) been called?
    pub fn is_initialized(&self) -> bool {
        self.interface.is_bound()
    }

    /// Are drawn colors and the panel output inverted?
    pub fn is_inverted(&self) -> bool {
        self.frame.is_inverted()
    }

    /// Is a hardware scroll running?
    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// Current text cursor position `(x, y)`
    pub fn cursor(&self) -> (u32, u32) {
        self.frame.cursor()
    }

    /// Bus channel set by [init](Ssd1306::init)
    pub fn channel(&self) -> Option<u8> {
        self.interface.route().map(|route| route.channel)
    }

    /// Device address set by [init](Ssd1306::init)
    pub fn address(&self) -> Option<u8> {
        self.interface.route().map(|route| route.address)
    }

    /// Panel size `(width, height)` in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        (WIDTH, HEIGHT)
    }

    /// get internal buffer
    pub fn buffer(&self) -> &[u8] {
        self.frame.buffer()
    }

    /// The framebuffer, e.g. to inspect pixels
    pub fn framebuffer(&self) -> &FrameBuffer<WIDTH, HEIGHT, BYTECOUNT> {
        &self.frame
    }

    /// Mutable framebuffer, e.g. as `embedded-graphics` draw target
    ///
    /// Drawing through it skips the initialization check.
    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer<WIDTH, HEIGHT, BYTECOUNT> {
        &mut self.frame
    }

    /// Releases the transport
    pub fn release(self) -> T {
        self.interface.release()
    }

    fn ensure_initialized(&self) -> Result<(), Error<T::Error>> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }
}
