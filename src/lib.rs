//! A simple Driver for SSD1306 monochrome OLED panels
//!
//! This driver was built using [`embedded-hal`] traits.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/1.0.0
//!
//! The driver owns a 1-bit framebuffer with a small rasterizer (pixels,
//! lines, rectangles, circles, triangles, bitmaps and bitmap-font text).
//! Drawing happens in memory, [`Ssd1306::update`](ssd1306::Ssd1306::update)
//! sends the whole buffer to the panel.
//!
//! # Requirements
//!
//! ### I2C
//!
//! - 7 bit addressing, the panel answers at [DEFAULT_ADDRESS] or [ALTERNATE_ADDRESS]
//! - Writes only, the panel is never read
//! - Buses limited in their write length are supported by
//!   [I2cTransport](transport::I2cTransport)'s `MAX_WRITE` parameter
//!
//! ### Other....
//!
//! - Buffersize: `WIDTH * HEIGHT / 8` bytes, one byte holds 8 vertically
//!   stacked pixels of a column with the lowest bit on top
//! - Panels up to 128x64 pixels
//!
//! # Examples
//!
//!```rust, no_run
//!# use embedded_hal_mock::eh1::i2c::Mock;
//!# fn main() -> Result<(), ssd1306_oled::error::Error<embedded_hal::i2c::ErrorKind>> {
//!use ssd1306_oled::{prelude::*, ssd1306::Ssd1306, transport::I2cTransport};
//!#
//!# let expectations = [];
//!# let i2c = Mock::new(&expectations);
//!
//!// a 128x32 panel
//!let mut display: Ssd1306<_, 128, 32, 512> = Ssd1306::new(I2cTransport::<_>::new(i2c));
//!display.init(0, DEFAULT_ADDRESS)?;
//!
//!display.goto_xy(0, 0)?;
//!display.draw_line(0, 31, 127, 0, Color::White)?;
//!display.update()?;
//!
//!display.set_inversion(true)?;
//!display.display_off()?;
//!# Ok(())
//!# }
//!```
#![no_std]

#[cfg(feature = "graphics")]
pub mod graphics;

mod traits;

pub mod color;
pub mod error;
pub mod font;
pub mod framebuffer;

mod drawing;

/// Framing of command and data transfers
mod interface;

pub mod ssd1306;
pub mod transport;

pub use crate::interface::{CMD_CONTROL_BYTE, DATA_CONTROL_BYTE, DATA_WRITE_BUFFER_SIZE};
pub use crate::ssd1306::{ALTERNATE_ADDRESS, DEFAULT_ADDRESS};
pub use crate::traits::BusTransport;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::error::Error;
    pub use crate::font::Font;
    pub use crate::framebuffer::FrameBuffer;
    pub use crate::ssd1306::{Page, ScrollDirection, ScrollInterval, Ssd1306};
    pub use crate::traits::BusTransport;
    pub use crate::{ALTERNATE_ADDRESS, DEFAULT_ADDRESS};
}
