//! Commands of the SSD1306 controller

use crate::error::InvalidArgument;
use crate::traits;

/// SSD1306 commands
///
/// Should rarely (never?) be needed directly.
///
/// Arguments of a command follow it in the same command stream.
/// For more infos about the opcodes look into the SSD1306 datasheet.
#[allow(dead_code)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// 1 argument: addressing mode, see [AddressingMode]
    SetMemoryAddressingMode = 0x20,
    /// 2 arguments: start and end column (horizontal and vertical mode only)
    SetColumnAddress = 0x21,
    /// 2 arguments: start and end page (horizontal and vertical mode only)
    SetPageAddress = 0x22,

    /// 6 arguments: dummy 0x00, start page, interval, end page, dummy 0x00, dummy 0xFF
    RightHorizontalScroll = 0x26,
    LeftHorizontalScroll = 0x27,
    /// 5 arguments: dummy 0x00, start page, interval, end page, vertical offset
    VerticalRightHorizontalScroll = 0x29,
    VerticalLeftHorizontalScroll = 0x2A,
    DeactivateScroll = 0x2E,
    ActivateScroll = 0x2F,

    /// Display start line 0, lower 6 bits select the line
    SetDisplayStartLine = 0x40,

    /// 1 argument: contrast from 0x00 to 0xFF
    SetContrast = 0x81,
    /// 1 argument: [CHARGE_PUMP_ENABLE] or [CHARGE_PUMP_DISABLE]
    ChargePumpSetting = 0x8D,

    /// Column address 0 is mapped to SEG0
    SegmentRemapNormal = 0xA0,
    /// Column address 127 is mapped to SEG0
    SegmentRemapReversed = 0xA1,
    /// 2 arguments: top fixed rows, scroll area rows
    SetVerticalScrollArea = 0xA3,
    /// Output follows the RAM content
    ResumeToRam = 0xA4,
    /// Output ignores the RAM content, all pixels on
    EntireDisplayOn = 0xA5,
    NormalDisplay = 0xA6,
    InvertDisplay = 0xA7,
    /// 1 argument: multiplex ratio minus one (15 to 63)
    SetMultiplexRatio = 0xA8,
    DisplayOff = 0xAE,
    DisplayOn = 0xAF,

    /// Page start address in page addressing mode, lower 3 bits select the page
    SetPageStart = 0xB0,

    ComScanNormal = 0xC0,
    ComScanRemapped = 0xC8,
    /// 1 argument: vertical shift by COM from 0 to 63
    SetDisplayOffset = 0xD3,
    /// 1 argument: divide ratio (lower nibble) and oscillator frequency (upper nibble)
    SetDisplayClock = 0xD5,
    /// 1 argument: phase 1 (lower nibble) and phase 2 (upper nibble) period
    SetPrechargePeriod = 0xD9,
    /// 1 argument: COM pins hardware configuration
    SetComPins = 0xDA,
    /// 1 argument: V_COMH deselect level
    SetVcomhDeselect = 0xDB,
}

impl traits::Command for Command {
    /// Returns the opcode of the command
    fn address(self) -> u8 {
        self as u8
    }
}

/// Argument of [Command::ChargePumpSetting] turning the charge pump on
pub(crate) const CHARGE_PUMP_ENABLE: u8 = 0x14;
/// Argument of [Command::ChargePumpSetting] turning the charge pump off
pub(crate) const CHARGE_PUMP_DISABLE: u8 = 0x10;

/// Memory addressing modes, argument of [Command::SetMemoryAddressingMode]
#[allow(dead_code)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum AddressingMode {
    Horizontal = 0x00,
    Vertical = 0x01,
    Page = 0x02,
}

/// Direction of a hardware scroll
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Content moves to the right
    Right = 0,
    /// Content moves to the left
    Left = 1,
    /// Content moves up and to the right
    VerticalRight = 2,
    /// Content moves up and to the left
    VerticalLeft = 3,
}

impl ScrollDirection {
    pub(crate) fn command(self) -> Command {
        match self {
            ScrollDirection::Right => Command::RightHorizontalScroll,
            ScrollDirection::Left => Command::LeftHorizontalScroll,
            ScrollDirection::VerticalRight => Command::VerticalRightHorizontalScroll,
            ScrollDirection::VerticalLeft => Command::VerticalLeftHorizontalScroll,
        }
    }

    /// Does the scroll also move the content vertically?
    pub fn is_vertical(self) -> bool {
        matches!(self, ScrollDirection::VerticalRight | ScrollDirection::VerticalLeft)
    }
}

impl TryFrom<u8> for ScrollDirection {
    type Error = InvalidArgument;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ScrollDirection::Right),
            1 => Ok(ScrollDirection::Left),
            2 => Ok(ScrollDirection::VerticalRight),
            3 => Ok(ScrollDirection::VerticalLeft),
            _ => Err(InvalidArgument),
        }
    }
}

/// Display page, a band of 8 rows
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Page {
    /// COM0 - COM7
    Page0 = 0,
    /// COM8 - COM15
    Page1 = 1,
    /// COM16 - COM23
    Page2 = 2,
    /// COM24 - COM31
    Page3 = 3,
    /// COM32 - COM39
    Page4 = 4,
    /// COM40 - COM47
    Page5 = 5,
    /// COM48 - COM55
    Page6 = 6,
    /// COM56 - COM63
    Page7 = 7,
}

impl TryFrom<u8> for Page {
    type Error = InvalidArgument;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Page::Page0,
            1 => Page::Page1,
            2 => Page::Page2,
            3 => Page::Page3,
            4 => Page::Page4,
            5 => Page::Page5,
            6 => Page::Page6,
            7 => Page::Page7,
            _ => return Err(InvalidArgument),
        })
    }
}

/// Time between two scroll steps in frames
///
/// The more frames, the slower the scrolling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScrollInterval {
    Frames5 = 0,
    Frames64 = 1,
    Frames128 = 2,
    Frames256 = 3,
    Frames3 = 4,
    Frames4 = 5,
    Frames25 = 6,
    Frames2 = 7,
}

impl ScrollInterval {
    /// Number of frames between two steps
    pub fn frames(self) -> u16 {
        match self {
            ScrollInterval::Frames5 => 5,
            ScrollInterval::Frames64 => 64,
            ScrollInterval::Frames128 => 128,
            ScrollInterval::Frames256 => 256,
            ScrollInterval::Frames3 => 3,
            ScrollInterval::Frames4 => 4,
            ScrollInterval::Frames25 => 25,
            ScrollInterval::Frames2 => 2,
        }
    }
}

impl TryFrom<u8> for ScrollInterval {
    type Error = InvalidArgument;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => ScrollInterval::Frames5,
            1 => ScrollInterval::Frames64,
            2 => ScrollInterval::Frames128,
            3 => ScrollInterval::Frames256,
            4 => ScrollInterval::Frames3,
            5 => ScrollInterval::Frames4,
            6 => ScrollInterval::Frames25,
            7 => ScrollInterval::Frames2,
            _ => return Err(InvalidArgument),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Command as CommandTrait;

    #[test]
    fn command_addr() {
        assert_eq!(Command::SetMemoryAddressingMode.address(), 0x20);

        assert_eq!(Command::ChargePumpSetting.address(), 0x8D);

        assert_eq!(Command::DisplayOn.address(), 0xAF);
    }

    #[test]
    fn scroll_direction_from_u8() {
        assert_eq!(ScrollDirection::try_from(2u8), Ok(ScrollDirection::VerticalRight));
        assert_eq!(ScrollDirection::try_from(4u8), Err(InvalidArgument));
        assert_eq!(ScrollDirection::Left.command(), Command::LeftHorizontalScroll);
        assert!(ScrollDirection::VerticalLeft.is_vertical());
        assert!(!ScrollDirection::Right.is_vertical());
    }

    #[test]
    fn page_and_interval_from_u8() {
        assert_eq!(Page::try_from(7u8), Ok(Page::Page7));
        assert_eq!(Page::try_from(8u8), Err(InvalidArgument));
        assert_eq!(ScrollInterval::try_from(6u8), Ok(ScrollInterval::Frames25));
        assert_eq!(ScrollInterval::Frames25.frames(), 25);
        assert_eq!(ScrollInterval::try_from(8u8), Err(InvalidArgument));
    }
}
