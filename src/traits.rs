use core::fmt::Debug;

use crate::error::Error;

/// All commands need to have this trait which gives the opcode of the command
/// which needs to be send in a transfer prefixed with the command control byte
pub(crate) trait Command: Copy {
    fn address(self) -> u8;
}

/// Byte oriented bus the display is attached to
///
/// One implementation per target platform. The driver always passes the
/// control byte as `bytes[0]`; an implementation that has to split a
/// transfer because of a limited atomic write size must repeat that first
/// byte at the start of every chunk.
pub trait BusTransport {
    /// Native error of the bus
    type Error: Debug;

    /// Writes `bytes` to the device with `address` reachable over `channel`
    ///
    /// Returns [Error::WrongParams] if `channel` cannot be routed and
    /// [Error::Comm] if the transfer itself failed.
    fn write(&mut self, channel: u8, address: u8, bytes: &[u8]) -> Result<(), Error<Self::Error>>;
}

impl<T> BusTransport for &mut T
where
    T: BusTransport + ?Sized,
{
    type Error = T::Error;

    fn write(&mut self, channel: u8, address: u8, bytes: &[u8]) -> Result<(), Error<Self::Error>> {
        T::write(self, channel, address, bytes)
    }
}
