//! Bus transports for the display
//!
//! [I2cTransport] puts any `embedded-hal` I2C bus behind the
//! [BusTransport] interface the driver talks to. Other platforms can provide
//! their own implementation of the trait.

use embedded_hal::i2c::I2c;

use crate::error::Error;
use crate::traits::BusTransport;

/// Default largest write a bus accepts in one transaction (Arduino `Wire`)
pub const DEFAULT_MAX_WRITE: usize = 32;

/// [BusTransport] over a blocking `embedded-hal` I2C bus
///
/// - MAX_WRITE: largest number of bytes the bus writes in one transaction,
///   control byte included. Longer transfers are split into chunks of
///   `MAX_WRITE - 1` payload bytes, every chunk starting with the control
///   byte again.
///
/// The transport answers to exactly one logical channel, 0 unless chosen
/// with [with_channel](I2cTransport::with_channel).
pub struct I2cTransport<I2C, const MAX_WRITE: usize = DEFAULT_MAX_WRITE> {
    i2c: I2C,
    channel: u8,
}

impl<I2C, const MAX_WRITE: usize> I2cTransport<I2C, MAX_WRITE>
where
    I2C: I2c,
{
    const CHUNK: () = assert!(MAX_WRITE >= 2, "MAX_WRITE must fit the control byte and one payload byte");

    /// Creates a transport for channel 0
    pub fn new(i2c: I2C) -> Self {
        Self::with_channel(i2c, 0)
    }

    /// Creates a transport answering to `channel`
    pub fn with_channel(i2c: I2C, channel: u8) -> Self {
        let () = Self::CHUNK;
        I2cTransport { i2c, channel }
    }

    /// Channel this transport routes
    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Releases the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, const MAX_WRITE: usize> BusTransport for I2cTransport<I2C, MAX_WRITE>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write(&mut self, channel: u8, address: u8, bytes: &[u8]) -> Result<(), Error<Self::Error>> {
        if channel != self.channel {
            log::warn!("no i2c bus on channel {}", channel);
            return Err(Error::WrongParams);
        }
        let (&control, payload) = bytes.split_first().ok_or(Error::WrongParams)?;

        let mut chunk = [0u8; MAX_WRITE];
        chunk[0] = control;
        for part in payload.chunks(MAX_WRITE - 1) {
            chunk[1..=part.len()].copy_from_slice(part);
            log::trace!("i2c write of {} bytes to {:#04x}", part.len() + 1, address);
            self.i2c
                .write(address, &chunk[..=part.len()])
                .map_err(Error::Comm)?;
        }
        Ok(())
    }
}
