use crate::error::Error;
use crate::traits::{BusTransport, Command};

/// A command list must start with this byte to tell the controller that the
/// following bytes are commands
pub const CMD_CONTROL_BYTE: u8 = 0x00;

/// A data list must start with this byte to tell the controller that the
/// following bytes are display RAM data
pub const DATA_CONTROL_BYTE: u8 = 0x40;

/// Size of the staging buffer of a single transfer in bytes
///
/// One control byte plus one full row of a 128 pixel wide panel.
pub const DATA_WRITE_BUFFER_SIZE: usize = 129;

/// Bus route of a display, fixed by `init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Route {
    pub(crate) channel: u8,
    pub(crate) address: u8,
}

/// The Connection Interface of the SSD1306
///
/// Frames outgoing bytes with the command or data control byte and hands
/// them to the transport. Nothing is sent before the interface got a
/// [Route].
pub(crate) struct DisplayInterface<T> {
    transport: T,
    route: Option<Route>,
}

impl<T> DisplayInterface<T>
where
    T: BusTransport,
{
    /// Creates a new `DisplayInterface` struct without a route
    pub fn new(transport: T) -> Self {
        DisplayInterface {
            transport,
            route: None,
        }
    }

    /// Sets the channel and device address all further transfers go to
    pub(crate) fn bind(&mut self, channel: u8, address: u8) {
        self.route = Some(Route { channel, address });
    }

    pub(crate) fn route(&self) -> Option<Route> {
        self.route
    }

    pub(crate) fn is_bound(&self) -> bool {
        self.route.is_some()
    }

    pub(crate) fn release(self) -> T {
        self.transport
    }

    /// Basic function for sending [Commands](Command).
    pub(crate) fn cmd<C: Command>(&mut self, command: C) -> Result<(), Error<T::Error>> {
        self.command(command.address())
    }

    /// Sends a single command byte
    ///
    /// Also used for the argument bytes of a command, the controller treats
    /// them as part of the command stream.
    pub(crate) fn command(&mut self, byte: u8) -> Result<(), Error<T::Error>> {
        let route = self.route.ok_or(Error::NotInitialized)?;
        self.transport
            .write(route.channel, route.address, &[CMD_CONTROL_BYTE, byte])
    }

    /// Sends a list of command bytes
    ///
    /// Lists longer than the staging buffer go out in several transfers,
    /// each starting with the command control byte again. The controller
    /// reads them as one continuous command stream.
    pub(crate) fn commands(&mut self, bytes: &[u8]) -> Result<(), Error<T::Error>> {
        if self.route.is_none() {
            return Err(Error::NotInitialized);
        }
        bytes
            .chunks(DATA_WRITE_BUFFER_SIZE - 1)
            .try_for_each(|part| self.framed(CMD_CONTROL_BYTE, part))
    }

    /// Basic function for sending an array of u8-values of display RAM data
    ///
    /// At most `DATA_WRITE_BUFFER_SIZE - 1` bytes fit into one transfer.
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), Error<T::Error>> {
        let route = self.route.ok_or(Error::NotInitialized)?;
        if data.len() >= DATA_WRITE_BUFFER_SIZE {
            log::warn!(
                "data transfer of {} bytes to {:#04x} exceeds the staging buffer",
                data.len(),
                route.address
            );
            return Err(Error::WrongParams);
        }
        self.framed(DATA_CONTROL_BYTE, data)
    }

    // stages `control` followed by at most `DATA_WRITE_BUFFER_SIZE - 1` bytes and writes them in one go
    fn framed(&mut self, control: u8, bytes: &[u8]) -> Result<(), Error<T::Error>> {
        let route = self.route.ok_or(Error::NotInitialized)?;

        let mut staging = [0u8; DATA_WRITE_BUFFER_SIZE];
        staging[0] = control;
        staging[1..=bytes.len()].copy_from_slice(bytes);

        self.transport
            .write(route.channel, route.address, &staging[..=bytes.len()])
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    extern crate std;
    use std::vec::Vec;

    /// One transfer seen by [Recorder]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) struct Transfer {
        pub channel: u8,
        pub address: u8,
        pub bytes: Vec<u8>,
    }

    /// Transport that records every transfer and can be told to fail
    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        pub transfers: Vec<Transfer>,
        /// Fail the transfer with this index (0 based) with a bus error
        pub fail_at: Option<usize>,
        /// Channels the recorder can route, every channel if empty
        pub channels: Vec<u8>,
    }

    impl Recorder {
        pub(crate) fn failing_at(index: usize) -> Self {
            Recorder {
                fail_at: Some(index),
                ..Default::default()
            }
        }

        pub(crate) fn bytes(&self) -> Vec<Vec<u8>> {
            self.transfers.iter().map(|t| t.bytes.clone()).collect()
        }
    }

    impl BusTransport for Recorder {
        type Error = &'static str;

        fn write(&mut self, channel: u8, address: u8, bytes: &[u8]) -> Result<(), Error<Self::Error>> {
            if !self.channels.is_empty() && !self.channels.contains(&channel) {
                return Err(Error::WrongParams);
            }
            if self.fail_at == Some(self.transfers.len()) {
                return Err(Error::Comm("nack"));
            }
            self.transfers.push(Transfer {
                channel,
                address,
                bytes: bytes.to_vec(),
            });
            Ok(())
        }
    }

    #[derive(Clone, Copy)]
    struct Opcode(u8);

    impl Command for Opcode {
        fn address(self) -> u8 {
            self.0
        }
    }

    fn bound() -> DisplayInterface<Recorder> {
        let mut interface = DisplayInterface::new(Recorder::default());
        interface.bind(1, 0x3D);
        interface
    }

    #[test]
    fn unbound_interface_sends_nothing() {
        let mut interface = DisplayInterface::new(Recorder::default());
        assert_eq!(interface.command(0xAF), Err(Error::NotInitialized));
        assert_eq!(interface.commands(&[0x81, 0x7F]), Err(Error::NotInitialized));
        assert_eq!(interface.data(&[0xFF; 4]), Err(Error::NotInitialized));
        assert!(interface.release().transfers.is_empty());
    }

    #[test]
    fn command_framing() {
        let mut interface = bound();
        interface.cmd(Opcode(0xAE)).unwrap();
        interface.commands(&[0x8D, 0x14, 0xAF]).unwrap();
        let recorder = interface.release();
        assert_eq!(recorder.bytes(), [std::vec![0x00, 0xAE], std::vec![0x00, 0x8D, 0x14, 0xAF]]);
        assert!(recorder.transfers.iter().all(|t| t.channel == 1 && t.address == 0x3D));
    }

    #[test]
    fn data_framing() {
        let mut interface = bound();
        interface.data(&[1, 2, 3]).unwrap();
        assert_eq!(interface.release().bytes(), [std::vec![0x40, 1, 2, 3]]);
    }

    #[test]
    fn staging_capacity() {
        let mut interface = bound();
        assert_eq!(interface.data(&[0xAA; 128]), Ok(()));
        assert_eq!(interface.data(&[0xAA; 129]), Err(Error::WrongParams));

        let recorder = interface.release();
        assert_eq!(recorder.transfers.len(), 1);
        assert_eq!(recorder.transfers[0].bytes.len(), DATA_WRITE_BUFFER_SIZE);
    }

    #[test]
    fn long_command_lists_are_split() {
        let mut interface = bound();
        assert_eq!(interface.commands(&[0xE3; 130]), Ok(()));
        assert_eq!(interface.commands(&[]), Ok(()));

        let recorder = interface.release();
        assert_eq!(recorder.transfers.len(), 2);
        assert_eq!(recorder.transfers[0].bytes.len(), DATA_WRITE_BUFFER_SIZE);
        assert_eq!(recorder.transfers[1].bytes, [CMD_CONTROL_BYTE, 0xE3, 0xE3]);
        assert!(recorder.transfers[0].bytes[1..].iter().all(|&b| b == 0xE3));
    }

    #[test]
    fn transport_errors_are_passed_through() {
        let mut interface = DisplayInterface::new(Recorder::failing_at(0));
        interface.bind(0, 0x3C);
        assert_eq!(interface.command(0xAF), Err(Error::Comm("nack")));

        let mut interface = DisplayInterface::new(Recorder {
            channels: std::vec![0],
            ..Default::default()
        });
        interface.bind(2, 0x3C);
        assert_eq!(interface.data(&[0]), Err(Error::WrongParams));
    }
}
