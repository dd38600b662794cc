use core::fmt::{Debug, Display, Formatter};

/// Driver error type
///
/// `E` is the native error of the [BusTransport](crate::BusTransport)
/// in use, e.g. the error of the wrapped I2C peripheral.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Error<E> {
    /// The device handle was used before a successful [init](crate::ssd1306::Ssd1306::init)
    NotInitialized,

    /// A caller supplied argument is outside of its valid range
    ///
    /// Also returned by a transport that cannot route the requested channel.
    WrongParams,

    /// Encountered an error on the bus
    Comm(E),
}

impl<E> Error<E> {
    /// Numeric status code of this error
    ///
    /// - `1`: not initialized
    /// - `2`: wrong parameters
    /// - `3`: communication error
    ///
    /// `0` is reserved for success, which is `Ok(())`.
    pub fn code(&self) -> u8 {
        match self {
            Self::NotInitialized => 1,
            Self::WrongParams => 2,
            Self::Comm(_) => 3,
        }
    }

    /// Returns the underlying bus error, if any
    pub fn comm_error(&self) -> Option<&E> {
        match self {
            Self::Comm(err) => Some(err),
            _ => None,
        }
    }
}

/// Rejected argument of a pure framebuffer operation
///
/// Converts into [Error::WrongParams] when surfaced through the device.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct InvalidArgument;

impl<E> From<InvalidArgument> for Error<E> {
    fn from(_: InvalidArgument) -> Self {
        Error::WrongParams
    }
}

impl Display for InvalidArgument {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "invalid arguments")
    }
}

impl<E> Display for Error<E>
where
    E: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "display has not been initialized"),
            Self::WrongParams => write!(f, "invalid arguments"),
            Self::Comm(err) => write!(f, "bus communication failed: {:?}", err),
        }
    }
}

impl<E> Debug for Error<E>
where
    E: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "NotInitialized"),
            Self::WrongParams => write!(f, "WrongParams"),
            Self::Comm(err) => f.debug_tuple("Comm").field(err).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(Error::<()>::NotInitialized.code(), 1);
        assert_eq!(Error::<()>::WrongParams.code(), 2);
        assert_eq!(Error::Comm(()).code(), 3);
    }

    #[test]
    fn comm_error_is_exposed() {
        assert_eq!(Error::Comm(7u8).comm_error(), Some(&7));
        assert_eq!(Error::<u8>::WrongParams.comm_error(), None);
    }

    #[test]
    fn invalid_argument_is_wrong_params() {
        let err: Error<()> = InvalidArgument.into();
        assert_eq!(err, Error::WrongParams);
    }

    #[test]
    fn display_messages() {
        extern crate std;
        use std::format;

        assert_eq!(
            format!("{}", Error::<u8>::NotInitialized),
            "display has not been initialized"
        );
        assert_eq!(format!("{:?}", Error::Comm(4u8)), "Comm(4)");
    }
}
