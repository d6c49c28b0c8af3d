//! The boundary towards whatever moves frames on and off the wire.
//!
//! The views of the [`wire`] module only interpret memory. Getting a frame into that memory, or
//! an assembled frame out of it, is the job of a [`Transport`]: a raw socket, a capture file or
//! the in-memory [`Loopback`] used for testing.
//!
//! [`wire`]: ../wire/index.html
//! [`Transport`]: trait.Transport.html
//! [`Loopback`]: loopback/struct.Loopback.html
pub mod loopback;

use core::fmt;

pub use self::loopback::Loopback;

/// The result type for transports.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by a transport.
///
/// Transports do not retry, every failure is handed to the caller as is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// The underlying system call failed with the contained OS error code.
    Io(i32),

    /// Not enough space for the requested frame.
    ///
    /// The frame exceeds what the transport can carry in one unit.
    BadSize,

    /// The action could not be completed because there were not enough resources.
    ///
    /// Returned by sending when no more frames can be queued, and by receiving when no frame is
    /// pending. Both may succeed at a later time.
    Exhausted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(code) => write!(f, "transport error (os error {})", code),
            Error::BadSize => write!(f, "frame does not fit the transport"),
            Error::Exhausted => write!(f, "transport resources exhausted"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error { }

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::WouldBlock => Error::Exhausted,
            _ => Error::Io(err.raw_os_error().unwrap_or(0)),
        }
    }
}

/// A device that sends and receives whole frames.
///
/// Each call transfers at most one frame. Implementations never hold on to the caller's buffer
/// beyond the call.
pub trait Transport {
    /// Transmit the frame in `frame`.
    ///
    /// Returns the number of octets handed to the device, normally `frame.len()`.
    fn send(&mut self, frame: &[u8]) -> Result<usize>;

    /// Receive one frame into `buffer`.
    ///
    /// Returns the number of octets written into `buffer`. A frame longer than the buffer is
    /// truncated to fit, the remainder is lost.
    fn recv(&mut self, buffer: &mut [u8]) -> Result<usize>;
}

impl<T: Transport + ?Sized> Transport for &'_ mut T {
    fn send(&mut self, frame: &[u8]) -> Result<usize> {
        (**self).send(frame)
    }

    fn recv(&mut self, buffer: &mut [u8]) -> Result<usize> {
        (**self).recv(buffer)
    }
}
