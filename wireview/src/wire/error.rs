use core::fmt;

/// The error type for header access in the wire module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A buffer was shorter than the header it should hold.
    ///
    /// This applies to wrapping a buffer as a header view, where the buffer must contain at least
    /// the full header, and to copying a header or address into a destination buffer that is too
    /// small to receive it.
    Truncated,

    /// A header was recognized but was self-contradictory.
    ///
    /// Examples: an IPv4 header claiming to be shorter than 20 octets; a requested header length
    /// that is not a multiple of four.
    Malformed,

    /// A header could not be recognized.
    ///
    /// E.g. an ARP packet with hardware or protocol address lengths other than those of Ethernet
    /// and IPv4, which are the only combination with a fixed layout.
    Unrecognized,
}

/// The result type for the wire module.
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Truncated     => write!(f, "truncated packet"),
            Error::Malformed     => write!(f, "malformed packet"),
            Error::Unrecognized  => write!(f, "unrecognized packet"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error { }

/// Error emitted when an address can not be parsed from its textual form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseAddressError {
    /// One component was empty, out of range, or contained invalid digits.
    Component,

    /// The address did not have the expected number of separated components.
    ComponentCount,
}

impl fmt::Display for ParseAddressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ParseAddressError::Component => "invalid address component",
            ParseAddressError::ComponentCount => "unexpected number of address components",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseAddressError { }
