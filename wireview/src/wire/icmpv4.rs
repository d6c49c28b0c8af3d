//! Internet control message protocol headers.
use alloc::vec::Vec;
use core::fmt;

use super::byte_order;
use super::view::check_len;
use super::Result;

enum_with_unknown! {
    /// Internet protocol control message type.
    pub enum Message(u8) {
        /// Echo reply
        EchoReply      =  0,
        /// Destination unreachable
        DstUnreachable =  3,
        /// Message redirect
        Redirect       =  5,
        /// Echo request
        EchoRequest    =  8,
        /// Router advertisement
        RouterAdvert   =  9,
        /// Router solicitation
        RouterSolicit  = 10,
        /// Time exceeded
        TimeExceeded   = 11,
        /// Parameter problem
        ParamProblem   = 12,
        /// Timestamp
        Timestamp      = 13,
        /// Timestamp reply
        TimestampReply = 14,
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Message::EchoReply      => write!(f, "echo reply"),
            Message::DstUnreachable => write!(f, "destination unreachable"),
            Message::Redirect       => write!(f, "message redirect"),
            Message::EchoRequest    => write!(f, "echo request"),
            Message::RouterAdvert   => write!(f, "router advertisement"),
            Message::RouterSolicit  => write!(f, "router solicitation"),
            Message::TimeExceeded   => write!(f, "time exceeded"),
            Message::ParamProblem   => write!(f, "parameter problem"),
            Message::Timestamp      => write!(f, "timestamp"),
            Message::TimestampReply => write!(f, "timestamp reply"),
            Message::Unknown(id)    => write!(f, "{}", id)
        }
    }
}

mod field {
    use crate::wire::field::*;

    pub(crate) const TYPE:       usize = 0;
    pub(crate) const CODE:       usize = 1;
    pub(crate) const CHECKSUM:   Field = 2..4;
    pub(crate) const REST:       Field = 4..8;

    pub(crate) const ECHO_IDENT: Field = 4..6;
    pub(crate) const ECHO_SEQNO: Field = 6..8;

    pub(crate) const PAYLOAD:    Rest  = 8..;
}

/// The length of an ICMP header.
pub const HEADER_LEN: usize = field::PAYLOAD.start;

/// A read/write wrapper around an Internet Control Message Protocol version 4 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet<T> {
    buffer: T,
}

impl Packet<Vec<u8>> {
    /// Create an owned header with all fields set to zero.
    pub fn new() -> Self {
        Packet { buffer: alloc::vec![0; HEADER_LEN] }
    }
}

impl Default for Packet<Vec<u8>> {
    fn default() -> Self {
        Packet::new()
    }
}

impl<T: AsRef<[u8]>> Packet<T> {
    /// Imbue a buffer with ICMPv4 header structure.
    ///
    /// Returns `Err(Error::Truncated)` if the buffer is shorter than 8 octets.
    pub fn new_checked(buffer: T) -> Result<Packet<T>> {
        check_len(buffer.as_ref(), HEADER_LEN)?;
        Ok(Packet { buffer })
    }

    /// Consumes the packet, returning the underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }

    /// Return the message type field.
    #[inline]
    pub fn msg_type(&self) -> Message {
        Message::from(self.buffer.as_ref()[field::TYPE])
    }

    /// Return the message code field.
    #[inline]
    pub fn msg_code(&self) -> u8 {
        self.buffer.as_ref()[field::CODE]
    }

    /// Return the checksum field.
    #[inline]
    pub fn checksum(&self) -> u16 {
        byte_order::read_u16(&self.buffer.as_ref()[field::CHECKSUM])
    }

    /// Return the type specific rest of the header as a single word.
    #[inline]
    pub fn rest_of_header(&self) -> u32 {
        byte_order::read_u32(&self.buffer.as_ref()[field::REST])
    }

    /// Return the identifier field, meaningful for echo messages.
    #[inline]
    pub fn echo_ident(&self) -> u16 {
        byte_order::read_u16(&self.buffer.as_ref()[field::ECHO_IDENT])
    }

    /// Return the sequence number field, meaningful for echo messages.
    #[inline]
    pub fn echo_seq_no(&self) -> u16 {
        byte_order::read_u16(&self.buffer.as_ref()[field::ECHO_SEQNO])
    }

    /// Return the bytes following the header.
    pub fn payload(&self) -> &[u8] {
        &self.buffer.as_ref()[field::PAYLOAD]
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> Packet<T> {
    /// Set the message type field.
    #[inline]
    pub fn set_msg_type(&mut self, value: Message) {
        self.buffer.as_mut()[field::TYPE] = value.into()
    }

    /// Set the message code field.
    #[inline]
    pub fn set_msg_code(&mut self, value: u8) {
        self.buffer.as_mut()[field::CODE] = value
    }

    /// Set the checksum field.
    ///
    /// The value is stored as given; computing it is left to the caller.
    #[inline]
    pub fn set_checksum(&mut self, value: u16) {
        byte_order::write_u16(&mut self.buffer.as_mut()[field::CHECKSUM], value)
    }

    /// Set the rest of the header from a single word.
    #[inline]
    pub fn set_rest_of_header(&mut self, value: u32) {
        byte_order::write_u32(&mut self.buffer.as_mut()[field::REST], value)
    }

    /// Set the identifier field.
    #[inline]
    pub fn set_echo_ident(&mut self, value: u16) {
        byte_order::write_u16(&mut self.buffer.as_mut()[field::ECHO_IDENT], value)
    }

    /// Set the sequence number field.
    #[inline]
    pub fn set_echo_seq_no(&mut self, value: u16) {
        byte_order::write_u16(&mut self.buffer.as_mut()[field::ECHO_SEQNO], value)
    }

    /// Return the bytes following the header as a mutable slice.
    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.buffer.as_mut()[field::PAYLOAD]
    }
}

impl<'a> Packet<&'a [u8]> {
    /// Return the bytes following the header, for the whole lifetime of the buffer.
    pub fn payload_bytes(&self) -> &'a [u8] {
        &self.buffer[field::PAYLOAD]
    }
}

fixed_header_view!(Packet, HEADER_LEN);

impl<T: AsRef<[u8]>> fmt::Display for Packet<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ICMPv4 type={} code={}", self.msg_type(), self.msg_code())
    }
}
