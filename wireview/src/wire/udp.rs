//! User datagram protocol headers.
use alloc::vec::Vec;
use core::fmt;

use super::byte_order;
use super::view::check_len;
use super::Result;

mod field {
    use crate::wire::field::*;

    pub(crate) const SRC_PORT: Field = 0..2;
    pub(crate) const DST_PORT: Field = 2..4;
    pub(crate) const LENGTH:   Field = 4..6;
    pub(crate) const CHECKSUM: Field = 6..8;
    pub(crate) const PAYLOAD:  Rest  = 8..;
}

/// The length of a UDP header.
pub const HEADER_LEN: usize = field::PAYLOAD.start;

/// A read/write wrapper around a User Datagram Protocol header.
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
    /// Imbue a buffer with UDP header structure.
    ///
    /// Returns `Err(Error::Truncated)` if the buffer is shorter than 8 octets. The length field is
    /// not compared against the buffer.
    pub fn new_checked(buffer: T) -> Result<Packet<T>> {
        check_len(buffer.as_ref(), HEADER_LEN)?;
        Ok(Packet { buffer })
    }

    /// Consumes the packet, returning the underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }

    /// Return the source port field.
    #[inline]
    pub fn src_port(&self) -> u16 {
        byte_order::read_u16(&self.buffer.as_ref()[field::SRC_PORT])
    }

    /// Return the destination port field.
    #[inline]
    pub fn dst_port(&self) -> u16 {
        byte_order::read_u16(&self.buffer.as_ref()[field::DST_PORT])
    }

    /// Return the length field, header included.
    #[inline]
    pub fn length(&self) -> u16 {
        byte_order::read_u16(&self.buffer.as_ref()[field::LENGTH])
    }

    /// Return the checksum field.
    #[inline]
    pub fn checksum(&self) -> u16 {
        byte_order::read_u16(&self.buffer.as_ref()[field::CHECKSUM])
    }

    /// Return the bytes following the header.
    pub fn payload(&self) -> &[u8] {
        &self.buffer.as_ref()[field::PAYLOAD]
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> Packet<T> {
    /// Set the source port field.
    #[inline]
    pub fn set_src_port(&mut self, value: u16) {
        byte_order::write_u16(&mut self.buffer.as_mut()[field::SRC_PORT], value)
    }

    /// Set the destination port field.
    #[inline]
    pub fn set_dst_port(&mut self, value: u16) {
        byte_order::write_u16(&mut self.buffer.as_mut()[field::DST_PORT], value)
    }

    /// Set the length field.
    #[inline]
    pub fn set_length(&mut self, value: u16) {
        byte_order::write_u16(&mut self.buffer.as_mut()[field::LENGTH], value)
    }

    /// Set the checksum field.
    #[inline]
    pub fn set_checksum(&mut self, value: u16) {
        byte_order::write_u16(&mut self.buffer.as_mut()[field::CHECKSUM], value)
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
        write!(f, "UDP src={} dst={} len={}",
               self.src_port(), self.dst_port(), self.length())
    }
}
