//! Conversion between network and host byte order.
//!
//! All multi-byte header fields are big-endian on the wire. Accessors in the protocol modules go
//! through the `read_*` and `write_*` functions here, which take the field's octets and produce
//! or consume integers in host representation.
use byteorder::{ByteOrder, NetworkEndian};

/// Reverse the byte order of a 16-bit unsigned integer.
#[inline]
pub const fn reverse_u16(value: u16) -> u16 {
    value.swap_bytes()
}

/// Reverse the byte order of a 32-bit unsigned integer.
#[inline]
pub const fn reverse_u32(value: u32) -> u32 {
    value.swap_bytes()
}

/// Read a 16-bit field in network byte order.
///
/// # Panics
/// The function panics if `field` is shorter than two octets.
#[inline]
pub fn read_u16(field: &[u8]) -> u16 {
    NetworkEndian::read_u16(field)
}

/// Read a 32-bit field in network byte order.
///
/// # Panics
/// The function panics if `field` is shorter than four octets.
#[inline]
pub fn read_u32(field: &[u8]) -> u32 {
    NetworkEndian::read_u32(field)
}

/// Write a 16-bit field in network byte order.
///
/// # Panics
/// The function panics if `field` is shorter than two octets.
#[inline]
pub fn write_u16(field: &mut [u8], value: u16) {
    NetworkEndian::write_u16(field, value)
}

/// Write a 32-bit field in network byte order.
///
/// # Panics
/// The function panics if `field` is shorter than four octets.
#[inline]
pub fn write_u32(field: &mut [u8], value: u32) {
    NetworkEndian::write_u32(field, value)
}
