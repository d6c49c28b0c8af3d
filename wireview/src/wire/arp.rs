//! Address resolution protocol packets for Ethernet and IPv4.
//!
//! Only the combination of six-octet hardware addresses and four-octet protocol addresses is
//! modelled, which gives the packet a fixed length of 28 octets.
use alloc::vec::Vec;
use core::fmt;

use super::byte_order;
use super::view::check_len;
use super::{Error, Result};

pub use super::EthernetProtocol as Protocol;
pub use super::MacAddress as Address;
pub use super::Ipv4Address as IpAddress;

enum_with_unknown! {
    /// ARP hardware type.
    pub enum Hardware(u16) {
        /// Ethernet (10Mb)
        Ethernet = 1
    }
}

enum_with_unknown! {
    /// ARP operation type.
    pub enum Operation(u16) {
        /// Request the hardware address of the target.
        Request = 1,
        /// Answer a request.
        Reply = 2
    }
}

mod field {
    use crate::wire::field::*;

    pub(crate) const HTYPE: Field = 0..2;
    pub(crate) const PTYPE: Field = 2..4;
    pub(crate) const HLEN:  usize = 4;
    pub(crate) const PLEN:  usize = 5;
    pub(crate) const OPER:  Field = 6..8;
    pub(crate) const SHA:   Field = 8..14;
    pub(crate) const SPA:   Field = 14..18;
    pub(crate) const THA:   Field = 18..24;
    pub(crate) const TPA:   Field = 24..28;
    pub(crate) const PAYLOAD: Rest = 28..;
}

/// The length of an ARP packet for Ethernet and IPv4.
pub const HEADER_LEN: usize = field::PAYLOAD.start;

/// A read/write wrapper around an Address Resolution Protocol (ARP) packet buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet<T> {
    buffer: T,
}

impl Packet<Vec<u8>> {
    /// Create an owned packet with all fields set to zero.
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
    /// Imbue a buffer with ARP packet structure.
    ///
    /// Returns `Err(Error::Truncated)` if the buffer is shorter than 28 octets. The address length
    /// fields are not inspected, see [`check_addresses`].
    ///
    /// [`check_addresses`]: #method.check_addresses
    pub fn new_checked(buffer: T) -> Result<Packet<T>> {
        check_len(buffer.as_ref(), HEADER_LEN)?;
        Ok(Packet { buffer })
    }

    /// Consumes the packet, returning the underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }

    /// Ensure the address length fields describe Ethernet and IPv4 addresses.
    ///
    /// Returns `Err(Error::Unrecognized)` otherwise, in which case the address accessors do not
    /// correspond to the actual layout of the packet.
    pub fn check_addresses(&self) -> Result<()> {
        if usize::from(self.hardware_len()) != Address::LEN
            || usize::from(self.protocol_len()) != IpAddress::LEN
        {
            Err(Error::Unrecognized)
        } else {
            Ok(())
        }
    }

    /// Return the hardware type field.
    #[inline]
    pub fn hardware_type(&self) -> Hardware {
        let raw = byte_order::read_u16(&self.buffer.as_ref()[field::HTYPE]);
        Hardware::from(raw)
    }

    /// Return the protocol type field.
    #[inline]
    pub fn protocol_type(&self) -> Protocol {
        let raw = byte_order::read_u16(&self.buffer.as_ref()[field::PTYPE]);
        Protocol::from(raw)
    }

    /// Return the hardware length field.
    #[inline]
    pub fn hardware_len(&self) -> u8 {
        self.buffer.as_ref()[field::HLEN]
    }

    /// Return the protocol length field.
    #[inline]
    pub fn protocol_len(&self) -> u8 {
        self.buffer.as_ref()[field::PLEN]
    }

    /// Return the operation field.
    #[inline]
    pub fn operation(&self) -> Operation {
        let raw = byte_order::read_u16(&self.buffer.as_ref()[field::OPER]);
        Operation::from(raw)
    }

    /// Return the sender hardware address field.
    pub fn sender_hardware_addr(&self) -> Address {
        Address::from_field(&self.buffer.as_ref()[field::SHA])
    }

    /// Return the sender protocol address field.
    pub fn sender_protocol_addr(&self) -> IpAddress {
        IpAddress::from_field(&self.buffer.as_ref()[field::SPA])
    }

    /// Return the target hardware address field.
    pub fn target_hardware_addr(&self) -> Address {
        Address::from_field(&self.buffer.as_ref()[field::THA])
    }

    /// Return the target protocol address field.
    pub fn target_protocol_addr(&self) -> IpAddress {
        IpAddress::from_field(&self.buffer.as_ref()[field::TPA])
    }

    /// Return the bytes following the packet, usually Ethernet padding.
    pub fn payload(&self) -> &[u8] {
        &self.buffer.as_ref()[field::PAYLOAD]
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> Packet<T> {
    /// Set the hardware type field.
    #[inline]
    pub fn set_hardware_type(&mut self, value: Hardware) {
        byte_order::write_u16(&mut self.buffer.as_mut()[field::HTYPE], value.into())
    }

    /// Set the protocol type field.
    #[inline]
    pub fn set_protocol_type(&mut self, value: Protocol) {
        byte_order::write_u16(&mut self.buffer.as_mut()[field::PTYPE], value.into())
    }

    /// Set the hardware length field.
    #[inline]
    pub fn set_hardware_len(&mut self, value: u8) {
        self.buffer.as_mut()[field::HLEN] = value
    }

    /// Set the protocol length field.
    #[inline]
    pub fn set_protocol_len(&mut self, value: u8) {
        self.buffer.as_mut()[field::PLEN] = value
    }

    /// Set the operation field.
    #[inline]
    pub fn set_operation(&mut self, value: Operation) {
        byte_order::write_u16(&mut self.buffer.as_mut()[field::OPER], value.into())
    }

    /// Set the sender hardware address field.
    pub fn set_sender_hardware_addr(&mut self, value: Address) {
        self.buffer.as_mut()[field::SHA].copy_from_slice(value.as_bytes())
    }

    /// Set the sender protocol address field.
    pub fn set_sender_protocol_addr(&mut self, value: IpAddress) {
        self.buffer.as_mut()[field::SPA].copy_from_slice(value.as_bytes())
    }

    /// Set the target hardware address field.
    pub fn set_target_hardware_addr(&mut self, value: Address) {
        self.buffer.as_mut()[field::THA].copy_from_slice(value.as_bytes())
    }

    /// Set the target protocol address field.
    pub fn set_target_protocol_addr(&mut self, value: IpAddress) {
        self.buffer.as_mut()[field::TPA].copy_from_slice(value.as_bytes())
    }

    /// Fill in the type and length fields for Ethernet and IPv4.
    pub fn set_ethernet_ipv4(&mut self) {
        self.set_hardware_type(Hardware::Ethernet);
        self.set_protocol_type(Protocol::Ipv4);
        self.set_hardware_len(Address::LEN as u8);
        self.set_protocol_len(IpAddress::LEN as u8);
    }
}

impl<'a> Packet<&'a [u8]> {
    /// Return the bytes following the packet, for the whole lifetime of the buffer.
    pub fn payload_bytes(&self) -> &'a [u8] {
        &self.buffer[field::PAYLOAD]
    }
}

fixed_header_view!(Packet, HEADER_LEN);

impl<T: AsRef<[u8]>> fmt::Display for Packet<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ARP op={:?} src={}/{} tgt={}/{}",
               self.operation(),
               self.sender_hardware_addr(), self.sender_protocol_addr(),
               self.target_hardware_addr(), self.target_protocol_addr())
    }
}
