//! Ethernet II frame headers and hardware addresses.
use alloc::vec::Vec;
use core::{fmt, str::FromStr};

use super::byte_order;
use super::view::check_len;
use super::{Error, ParseAddressError, Result};

enum_with_unknown! {
    /// Ethernet protocol type.
    pub enum EtherType(u16) {
        /// Internet protocol version 4
        Ipv4 = 0x0800,
        /// Address resolution protocol
        Arp  = 0x0806,
        /// 802.1Q tagged frame
        Vlan = 0x8100,
        /// Internet protocol version 6
        Ipv6 = 0x86DD,
    }
}

impl fmt::Display for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EtherType::Ipv4 => write!(f, "IPv4"),
            EtherType::Ipv6 => write!(f, "IPv6"),
            EtherType::Arp  => write!(f, "ARP"),
            EtherType::Vlan => write!(f, "802.1Q"),
            EtherType::Unknown(id) => write!(f, "0x{:04x}", id)
        }
    }
}

/// A six-octet Ethernet II address (IEEE 802 MAC address).
///
/// Ordered lexicographically by octets, first to last.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Address(pub [u8; 6]);

impl Address {
    /// The length of an address in octets.
    pub const LEN: usize = 6;

    /// The broadcast address.
    pub const BROADCAST: Address = Address([0xff; 6]);

    /// Construct an address from the low 48 bits of an integer.
    ///
    /// The most significant of those bits becomes the first octet. The upper 16 bits of `value`
    /// are ignored.
    pub const fn from_u64(value: u64) -> Address {
        let b = value.to_be_bytes();
        Address([b[2], b[3], b[4], b[5], b[6], b[7]])
    }

    /// Construct an address from the first six octets of `data`.
    ///
    /// Returns `Err(Error::Truncated)` if `data` is shorter than six octets.
    pub fn from_bytes(data: &[u8]) -> Result<Address> {
        check_len(data, Self::LEN)?;
        Ok(Self::from_field(&data[..Self::LEN]))
    }

    /// Copy a field that is known to be exactly six octets long.
    pub(crate) fn from_field(data: &[u8]) -> Address {
        let mut bytes = [0; 6];
        bytes.copy_from_slice(data);
        Address(bytes)
    }

    /// Return the address as a sequence of octets, in transmission order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Return the address as an integer, with the upper 16 bits cleared.
    pub fn to_u64(self) -> u64 {
        let b = self.0;
        u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]])
    }

    /// Write the address into the first six octets of `dst`.
    ///
    /// Returns `Err(Error::Truncated)` if `dst` is shorter than six octets.
    pub fn write(&self, dst: &mut [u8]) -> Result<()> {
        let dst = dst.get_mut(..Self::LEN).ok_or(Error::Truncated)?;
        dst.copy_from_slice(&self.0);
        Ok(())
    }

    /// Query whether the address is an unicast address.
    pub fn is_unicast(&self) -> bool {
        !(self.is_broadcast() ||
          self.is_multicast())
    }

    /// Query whether this address is the broadcast address.
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// Query whether the "multicast" bit in the OUI is set.
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }

    /// Query whether the "locally administered" bit in the OUI is set.
    pub fn is_local(&self) -> bool {
        self.0[0] & 0x02 != 0
    }
}

impl From<[u8; 6]> for Address {
    fn from(bytes: [u8; 6]) -> Self {
        Address(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bytes = self.0;
        write!(f, "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
               bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5])
    }
}

impl FromStr for Address {
    type Err = ParseAddressError;

    /// Parse colon separated hexadecimal octets, one or two digits each, in any case.
    fn from_str(src: &str) -> core::result::Result<Self, ParseAddressError> {
        let mut parsed = [0; 6];
        let mut components = src.split(':');
        for c in parsed.iter_mut() {
            let part = components
                .next()
                .ok_or(ParseAddressError::ComponentCount)?;
            // `from_str_radix` alone would also accept a leading sign.
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ParseAddressError::Component);
            }
            *c = u8::from_str_radix(part, 16)
                .map_err(|_| ParseAddressError::Component)?;
        }

        if components.next().is_some() {
            Err(ParseAddressError::ComponentCount)
        } else {
            Ok(Address(parsed))
        }
    }
}

mod field {
    use crate::wire::field::*;

    pub(crate) const DESTINATION: Field =  0..6;
    pub(crate) const SOURCE:      Field =  6..12;
    pub(crate) const ETHERTYPE:   Field = 12..14;
    pub(crate) const PAYLOAD:     Rest  = 14..;
}

/// The length of an Ethernet II header.
pub const HEADER_LEN: usize = field::PAYLOAD.start;

/// A read/write wrapper around an Ethernet II frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<T> {
    buffer: T,
}

impl Frame<Vec<u8>> {
    /// Create an owned header with all fields set to zero.
    pub fn new() -> Self {
        Frame { buffer: alloc::vec![0; HEADER_LEN] }
    }
}

impl Default for Frame<Vec<u8>> {
    fn default() -> Self {
        Frame::new()
    }
}

impl<T: AsRef<[u8]>> Frame<T> {
    /// Imbue a buffer with Ethernet II frame structure.
    ///
    /// Returns `Err(Error::Truncated)` if the buffer is shorter than the header.
    pub fn new_checked(buffer: T) -> Result<Frame<T>> {
        check_len(buffer.as_ref(), HEADER_LEN)?;
        Ok(Frame { buffer })
    }

    /// Consumes the frame, returning the underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }

    /// Return the length of a buffer required to hold a frame with the payload of a given
    /// length.
    pub fn buffer_len(payload_len: usize) -> usize {
        HEADER_LEN + payload_len
    }

    /// Return the destination address field.
    pub fn dst_addr(&self) -> Address {
        Address::from_field(&self.buffer.as_ref()[field::DESTINATION])
    }

    /// Return the source address field.
    pub fn src_addr(&self) -> Address {
        Address::from_field(&self.buffer.as_ref()[field::SOURCE])
    }

    /// Return the EtherType field, without checking for 802.1Q.
    pub fn ethertype(&self) -> EtherType {
        let raw = byte_order::read_u16(&self.buffer.as_ref()[field::ETHERTYPE]);
        EtherType::from(raw)
    }

    /// Return the bytes following the header.
    pub fn payload(&self) -> &[u8] {
        &self.buffer.as_ref()[field::PAYLOAD]
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> Frame<T> {
    /// Set the destination address field.
    pub fn set_dst_addr(&mut self, value: Address) {
        self.buffer.as_mut()[field::DESTINATION].copy_from_slice(value.as_bytes())
    }

    /// Set the source address field.
    pub fn set_src_addr(&mut self, value: Address) {
        self.buffer.as_mut()[field::SOURCE].copy_from_slice(value.as_bytes())
    }

    /// Set the EtherType field.
    pub fn set_ethertype(&mut self, value: EtherType) {
        byte_order::write_u16(&mut self.buffer.as_mut()[field::ETHERTYPE], value.into())
    }

    /// Return the bytes following the header as a mutable slice.
    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.buffer.as_mut()[field::PAYLOAD]
    }
}

impl<'a> Frame<&'a [u8]> {
    /// Return the bytes following the header, for the whole lifetime of the buffer.
    pub fn payload_bytes(&self) -> &'a [u8] {
        &self.buffer[field::PAYLOAD]
    }
}

fixed_header_view!(Frame, HEADER_LEN);

impl<T: AsRef<[u8]>> fmt::Display for Frame<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EthernetII src={} dst={} type={}",
               self.src_addr(), self.dst_addr(), self.ethertype())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wire::HeaderView;

    static FRAME_BYTES: [u8; 18] =
        [0x00, 0x26, 0x62, 0x2f, 0x47, 0x87,
         0x00, 0x1d, 0x60, 0xb3, 0x01, 0x84,
         0x08, 0x00,
         0xaa, 0x00, 0x00, 0xff];

    static PAYLOAD_BYTES: [u8; 4] = [0xaa, 0x00, 0x00, 0xff];

    #[test]
    fn test_broadcast() {
        assert!(Address::BROADCAST.is_broadcast());
        assert!(!Address::BROADCAST.is_unicast());
        assert!(Address::BROADCAST.is_multicast());
        assert!(Address::BROADCAST.is_local());
    }

    #[test]
    fn test_address_from_integer() {
        let addr = Address::from_u64(0x0102_0304_0506);
        assert_eq!(addr, Address([1, 2, 3, 4, 5, 6]));
        assert_eq!(addr.to_string(), "01:02:03:04:05:06");
        assert_eq!(addr.to_u64(), 0x0102_0304_0506);
        // The upper two octets do not fit into an address.
        assert_eq!(Address::from_u64(0xffff_0102_0304_0506), addr);
    }

    #[test]
    fn test_address_bytes() {
        let bytes = [0x01, 0x03, 0x01, 0x01, 0x01, 0x01];
        let addr = Address::from_bytes(&bytes).unwrap();
        let mut out = [0; 6];
        addr.write(&mut out).unwrap();
        assert_eq!(out, bytes);
        assert_eq!(Address::from_u64(0x0103_0101_0101), addr);

        assert_eq!(Address::from_bytes(&bytes[..5]), Err(Error::Truncated));
        assert_eq!(addr.write(&mut out[..5]), Err(Error::Truncated));
    }

    #[test]
    fn test_address_parse() {
        let expected = Address::from_u64(0x0102_0304_0506);
        assert_eq!("01:02:03:04:05:06".parse::<Address>(), Ok(expected));
        assert_eq!("1:2:3:4:5:6".parse::<Address>(), Ok(expected));
        assert_eq!("AA:bb:Cc:0:1:ff".parse::<Address>(), Ok(Address([0xaa, 0xbb, 0xcc, 0x00, 0x01, 0xff])));

        assert_eq!("01:02:03:04:05".parse::<Address>(), Err(ParseAddressError::ComponentCount));
        assert_eq!("01:02:03:04:05:06:07".parse::<Address>(), Err(ParseAddressError::ComponentCount));
        assert_eq!("01:02:03:04:05:0g".parse::<Address>(), Err(ParseAddressError::Component));
        assert_eq!("01:02:03:04:05:123".parse::<Address>(), Err(ParseAddressError::Component));
        assert_eq!("01:02::04:05:06".parse::<Address>(), Err(ParseAddressError::Component));
        assert_eq!("+1:02:03:04:05:06".parse::<Address>(), Err(ParseAddressError::Component));
        assert_eq!("01-02-03-04-05-06".parse::<Address>(), Err(ParseAddressError::Component));
    }

    #[test]
    fn test_address_order() {
        let low = Address([0x00, 0x05, 0xff, 0xff, 0xff, 0xff]);
        let high = Address([0x01, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert!(low < high);
        assert!(Address::from_u64(1) < Address::from_u64(2));
    }

    #[test]
    fn test_deconstruct() {
        let frame = Frame::new_checked(&FRAME_BYTES[..]).unwrap();
        assert_eq!(frame.len(), 14);
        assert_eq!(frame.dst_addr(), Address::from_u64(0x0026_622f_4787));
        assert_eq!(frame.src_addr(), Address::from_u64(0x001d_60b3_0184));
        assert_eq!(frame.ethertype(), EtherType::Ipv4);
        assert_eq!(frame.payload(), &PAYLOAD_BYTES[..]);
        assert_eq!(frame.header_bytes(), &FRAME_BYTES[..14]);
    }

    #[test]
    fn test_construct() {
        let mut bytes = vec![0xa5; 18];
        let mut frame = Frame::new_checked(&mut bytes[..]).unwrap();
        frame.set_dst_addr(Address::from_u64(0x0026_622f_4787));
        frame.set_src_addr(Address::from_u64(0x001d_60b3_0184));
        frame.set_ethertype(EtherType::Ipv4);
        frame.payload_mut().copy_from_slice(&PAYLOAD_BYTES[..]);
        assert_eq!(&bytes[..], &FRAME_BYTES[..]);
    }

    #[test]
    fn test_owned() {
        let mut frame = Frame::new();
        assert_eq!(frame.len(), 14);
        assert_eq!(frame.dst_addr(), Address::default());
        assert_eq!(frame.ethertype(), EtherType::Unknown(0));
        assert!(frame.payload().is_empty());

        frame.set_dst_addr("00:00:00:00:00:02".parse().unwrap());
        frame.set_src_addr("00:00:00:00:00:01".parse().unwrap());
        frame.set_ethertype(EtherType::Arp);

        let bytes = frame.into_inner();
        assert_eq!(bytes[5], 0x02);
        assert_eq!(bytes[11], 0x01);
        assert_eq!(&bytes[12..], &[0x08, 0x06]);
    }

    #[test]
    fn test_write() {
        let frame = Frame::new_checked(&FRAME_BYTES[..]).unwrap();
        let mut out = [0; 16];
        assert_eq!(frame.write(&mut out), Ok(14));
        assert_eq!(&out[..14], &FRAME_BYTES[..14]);
        assert_eq!(&out[14..], &[0, 0]);
        assert_eq!(frame.write(&mut out[..13]), Err(Error::Truncated));
    }

    #[test]
    fn test_truncated() {
        assert_eq!(Frame::new_checked(&FRAME_BYTES[..13]), Err(Error::Truncated));
    }

    #[test]
    fn test_display() {
        let frame = Frame::new_checked(&FRAME_BYTES[..]).unwrap();
        assert_eq!(frame.to_string(),
            "EthernetII src=00:1d:60:b3:01:84 dst=00:26:62:2f:47:87 type=IPv4");
    }
}
