//! Internet protocol version 4 headers and addresses.
use alloc::vec::Vec;
use core::{fmt, str::FromStr};

use super::byte_order;
use super::view::check_len;
use super::{Error, ParseAddressError, Result};

enum_with_unknown! {
    /// IP datagram encapsulated protocol.
    pub enum Protocol(u8) {
        /// Internet control message protocol
        Icmp = 0x01,
        /// Internet group management protocol
        Igmp = 0x02,
        /// Transmission control protocol
        Tcp  = 0x06,
        /// User datagram protocol
        Udp  = 0x11,
        /// Generic routing encapsulation
        Gre  = 0x2f,
        /// Encapsulating security payload
        Esp  = 0x32,
        /// Authentication header
        Ah   = 0x33,
        /// Stream control transmission protocol
        Sctp = 0x84,
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Protocol::Icmp        => write!(f, "ICMP"),
            Protocol::Igmp        => write!(f, "IGMP"),
            Protocol::Tcp         => write!(f, "TCP"),
            Protocol::Udp         => write!(f, "UDP"),
            Protocol::Gre         => write!(f, "GRE"),
            Protocol::Esp         => write!(f, "ESP"),
            Protocol::Ah          => write!(f, "AH"),
            Protocol::Sctp        => write!(f, "SCTP"),
            Protocol::Unknown(id) => write!(f, "0x{:02x}", id)
        }
    }
}

/// A four-octet IPv4 address.
///
/// The octets are always kept in network order, that is `Address([a, b, c, d])` is the address
/// written `a.b.c.d`. Integer conversions treat the first octet as the most significant byte, so
/// the numeric order of `to_u32` is the order of addresses.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Address(pub [u8; 4]);

impl Address {
    /// The length of an address in octets.
    pub const LEN: usize = 4;

    /// An unspecified address.
    pub const UNSPECIFIED: Address = Address([0x00; 4]);

    /// The broadcast address.
    pub const BROADCAST:   Address = Address([0xff; 4]);

    /// Construct an IPv4 address from parts.
    pub const fn new(a0: u8, a1: u8, a2: u8, a3: u8) -> Address {
        Address([a0, a1, a2, a3])
    }

    /// Construct an address from an integer whose most significant byte is the first octet.
    pub const fn from_u32(value: u32) -> Address {
        Address(value.to_be_bytes())
    }

    /// Return the address as an integer whose most significant byte is the first octet.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Construct an address from the first four octets of `data`, in network order.
    ///
    /// Returns `Err(Error::Truncated)` if `data` is shorter than four octets.
    pub fn from_bytes(data: &[u8]) -> Result<Address> {
        check_len(data, Self::LEN)?;
        Ok(Self::from_field(&data[..Self::LEN]))
    }

    /// Copy a field that is known to be exactly four octets long.
    pub(crate) fn from_field(data: &[u8]) -> Address {
        let mut bytes = [0; 4];
        bytes.copy_from_slice(data);
        Address(bytes)
    }

    /// Return the address as a sequence of octets, in network order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Write the address into the first four octets of `dst`, in network order.
    ///
    /// Returns `Err(Error::Truncated)` if `dst` is shorter than four octets.
    pub fn write(&self, dst: &mut [u8]) -> Result<()> {
        let dst = dst.get_mut(..Self::LEN).ok_or(Error::Truncated)?;
        dst.copy_from_slice(&self.0);
        Ok(())
    }

    /// The address with its octets in reverse order.
    ///
    /// Useful for addresses that were read from memory in the wrong byte order.
    pub const fn swap_bytes(self) -> Address {
        Address::from_u32(byte_order::reverse_u32(self.to_u32()))
    }

    /// Query whether the address is an unicast address.
    pub fn is_unicast(&self) -> bool {
        !(self.is_broadcast() ||
          self.is_multicast() ||
          self.is_unspecified())
    }

    /// Query whether the address is the broadcast address.
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// Query whether the address is a multicast address.
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0xf0 == 224
    }

    /// Query whether the address falls into the "unspecified" range.
    pub fn is_unspecified(&self) -> bool {
        self.0[0] == 0
    }

    /// Query whether the address falls into the "link-local" range.
    pub fn is_link_local(&self) -> bool {
        self.0[0..2] == [169, 254]
    }

    /// Query whether the address falls into the "loopback" range.
    pub fn is_loopback(&self) -> bool {
        self.0[0] == 127
    }
}

impl From<[u8; 4]> for Address {
    fn from(bytes: [u8; 4]) -> Self {
        Address(bytes)
    }
}

#[cfg(feature = "std")]
impl From<::std::net::Ipv4Addr> for Address {
    fn from(x: ::std::net::Ipv4Addr) -> Address {
        Address(x.octets())
    }
}

#[cfg(feature = "std")]
impl From<Address> for ::std::net::Ipv4Addr {
    fn from(Address(x): Address) -> ::std::net::Ipv4Addr {
        x.into()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bytes = self.0;
        write!(f, "{}.{}.{}.{}", bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

impl FromStr for Address {
    type Err = ParseAddressError;

    /// Parse dotted-decimal notation with exactly four components of at most three digits.
    fn from_str(src: &str) -> core::result::Result<Self, ParseAddressError> {
        let mut parsed = [0; 4];
        let mut components = src.split('.');
        for c in parsed.iter_mut() {
            let part = components
                .next()
                .ok_or(ParseAddressError::ComponentCount)?;
            if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseAddressError::Component);
            }
            *c = part.parse()
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
    use crate::wire::field::Field;

    pub(crate) const VER_IHL:  usize = 0;
    pub(crate) const DSCP_ECN: usize = 1;
    pub(crate) const LENGTH:   Field = 2..4;
    pub(crate) const IDENT:    Field = 4..6;
    pub(crate) const FLG_OFF:  Field = 6..8;
    pub(crate) const TTL:      usize = 8;
    pub(crate) const PROTOCOL: usize = 9;
    pub(crate) const CHECKSUM: Field = 10..12;
    pub(crate) const SRC_ADDR: Field = 12..16;
    pub(crate) const DST_ADDR: Field = 16..20;
}

/// The length of an IPv4 header without options.
pub const MIN_HEADER_LEN: usize = field::DST_ADDR.end;

/// The largest header length the IHL field can express.
pub const MAX_HEADER_LEN: usize = 0x0f * 4;

/// A read/write wrapper around an Internet Protocol version 4 header.
///
/// The header length is read from the IHL field once, when the wrapper is created, and is what
/// [`HeaderView::len`] reports afterwards. Options within that length are not interpreted.
///
/// [`HeaderView::len`]: trait.HeaderView.html#tymethod.len
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet<T> {
    buffer: T,
    header_len: usize,
}

impl Packet<Vec<u8>> {
    /// Create an owned header without options.
    ///
    /// All fields are zero except for the version, which is 4, and the IHL, which is 5. The
    /// encoded header is thus well-formed before any other field is set.
    pub fn new() -> Self {
        let mut packet = Packet {
            buffer: alloc::vec![0; MIN_HEADER_LEN],
            header_len: MIN_HEADER_LEN,
        };
        packet.set_version(4);
        packet.set_ihl(5);
        packet
    }

    /// Create an owned header with room for options.
    ///
    /// `header_len` is in octets. Returns `Err(Error::Malformed)` if it is not a multiple of four
    /// in the range 20 to 60.
    pub fn with_header_len(header_len: usize) -> Result<Self> {
        check_header_len(header_len)?;
        let mut packet = Packet {
            buffer: alloc::vec![0; header_len],
            header_len,
        };
        packet.set_version(4);
        packet.set_ihl((header_len / 4) as u8);
        Ok(packet)
    }
}

impl Default for Packet<Vec<u8>> {
    fn default() -> Self {
        Packet::new()
    }
}

fn check_header_len(header_len: usize) -> Result<()> {
    if header_len % 4 != 0 || header_len < MIN_HEADER_LEN || header_len > MAX_HEADER_LEN {
        Err(Error::Malformed)
    } else {
        Ok(())
    }
}

impl<T: AsRef<[u8]>> Packet<T> {
    /// Imbue a buffer with IPv4 header structure.
    ///
    /// The header length is taken from the IHL field. Returns `Err(Error::Truncated)` if the
    /// buffer is shorter than 20 octets or than the header length, and `Err(Error::Malformed)` if
    /// the IHL field is smaller than 5.
    pub fn new_checked(buffer: T) -> Result<Packet<T>> {
        let data = buffer.as_ref();
        check_len(data, MIN_HEADER_LEN)?;
        let header_len = usize::from(data[field::VER_IHL] & 0x0f) * 4;
        if header_len < MIN_HEADER_LEN {
            return Err(Error::Malformed);
        }
        check_len(data, header_len)?;
        Ok(Packet { buffer, header_len })
    }

    /// Consumes the packet, returning the underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }

    /// Return the version field.
    #[inline]
    pub fn version(&self) -> u8 {
        self.buffer.as_ref()[field::VER_IHL] >> 4
    }

    /// Return the IHL field, the header length in 32-bit words.
    #[inline]
    pub fn ihl(&self) -> u8 {
        self.buffer.as_ref()[field::VER_IHL] & 0x0f
    }

    /// Return the Differential Services Code Point field.
    pub fn dscp(&self) -> u8 {
        self.buffer.as_ref()[field::DSCP_ECN] >> 2
    }

    /// Return the Explicit Congestion Notification field.
    pub fn ecn(&self) -> u8 {
        self.buffer.as_ref()[field::DSCP_ECN] & 0x03
    }

    /// Return the total length field.
    #[inline]
    pub fn total_len(&self) -> u16 {
        byte_order::read_u16(&self.buffer.as_ref()[field::LENGTH])
    }

    /// Return the fragment identification field.
    #[inline]
    pub fn ident(&self) -> u16 {
        byte_order::read_u16(&self.buffer.as_ref()[field::IDENT])
    }

    /// Return the "don't fragment" flag.
    #[inline]
    pub fn dont_frag(&self) -> bool {
        byte_order::read_u16(&self.buffer.as_ref()[field::FLG_OFF]) & 0x4000 != 0
    }

    /// Return the "more fragments" flag.
    #[inline]
    pub fn more_frags(&self) -> bool {
        byte_order::read_u16(&self.buffer.as_ref()[field::FLG_OFF]) & 0x2000 != 0
    }

    /// Return the fragment offset, in octets.
    #[inline]
    pub fn frag_offset(&self) -> u16 {
        byte_order::read_u16(&self.buffer.as_ref()[field::FLG_OFF]) << 3
    }

    /// Return the time to live field.
    #[inline]
    pub fn ttl(&self) -> u8 {
        self.buffer.as_ref()[field::TTL]
    }

    /// Return the protocol field.
    #[inline]
    pub fn protocol(&self) -> Protocol {
        Protocol::from(self.buffer.as_ref()[field::PROTOCOL])
    }

    /// Return the header checksum field.
    #[inline]
    pub fn checksum(&self) -> u16 {
        byte_order::read_u16(&self.buffer.as_ref()[field::CHECKSUM])
    }

    /// Return the source address field.
    #[inline]
    pub fn src_addr(&self) -> Address {
        Address::from_field(&self.buffer.as_ref()[field::SRC_ADDR])
    }

    /// Return the destination address field.
    #[inline]
    pub fn dst_addr(&self) -> Address {
        Address::from_field(&self.buffer.as_ref()[field::DST_ADDR])
    }

    /// Return the option octets between the fixed header and the header length.
    pub fn options(&self) -> &[u8] {
        &self.buffer.as_ref()[MIN_HEADER_LEN..self.header_len]
    }

    /// Return the bytes following the header.
    ///
    /// This is everything after the header length in the buffer. The total length field is not
    /// consulted, so link layer padding is included.
    pub fn payload(&self) -> &[u8] {
        &self.buffer.as_ref()[self.header_len..]
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> Packet<T> {
    /// Set the version field.
    ///
    /// The field is four bits wide, higher bits of `value` are ignored.
    #[inline]
    pub fn set_version(&mut self, value: u8) {
        let data = self.buffer.as_mut();
        data[field::VER_IHL] = (data[field::VER_IHL] & !0xf0) | ((value & 0x0f) << 4);
    }

    /// Set the IHL field without changing the length of this view.
    fn set_ihl(&mut self, value: u8) {
        let data = self.buffer.as_mut();
        data[field::VER_IHL] = (data[field::VER_IHL] & !0x0f) | (value & 0x0f);
    }

    /// Set the header length, in octets.
    ///
    /// Updates the IHL field and the length of this view. Returns `Err(Error::Malformed)` if the
    /// length is not a multiple of four in the range 20 to 60, and `Err(Error::Truncated)` if the
    /// buffer can not hold a header of that length. The packet is unchanged on error.
    pub fn set_header_len(&mut self, value: usize) -> Result<()> {
        check_header_len(value)?;
        check_len(self.buffer.as_ref(), value)?;
        self.set_ihl((value / 4) as u8);
        self.header_len = value;
        Ok(())
    }

    /// Set the Differential Services Code Point field.
    pub fn set_dscp(&mut self, value: u8) {
        let data = self.buffer.as_mut();
        data[field::DSCP_ECN] = (data[field::DSCP_ECN] & !0xfc) | (value << 2)
    }

    /// Set the Explicit Congestion Notification field.
    pub fn set_ecn(&mut self, value: u8) {
        let data = self.buffer.as_mut();
        data[field::DSCP_ECN] = (data[field::DSCP_ECN] & !0x03) | (value & 0x03)
    }

    /// Set the total length field.
    #[inline]
    pub fn set_total_len(&mut self, value: u16) {
        byte_order::write_u16(&mut self.buffer.as_mut()[field::LENGTH], value)
    }

    /// Set the fragment identification field.
    #[inline]
    pub fn set_ident(&mut self, value: u16) {
        byte_order::write_u16(&mut self.buffer.as_mut()[field::IDENT], value)
    }

    /// Set the "don't fragment" flag.
    #[inline]
    pub fn set_dont_frag(&mut self, value: bool) {
        let data = self.buffer.as_mut();
        let raw = byte_order::read_u16(&data[field::FLG_OFF]);
        let raw = if value { raw | 0x4000 } else { raw & !0x4000 };
        byte_order::write_u16(&mut data[field::FLG_OFF], raw);
    }

    /// Set the "more fragments" flag.
    #[inline]
    pub fn set_more_frags(&mut self, value: bool) {
        let data = self.buffer.as_mut();
        let raw = byte_order::read_u16(&data[field::FLG_OFF]);
        let raw = if value { raw | 0x2000 } else { raw & !0x2000 };
        byte_order::write_u16(&mut data[field::FLG_OFF], raw);
    }

    /// Set the fragment offset, in octets.
    #[inline]
    pub fn set_frag_offset(&mut self, value: u16) {
        let data = self.buffer.as_mut();
        let raw = byte_order::read_u16(&data[field::FLG_OFF]);
        let raw = (raw & 0xe000) | (value >> 3);
        byte_order::write_u16(&mut data[field::FLG_OFF], raw);
    }

    /// Set the time to live field.
    #[inline]
    pub fn set_ttl(&mut self, value: u8) {
        self.buffer.as_mut()[field::TTL] = value
    }

    /// Set the protocol field.
    #[inline]
    pub fn set_protocol(&mut self, value: Protocol) {
        self.buffer.as_mut()[field::PROTOCOL] = value.into()
    }

    /// Set the header checksum field.
    ///
    /// The value is stored as given; computing it is left to the caller.
    #[inline]
    pub fn set_checksum(&mut self, value: u16) {
        byte_order::write_u16(&mut self.buffer.as_mut()[field::CHECKSUM], value)
    }

    /// Set the source address field.
    #[inline]
    pub fn set_src_addr(&mut self, value: Address) {
        self.buffer.as_mut()[field::SRC_ADDR].copy_from_slice(value.as_bytes())
    }

    /// Set the destination address field.
    #[inline]
    pub fn set_dst_addr(&mut self, value: Address) {
        self.buffer.as_mut()[field::DST_ADDR].copy_from_slice(value.as_bytes())
    }

    /// Return the option octets as a mutable slice.
    pub fn options_mut(&mut self) -> &mut [u8] {
        let header_len = self.header_len;
        &mut self.buffer.as_mut()[MIN_HEADER_LEN..header_len]
    }

    /// Return the bytes following the header as a mutable slice.
    pub fn payload_mut(&mut self) -> &mut [u8] {
        let header_len = self.header_len;
        &mut self.buffer.as_mut()[header_len..]
    }
}

impl<'a> Packet<&'a [u8]> {
    /// Return the bytes following the header, for the whole lifetime of the buffer.
    pub fn payload_bytes(&self) -> &'a [u8] {
        &self.buffer[self.header_len..]
    }
}

impl<T: AsRef<[u8]>> super::HeaderView for Packet<T> {
    fn len(&self) -> usize {
        self.header_len
    }

    fn header_bytes(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.header_len]
    }
}

impl<T: AsRef<[u8]>> AsRef<[u8]> for Packet<T> {
    fn as_ref(&self) -> &[u8] {
        self.buffer.as_ref()
    }
}

impl<T: AsRef<[u8]>> fmt::Display for Packet<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IPv4 src={} dst={} proto={} len={} ttl={}",
               self.src_addr(), self.dst_addr(), self.protocol(),
               self.total_len(), self.ttl())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wire::HeaderView;

    static PACKET_BYTES: [u8; 24] =
        [0x45, 0x00, 0x00, 0x57,
         0x00, 0x00, 0x40, 0x00,
         0x40, 0x06, 0xbb, 0xef,
         0xac, 0x10, 0x15, 0x05,
         0xc0, 0x1e, 0xfd, 0x7d,
         0xea, 0x3e, 0x01, 0xbb];

    #[test]
    fn test_deconstruct() {
        let packet = Packet::new_checked(&PACKET_BYTES[..20]).unwrap();
        assert_eq!(packet.len(), 20);
        assert_eq!(packet.version(), 4);
        assert_eq!(packet.ihl(), 5);
        assert_eq!(packet.dscp(), 0);
        assert_eq!(packet.ecn(), 0);
        assert_eq!(packet.total_len(), 0x57);
        assert_eq!(packet.ident(), 0);
        assert!(packet.dont_frag());
        assert!(!packet.more_frags());
        assert_eq!(packet.frag_offset(), 0);
        assert_eq!(packet.ttl(), 64);
        assert_eq!(packet.protocol(), Protocol::Tcp);
        assert_eq!(u8::from(packet.protocol()), 6);
        assert_eq!(packet.checksum(), 0xbbef);
        assert_eq!(packet.src_addr(), "172.16.21.5".parse::<Address>().unwrap());
        assert_eq!(packet.dst_addr(), "192.30.253.125".parse::<Address>().unwrap());
        assert_eq!(packet.src_addr().to_string(), "172.16.21.5");
        assert_eq!(packet.dst_addr().to_string(), "192.30.253.125");
        assert!(packet.options().is_empty());
        assert!(packet.payload().is_empty());
    }

    #[test]
    fn test_payload_follows_header() {
        let packet = Packet::new_checked(&PACKET_BYTES[..]).unwrap();
        assert_eq!(packet.len(), 20);
        assert_eq!(packet.payload_bytes(), &PACKET_BYTES[20..]);
    }

    #[test]
    fn test_header_len_from_ihl() {
        let mut bytes = PACKET_BYTES;
        bytes[0] = 0x46;
        let packet = Packet::new_checked(&bytes[..]).unwrap();
        assert_eq!(packet.len(), 24);
        assert_eq!(packet.options(), &PACKET_BYTES[20..]);
        assert!(packet.payload().is_empty());

        // The options claimed by the IHL do not fit.
        assert_eq!(Packet::new_checked(&bytes[..22]), Err(Error::Truncated));
    }

    #[test]
    fn test_bad_ihl() {
        let mut bytes = PACKET_BYTES;
        bytes[0] = 0x44;
        assert_eq!(Packet::new_checked(&bytes[..]), Err(Error::Malformed));
    }

    #[test]
    fn test_truncated() {
        assert_eq!(Packet::new_checked(&PACKET_BYTES[..19]), Err(Error::Truncated));
    }

    #[test]
    fn test_owned() {
        let packet = Packet::new();
        assert_eq!(packet.len(), 20);
        assert_eq!(packet.version(), 4);
        assert_eq!(packet.ihl(), 5);
        assert_eq!(packet.total_len(), 0);
        assert_eq!(packet.src_addr(), Address::UNSPECIFIED);
        assert_eq!(packet.header_bytes()[0], 0x45);
        assert!(packet.header_bytes()[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_construct() {
        let mut packet = Packet::new();
        packet.set_total_len(0x57);
        packet.set_ident(0);
        packet.set_dont_frag(true);
        packet.set_ttl(64);
        packet.set_protocol(Protocol::Tcp);
        packet.set_checksum(0xbbef);
        packet.set_src_addr(Address::new(172, 16, 21, 5));
        packet.set_dst_addr(Address::new(192, 30, 253, 125));
        assert_eq!(packet.header_bytes(), &PACKET_BYTES[..20]);
    }

    #[test]
    fn test_setters() {
        let mut packet = Packet::new();
        packet.set_total_len(550);
        assert_eq!(packet.total_len(), 550);
        packet.set_ident(1242);
        assert_eq!(packet.ident(), 1242);
        packet.set_ttl(32);
        assert_eq!(packet.ttl(), 32);
        packet.set_protocol(Protocol::Udp);
        assert_eq!(u8::from(packet.protocol()), 17);
        packet.set_src_addr("8.8.4.4".parse().unwrap());
        assert_eq!(packet.src_addr(), Address::new(8, 8, 4, 4));
        packet.set_dst_addr("8.8.4.4".parse().unwrap());
        assert_eq!(packet.dst_addr(), Address::new(8, 8, 4, 4));
        packet.set_more_frags(true);
        packet.set_frag_offset(1480);
        assert!(packet.more_frags());
        assert_eq!(packet.frag_offset(), 1480);
        packet.set_dscp(0x2e);
        packet.set_ecn(0x01);
        assert_eq!(packet.dscp(), 0x2e);
        assert_eq!(packet.ecn(), 0x01);
        assert_eq!(packet.version(), 4);
        assert_eq!(packet.ihl(), 5);
    }

    #[test]
    fn test_set_version_masks_nibble() {
        let mut packet = Packet::new();
        packet.set_version(0x16);
        assert_eq!(packet.version(), 6);
        assert_eq!(packet.ihl(), 5);
        packet.set_version(4);
        assert_eq!(packet.header_bytes()[0], 0x45);
    }

    #[test]
    fn test_set_header_len() {
        let mut bytes = [0; 24];
        bytes[0] = 0x45;
        let mut packet = Packet::new_checked(&mut bytes[..]).unwrap();
        assert_eq!(packet.set_header_len(22), Err(Error::Malformed));
        assert_eq!(packet.set_header_len(28), Err(Error::Truncated));
        assert_eq!(packet.len(), 20);
        packet.set_header_len(24).unwrap();
        assert_eq!(packet.len(), 24);
        assert_eq!(packet.ihl(), 6);
        assert_eq!(packet.version(), 4);

        let mut owned = Packet::new();
        assert_eq!(owned.set_header_len(24), Err(Error::Truncated));
        let owned = Packet::with_header_len(24).unwrap();
        assert_eq!(owned.len(), 24);
        assert_eq!(owned.header_bytes()[0], 0x46);
        assert_eq!(Packet::with_header_len(64), Err(Error::Malformed));
    }

    #[test]
    fn test_write() {
        let packet = Packet::new_checked(&PACKET_BYTES[..]).unwrap();
        let mut out = [0xff; 20];
        assert_eq!(packet.write(&mut out), Ok(20));
        assert_eq!(&out[..], &PACKET_BYTES[..20]);
        assert_eq!(packet.write(&mut out[..19]), Err(Error::Truncated));
    }

    #[test]
    fn test_address_parse() {
        let addr: Address = "5.5.8.9".parse().unwrap();
        assert_eq!(addr, Address::new(5, 5, 8, 9));
        assert_eq!(addr.to_u32(), 0x0505_0809);
        assert_eq!("12.54.23.122".parse::<Address>().unwrap().to_string(), "12.54.23.122");
        assert_eq!("005.05.8.9".parse::<Address>(), Ok(addr));

        assert_eq!("422.122.234.34".parse::<Address>(), Err(ParseAddressError::Component));
        assert_eq!("1.2.3".parse::<Address>(), Err(ParseAddressError::ComponentCount));
        assert_eq!("1.2.3.4.5".parse::<Address>(), Err(ParseAddressError::ComponentCount));
        assert_eq!("1.2..4".parse::<Address>(), Err(ParseAddressError::Component));
        assert_eq!("1.2.3.x".parse::<Address>(), Err(ParseAddressError::Component));
        assert_eq!("1.2.3.+4".parse::<Address>(), Err(ParseAddressError::Component));
        assert_eq!("".parse::<Address>(), Err(ParseAddressError::Component));
    }

    #[test]
    fn test_address_round_trip() {
        for &raw in &[0u32, 1, 0x7f00_0001, 0xac10_1505, 0xc01e_fd7d, 0xffff_ffff] {
            let addr = Address::from_u32(raw);
            assert_eq!(addr.to_string().parse::<Address>(), Ok(addr));
        }
    }

    #[test]
    fn test_address_integer_and_bytes() {
        let addr = Address::from_bytes(&[0x02, 0x05, 0x05, 0x04]).unwrap();
        assert_eq!(addr.to_u32(), 0x0205_0504);
        assert_eq!(Address::from_u32(0x0205_0504), addr);
        assert_eq!(Address::from_bytes(&[1, 2, 3]), Err(Error::Truncated));

        let mut out = [0; 4];
        addr.write(&mut out).unwrap();
        assert_eq!(out, [0x02, 0x05, 0x05, 0x04]);
    }

    #[test]
    fn test_address_swap_bytes() {
        let addr = Address::new(5, 5, 8, 9);
        assert_eq!(addr.swap_bytes(), Address::new(9, 8, 5, 5));
        assert_eq!(addr.swap_bytes().swap_bytes(), addr);
    }

    #[test]
    fn test_address_order() {
        assert!(Address::new(9, 0, 0, 0) < Address::new(10, 0, 0, 0));
        assert!(Address::new(10, 0, 0, 255) < Address::new(10, 0, 1, 0));
        assert_eq!(Address::new(10, 0, 0, 1).cmp(&Address::new(10, 0, 0, 2)),
            Address::from_u32(0x0a00_0001).to_u32().cmp(&0x0a00_0002));
    }

    #[test]
    fn test_unspecified() {
        assert!(Address::UNSPECIFIED.is_unspecified());
        assert!(!Address::UNSPECIFIED.is_unicast());
        assert!(!Address::UNSPECIFIED.is_multicast());
        assert!(!Address::UNSPECIFIED.is_broadcast());
    }

    #[test]
    fn test_broadcast() {
        assert!(!Address::BROADCAST.is_unspecified());
        assert!(!Address::BROADCAST.is_unicast());
        assert!(!Address::BROADCAST.is_multicast());
        assert!(Address::BROADCAST.is_broadcast());
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_std_conversion() {
        let std_addr = ::std::net::Ipv4Addr::new(192, 30, 253, 125);
        let addr = Address::from(std_addr);
        assert_eq!(addr, Address::new(192, 30, 253, 125));
        assert_eq!(::std::net::Ipv4Addr::from(addr), std_addr);
        assert_eq!(addr.to_string(), std_addr.to_string());
    }
}
