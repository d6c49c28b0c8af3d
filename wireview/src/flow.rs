//! Flow identification for IPv4 transport traffic.
//!
//! A [`FlowKey`] is the 5-tuple of source and destination address, source and destination port
//! and protocol number. It is directional: the two halves of a connection have different keys,
//! see [`FlowKey::reversed`].
//!
//! [`FlowKey`]: struct.FlowKey.html
//! [`FlowKey::reversed`]: struct.FlowKey.html#method.reversed
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::wire::{IpProtocol, Ipv4Address, Ipv4Packet, Result, TcpPacket, UdpPacket};

/// The 5-tuple identifying a unidirectional flow.
///
/// Keys compare by protocol number, so an `IpProtocol::Unknown` holding a known number is the
/// same key as the named protocol.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct FlowKey {
    src_addr: Ipv4Address,
    dst_addr: Ipv4Address,
    src_port: u16,
    dst_port: u16,
    protocol: u8,
}

impl FlowKey {
    /// Assemble a key from its parts.
    pub fn new(
        src_addr: Ipv4Address,
        dst_addr: Ipv4Address,
        src_port: u16,
        dst_port: u16,
        protocol: IpProtocol,
    ) -> Self {
        FlowKey { src_addr, dst_addr, src_port, dst_port, protocol: protocol.into() }
    }

    /// Derive the key of an IPv4 datagram starting at the first octet of `buffer`.
    ///
    /// Ports are read from the TCP or UDP header following the IP header, and are zero for all
    /// other protocols and for fragments other than the first, which carry no transport header.
    /// Fails with `Error::Truncated` if the buffer ends before the ports and with
    /// `Error::Malformed` if the IP header length is inconsistent.
    pub fn from_ipv4_bytes(buffer: &[u8]) -> Result<Self> {
        let packet = Ipv4Packet::new_checked(buffer)?;
        let protocol = packet.protocol();

        let (src_port, dst_port) = match protocol {
            _ if packet.frag_offset() != 0 => (0, 0),
            IpProtocol::Tcp => {
                let segment = TcpPacket::new_checked(packet.payload_bytes())?;
                (segment.src_port(), segment.dst_port())
            },
            IpProtocol::Udp => {
                let datagram = UdpPacket::new_checked(packet.payload_bytes())?;
                (datagram.src_port(), datagram.dst_port())
            },
            _ => (0, 0),
        };

        let key = FlowKey::new(packet.src_addr(), packet.dst_addr(), src_port, dst_port, protocol);
        net_trace!("flow: {}", key);
        Ok(key)
    }

    /// The source address.
    pub fn src_addr(&self) -> Ipv4Address {
        self.src_addr
    }

    /// The destination address.
    pub fn dst_addr(&self) -> Ipv4Address {
        self.dst_addr
    }

    /// The source port, zero for protocols without ports.
    pub fn src_port(&self) -> u16 {
        self.src_port
    }

    /// The destination port, zero for protocols without ports.
    pub fn dst_port(&self) -> u16 {
        self.dst_port
    }

    /// The IP protocol number.
    pub fn protocol(&self) -> IpProtocol {
        IpProtocol::from(self.protocol)
    }

    /// The key of the opposite direction.
    pub fn reversed(&self) -> Self {
        FlowKey {
            src_addr: self.dst_addr,
            dst_addr: self.src_addr,
            src_port: self.dst_port,
            dst_port: self.src_port,
            protocol: self.protocol,
        }
    }

    /// A stable 64-bit digest of the key.
    ///
    /// The value only depends on the five fields and is the same across runs and platforms, so
    /// it can be persisted or used to shard flows between processes.
    pub fn hash_value(&self) -> u64 {
        let addrs = u64::from(self.src_addr.to_u32()) << 32
            | u64::from(self.dst_addr.to_u32());
        let ports = u64::from(self.src_port) << 32
            | u64::from(self.dst_port) << 16
            | u64::from(self.protocol);

        let mut seed = 0;
        hash_combine(&mut seed, addrs);
        hash_combine(&mut seed, ports);
        seed
    }
}

fn hash_combine(seed: &mut u64, value: u64) {
    *seed ^= value
        .wrapping_add(0x9e37_79b9)
        .wrapping_add(*seed << 6)
        .wrapping_add(*seed >> 2);
}

impl Hash for FlowKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_value())
    }
}

impl fmt::Display for FlowKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}:{} -> {}:{}",
               self.protocol(),
               self.src_addr, self.src_port,
               self.dst_addr, self.dst_port)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wire::{Error, HeaderView};

    // 172.16.21.5 -> 192.30.253.125, tcp 59966 -> 443
    static TCP_BYTES: [u8; 40] =
        [0x45, 0x00, 0x00, 0x28,
         0x00, 0x00, 0x40, 0x00,
         0x40, 0x06, 0x00, 0x00,
         0xac, 0x10, 0x15, 0x05,
         0xc0, 0x1e, 0xfd, 0x7d,
         0xea, 0x3e, 0x01, 0xbb,
         0x67, 0xac, 0xec, 0x00,
         0x78, 0xff, 0x15, 0xf6,
         0x80, 0x10, 0x10, 0x15,
         0xc4, 0xf0, 0x00, 0x00];

    fn tcp_key() -> FlowKey {
        FlowKey::new(
            Ipv4Address::new(172, 16, 21, 5),
            Ipv4Address::new(192, 30, 253, 125),
            59966, 443,
            IpProtocol::Tcp)
    }

    #[test]
    fn from_tcp_bytes() {
        let key = FlowKey::from_ipv4_bytes(&TCP_BYTES[..]).unwrap();
        assert_eq!(key, tcp_key());
        assert_eq!(key.src_addr(), Ipv4Address::new(172, 16, 21, 5));
        assert_eq!(key.dst_addr(), Ipv4Address::new(192, 30, 253, 125));
        assert_eq!(key.src_port(), 59966);
        assert_eq!(key.dst_port(), 443);
        assert_eq!(key.protocol(), IpProtocol::Tcp);
    }

    #[test]
    fn from_udp_bytes() {
        let mut ip = Ipv4Packet::new();
        ip.set_protocol(IpProtocol::Udp);
        ip.set_src_addr(Ipv4Address::new(10, 0, 0, 1));
        ip.set_dst_addr(Ipv4Address::new(10, 0, 0, 2));

        let mut udp = UdpPacket::new();
        udp.set_src_port(55377);
        udp.set_dst_port(53);

        let mut buffer = [0; 28];
        ip.write(&mut buffer[..]).unwrap();
        udp.write(&mut buffer[20..]).unwrap();

        let key = FlowKey::from_ipv4_bytes(&buffer[..]).unwrap();
        assert_eq!(key.src_port(), 55377);
        assert_eq!(key.dst_port(), 53);
        assert_eq!(key.protocol(), IpProtocol::Udp);
    }

    #[test]
    fn portless_protocol() {
        let mut bytes = TCP_BYTES;
        bytes[9] = 0x01;
        let key = FlowKey::from_ipv4_bytes(&bytes[..20]).unwrap();
        assert_eq!(key.src_port(), 0);
        assert_eq!(key.dst_port(), 0);
        assert_eq!(key.protocol(), IpProtocol::Icmp);
    }

    #[test]
    fn truncated_ports() {
        assert_eq!(FlowKey::from_ipv4_bytes(&TCP_BYTES[..39]), Err(Error::Truncated));
        assert_eq!(FlowKey::from_ipv4_bytes(&TCP_BYTES[..19]), Err(Error::Truncated));

        let mut bytes = TCP_BYTES;
        bytes[9] = 0x11;
        assert_eq!(FlowKey::from_ipv4_bytes(&bytes[..27]), Err(Error::Truncated));
        assert!(FlowKey::from_ipv4_bytes(&bytes[..28]).is_ok());
    }

    #[test]
    fn hash_vectors() {
        assert_eq!(tcp_key().hash_value(), 0x831a_2411_9373_923a);

        let icmp = FlowKey::new(
            Ipv4Address::new(172, 52, 222, 5),
            Ipv4Address::new(192, 102, 237, 125),
            0, 0,
            IpProtocol::Icmp);
        assert_eq!(icmp.hash_value(), 0x9470_671f_83e6_8631);
    }

    #[test]
    fn every_field_distinguishes() {
        let key = tcp_key();
        let variants = [
            FlowKey { src_addr: Ipv4Address::new(172, 16, 21, 6), ..key },
            FlowKey { dst_addr: Ipv4Address::new(192, 30, 253, 126), ..key },
            FlowKey { src_port: 59967, ..key },
            FlowKey { dst_port: 80, ..key },
            FlowKey { protocol: IpProtocol::Udp.into(), ..key },
        ];

        for other in variants.iter() {
            assert_ne!(*other, key);
            assert_ne!(other.hash_value(), key.hash_value());
        }
    }

    #[test]
    fn protocol_compares_by_number() {
        let named = tcp_key();
        let raw = FlowKey::new(
            named.src_addr(), named.dst_addr(),
            named.src_port(), named.dst_port(),
            IpProtocol::Unknown(6));
        assert_eq!(raw, named);
        assert_eq!(raw.protocol(), IpProtocol::Tcp);
        assert_eq!(raw.hash_value(), named.hash_value());

        let udp = FlowKey::new(
            named.src_addr(), named.dst_addr(),
            named.src_port(), named.dst_port(),
            IpProtocol::Unknown(17));
        assert!(named < udp);
    }

    #[test]
    fn later_fragment_has_no_ports() {
        let mut bytes = TCP_BYTES;
        // offset 1480, in units of eight octets
        bytes[7] = 0xb9;
        let key = FlowKey::from_ipv4_bytes(&bytes[..]).unwrap();
        assert_eq!(key.protocol(), IpProtocol::Tcp);
        assert_eq!((key.src_port(), key.dst_port()), (0, 0));

        // Even when the fragment is too short for a transport header.
        assert!(FlowKey::from_ipv4_bytes(&bytes[..24]).is_ok());
    }

    #[test]
    fn reversed() {
        let key = tcp_key();
        let back = key.reversed();
        assert_eq!(back.src_addr(), key.dst_addr());
        assert_eq!(back.src_port(), 443);
        assert_ne!(back, key);
        assert_eq!(back.reversed(), key);
    }

    #[test]
    fn std_hash_is_consistent() {
        use std::collections::hash_map::DefaultHasher;

        fn digest(key: &FlowKey) -> u64 {
            let mut hasher = DefaultHasher::new();
            key.hash(&mut hasher);
            hasher.finish()
        }

        assert_eq!(digest(&tcp_key()), digest(&FlowKey::from_ipv4_bytes(&TCP_BYTES[..]).unwrap()));
        assert_ne!(digest(&tcp_key()), digest(&tcp_key().reversed()));
    }

    #[test]
    fn display() {
        assert_eq!(tcp_key().to_string(), "TCP 172.16.21.5:59966 -> 192.30.253.125:443");
    }
}
