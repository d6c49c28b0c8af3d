//! Walk the header chain of a complete Ethernet frame.
use alloc::vec::Vec;
use core::fmt;

use super::{arp, ethernet, icmpv4, ipv4, tcp, udp};
use super::{Error, HeaderView, Result};
use super::{ArpPacket, EthernetFrame, EthernetProtocol, Icmpv4Packet, IpProtocol, Ipv4Packet};
use super::{TcpPacket, UdpPacket};
use crate::flow::FlowKey;

/// The closed set of headers this crate can interpret.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum HeaderKind {
    /// An Ethernet II frame header.
    Ethernet,
    /// An ARP packet for Ethernet and IPv4.
    Arp,
    /// An IPv4 header, options included.
    Ipv4,
    /// An ICMPv4 header.
    Icmpv4,
    /// A TCP header without options.
    Tcp,
    /// A UDP header.
    Udp,
}

/// One header of any kind, wrapping the container `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyHeader<T> {
    /// See [`HeaderKind::Ethernet`].
    Ethernet(EthernetFrame<T>),
    /// See [`HeaderKind::Arp`].
    Arp(ArpPacket<T>),
    /// See [`HeaderKind::Ipv4`].
    Ipv4(Ipv4Packet<T>),
    /// See [`HeaderKind::Icmpv4`].
    Icmpv4(Icmpv4Packet<T>),
    /// See [`HeaderKind::Tcp`].
    Tcp(TcpPacket<T>),
    /// See [`HeaderKind::Udp`].
    Udp(UdpPacket<T>),
}

/// The headers found in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dissection<'a> {
    /// The outermost header, always present.
    pub ethernet: EthernetFrame<&'a [u8]>,
    /// Everything inside the Ethernet frame.
    pub network: Network<'a>,
}

/// The content of an Ethernet frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network<'a> {
    /// An address resolution packet.
    Arp(ArpPacket<&'a [u8]>),
    /// An IPv4 datagram and the content it carries.
    Ipv4(Ipv4Packet<&'a [u8]>, Transport<'a>),
    /// A protocol without a view, with the uninterpreted payload.
    Other(EthernetProtocol, &'a [u8]),
}

/// The content of an IPv4 datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport<'a> {
    /// A TCP segment.
    Tcp(TcpPacket<&'a [u8]>),
    /// A UDP datagram.
    Udp(UdpPacket<&'a [u8]>),
    /// An ICMP message.
    Icmp(Icmpv4Packet<&'a [u8]>),
    /// A protocol without a view, or a fragment not carrying the transport header.
    Other(IpProtocol, &'a [u8]),
}

impl HeaderKind {
    /// The smallest buffer that a header of this kind can be parsed from.
    pub fn min_len(self) -> usize {
        match self {
            HeaderKind::Ethernet => ethernet::HEADER_LEN,
            HeaderKind::Arp => arp::HEADER_LEN,
            HeaderKind::Ipv4 => ipv4::MIN_HEADER_LEN,
            HeaderKind::Icmpv4 => icmpv4::HEADER_LEN,
            HeaderKind::Tcp => tcp::HEADER_LEN,
            HeaderKind::Udp => udp::HEADER_LEN,
        }
    }

    /// Interpret the start of `buffer` as a header of this kind.
    ///
    /// ARP packets are additionally required to use Ethernet and IPv4 addresses.
    pub fn parse(self, buffer: &[u8]) -> Result<AnyHeader<&[u8]>> {
        Ok(match self {
            HeaderKind::Ethernet => AnyHeader::Ethernet(EthernetFrame::new_checked(buffer)?),
            HeaderKind::Arp => {
                let packet = ArpPacket::new_checked(buffer)?;
                packet.check_addresses()?;
                AnyHeader::Arp(packet)
            },
            HeaderKind::Ipv4 => AnyHeader::Ipv4(Ipv4Packet::new_checked(buffer)?),
            HeaderKind::Icmpv4 => AnyHeader::Icmpv4(Icmpv4Packet::new_checked(buffer)?),
            HeaderKind::Tcp => AnyHeader::Tcp(TcpPacket::new_checked(buffer)?),
            HeaderKind::Udp => AnyHeader::Udp(UdpPacket::new_checked(buffer)?),
        })
    }
}

impl fmt::Display for HeaderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            HeaderKind::Ethernet => "Ethernet",
            HeaderKind::Arp => "ARP",
            HeaderKind::Ipv4 => "IPv4",
            HeaderKind::Icmpv4 => "ICMPv4",
            HeaderKind::Tcp => "TCP",
            HeaderKind::Udp => "UDP",
        })
    }
}

impl<T> AnyHeader<T> {
    /// The kind of the contained header.
    pub fn kind(&self) -> HeaderKind {
        match self {
            AnyHeader::Ethernet(_) => HeaderKind::Ethernet,
            AnyHeader::Arp(_) => HeaderKind::Arp,
            AnyHeader::Ipv4(_) => HeaderKind::Ipv4,
            AnyHeader::Icmpv4(_) => HeaderKind::Icmpv4,
            AnyHeader::Tcp(_) => HeaderKind::Tcp,
            AnyHeader::Udp(_) => HeaderKind::Udp,
        }
    }
}

impl<T: AsRef<[u8]>> AnyHeader<T> {
    fn as_view(&self) -> &dyn HeaderView {
        match self {
            AnyHeader::Ethernet(header) => header,
            AnyHeader::Arp(header) => header,
            AnyHeader::Ipv4(header) => header,
            AnyHeader::Icmpv4(header) => header,
            AnyHeader::Tcp(header) => header,
            AnyHeader::Udp(header) => header,
        }
    }
}

impl<T: AsRef<[u8]>> HeaderView for AnyHeader<T> {
    fn len(&self) -> usize {
        self.as_view().len()
    }

    fn header_bytes(&self) -> &[u8] {
        self.as_view().header_bytes()
    }
}

impl<T: AsRef<[u8]>> fmt::Display for AnyHeader<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AnyHeader::Ethernet(header) => fmt::Display::fmt(header, f),
            AnyHeader::Arp(header) => fmt::Display::fmt(header, f),
            AnyHeader::Ipv4(header) => fmt::Display::fmt(header, f),
            AnyHeader::Icmpv4(header) => fmt::Display::fmt(header, f),
            AnyHeader::Tcp(header) => fmt::Display::fmt(header, f),
            AnyHeader::Udp(header) => fmt::Display::fmt(header, f),
        }
    }
}

/// Interpret a complete Ethernet frame.
///
/// Headers are recognized by the ether-type and the IPv4 protocol number. Protocols without a
/// view end the walk and are returned with their raw payload, so are IPv4 fragments other than
/// the first. A recognized header that does not fit into the remaining bytes fails the whole
/// frame with `Error::Truncated`, and an IPv4 header with a bad IHL with `Error::Malformed`.
///
/// The IPv4 total length field is not consulted, the innermost payload extends to the end of the
/// frame and may include Ethernet padding.
pub fn dissect(frame: &[u8]) -> Result<Dissection<'_>> {
    let ethernet = EthernetFrame::new_checked(frame)?;
    let network = match ethernet.ethertype() {
        EthernetProtocol::Arp => {
            let packet = ArpPacket::new_checked(ethernet.payload_bytes())
                .and_then(|packet| packet.check_addresses().map(|()| packet))
                .map_err(|err| log_bad_header(HeaderKind::Arp, err))?;
            Network::Arp(packet)
        },
        EthernetProtocol::Ipv4 => {
            let packet = Ipv4Packet::new_checked(ethernet.payload_bytes())
                .map_err(|err| log_bad_header(HeaderKind::Ipv4, err))?;
            let transport = dissect_ipv4(&packet)?;
            Network::Ipv4(packet, transport)
        },
        other => {
            net_trace!("dissect: no view for ether-type {}", other);
            Network::Other(other, ethernet.payload_bytes())
        },
    };

    Ok(Dissection { ethernet, network })
}

fn dissect_ipv4<'a>(packet: &Ipv4Packet<&'a [u8]>) -> Result<Transport<'a>> {
    let payload = packet.payload_bytes();
    let protocol = packet.protocol();

    if packet.frag_offset() != 0 {
        net_trace!("dissect: fragment at offset {} of {}", packet.frag_offset(), protocol);
        return Ok(Transport::Other(protocol, payload));
    }

    let transport = match protocol {
        IpProtocol::Tcp => TcpPacket::new_checked(payload)
            .map(Transport::Tcp)
            .map_err(|err| log_bad_header(HeaderKind::Tcp, err))?,
        IpProtocol::Udp => UdpPacket::new_checked(payload)
            .map(Transport::Udp)
            .map_err(|err| log_bad_header(HeaderKind::Udp, err))?,
        IpProtocol::Icmp => Icmpv4Packet::new_checked(payload)
            .map(Transport::Icmp)
            .map_err(|err| log_bad_header(HeaderKind::Icmpv4, err))?,
        other => {
            net_trace!("dissect: no view for ip protocol {}", other);
            Transport::Other(other, payload)
        },
    };

    Ok(transport)
}

fn log_bad_header(kind: HeaderKind, err: Error) -> Error {
    net_debug!("dissect: bad {} header: {}", kind, err);
    err
}

impl<'a> Dissection<'a> {
    /// All recognized headers, outermost first.
    pub fn headers(&self) -> Vec<AnyHeader<&'a [u8]>> {
        let mut headers = alloc::vec![AnyHeader::Ethernet(self.ethernet)];
        match self.network {
            Network::Arp(packet) => headers.push(AnyHeader::Arp(packet)),
            Network::Ipv4(packet, transport) => {
                headers.push(AnyHeader::Ipv4(packet));
                match transport {
                    Transport::Tcp(packet) => headers.push(AnyHeader::Tcp(packet)),
                    Transport::Udp(packet) => headers.push(AnyHeader::Udp(packet)),
                    Transport::Icmp(packet) => headers.push(AnyHeader::Icmpv4(packet)),
                    Transport::Other(..) => (),
                }
            },
            Network::Other(..) => (),
        }
        headers
    }

    /// The bytes following the innermost recognized header.
    pub fn payload(&self) -> &'a [u8] {
        match self.network {
            Network::Arp(packet) => packet.payload_bytes(),
            Network::Ipv4(_, Transport::Tcp(packet)) => packet.payload_bytes(),
            Network::Ipv4(_, Transport::Udp(packet)) => packet.payload_bytes(),
            Network::Ipv4(_, Transport::Icmp(packet)) => packet.payload_bytes(),
            Network::Ipv4(_, Transport::Other(_, payload)) => payload,
            Network::Other(_, payload) => payload,
        }
    }

    /// The flow of an IPv4 datagram.
    ///
    /// Ports are zero unless the datagram carries a TCP or UDP header.
    pub fn flow_key(&self) -> Option<FlowKey> {
        let (packet, transport) = match self.network {
            Network::Ipv4(packet, transport) => (packet, transport),
            _ => return None,
        };

        let (src_port, dst_port) = match transport {
            Transport::Tcp(segment) => (segment.src_port(), segment.dst_port()),
            Transport::Udp(datagram) => (datagram.src_port(), datagram.dst_port()),
            _ => (0, 0),
        };

        Some(FlowKey::new(
            packet.src_addr(), packet.dst_addr(),
            src_port, dst_port,
            packet.protocol()))
    }
}

impl fmt::Display for Dissection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.ethernet)?;
        match self.network {
            Network::Arp(packet) => write!(f, " / {}", packet),
            Network::Ipv4(packet, transport) => {
                write!(f, " / {}", packet)?;
                match transport {
                    Transport::Tcp(segment) => write!(f, " / {}", segment),
                    Transport::Udp(datagram) => write!(f, " / {}", datagram),
                    Transport::Icmp(message) => write!(f, " / {}", message),
                    Transport::Other(protocol, payload) =>
                        write!(f, " / {} ({} octets)", protocol, payload.len()),
                }
            },
            Network::Other(ethertype, payload) =>
                write!(f, " / {} ({} octets)", ethertype, payload.len()),
        }
    }
}
