/*! Low-level header access and construction.

# An overview over header representations

Each protocol module provides a wrapper type around a byte container, e.g. [`EthernetFrame`] or
[`UdpPacket`]. The wrapper interprets the first octets of the container as the protocol header
and offers typed accessors and setters for every field at its fixed offset, converting multi-byte
fields from and to network byte order on the way.

The container decides the lifecycle of the header:

 * `Vec<u8>`: an *owning* header, created with `new()` as a zero-initialized buffer of exactly
   the header length. The buffer is released with the header.
 * `&[u8]` or `&mut [u8]`: a *borrowing* header, created with `new_checked(buffer)` over memory
   owned by the caller. The header can not outlive the borrow.

All of them implement [`HeaderView`], which provides the encoded length and copying the header
into another buffer.

The `new_checked` constructors validate that the container is long enough for the header before
returning, so that afterwards no accessor or setter can index out of bounds. For IPv4 the header
length is variable and read from the IHL field during this check; an inconsistent field is
reported as [`Error::Malformed`].

[`EthernetFrame`]: struct.EthernetFrame.html
[`UdpPacket`]: struct.UdpPacket.html
[`HeaderView`]: trait.HeaderView.html
[`Error::Malformed`]: enum.Error.html#variant.Malformed

# Examples

To build an IPv4 header into a fresh buffer, and then parse it back from bytes:

```rust
use wireview::wire::*;

let mut ip = Ipv4Packet::new();
ip.set_src_addr(Ipv4Address::new(10, 0, 0, 1));
ip.set_dst_addr(Ipv4Address::new(10, 0, 0, 2));
ip.set_protocol(IpProtocol::Tcp);
ip.set_ttl(64);

let mut buffer = [0; 20];
ip.write(&mut buffer).expect("buffer too short");

let parsed = Ipv4Packet::new_checked(&buffer[..]).expect("truncated header");
assert_eq!(parsed.len(), 20);
assert_eq!(parsed.dst_addr(), Ipv4Address::new(10, 0, 0, 2));
```
*/
// Copyright (C) 2016 whitequark@whitequark.org
// Copyright (C) 2019 Andreas Molzer <andreas.molzer@tum.de>
//
// in large parts from `smoltcp` originally distributed under 0-clause BSD

mod field {
    pub(crate) type Field = ::core::ops::Range<usize>;
    pub(crate) type Rest  = ::core::ops::RangeFrom<usize>;
}

pub mod byte_order;
mod error;
#[macro_use] mod view;

pub mod arp;
pub mod ethernet;
pub mod icmpv4;
pub mod ipv4;
pub mod tcp;
pub mod udp;

mod dissect;

pub use self::error::{
    Error,
    ParseAddressError,
    Result};

pub use self::view::HeaderView;

pub use self::ethernet::{
    EtherType as EthernetProtocol,
    Address as MacAddress,
    Address as EthernetAddress,
    Frame as EthernetFrame};

pub use self::arp::{
    Hardware as ArpHardware,
    Operation as ArpOperation,
    Packet as ArpPacket};

pub use self::ipv4::{
    Protocol as IpProtocol,
    Address as Ipv4Address,
    Packet as Ipv4Packet};

pub use self::icmpv4::{
    Message as Icmpv4Message,
    Packet as Icmpv4Packet};

pub use self::tcp::{
    Flags as TcpFlags,
    Packet as TcpPacket};

pub use self::udp::Packet as UdpPacket;

pub use self::dissect::{
    dissect,
    AnyHeader,
    Dissection,
    HeaderKind,
    Network,
    Transport};
