//! Typed views over network protocol headers.
//!
//! ## Table of contents
//!
//! 1. [Design](#design)
//! 2. [The wire module](wire/index.html)
//!    1. [Ethernet](wire/ethernet/index.html)
//!    1. [Arp](wire/arp/index.html)
//!    1. [Ip V4](wire/ipv4/index.html)
//!    1. [Icmp](wire/icmpv4/index.html)
//!    1. [Tcp](wire/tcp/index.html)
//!    1. [Udp](wire/udp/index.html)
//! 3. [Flow keys](flow/index.html)
//! 4. [Transport boundary](nic/index.html)
//!
//! ## Design
//!
//! Every header is a thin wrapper around some byte container. The same type serves both for
//! reading a captured frame in place and for building a new one: wrap a borrowed `&[u8]` or
//! `&mut [u8]` to interpret caller-owned memory, or create the header with its `new`
//! constructor to get a zero-initialized buffer of its own. Either way the header knows its
//! encoded length after construction, and since that length is checked against the container
//! up front no accessor will go out of bounds later on.
//!
//! Headers stack inside one buffer. The bytes following one header, available through its
//! `payload` accessors, are where the next header starts. [`wire::dissect`] walks this chain
//! for a complete Ethernet frame.
//!
//! Nothing in the library performs checksum computation, option parsing or keeps transport
//! state; it is purely a transform over caller-supplied buffers.
//!
//! [`wire::dissect`]: wire/fn.dissect.html
#![warn(missing_docs)]
#![warn(unreachable_pub)]

// tests should be able to use `std`
#![cfg_attr(all(
    not(feature = "std"),
    not(test)),
no_std)]

extern crate alloc;

#[macro_use] mod macros;
pub mod flow;
pub mod nic;
pub mod wire;
