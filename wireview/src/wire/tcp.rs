//! Transmission control protocol headers.
//!
//! Only the fixed 20 octet part of the header is modelled. The data offset field is available
//! but options are never interpreted, so the view length is always 20.
use alloc::vec::Vec;
use core::{fmt, ops};

use super::byte_order;
use super::view::check_len;
use super::{Error, Result};

/// The control bits of a TCP header.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Flags(pub u8);

impl Flags {
    /// No more data from sender.
    pub const FIN: Flags = Flags(0x01);
    /// Synchronize sequence numbers.
    pub const SYN: Flags = Flags(0x02);
    /// Reset the connection.
    pub const RST: Flags = Flags(0x04);
    /// Push function.
    pub const PSH: Flags = Flags(0x08);
    /// Acknowledgment field significant.
    pub const ACK: Flags = Flags(0x10);
    /// Urgent pointer field significant.
    pub const URG: Flags = Flags(0x20);
    /// ECN echo.
    pub const ECE: Flags = Flags(0x40);
    /// Congestion window reduced.
    pub const CWR: Flags = Flags(0x80);

    /// Query whether all bits of `other` are set.
    pub fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Query whether no bit is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Set or clear the bits of `other`.
    pub fn set(&mut self, other: Flags, value: bool) {
        if value {
            self.0 |= other.0
        } else {
            self.0 &= !other.0
        }
    }
}

impl ops::BitOr for Flags {
    type Output = Flags;

    fn bitor(self, other: Flags) -> Flags {
        Flags(self.0 | other.0)
    }
}

impl ops::BitOrAssign for Flags {
    fn bitor_assign(&mut self, other: Flags) {
        self.0 |= other.0
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const NAMES: [(Flags, &str); 8] = [
            (Flags::FIN, "FIN"), (Flags::SYN, "SYN"), (Flags::RST, "RST"), (Flags::PSH, "PSH"),
            (Flags::ACK, "ACK"), (Flags::URG, "URG"), (Flags::ECE, "ECE"), (Flags::CWR, "CWR"),
        ];

        let mut first = true;
        for &(_, name) in NAMES.iter().filter(|(flag, _)| self.contains(*flag)) {
            if !first {
                f.write_str("|")?;
            }
            f.write_str(name)?;
            first = false;
        }

        if first {
            f.write_str("-")?;
        }
        Ok(())
    }
}

mod field {
    use crate::wire::field::*;

    pub(crate) const SRC_PORT: Field = 0..2;
    pub(crate) const DST_PORT: Field = 2..4;
    pub(crate) const SEQ_NUM:  Field = 4..8;
    pub(crate) const ACK_NUM:  Field = 8..12;
    pub(crate) const OFFSET:   usize = 12;
    pub(crate) const FLAGS:    usize = 13;
    pub(crate) const WIN_SIZE: Field = 14..16;
    pub(crate) const CHECKSUM: Field = 16..18;
    pub(crate) const URGENT:   Field = 18..20;
    pub(crate) const PAYLOAD:  Rest  = 20..;
}

/// The length of a TCP header without options.
pub const HEADER_LEN: usize = field::PAYLOAD.start;

/// The largest header length the data offset can describe.
pub const MAX_HEADER_LEN: u8 = 0x0f * 4;

/// A read/write wrapper around a Transmission Control Protocol header.
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
    /// Imbue a buffer with TCP header structure.
    ///
    /// Returns `Err(Error::Truncated)` if the buffer is shorter than 20 octets.
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

    /// Return the sequence number field.
    #[inline]
    pub fn seq_number(&self) -> u32 {
        byte_order::read_u32(&self.buffer.as_ref()[field::SEQ_NUM])
    }

    /// Return the acknowledgement number field.
    #[inline]
    pub fn ack_number(&self) -> u32 {
        byte_order::read_u32(&self.buffer.as_ref()[field::ACK_NUM])
    }

    /// Return the header length field, in octets.
    ///
    /// This is the data offset as sent. It may be larger than 20 when options are present, which
    /// this view does not cover.
    #[inline]
    pub fn header_len(&self) -> u8 {
        (self.buffer.as_ref()[field::OFFSET] >> 4) * 4
    }

    /// Return the control bits.
    #[inline]
    pub fn flags(&self) -> Flags {
        Flags(self.buffer.as_ref()[field::FLAGS])
    }

    /// Return the window size field.
    #[inline]
    pub fn window_len(&self) -> u16 {
        byte_order::read_u16(&self.buffer.as_ref()[field::WIN_SIZE])
    }

    /// Return the checksum field.
    #[inline]
    pub fn checksum(&self) -> u16 {
        byte_order::read_u16(&self.buffer.as_ref()[field::CHECKSUM])
    }

    /// Return the urgent pointer field.
    #[inline]
    pub fn urgent_at(&self) -> u16 {
        byte_order::read_u16(&self.buffer.as_ref()[field::URGENT])
    }

    /// Return the FIN flag.
    #[inline]
    pub fn fin(&self) -> bool {
        self.flags().contains(Flags::FIN)
    }

    /// Return the SYN flag.
    #[inline]
    pub fn syn(&self) -> bool {
        self.flags().contains(Flags::SYN)
    }

    /// Return the RST flag.
    #[inline]
    pub fn rst(&self) -> bool {
        self.flags().contains(Flags::RST)
    }

    /// Return the PSH flag.
    #[inline]
    pub fn psh(&self) -> bool {
        self.flags().contains(Flags::PSH)
    }

    /// Return the ACK flag.
    #[inline]
    pub fn ack(&self) -> bool {
        self.flags().contains(Flags::ACK)
    }

    /// Return the URG flag.
    #[inline]
    pub fn urg(&self) -> bool {
        self.flags().contains(Flags::URG)
    }

    /// Return the ECE flag.
    #[inline]
    pub fn ece(&self) -> bool {
        self.flags().contains(Flags::ECE)
    }

    /// Return the CWR flag.
    #[inline]
    pub fn cwr(&self) -> bool {
        self.flags().contains(Flags::CWR)
    }

    /// Return the bytes following the fixed header, options included.
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

    /// Set the sequence number field.
    #[inline]
    pub fn set_seq_number(&mut self, value: u32) {
        byte_order::write_u32(&mut self.buffer.as_mut()[field::SEQ_NUM], value)
    }

    /// Set the acknowledgement number field.
    #[inline]
    pub fn set_ack_number(&mut self, value: u32) {
        byte_order::write_u32(&mut self.buffer.as_mut()[field::ACK_NUM], value)
    }

    /// Set the header length field, in octets.
    ///
    /// Only the data offset is written, the length of this view stays 20. Returns
    /// `Err(Error::Malformed)` and leaves the field unchanged if the length is not a multiple of
    /// four in the range 20 to 60.
    pub fn set_header_len(&mut self, value: u8) -> Result<()> {
        if value % 4 != 0 || usize::from(value) < HEADER_LEN || value > MAX_HEADER_LEN {
            return Err(Error::Malformed);
        }

        let data = self.buffer.as_mut();
        data[field::OFFSET] = (data[field::OFFSET] & 0x0f) | ((value / 4) << 4);
        Ok(())
    }

    /// Replace all control bits.
    #[inline]
    pub fn set_flags(&mut self, value: Flags) {
        self.buffer.as_mut()[field::FLAGS] = value.0
    }

    /// Set the window size field.
    #[inline]
    pub fn set_window_len(&mut self, value: u16) {
        byte_order::write_u16(&mut self.buffer.as_mut()[field::WIN_SIZE], value)
    }

    /// Set the checksum field.
    ///
    /// The value is stored as given; computing it is left to the caller.
    #[inline]
    pub fn set_checksum(&mut self, value: u16) {
        byte_order::write_u16(&mut self.buffer.as_mut()[field::CHECKSUM], value)
    }

    /// Set the urgent pointer field.
    #[inline]
    pub fn set_urgent_at(&mut self, value: u16) {
        byte_order::write_u16(&mut self.buffer.as_mut()[field::URGENT], value)
    }

    fn set_flag(&mut self, flag: Flags, value: bool) {
        let mut flags = self.flags();
        flags.set(flag, value);
        self.set_flags(flags);
    }

    /// Set the FIN flag.
    pub fn set_fin(&mut self, value: bool) {
        self.set_flag(Flags::FIN, value)
    }

    /// Set the SYN flag.
    pub fn set_syn(&mut self, value: bool) {
        self.set_flag(Flags::SYN, value)
    }

    /// Set the RST flag.
    pub fn set_rst(&mut self, value: bool) {
        self.set_flag(Flags::RST, value)
    }

    /// Set the PSH flag.
    pub fn set_psh(&mut self, value: bool) {
        self.set_flag(Flags::PSH, value)
    }

    /// Set the ACK flag.
    pub fn set_ack(&mut self, value: bool) {
        self.set_flag(Flags::ACK, value)
    }

    /// Set the URG flag.
    pub fn set_urg(&mut self, value: bool) {
        self.set_flag(Flags::URG, value)
    }

    /// Set the ECE flag.
    pub fn set_ece(&mut self, value: bool) {
        self.set_flag(Flags::ECE, value)
    }

    /// Set the CWR flag.
    pub fn set_cwr(&mut self, value: bool) {
        self.set_flag(Flags::CWR, value)
    }

    /// Return the bytes following the fixed header as a mutable slice.
    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.buffer.as_mut()[field::PAYLOAD]
    }
}

impl<'a> Packet<&'a [u8]> {
    /// Return the bytes following the fixed header, for the whole lifetime of the buffer.
    pub fn payload_bytes(&self) -> &'a [u8] {
        &self.buffer[field::PAYLOAD]
    }
}

fixed_header_view!(Packet, HEADER_LEN);

impl<T: AsRef<[u8]>> fmt::Display for Packet<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TCP src={} dst={} seq={} ack={} flags={} win={}",
               self.src_port(), self.dst_port(),
               self.seq_number(), self.ack_number(),
               self.flags(), self.window_len())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wire::{Error, HeaderView};

    static PACKET_BYTES: [u8; 20] =
        [0xea, 0x3e, 0x01, 0xbb,
         0x67, 0xac, 0xec, 0x00,
         0x78, 0xff, 0x15, 0xf6,
         0x80, 0x10, 0x10, 0x15,
         0xc4, 0xf0, 0x00, 0x00];

    #[test]
    fn test_deconstruct() {
        let packet = Packet::new_checked(&PACKET_BYTES[..]).unwrap();
        assert_eq!(packet.len(), 20);
        assert_eq!(packet.src_port(), 59966);
        assert_eq!(packet.dst_port(), 443);
        assert_eq!(packet.seq_number(), 0x67ac_ec00);
        assert_eq!(packet.ack_number(), 0x78ff_15f6);
        assert_eq!(packet.header_len(), 32);
        assert_eq!(packet.flags(), Flags::ACK);
        assert!(packet.ack());
        assert!(!packet.syn() && !packet.fin() && !packet.rst() && !packet.psh());
        assert_eq!(packet.window_len(), 0x1015);
        assert_eq!(packet.checksum(), 0xc4f0);
        assert_eq!(packet.urgent_at(), 0);
        assert!(packet.payload().is_empty());
    }

    #[test]
    fn test_construct() {
        let mut packet = Packet::new();
        assert_eq!(packet.len(), 20);
        assert_eq!(packet.header_bytes(), &[0; 20][..]);

        packet.set_src_port(59966);
        packet.set_dst_port(443);
        packet.set_seq_number(0x67ac_ec00);
        packet.set_ack_number(0x78ff_15f6);
        packet.set_header_len(32).unwrap();
        packet.set_ack(true);
        packet.set_window_len(0x1015);
        packet.set_checksum(0xc4f0);
        packet.set_urgent_at(0);
        assert_eq!(packet.header_bytes(), &PACKET_BYTES[..]);
        // Options are never part of the view.
        assert_eq!(packet.len(), 20);
    }

    #[test]
    fn test_header_len_range() {
        let mut packet = Packet::new();
        packet.set_header_len(60).unwrap();
        assert_eq!(packet.header_len(), 60);
        packet.set_header_len(20).unwrap();
        assert_eq!(packet.header_len(), 20);

        assert_eq!(packet.set_header_len(64), Err(Error::Malformed));
        assert_eq!(packet.set_header_len(22), Err(Error::Malformed));
        assert_eq!(packet.set_header_len(16), Err(Error::Malformed));
        assert_eq!(packet.header_len(), 20);
    }

    #[test]
    fn test_flags() {
        let mut packet = Packet::new();
        packet.set_syn(true);
        packet.set_ack(true);
        assert_eq!(packet.flags(), Flags::SYN | Flags::ACK);
        assert_eq!(packet.flags().to_string(), "SYN|ACK");
        packet.set_syn(false);
        packet.set_fin(true);
        packet.set_cwr(true);
        assert!(packet.fin() && packet.ack() && packet.cwr());
        assert!(!packet.syn());
        packet.set_flags(Flags::default());
        assert!(packet.flags().is_empty());
        assert_eq!(packet.flags().to_string(), "-");
    }

    #[test]
    fn test_truncated() {
        assert_eq!(Packet::new_checked(&PACKET_BYTES[..19]), Err(Error::Truncated));
    }
}
