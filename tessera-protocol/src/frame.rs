//! Frame layout and encoding for the RFID reader protocol.
//!
//! Frame format:
//! - START (1 byte): 0x02
//! - HEADER (2 bytes): reader-specific, ignored
//! - DATA (8 bytes): tag code as ASCII hex, most significant digit first
//! - CHECKSUM (2 bytes): carried but not verified
//! - END (1 byte): 0x03

use core::fmt;

use heapless::{String, Vec};

/// Start-of-frame flag
pub const START_FLAG: u8 = 0x02;

/// End-of-frame flag
pub const END_FLAG: u8 = 0x03;

/// Header bytes between START and DATA
pub const HEADER_LEN: usize = 2;

/// ASCII hex digits in the DATA region
pub const DATA_LEN: usize = 8;

/// Checksum bytes between DATA and END
pub const CHECKSUM_LEN: usize = 2;

/// Complete frame size on the wire
pub const FRAME_LEN: usize = 14;

/// Offset of the DATA region within a frame
pub const DATA_OFFSET: usize = 1 + HEADER_LEN;

/// Offset of the CHECKSUM region within a frame
pub const CHECKSUM_OFFSET: usize = DATA_OFFSET + DATA_LEN;

const _: () = assert!(1 + HEADER_LEN + DATA_LEN + CHECKSUM_LEN + 1 == FRAME_LEN);

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Encode a value as eight upper-case ASCII hex digits
fn encode_hex(value: u32) -> [u8; DATA_LEN] {
    let mut out = [0u8; DATA_LEN];
    for (i, slot) in out.iter_mut().enumerate() {
        let shift = (DATA_LEN - 1 - i) * 4;
        *slot = HEX_DIGITS[((value >> shift) & 0xF) as usize];
    }
    out
}

/// Identifier of a scanned tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TagCode(pub u32);

impl TagCode {
    /// Raw 32-bit value
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// The code as it appears in the DATA region
    pub fn to_hex(self) -> String<DATA_LEN> {
        let mut text = String::new();
        for digit in encode_hex(self.0) {
            // Capacity matches the digit count
            let _ = text.push(digit as char);
        }
        text
    }
}

impl From<u32> for TagCode {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<TagCode> for u32 {
    fn from(code: TagCode) -> Self {
        code.0
    }
}

impl fmt::Display for TagCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TagCode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "TagCode({=u32:08X})", self.0);
    }
}

/// A frame as the reader module would send it
///
/// Mostly useful for simulating a reader and for tests; the packet reader
/// never materializes frames.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Header bytes, ignored by the receiver
    pub header: [u8; HEADER_LEN],
    /// Tag code carried in the DATA region
    pub code: TagCode,
    /// Checksum bytes, ignored by the receiver
    pub checksum: [u8; CHECKSUM_LEN],
}

impl Frame {
    /// Create a frame for `code` with an all-zero ASCII header and checksum
    pub fn new(code: u32) -> Self {
        Self {
            header: [b'0'; HEADER_LEN],
            code: TagCode(code),
            checksum: [b'0'; CHECKSUM_LEN],
        }
    }

    /// Replace the header bytes
    pub fn with_header(mut self, header: [u8; HEADER_LEN]) -> Self {
        self.header = header;
        self
    }

    /// Replace the checksum bytes
    pub fn with_checksum(mut self, checksum: [u8; CHECKSUM_LEN]) -> Self {
        self.checksum = checksum;
        self
    }

    /// Encode this frame into its 14 wire bytes
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let mut buffer = [0u8; FRAME_LEN];
        buffer[0] = START_FLAG;
        buffer[1..DATA_OFFSET].copy_from_slice(&self.header);
        buffer[DATA_OFFSET..CHECKSUM_OFFSET].copy_from_slice(&encode_hex(self.code.0));
        buffer[CHECKSUM_OFFSET..FRAME_LEN - 1].copy_from_slice(&self.checksum);
        buffer[FRAME_LEN - 1] = END_FLAG;
        buffer
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Vec<u8, FRAME_LEN> {
        let mut vec = Vec::new();
        // Capacity is exactly one frame
        let _ = vec.extend_from_slice(&self.encode());
        vec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_layout() {
        let frame = Frame::new(0x0000_ABCD)
            .with_header(*b"1A")
            .with_checksum(*b"7F");
        let bytes = frame.encode();

        assert_eq!(bytes.len(), 14);
        assert_eq!(bytes[0], START_FLAG);
        assert_eq!(&bytes[1..3], b"1A");
        assert_eq!(&bytes[3..11], b"0000ABCD");
        assert_eq!(&bytes[11..13], b"7F");
        assert_eq!(bytes[13], END_FLAG);
    }

    #[test]
    fn test_frame_default_padding() {
        let bytes = Frame::new(0xDEAD_BEEF).encode();
        assert_eq!(&bytes, b"\x0200DEADBEEF00\x03");
    }

    #[test]
    fn test_encode_to_vec_matches_encode() {
        let frame = Frame::new(42);
        assert_eq!(frame.encode_to_vec().as_slice(), &frame.encode()[..]);
    }

    #[test]
    fn test_tag_code_hex() {
        assert_eq!(TagCode(0xABCD).to_hex().as_str(), "0000ABCD");
        assert_eq!(TagCode(u32::MAX).to_hex().as_str(), "FFFFFFFF");
        assert_eq!(TagCode(0).to_hex().as_str(), "00000000");
    }

    #[test]
    fn test_tag_code_display() {
        assert_eq!(format!("{}", TagCode(0xBEEF)), "0000BEEF");
    }

    #[test]
    fn test_tag_code_text_is_zero_padded() {
        for code in [0u32, 0xA, 0xBEEF, u32::MAX] {
            let display = format!("{}", TagCode(code));
            assert_eq!(display.len(), DATA_LEN);
            assert_eq!(display.as_str(), TagCode(code).to_hex().as_str());
        }
    }

    #[test]
    fn test_tag_code_conversions() {
        let code: TagCode = 43981.into();
        assert_eq!(code.as_u32(), 43981);
        assert_eq!(u32::from(code), 43981);
    }

    #[test]
    fn test_offsets() {
        assert_eq!(DATA_OFFSET, 3);
        assert_eq!(CHECKSUM_OFFSET, 11);
    }
}
