//! RFID Reader Wire Protocol
//!
//! This crate describes the frames emitted by the 125 kHz RFID reader
//! module each time a tag enters its field. Every frame is exactly 14 bytes
//! on the serial line:
//!
//! ```text
//! ┌───────┬────────┬──────────────┬──────────┬─────┐
//! │ START │ HEADER │ DATA         │ CHECKSUM │ END │
//! │ 0x02  │ 2B     │ 8B ASCII hex │ 2B       │0x03 │
//! └───────┴────────┴──────────────┴──────────┴─────┘
//! ```
//!
//! The DATA region carries the 32-bit tag code as eight hexadecimal digits,
//! most significant first. The header and checksum are carried through but
//! never interpreted.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod hex;

pub use frame::{
    Frame, TagCode, CHECKSUM_LEN, CHECKSUM_OFFSET, DATA_LEN, DATA_OFFSET, END_FLAG, FRAME_LEN,
    HEADER_LEN, START_FLAG,
};
pub use hex::{decode_hex_lenient, decode_hex_strict, DecodeError};
