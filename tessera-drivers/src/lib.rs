//! Hardware driver implementations
//!
//! This crate provides drivers that sit on top of the byte stream
//! abstraction in `tessera-hal`:
//!
//! - RFID reader module (14-byte ASCII-hex frames over UART)
//! - Repeat suppression for tags held in the reader's field

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod rfid;

pub use rfid::{Error, PacketReader, ReaderState, RepeatFilter};
