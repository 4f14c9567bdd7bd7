//! Tessera Hardware Abstraction Layer
//!
//! This crate defines the byte stream interface the RFID packet reader
//! consumes, plus two implementations of it that are independent of any
//! particular chip:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tessera-drivers (PacketReader)         │
//! └─────────────────────────────────────────┘
//!                     │  ByteStream
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  RingStream   │       │ MemoryStream  │
//! │ (embedded-io) │       │ (host / sim)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Types
//!
//! - [`stream::ByteStream`] - FIFO byte source with peek and fill level
//! - [`ring::RingStream`] - wraps any `embedded_io` receiver in a ring buffer
//! - [`memory::MemoryStream`] - in-memory stream that never blocks

#![no_std]
#![deny(unsafe_code)]

pub mod memory;
pub mod ring;
pub mod stream;

// Re-export key types at crate root for convenience
pub use memory::{MemoryError, MemoryStream};
pub use ring::{RingError, RingStream};
pub use stream::ByteStream;
