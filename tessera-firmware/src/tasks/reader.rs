//! RFID reader task
//!
//! Drains the UART into a receive ring and parses frames out of it on a
//! fixed tick.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::{Duration, Ticker};

use tessera_drivers::PacketReader;
use tessera_hal::RingStream;
use tessera_protocol::TagCode;

use crate::channels::TAG_CHANNEL;
use crate::config::{POLL_INTERVAL_MS, RING_SIZE};

/// Reader task - polls the reader module and forwards tag codes
#[embassy_executor::task]
pub async fn reader_task(rx: BufferedUartRx) {
    info!("Reader task started");

    let mut stream: RingStream<BufferedUartRx, RING_SIZE> = RingStream::new(rx);
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;

        // Bytes moved before a receiver error are still in the ring, so the
        // drain below runs regardless of the poll result
        match stream.poll() {
            Ok(0) => {}
            Ok(n) => trace!("RX: {} bytes", n),
            Err(e) => warn!("UART read error: {:?}", e),
        }

        let mut reader = PacketReader::new(&mut stream);

        let drained = reader.drain(|code| {
            let code = TagCode(code);
            debug!("Frame decoded: {}", code);
            if TAG_CHANNEL.try_send(code).is_err() {
                warn!("Tag channel full, dropping {}", code);
            }
        });

        if let Err(e) = drained {
            warn!("Frame read error: {:?}, flushing", e);
            if let Err(e) = reader.flush() {
                warn!("Flush failed: {:?}", e);
            }
        }
    }
}
