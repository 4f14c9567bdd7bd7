//! Tag task
//!
//! Receives decoded tag codes and reports each scan once.

use defmt::*;
use embassy_time::Instant;

use tessera_drivers::RepeatFilter;

use crate::channels::TAG_CHANNEL;
use crate::config::REPEAT_WINDOW_MS;

/// Tag task - reports scans, suppressing retransmissions of a held tag
#[embassy_executor::task]
pub async fn tag_task() {
    info!("Tag task started");

    let mut filter = RepeatFilter::new(REPEAT_WINDOW_MS);

    loop {
        let code = TAG_CHANNEL.receive().await;
        let now_ms = Instant::now().as_millis();

        if filter.accept(code, now_ms) {
            info!("Tag scanned: {} ({=u32})", code, code.as_u32());
        } else {
            trace!("Repeat of {}", code);
        }
    }
}
