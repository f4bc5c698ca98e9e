//! Edge-capture task
//!
//! Publishes the inter-pulse period on every rising edge of the pulse
//! waveform. Work per edge is bounded: read the elapsed ticks, reset the
//! reference, store, done. If edges stop, the cell simply goes stale; the
//! report loop's staleness policy notices.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Instant;
use portable_atomic::Ordering;

use crate::channels::{LAST_CAPTURE_MS, PULSE_PERIOD_TICKS};

/// Capture ticks per microsecond for the period cell
///
/// The period cell counts embassy-time microseconds; the time base handed
/// to the aggregator must agree with this.
pub const CAPTURE_TICKS_PER_US: u32 = 1;

/// Edge capture task - measures positive-edge-to-positive-edge periods
#[embassy_executor::task]
pub async fn edge_capture_task(mut pulse_in: Input<'static>) {
    info!("Edge capture task started");

    let mut previous_edge: Option<Instant> = None;
    loop {
        pulse_in.wait_for_rising_edge().await;
        let now = Instant::now();

        // The first edge only establishes the reference point
        if let Some(previous) = previous_edge {
            let ticks = (now - previous).as_micros() as u32 * CAPTURE_TICKS_PER_US;
            PULSE_PERIOD_TICKS.store(ticks, Ordering::Relaxed);
        }
        LAST_CAPTURE_MS.store(now.as_millis() as u32, Ordering::Relaxed);
        previous_edge = Some(now);
    }
}
