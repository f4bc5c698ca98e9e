//! Foreground report loop
//!
//! Polls the shared cells, feeds the aggregator, gates console output on
//! presence and capture freshness, and drives the auxiliary bit-banged
//! sensor. This is the only place the pipeline's error values surface.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};
use portable_atomic::Ordering;

use pulsebench_core::bpm::{ticks_to_bpm, BpmHistory};
use pulsebench_core::capture::{CaptureMonitor, SignalStatus};
use pulsebench_core::config::{BpmConfig, TimeBase};
use pulsebench_core::presence::PresenceState;
use pulsebench_core::report::Report;
use pulsebench_drivers::ReadError;

use crate::channels::{LAST_CAPTURE_MS, PRESENCE, PULSE_PERIOD_TICKS};
use crate::components::AuxReader;
use crate::console::Console;

/// Reporting cadence
pub const REPORT_INTERVAL_MS: u64 = 500;

/// Slack added to the staleness ceiling for scheduling jitter
const STALENESS_SLACK_MS: u32 = 100;

/// Report task - the foreground loop of the rig
#[embassy_executor::task]
pub async fn report_task(
    mut console: Console,
    mut aux_reader: AuxReader,
    bpm_config: BpmConfig,
    time_base: TimeBase,
) {
    info!("Report task started");

    let mut history = BpmHistory::new(bpm_config);
    let monitor = CaptureMonitor::new(&bpm_config, STALENESS_SLACK_MS);
    let mut presence = PresenceState::default();
    let mut ticker = Ticker::every(Duration::from_millis(REPORT_INTERVAL_MS));

    loop {
        ticker.next().await;

        if let Some(state) = PRESENCE.try_take() {
            presence = state;
        }

        if presence.present {
            report_bpm(&mut console, &mut history, &monitor, &bpm_config, &time_base);
        } else {
            console.emit(&Report::NotDetected);
        }

        if cfg!(feature = "aux_sensor") {
            match aux_reader.read_word() {
                Ok(word) => console.emit(&Report::AuxWord(word)),
                Err(ReadError::NoResponse) => warn!("aux sensor: no response"),
                Err(e) => warn!("aux sensor fault: {:?}", e),
            }
        }
    }
}

/// One BPM reporting round while presence holds
fn report_bpm(
    console: &mut Console,
    history: &mut BpmHistory,
    monitor: &CaptureMonitor,
    bpm_config: &BpmConfig,
    time_base: &TimeBase,
) {
    let since_capture_ms =
        (Instant::now().as_millis() as u32).wrapping_sub(LAST_CAPTURE_MS.load(Ordering::Relaxed));
    if monitor.classify(since_capture_ms) == SignalStatus::NoSignal {
        console.emit(&Report::NoSignal);
        return;
    }

    let ticks = PULSE_PERIOD_TICKS.load(Ordering::Relaxed);
    let bpm = ticks_to_bpm(ticks, time_base.ticks_per_us);
    history.insert(bpm);

    match history.average() {
        Ok(avg) if bpm_config.accepts(avg) => {
            console.emit(&Report::Beat(bpm));
            console.emit(&Report::Average(avg));

            #[cfg(feature = "dump_history")]
            for &slot in history.slots() {
                console.emit(&Report::HistorySlot(slot));
            }
        }
        _ => console.emit(&Report::NotDetected),
    }
}
