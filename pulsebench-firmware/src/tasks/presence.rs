//! Presence sampling task
//!
//! Runs the optical probe once per tick, feeds the detector, and publishes
//! the resulting snapshot. The excitation LED is parked at the detector's
//! demanded level between ticks, so it doubles as the contact indicator.

use defmt::*;
use embassy_time::{Duration, Ticker};

use pulsebench_core::config::PresenceConfig;
use pulsebench_core::presence::PresenceDetector;

use crate::channels::PRESENCE;
use crate::components::RigProbe;

/// Sampling cadence
///
/// The excitation pulse itself lasts microseconds; the tick interval only
/// bounds how quickly removal is noticed (miss budget × tick interval).
pub const PRESENCE_TICK_MS: u64 = 100;

/// Presence sampling task - periodic contact detection with hysteresis
#[embassy_executor::task]
pub async fn presence_task(mut probe: RigProbe, config: PresenceConfig) {
    info!("Presence task started");

    let mut detector = PresenceDetector::new(config);
    let mut ticker = Ticker::every(Duration::from_millis(PRESENCE_TICK_MS));

    loop {
        ticker.next().await;

        match probe.sample() {
            Ok(sample) => {
                let state = detector.update(sample);
                if probe.set_excitation(state.present).is_err() {
                    warn!("excitation pin fault");
                }
                PRESENCE.signal(state);
            }
            Err(e) => warn!("probe sampling fault: {:?}", e),
        }
    }
}
