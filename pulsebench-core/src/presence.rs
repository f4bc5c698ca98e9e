//! Pulse presence detection
//!
//! Decides whether the optical probe is in contact with tissue from a pair
//! of analog samples taken around an excitation pulse. A miss budget keeps
//! single noisy ticks from dropping presence while sustained signal loss
//! still clears it promptly.

use crate::config::PresenceConfig;

/// One excitation sampling round: reflected level with the excitation LED
/// asserted, then again after it was de-asserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PresenceSample {
    /// Analog level with excitation asserted
    pub level_on: u16,
    /// Analog level after excitation de-asserted
    pub level_off: u16,
}

impl PresenceSample {
    /// Off-minus-on contrast; positive when the probe sees the excitation
    pub fn contrast(&self) -> i32 {
        self.level_off as i32 - self.level_on as i32
    }
}

/// Snapshot of the detector state, cheap to publish across tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PresenceState {
    /// Probe currently considered in contact
    pub present: bool,
    /// Consecutive disqualifying ticks since presence was last confirmed
    pub miss_count: u8,
}

/// Hysteresis state machine over periodic presence samples
#[derive(Debug)]
pub struct PresenceDetector {
    state: PresenceState,
    config: PresenceConfig,
}

impl PresenceDetector {
    /// Create a detector in the absent state
    pub fn new(config: PresenceConfig) -> Self {
        Self {
            state: PresenceState::default(),
            config,
        }
    }

    /// Consume one sampling round and return the updated state
    ///
    /// A qualifying sample confirms presence and zeroes the miss count.
    /// A disqualifying sample only matters while present: it burns one miss,
    /// and presence drops once the budget (`max_misses`) is exhausted.
    /// While absent, disqualifying samples change nothing, so a single
    /// noisy tick cannot flicker the state.
    pub fn update(&mut self, sample: PresenceSample) -> PresenceState {
        let qualified = sample.level_on > self.config.presence_threshold
            && sample.contrast() > self.config.contrast_threshold as i32;

        if qualified {
            self.state.present = true;
            self.state.miss_count = 0;
        } else if self.state.present {
            self.state.miss_count = self.state.miss_count.saturating_add(1);
            if self.state.miss_count > self.config.max_misses {
                self.state.present = false;
                self.state.miss_count = 0;
            }
        }

        self.state
    }

    /// Whether the probe is currently considered in contact
    ///
    /// Doubles as the demanded excitation level: the LED stays asserted
    /// between ticks while presence holds and is released when it drops.
    pub fn is_present(&self) -> bool {
        self.state.present
    }

    /// Current state snapshot
    pub fn state(&self) -> PresenceState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> PresenceDetector {
        PresenceDetector::new(PresenceConfig::default())
    }

    const GOOD: PresenceSample = PresenceSample {
        level_on: 1600,
        level_off: 1700,
    };
    const WEAK: PresenceSample = PresenceSample {
        level_on: 1000,
        level_off: 1050,
    };

    #[test]
    fn test_qualifying_sample_confirms_presence() {
        let mut det = detector();
        let state = det.update(GOOD);
        assert!(state.present);
        assert_eq!(state.miss_count, 0);
    }

    #[test]
    fn test_weak_sample_keeps_absent() {
        let mut det = detector();
        let state = det.update(WEAK);
        assert!(!state.present);
        assert_eq!(state.miss_count, 0);
    }

    #[test]
    fn test_level_alone_insufficient() {
        // bright but flat: level passes, contrast does not
        let mut det = detector();
        det.update(PresenceSample {
            level_on: 1600,
            level_off: 1650,
        });
        assert!(!det.is_present());
    }

    #[test]
    fn test_miss_budget_holds_presence() {
        let mut det = detector();
        det.update(GOOD);

        // two disqualifying ticks stay inside the budget
        assert!(det.update(WEAK).present);
        assert!(det.update(WEAK).present);

        // the third drops presence
        let state = det.update(WEAK);
        assert!(!state.present);
        assert_eq!(state.miss_count, 0);
    }

    #[test]
    fn test_reconfirm_resets_miss_count() {
        let mut det = detector();
        det.update(GOOD);
        det.update(WEAK);
        det.update(WEAK);
        assert_eq!(det.state().miss_count, 2);

        let state = det.update(GOOD);
        assert!(state.present);
        assert_eq!(state.miss_count, 0);

        // full budget is available again
        assert!(det.update(WEAK).present);
        assert!(det.update(WEAK).present);
    }

    #[test]
    fn test_negative_contrast_disqualifies() {
        let mut det = detector();
        det.update(PresenceSample {
            level_on: 1700,
            level_off: 1600,
        });
        assert!(!det.is_present());
    }
}
