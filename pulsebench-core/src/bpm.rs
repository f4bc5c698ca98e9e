//! BPM aggregation
//!
//! Converts captured pulse periods to BPM and maintains a bounded circular
//! history with outlier and duplicate rejection, plus a running average.

use crate::config::{BpmConfig, BPM_HISTORY_LEN};

/// Sentinel marking an unused history slot
const EMPTY_SLOT: f32 = 0.0;

/// Errors from the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BpmError {
    /// History holds no accepted samples yet
    InsufficientData,
}

/// Convert a captured inter-pulse period to BPM
///
/// `period_ticks` is the raw capture-timer count between consecutive rising
/// edges; `ticks_per_us` is the timer rate. A period of 0 yields 0.0, which
/// the acceptance band drops downstream.
pub fn ticks_to_bpm(period_ticks: u32, ticks_per_us: u32) -> f32 {
    if ticks_per_us == 0 {
        return 0.0;
    }
    let micros = period_ticks as f32 / ticks_per_us as f32;
    let seconds = micros / 1_000_000.0;
    seconds * 60.0
}

/// Bounded circular history of accepted BPM samples
///
/// Slots hold [`EMPTY_SLOT`] until written; the acceptance band keeps 0.0
/// unreachable for real samples, so the sentinel never collides with data.
#[derive(Debug)]
pub struct BpmHistory {
    slots: [f32; BPM_HISTORY_LEN],
    cursor: usize,
    config: BpmConfig,
}

impl BpmHistory {
    /// Create an empty history
    pub fn new(config: BpmConfig) -> Self {
        Self {
            slots: [EMPTY_SLOT; BPM_HISTORY_LEN],
            cursor: 0,
            config,
        }
    }

    /// Offer a sample to the history
    ///
    /// Rejected (returns `false`, history untouched) when the value falls
    /// outside the acceptance band, or when it equals the previously written
    /// value. Otherwise the sample lands at the cursor and the cursor
    /// advances modulo capacity.
    pub fn insert(&mut self, bpm: f32) -> bool {
        if !self.config.accepts(bpm) {
            return false;
        }

        let prev = (self.cursor + BPM_HISTORY_LEN - 1) % BPM_HISTORY_LEN;
        if self.slots[prev] == bpm {
            return false;
        }

        self.slots[self.cursor] = bpm;
        self.cursor = (self.cursor + 1) % BPM_HISTORY_LEN;
        true
    }

    /// Running average over the occupied slots
    pub fn average(&self) -> Result<f32, BpmError> {
        let mut sum = 0.0f32;
        let mut count = 0u32;
        for &slot in &self.slots {
            if slot != EMPTY_SLOT {
                sum += slot;
                count += 1;
            }
        }
        if count == 0 {
            return Err(BpmError::InsufficientData);
        }
        Ok(sum / count as f32)
    }

    /// Raw slot contents, empty slots included (console dumps)
    pub fn slots(&self) -> &[f32] {
        &self.slots
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|&&s| s != EMPTY_SLOT).count()
    }

    /// Whether no sample has been accepted yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
