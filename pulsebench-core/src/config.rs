//! Configuration type definitions
//!
//! Every tunable of the acquisition pipeline lives here as a named field
//! with a build-time default. The rig has no persisted configuration; a
//! board crate overrides fields at construction where its hardware differs.

/// Capacity of the BPM history window
pub const BPM_HISTORY_LEN: usize = 5;

/// Presence detection thresholds
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PresenceConfig {
    /// Minimum reflected level while excitation is asserted
    pub presence_threshold: u16,
    /// Minimum off-minus-on contrast between the two samples
    pub contrast_threshold: u16,
    /// Disqualifying ticks tolerated before presence drops
    pub max_misses: u8,
    /// Settle time between the on and off samples (µs)
    pub settle_us: u32,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            presence_threshold: 1500,
            contrast_threshold: 80,
            max_misses: 2,
            settle_us: 50,
        }
    }
}

/// Acceptance bounds for BPM samples and averages
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BpmConfig {
    /// Lowest plausible BPM
    pub lower: f32,
    /// Highest plausible BPM
    pub upper: f32,
}

impl BpmConfig {
    /// Check whether a value lies strictly inside the acceptance band
    pub fn accepts(&self, bpm: f32) -> bool {
        bpm > self.lower && bpm < self.upper
    }
}

impl Default for BpmConfig {
    fn default() -> Self {
        Self {
            lower: 40.0,
            upper: 150.0,
        }
    }
}

/// Relation between capture-timer ticks and wall time
///
/// The capture cell holds raw timer ticks; conversion to BPM needs the
/// timer rate. The embassy time driver ticks at 1 MHz; a dedicated capture
/// timer often runs faster (a 40 MHz wide timer gives 40 ticks/µs).
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeBase {
    /// Capture timer ticks per microsecond (non-zero)
    pub ticks_per_us: u32,
}

impl Default for TimeBase {
    fn default() -> Self {
        Self { ticks_per_us: 1 }
    }
}
