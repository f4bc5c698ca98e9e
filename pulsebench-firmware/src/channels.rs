//! Inter-task communication cells
//!
//! The interrupt-equivalent producers publish into single-slot cells read
//! by the foreground report loop: atomics for the scalar capture data, a
//! signal for presence snapshots. Each cell has one writer and one reader.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicU32;

use pulsebench_core::presence::PresenceState;

/// Latest inter-pulse period in capture ticks, overwritten on every edge
pub static PULSE_PERIOD_TICKS: AtomicU32 = AtomicU32::new(0);

/// Wrapping millisecond timestamp of the most recent edge capture
pub static LAST_CAPTURE_MS: AtomicU32 = AtomicU32::new(0);

/// Latest presence snapshot from the detector
pub static PRESENCE: Signal<CriticalSectionRawMutex, PresenceState> = Signal::new();
