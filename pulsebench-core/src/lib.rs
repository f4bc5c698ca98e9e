//! Board-agnostic core logic for the Pulsebench rig firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - BPM aggregation (bounded history, duplicate/outlier rejection)
//! - Pulse presence detection with hysteresis
//! - Capture staleness policy
//! - Console report formatting
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod bpm;
pub mod capture;
pub mod config;
pub mod presence;
pub mod report;
