//! Hardware driver implementations
//!
//! This crate provides the hardware-touching halves of the acquisition
//! pipeline, generic over `embedded-hal` traits so they run against any
//! board HAL and against scripted mocks on the host:
//!
//! - Optical pulse probe (excitation + paired analog sampling)
//! - Bit-banged synchronous serial reader (auxiliary sensor)

#![no_std]
#![deny(unsafe_code)]

pub mod bitbang;
pub mod ppg;

pub use bitbang::{BitBangConfig, BitBangReader, ReadError};
pub use ppg::{AdcReader, PpgProbe, ProbeError};
