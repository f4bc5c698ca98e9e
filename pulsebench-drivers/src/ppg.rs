//! Reflective optical pulse probe
//!
//! Drives the excitation LED and takes the paired analog samples the
//! presence detector consumes: one with excitation asserted, one after it
//! was released, separated by a short settle delay.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use pulsebench_core::presence::PresenceSample;

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Read ADC value (12-bit, 0-4095)
    #[allow(clippy::result_unit_err)]
    fn read(&mut self) -> Result<u16, ()>;
}

/// Errors raised while sampling the probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeError {
    /// ADC conversion error
    Adc,
    /// Excitation pin failure
    Pin,
}

/// Optical probe with a software-toggled excitation LED
///
/// The LED doubles as the contact indicator: after each sampling round the
/// caller parks it at the detector's demanded level, so it stays lit while
/// presence holds.
pub struct PpgProbe<ADC, PIN, D> {
    adc: ADC,
    excitation: PIN,
    delay: D,
    /// Settle time between the on and off samples (µs)
    settle_us: u32,
}

impl<ADC: AdcReader, PIN: OutputPin, D: DelayNs> PpgProbe<ADC, PIN, D> {
    /// Create a new probe
    ///
    /// # Arguments
    /// - `adc`: analog channel watching the photodetector
    /// - `excitation`: output pin driving the excitation LED
    /// - `delay`: delay provider for the settle time
    /// - `settle_us`: settle time between the two samples
    pub fn new(adc: ADC, excitation: PIN, delay: D, settle_us: u32) -> Self {
        Self {
            adc,
            excitation,
            delay,
            settle_us,
        }
    }

    /// Run one excitation sampling round
    ///
    /// Asserts the LED, samples, waits the settle time, releases the LED
    /// and samples again. The LED is left de-asserted; callers re-park it
    /// via [`set_excitation`](Self::set_excitation) once the detector has
    /// ruled on the sample.
    pub fn sample(&mut self) -> Result<PresenceSample, ProbeError> {
        self.excitation.set_high().map_err(|_| ProbeError::Pin)?;
        let level_on = self.adc.read().map_err(|_| ProbeError::Adc)?;

        self.delay.delay_us(self.settle_us);

        self.excitation.set_low().map_err(|_| ProbeError::Pin)?;
        let level_off = self.adc.read().map_err(|_| ProbeError::Adc)?;

        Ok(PresenceSample { level_on, level_off })
    }

    /// Park the excitation LED at the given level between sampling rounds
    pub fn set_excitation(&mut self, on: bool) -> Result<(), ProbeError> {
        if on {
            self.excitation.set_high().map_err(|_| ProbeError::Pin)
        } else {
            self.excitation.set_low().map_err(|_| ProbeError::Pin)
        }
    }
}
