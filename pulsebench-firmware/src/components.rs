//! Board-facing adapters binding embassy-rp peripherals to the driver seams

use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::{Input, Output};
use embassy_time::Delay;

use pulsebench_drivers::{AdcReader, BitBangReader, PpgProbe};

/// Blocking ADC adapter for the probe's analog channel
pub struct RigAdc {
    adc: Adc<'static, Blocking>,
    channel: Channel<'static>,
}

impl RigAdc {
    /// Bind the ADC peripheral to the photodetector channel
    pub fn new(adc: Adc<'static, Blocking>, channel: Channel<'static>) -> Self {
        Self { adc, channel }
    }
}

impl AdcReader for RigAdc {
    fn read(&mut self) -> Result<u16, ()> {
        self.adc.blocking_read(&mut self.channel).map_err(|_| ())
    }
}

/// Concrete probe type owned by the presence task
pub type RigProbe = PpgProbe<RigAdc, Output<'static>, Delay>;

/// Concrete reader type owned by the report task
pub type AuxReader = BitBangReader<Output<'static>, Input<'static>, Delay>;
