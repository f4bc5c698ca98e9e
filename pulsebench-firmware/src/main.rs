//! Pulsebench - Vital-Signs Bench Rig Firmware
//!
//! Main firmware binary for RP2040-based bench rigs. Measures heart rate
//! from a reflective optical pulse sensor, watches probe contact with a
//! hysteresis detector, optionally polls an auxiliary sensor over a
//! bit-banged synchronous serial link, and reports over the text console.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use pulsebench_core::config::{BpmConfig, PresenceConfig, TimeBase};
use pulsebench_drivers::{BitBangConfig, BitBangReader, PpgProbe};

use crate::components::RigAdc;
use crate::console::Console;
use crate::tasks::edge::CAPTURE_TICKS_PER_US;

mod channels;
mod components;
mod console;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pulsebench firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Console UART (115200 baud default)
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let (tx, _rx) = uart.split();
    let console = Console::new(tx);
    info!("Console UART initialized");

    // Pulse waveform input for edge capture
    let pulse_in = Input::new(p.PIN_16, Pull::Down);

    // Optical probe: photodetector on ADC GPIO26, excitation LED on GPIO17
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let adc_channel = Channel::new_pin(p.PIN_26, Pull::None);
    let excitation = Output::new(p.PIN_17, Level::Low);
    let presence_config = PresenceConfig::default();
    let probe = PpgProbe::new(
        RigAdc::new(adc, adc_channel),
        excitation,
        Delay,
        presence_config.settle_us,
    );

    // Auxiliary sensor link: clock out on GPIO14, data in on GPIO15
    let aux_clk = Output::new(p.PIN_14, Level::Low);
    let aux_data = Input::new(p.PIN_15, Pull::Down);
    let aux_reader = BitBangReader::new(aux_clk, aux_data, Delay, BitBangConfig::default());

    let time_base = TimeBase {
        ticks_per_us: CAPTURE_TICKS_PER_US,
    };

    spawner.must_spawn(tasks::edge_capture_task(pulse_in));
    spawner.must_spawn(tasks::presence_task(probe, presence_config));
    spawner.must_spawn(tasks::report_task(
        console,
        aux_reader,
        BpmConfig::default(),
        time_base,
    ));

    info!("All tasks spawned");
}
