//! Text console writer
//!
//! Unstructured newline-terminated lines over UART0. Formatting lives in
//! pulsebench-core so the exact bytes are pinned by host tests; this side
//! only moves them onto the wire.

use defmt::warn;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{Blocking, UartTx};

use pulsebench_core::report::Report;

/// Console line writer owned by the report task
pub struct Console {
    tx: UartTx<'static, UART0, Blocking>,
}

impl Console {
    /// Wrap the console UART transmitter
    pub fn new(tx: UartTx<'static, UART0, Blocking>) -> Self {
        Self { tx }
    }

    /// Emit one report line; console faults are logged, never fatal
    pub fn emit(&mut self, report: &Report) {
        match report.line() {
            Ok(line) => {
                if self.tx.blocking_write(line.as_bytes()).is_err() {
                    warn!("console write failed");
                }
            }
            Err(_) => warn!("report line overflow"),
        }
    }
}
