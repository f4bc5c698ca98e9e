//! Bit-banged synchronous serial reader
//!
//! Software master for the auxiliary sensor's two-wire link: the peer
//! drives a data line, this side drives the clock. The peer raises data as
//! a ready signal, then presents one bit per clock-high window, MSB first.
//! A final longer clock pulse with no sample strobes the peer back to idle.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

/// Width of the transferred word in bits
pub const WORD_BITS: usize = 24;

/// Link timing parameters
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitBangConfig {
    /// Clock-high settle time before sampling the data line (µs)
    pub settle_us: u32,
    /// Clock-low hold time between bits (µs)
    pub hold_us: u32,
    /// High time of the terminating strobe (µs)
    pub strobe_us: u32,
    /// Interval between ready-line polls (µs)
    pub ready_poll_us: u32,
    /// Total budget for the ready wait (µs)
    pub ready_timeout_us: u32,
}

impl Default for BitBangConfig {
    fn default() -> Self {
        Self {
            settle_us: 3,
            hold_us: 1,
            strobe_us: 10,
            ready_poll_us: 10,
            ready_timeout_us: 100_000,
        }
    }
}

/// Errors raised by a word read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadError {
    /// Peer never raised the ready signal within the timeout
    NoResponse,
    /// Clock or data pin failure
    Pin,
}

/// Synchronous serial master over a clock-out / data-in pin pair
pub struct BitBangReader<CLK, DATA, D> {
    clk: CLK,
    data: DATA,
    delay: D,
    config: BitBangConfig,
}

impl<CLK: OutputPin, DATA: InputPin, D: DelayNs> BitBangReader<CLK, DATA, D> {
    /// Create a reader; the clock line is assumed idle-low
    pub fn new(clk: CLK, data: DATA, delay: D, config: BitBangConfig) -> Self {
        Self {
            clk,
            data,
            delay,
            config,
        }
    }

    /// Read one word from the peer
    ///
    /// Bits are shifted in MSB first: the accumulator shifts left before
    /// each sampled bit is or-ed in, so the first bit on the wire lands in
    /// bit 23. Swapping the convention means moving the shift after the
    /// combine; the scripted-waveform test pins the current mapping.
    pub fn read_word(&mut self) -> Result<u32, ReadError> {
        self.wait_ready()?;

        let mut word: u32 = 0;
        for _ in 0..WORD_BITS {
            self.clk.set_high().map_err(|_| ReadError::Pin)?;
            self.delay.delay_us(self.config.settle_us);

            let bit = self.data.is_high().map_err(|_| ReadError::Pin)?;
            word = (word << 1) | bit as u32;

            self.clk.set_low().map_err(|_| ReadError::Pin)?;
            self.delay.delay_us(self.config.hold_us);
        }

        // Terminating strobe, nothing sampled
        self.clk.set_high().map_err(|_| ReadError::Pin)?;
        self.delay.delay_us(self.config.strobe_us);
        self.clk.set_low().map_err(|_| ReadError::Pin)?;
        self.delay.delay_us(self.config.hold_us);

        Ok(word)
    }

    /// Poll the data line as a ready signal, bounded by the timeout budget
    fn wait_ready(&mut self) -> Result<(), ReadError> {
        // a zero poll interval would never consume the budget
        let poll_us = self.config.ready_poll_us.max(1);
        let mut waited_us: u32 = 0;
        while !self.data.is_high().map_err(|_| ReadError::Pin)? {
            if waited_us >= self.config.ready_timeout_us {
                return Err(ReadError::NoResponse);
            }
            self.delay.delay_us(poll_us);
            waited_us = waited_us.saturating_add(poll_us);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;

    /// Clock pin counting rising edges
    struct MockClock {
        high: bool,
        rising_edges: u32,
    }

    impl MockClock {
        fn new() -> Self {
            Self {
                high: false,
                rising_edges: 0,
            }
        }
    }

    impl embedded_hal::digital::ErrorType for MockClock {
        type Error = Infallible;
    }

    impl OutputPin for MockClock {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if !self.high {
                self.rising_edges += 1;
            }
            self.high = true;
            Ok(())
        }
    }

    /// Data line replaying a scripted level sequence, one level per poll
    struct ScriptedData<'a> {
        levels: &'a [bool],
        pos: usize,
    }

    impl<'a> ScriptedData<'a> {
        fn new(levels: &'a [bool]) -> Self {
            Self { levels, pos: 0 }
        }
    }

    impl embedded_hal::digital::ErrorType for ScriptedData<'_> {
        type Error = Infallible;
    }

    impl InputPin for ScriptedData<'_> {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            let level = match self.levels.get(self.pos) {
                Some(&level) => level,
                None => *self.levels.last().unwrap_or(&false),
            };
            self.pos += 1;
            Ok(level)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.is_high().map(|high| !high)
        }
    }

    /// Delay provider accumulating requested time
    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    /// Build the poll sequence for a word: ready assertion plus 24 bits,
    /// MSB first.
    fn script_word(word: u32) -> [bool; WORD_BITS + 1] {
        let mut levels = [false; WORD_BITS + 1];
        levels[0] = true; // ready
        for (i, level) in levels[1..].iter_mut().enumerate() {
            *level = word & (1 << (WORD_BITS - 1 - i)) != 0;
        }
        levels
    }

    fn reader<'a>(
        levels: &'a [bool],
    ) -> BitBangReader<MockClock, ScriptedData<'a>, CountingDelay> {
        BitBangReader::new(
            MockClock::new(),
            ScriptedData::new(levels),
            CountingDelay { total_ns: 0 },
            BitBangConfig::default(),
        )
    }

    #[test]
    fn test_word_assembled_msb_first() {
        let levels = script_word(0x00A5_3C96);
        let mut reader = reader(&levels);
        assert_eq!(reader.read_word(), Ok(0x00A5_3C96));
    }

    #[test]
    fn test_all_ones_word() {
        let levels = script_word(0x00FF_FFFF);
        let mut reader = reader(&levels);
        assert_eq!(reader.read_word(), Ok(0x00FF_FFFF));
    }

    #[test]
    fn test_single_trailing_bit_lands_in_bit_zero() {
        let levels = script_word(0x0000_0001);
        let mut reader = reader(&levels);
        assert_eq!(reader.read_word(), Ok(1));
    }

    #[test]
    fn test_clock_count_includes_strobe() {
        let levels = script_word(0x0012_3456);
        let mut reader = reader(&levels);
        reader.read_word().unwrap();
        // one rising edge per bit plus the terminating strobe
        assert_eq!(reader.clk.rising_edges, WORD_BITS as u32 + 1);
        assert!(!reader.clk.high);
    }

    #[test]
    fn test_delayed_ready_still_reads() {
        let mut levels = [false; 4 + WORD_BITS + 1];
        levels[4] = true; // ready after four idle polls
        let word = 0x0055_AA55;
        for i in 0..WORD_BITS {
            levels[5 + i] = word & (1 << (WORD_BITS - 1 - i)) != 0;
        }
        let mut reader = reader(&levels);
        assert_eq!(reader.read_word(), Ok(word));
    }

    #[test]
    fn test_unresponsive_peer_times_out() {
        let levels = [false];
        let mut reader = reader(&levels);
        assert_eq!(reader.read_word(), Err(ReadError::NoResponse));
        // the clock line was never exercised
        assert_eq!(reader.clk.rising_edges, 0);
        // the wait consumed the whole budget before giving up
        let config = BitBangConfig::default();
        assert!(reader.delay.total_ns >= config.ready_timeout_us as u64 * 1_000);
    }
}
